//! HTTP server mounting repository content under the base path.
//!
//! ```text
//! GET /docs/guide/   ─► repo path "guide" ─► guide/index.html (pages: prefixed)
//! GET /docs/app.css  ─► repo path "app.css" ─► app.css (assets: as stored)
//! GET /elsewhere     ─► 404
//! ```

mod lifecycle;
mod path;
mod response;

pub use lifecycle::setup_shutdown_handler;

use std::sync::Arc;

use anyhow::{Context, Result};
use tiny_http::{Request, Server};

use crate::{config::Config, debug, log, site::Site};

/// Worker threads answering requests.
const REQUEST_THREADS: usize = 4;

/// Serve the configured content until Ctrl+C.
pub fn serve(config: &Config) -> Result<()> {
    let site = Arc::new(Site::open(config)?);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    log!("serve"; "{}", site.describe());
    log!("serve"; "http://{}{}/", addr, site.prefix());

    run_request_loop(&server, site)
}

fn run_request_loop(server: &Server, site: Arc<Site>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("failed to create thread pool")?;

    for request in server.incoming_requests() {
        let site = Arc::clone(&site);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &site) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, site: &Site) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_string();

    // Bare host: send visitors to the mount point
    if !site.prefix().is_empty() && path::url_path(&url) == "/" {
        return response::respond_redirect(request, &format!("{}/", site.prefix()));
    }

    let Some(repo_path) = path::repo_path(&url, site.prefix()) else {
        debug!("serve"; "{} {} outside {}/", request.method(), url, site.prefix());
        return response::respond_not_found(request);
    };

    match site.get(&repo_path) {
        Ok(Some(served)) => {
            if served.path != repo_path
                && let Some(location) =
                    path::directory_redirect(&url, site.prefix(), &repo_path)
            {
                return response::respond_redirect(request, &location);
            }
            debug!("serve"; "{} {} → {} [{}]", request.method(), url, served.path, served.fileset);
            response::respond_served(request, served)
        }
        Ok(None) => {
            debug!("serve"; "{} {} not found", request.method(), url);
            response::respond_not_found(request)
        }
        Err(e) => {
            log!("serve"; "{}: {:#}", url, e);
            response::respond_error(request)
        }
    }
}
