//! HTTP response handlers.

use anyhow::{Result, anyhow};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::{
    site::Served,
    utils::mime::{self, types::PLAIN},
};

/// Respond with a file read from the site.
pub fn respond_served(request: Request, served: Served) -> Result<()> {
    let content_type = mime::from_path(&served.path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }
    send_body(request, 200, content_type, served.body)
}

/// Respond with a permanent redirect.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let location = Header::from_bytes("Location", location.as_bytes())
        .map_err(|()| anyhow!("invalid redirect location `{location}`"))?;
    let response = Response::empty(StatusCode(301)).with_header(location);
    request.respond(response)?;
    Ok(())
}

pub fn respond_not_found(request: Request) -> Result<()> {
    send_text(request, 404, "404 Not Found")
}

/// Respond with 500; details go to the log, not the client.
pub fn respond_error(request: Request) -> Result<()> {
    send_text(request, 500, "500 Internal Server Error")
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_text(request, 503, "503 Service Unavailable")
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_text(request: Request, status: u16, text: &'static str) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, PLAIN);
    }
    send_body(request, status, PLAIN, text.as_bytes().to_vec())
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", "no-cache"));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", "no-cache"));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header names and values are ASCII")
}
