//! `reposite cat`: print one file as the server would send it.

use std::io::{self, Write};

use anyhow::{Result, bail};

use crate::{config::Config, debug, site::Site};

pub fn cat_file(config: &Config, path: &str) -> Result<()> {
    let site = Site::open(config)?;
    let mut stdout = io::stdout().lock();
    write_served(&site, path, &mut stdout)
}

fn write_served<W: Write>(site: &Site, path: &str, out: &mut W) -> Result<()> {
    let path = path.trim_matches('/');
    let Some(served) = site.get(path)? else {
        bail!("`{}` is not served from {}", path, site.describe());
    };

    debug!("cat"; "{} [{}]", served.path, served.fileset);
    out.write_all(&served.body)?;
    out.flush()?;
    Ok(())
}
