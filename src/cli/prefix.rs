//! `reposite prefix`: rewrite one HTML file to stdout.

use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{debug, log, prefix::prefix_stream};

pub fn prefix_file(file: &Path, prefix: &str) -> Result<()> {
    log!("prefix"; "{}", prefix);

    let input = File::open(file).with_context(|| format!("cannot open {}", file.display()))?;
    let mut stdout = io::stdout().lock();
    let bytes = run(input, prefix, &mut stdout)
        .with_context(|| format!("failed to rewrite {}", file.display()))?;

    debug!("prefix"; "{} bytes read from {}", bytes, file.display());
    Ok(())
}

fn run<R: Read, W: Write>(mut input: R, prefix: &str, output: &mut W) -> io::Result<u64> {
    let bytes = prefix_stream(&mut input, prefix, &mut *output)?;
    output.flush()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run() {
        let input = br#"<!doctype html><script src="/app.js"></script>"#;
        let mut out = Vec::new();

        let bytes = run(&input[..], "/base/", &mut out).unwrap();
        assert_eq!(bytes, input.len() as u64);
        assert_eq!(out, br#"<!doctype html><script src="/base/app.js"></script>"#);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = prefix_file(&dir.path().join("missing.html"), "/x").unwrap_err();
        assert!(err.to_string().contains("cannot open"));
    }
}
