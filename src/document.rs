// document.rs
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info};
use std::fs;
use url::Url;

/// Fetch the raw document behind `uri`.
///
/// `file` URIs are read from disk, `http`/`https` with a blocking GET.
/// Non-UTF-8 bytes are replaced rather than rejected.
pub fn load_document(uri: &str) -> Result<String> {
    info!("Loading document {}", uri);
    let parsed = Url::parse(uri).with_context(|| format!("invalid document URI {uri}"))?;

    match parsed.scheme() {
        "file" => load_file(&parsed),
        "http" | "https" => load_http(&parsed),
        other => bail!("unsupported scheme {other:?} in {uri}"),
    }
}

fn load_file(url: &Url) -> Result<String> {
    let path = url
        .to_file_path()
        .map_err(|()| anyhow!("{url} does not name a local file"))?;
    let bytes = fs::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load_http(url: &Url) -> Result<String> {
    let response = reqwest::blocking::get(url.as_str())
        .with_context(|| format!("request to {url} failed"))?
        .error_for_status()
        .with_context(|| format!("{url} returned an error status"))?;
    let body = response
        .text()
        .with_context(|| format!("cannot read body of {url}"))?;
    debug!("Received {} bytes from {}", body.len(), url);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_file_uri() {
        let dir = std::env::temp_dir().join(format!("local-viewer-doc-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("page one.html");
        fs::write(&path, "<p>hello</p>").unwrap();
        let uri = Url::from_file_path(&path).unwrap();
        assert_eq!(load_document(uri.as_str()).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = std::env::temp_dir().join(format!("local-viewer-doc-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("latin1.html");
        fs::write(&path, b"caf\xe9").unwrap();
        let uri = Url::from_file_path(&path).unwrap();
        assert_eq!(load_document(uri.as_str()).unwrap(), "caf\u{fffd}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("local-viewer-missing").join("nope.html");
        let uri = Url::from_file_path(&path).unwrap();
        let err = load_document(uri.as_str()).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }

    #[test]
    fn rejects_other_schemes() {
        let err = load_document("ftp://example.com/index.html").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(load_document("not a uri").is_err());
    }
}
