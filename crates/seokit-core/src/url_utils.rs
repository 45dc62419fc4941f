use url::Url;

use crate::error::{Error, Result};

/// Prepend `https://` when the input carries no http(s) scheme.
pub fn normalize_input_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Parse an absolute http(s) URL with a host.
pub fn parse_http_url(input: &str) -> Result<Url> {
    let parsed = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{input}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(format!(
            "{input}: unsupported scheme {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::InvalidUrl(format!("{input}: missing host")));
    }
    Ok(parsed)
}

/// Host of the URL without a leading `www.`.
pub fn domain_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_https_when_scheme_missing() {
        assert_eq!(normalize_input_url("example.com"), "https://example.com");
        assert_eq!(
            normalize_input_url("  www.example.com/page "),
            "https://www.example.com/page"
        );
    }

    #[test]
    fn keeps_existing_scheme() {
        assert_eq!(normalize_input_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_input_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(parse_http_url("ftp://example.com").is_err());
        assert!(parse_http_url("javascript:alert(1)").is_err());
        assert!(parse_http_url("not a url").is_err());
        assert!(parse_http_url("https://example.com/path").is_ok());
    }

    #[test]
    fn strips_www_from_domain() {
        let url = Url::parse("https://www.Example.com/a").unwrap();
        assert_eq!(domain_of(&url).as_deref(), Some("example.com"));

        let url = Url::parse("https://blog.example.ir").unwrap();
        assert_eq!(domain_of(&url).as_deref(), Some("blog.example.ir"));
    }
}
