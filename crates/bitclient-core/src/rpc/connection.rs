use reqwest::Url;

use crate::error::ValidationError;

pub(super) fn parse_endpoint(endpoint: &str) -> Result<Url, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidEndpoint {
        url: endpoint.to_owned(),
        reason,
    };

    if endpoint.is_empty() {
        return Err(invalid("URL cannot be empty".to_owned()));
    }
    let parsed =
        Url::parse(endpoint).map_err(|e| invalid(format!("expected HTTP(S) URL ({e})")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!(
            "unsupported scheme `{other}`; expected http or https"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_endpoint_http_url() {
        let parsed = parse_endpoint("http://127.0.0.1:8332").expect("should parse");
        assert_eq!(parsed.as_str(), "http://127.0.0.1:8332/");
    }

    #[test]
    fn parse_endpoint_keeps_wallet_path() {
        let parsed = parse_endpoint("https://node.example/wallet/main").expect("should parse");
        assert_eq!(parsed.path(), "/wallet/main");
    }

    #[test]
    fn parse_endpoint_invalid_scheme() {
        let err = parse_endpoint("ftp://example.com").expect_err("must reject ftp");
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn parse_endpoint_empty() {
        let err = parse_endpoint("").expect_err("must reject empty");
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn parse_endpoint_garbage() {
        assert!(parse_endpoint("not a url").is_err());
    }
}
