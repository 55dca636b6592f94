//! Redaction of credentials from strings that end up in logs.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([?&](?:api_?key|appid|key|token)=)[^&#\s]*")
        .expect("api key redaction pattern is valid")
});

/// Replace the value of API key query parameters in a URL with `[REDACTED]`
pub fn redact_api_key(url: &str) -> String {
    API_KEY_PARAM.replace_all(url, "${1}[REDACTED]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacts_accuweather_key() {
        let url = "https://dataservice.accuweather.com/currentconditions/v1/223019?apikey=s3cr3t&details=true&metric=true";
        let redacted = redact_api_key(url);

        assert!(!redacted.contains("s3cr3t"));
        assert!(redacted.contains("apikey=[REDACTED]"));
        assert!(redacted.ends_with("&details=true&metric=true"));
    }

    #[test]
    fn test_leaves_other_urls_untouched() {
        let url = "http://ip-api.com/json/8.8.8.8";
        assert_eq!(redact_api_key(url), url);

        let url = "https://example.com/search?q=5.34,-4.03&keyword=rain";
        assert_eq!(redact_api_key(url), url);
    }
}
