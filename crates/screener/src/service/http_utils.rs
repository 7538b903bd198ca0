/// Absolute URLs for the two routes the scoring service exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceEndpoints {
    pub(crate) predict: String,
    pub(crate) health: String,
}

impl ServiceEndpoints {
    /// `base` may carry a path prefix and any number of trailing slashes.
    pub(crate) fn from_base(base: &str) -> Result<Self, String> {
        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err("api_url is empty".to_string());
        }
        if !base.contains("://") {
            return Err(format!("api_url {base:?} has no scheme"));
        }
        Ok(Self {
            predict: format!("{base}/predict"),
            health: format!("{base}/"),
        })
    }
}

/// Shortens a response body for log lines.
pub(crate) fn escape_log_body(body: &str, max_chars: usize) -> String {
    let mut escaped = String::new();
    for (count, ch) in body.chars().enumerate() {
        if count >= max_chars {
            escaped.push_str("...");
            break;
        }
        match ch {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_ignore_trailing_slashes() {
        let endpoints = ServiceEndpoints::from_base("http://localhost:8000/").unwrap();
        assert_eq!(endpoints.predict, "http://localhost:8000/predict");
        assert_eq!(endpoints.health, "http://localhost:8000/");

        let endpoints = ServiceEndpoints::from_base(" https://api.example.com/v1// ").unwrap();
        assert_eq!(endpoints.predict, "https://api.example.com/v1/predict");
        assert_eq!(endpoints.health, "https://api.example.com/v1/");
    }

    #[test]
    fn endpoints_reject_empty_or_schemeless_base() {
        assert!(ServiceEndpoints::from_base("  ").is_err());
        assert!(ServiceEndpoints::from_base("///").is_err());
        assert!(ServiceEndpoints::from_base("localhost:8000").is_err());
    }

    #[test]
    fn escape_truncates_and_flattens() {
        assert_eq!(escape_log_body("a\nb", 10), "a\\nb");
        assert_eq!(escape_log_body("abcdef", 3), "abc...");
    }
}
