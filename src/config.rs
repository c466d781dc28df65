/// Application-level constants
pub const APP_NAME: &str = "CheckSupport";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default Ollama model used for guidance and answer generation.
pub const DEFAULT_MODEL: &str = "llama3.1:8b-instruct-q8_0";

/// Base URL of the local Ollama instance.
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Per-request timeout for Ollama calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn ollama_url_has_no_trailing_slash() {
        assert!(!OLLAMA_BASE_URL.ends_with('/'));
    }

    #[test]
    fn log_filter_names_the_crate() {
        assert!(default_log_filter().starts_with("checksupport"));
    }
}
