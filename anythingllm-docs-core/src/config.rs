use tracing::{debug, info};

/// Connection settings for the AnythingLLM API, fixed for the lifetime of the process.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, e.g. `http://localhost:3001/api`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Joins an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn trace_loaded(&self) {
        info!(
            base_url = %self.base_url,
            api_key_set = !self.api_key.is_empty(),
            "Loaded API config"
        );
        debug!(?self, "API config loaded (full debug)");
    }
}

// The key never ends up in logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed_from_base_url() {
        let config = ApiConfig::new("http://anythingllm.local/api//", "key");
        assert_eq!(config.base_url, "http://anythingllm.local/api");
        assert_eq!(
            config.endpoint("/v1/workspaces"),
            "http://anythingllm.local/api/v1/workspaces"
        );
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let config = ApiConfig::new("http://localhost:3001/api", "top-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<10 chars>"));
    }
}
