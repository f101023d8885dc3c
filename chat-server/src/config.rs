use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant. Reply in Russian. Be friendly and easy to understand.";

#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the server binds to
    pub host: String,
    /// Port the server listens on
    pub port: u16,
    /// Directory served under `/static` (holds the built `chat-ui` package)
    pub static_dir: PathBuf,
    pub llm: LlmConfig,
}

/// OpenAI-compatible chat completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Bearer token. Empty means no `Authorization` header.
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co/v1".to_string(),
            api_key: String::new(),
            model: "Qwen/Qwen3-Coder-Next:novita".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = LlmConfig::default();
        Ok(Self {
            host: env_str(&lookup, "CHAT_HOST", "127.0.0.1"),
            port: env_parse(&lookup, "CHAT_PORT", 8000)?,
            static_dir: lookup("CHAT_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_static_dir),
            llm: LlmConfig {
                base_url: env_str(&lookup, "LLM_BASE_URL", &defaults.base_url)
                    .trim_end_matches('/')
                    .to_string(),
                api_key: env_str(&lookup, "HF_TOKEN", ""),
                model: env_str(&lookup, "LLM_MODEL", &defaults.model),
                system_prompt: env_str(&lookup, "LLM_SYSTEM_PROMPT", &defaults.system_prompt),
                timeout: Duration::from_secs(env_parse(&lookup, "LLM_TIMEOUT_SECS", 60)?),
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_str(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        None => Ok(default),
    }
}

/// `static/` at the workspace root, wherever the server is launched from.
fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join("static")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.llm.base_url, "https://router.huggingface.co/v1");
        assert_eq!(config.llm.model, "Qwen/Qwen3-Coder-Next:novita");
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.timeout, Duration::from_secs(60));
        assert!(config.static_dir.ends_with("static"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("CHAT_HOST", "0.0.0.0"),
            ("CHAT_PORT", "9000"),
            ("CHAT_STATIC_DIR", "/srv/chat"),
            ("LLM_BASE_URL", "http://localhost:11434/v1/"),
            ("HF_TOKEN", "hf_secret"),
            ("LLM_MODEL", "tiny"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
        assert_eq!(config.static_dir, PathBuf::from("/srv/chat"));
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.llm.api_key, "hf_secret");
        assert_eq!(config.llm.model, "tiny");
        assert_eq!(config.llm.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("CHAT_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("CHAT_PORT=eighty"));
    }
}
