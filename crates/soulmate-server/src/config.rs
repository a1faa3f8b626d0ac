use serde::Deserialize;
use soulmate_core::CoreSettings;
use soulmate_core::settings::{
    AuthSettings, ChatSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    HistorySettings,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built frontend served for every unmatched path.
    pub static_dir: Option<PathBuf>,
    pub db_path: Option<String>,
    pub rate_limit_per_minute: Option<u64>,
    pub llm: LlmConfig,
    pub core: CoreSettings,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl LlmConfig {
    pub fn api_key(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    auth: AuthSection,
    #[serde(default)]
    llm: LlmSection,
    #[serde(default)]
    history: HistorySettings,
    #[serde(default)]
    rate_limit: RateLimitSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    static_dir: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthSection {
    #[serde(default)]
    jwt_secret: Option<String>,
    #[serde(default = "default_token_ttl_hours")]
    token_ttl_hours: i64,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_ttl_hours: default_token_ttl_hours(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LlmSection {
    #[serde(default = "default_llm_base_url")]
    base_url: String,
    #[serde(default = "default_llm_model")]
    model: String,
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
    #[serde(default = "default_temperature")]
    temperature: f32,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct RateLimitSection {
    #[serde(default)]
    requests_per_minute: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct StorageSection {
    #[serde(default)]
    db_path: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl_hours() -> i64 {
    AuthSettings::default().token_ttl_hours
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(file_config) = load_from_file()? {
            return Ok(Self::from_file_config(file_config));
        }

        Ok(Self::from_env())
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let FileConfig {
            server,
            auth,
            llm,
            history,
            rate_limit,
            storage,
        } = file_config;

        Self {
            host: server.host,
            port: server.port,
            static_dir: server.static_dir,
            db_path: storage.db_path,
            rate_limit_per_minute: rate_limit.requests_per_minute,
            llm: LlmConfig {
                base_url: llm.base_url,
                model: llm.model,
                api_key_env: llm.api_key_env,
            },
            core: CoreSettings {
                auth: auth_settings(auth.jwt_secret, auth.token_ttl_hours),
                chat: ChatSettings {
                    temperature: llm.temperature,
                    max_tokens: llm.max_tokens,
                },
                history,
            },
        }
    }

    fn from_env() -> Self {
        let host = env::var("SOULMATE_SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = env::var("SOULMATE_SERVER_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let static_dir = env::var("SOULMATE_STATIC_DIR").ok().map(PathBuf::from);
        let db_path = env::var("SOULMATE_DB_PATH").ok();
        let rate_limit_per_minute = env::var("SOULMATE_RATE_LIMIT_RPM")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let jwt_secret = env::var("SOULMATE_JWT_SECRET").ok();
        let token_ttl_hours = env::var("SOULMATE_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or_else(default_token_ttl_hours);

        Self {
            host,
            port,
            static_dir,
            db_path,
            rate_limit_per_minute,
            llm: LlmConfig {
                base_url: env::var("SOULMATE_LLM_BASE_URL")
                    .unwrap_or_else(|_| default_llm_base_url()),
                model: env::var("SOULMATE_LLM_MODEL").unwrap_or_else(|_| default_llm_model()),
                api_key_env: default_api_key_env(),
            },
            core: CoreSettings {
                auth: auth_settings(jwt_secret, token_ttl_hours),
                chat: ChatSettings::default(),
                history: HistorySettings::default(),
            },
        }
    }
}

fn auth_settings(jwt_secret: Option<String>, token_ttl_hours: i64) -> AuthSettings {
    let jwt_secret = match jwt_secret.filter(|value| !value.trim().is_empty()) {
        Some(secret) => secret,
        None => {
            tracing::warn!("No JWT secret configured; tokens will not survive a restart");
            AuthSettings::default().jwt_secret
        }
    };

    AuthSettings {
        jwt_secret,
        token_ttl_hours,
    }
}

fn load_from_file() -> anyhow::Result<Option<FileConfig>> {
    let config_path = env::var("SOULMATE_SERVER_CONFIG").ok();
    let path = if let Some(path) = config_path {
        Some(path)
    } else if Path::new("server.toml").exists() {
        Some("server.toml".to_string())
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("Failed to read config {}: {}", path, err))?;
    let parsed: FileConfig = toml::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("Failed to parse config {}: {}", path, err))?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let parsed: FileConfig = toml::from_str("").unwrap();
        let config = ServerConfig::from_file_config(parsed);

        assert_eq!(config.port, 3000);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.core.chat.max_tokens, 1000);
        assert_eq!(config.core.history.session_gap_minutes, 30);
        assert_eq!(config.core.history.utc_offset_minutes, 540);
        assert!(config.rate_limit_per_minute.is_none());
        assert!(!config.core.auth.jwt_secret.is_empty());
    }

    #[test]
    fn test_sections_are_applied() {
        let parsed: FileConfig = toml::from_str(
            r#"
            [server]
            port = 8088
            static_dir = "web/dist"

            [auth]
            jwt_secret = "s3cret"
            token_ttl_hours = 2

            [llm]
            base_url = "http://localhost:11434/v1"
            model = "local-model"
            temperature = 0.5

            [history]
            session_gap_minutes = 45
            utc_offset_minutes = 0

            [rate_limit]
            requests_per_minute = 20

            [storage]
            db_path = "/tmp/soulmate.db"
            "#,
        )
        .unwrap();
        let config = ServerConfig::from_file_config(parsed);

        assert_eq!(config.port, 8088);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.static_dir, Some(PathBuf::from("web/dist")));
        assert_eq!(config.core.auth.jwt_secret, "s3cret");
        assert_eq!(config.core.auth.token_ttl_hours, 2);
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.core.chat.temperature, 0.5);
        assert_eq!(config.core.chat.max_tokens, 1000);
        assert_eq!(config.core.history.session_gap_minutes, 45);
        assert_eq!(config.core.history.utc_offset_minutes, 0);
        assert_eq!(config.rate_limit_per_minute, Some(20));
        assert_eq!(config.db_path.as_deref(), Some("/tmp/soulmate.db"));
    }
}
