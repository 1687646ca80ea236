use config::{Config, ConfigError};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct AirsatConfig {
    pub server: Server,
    pub tls: Option<Tls>,
    pub model: Model,
    pub logger: Logger,
}

impl AirsatConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.address", "0.0.0.0:8080")?
            .set_default("model.path", "gradboost_model.json")?
            .set_default("logger.level", "INFO")?
            .add_source(config::File::with_name("airsat.toml").required(false))
            .add_source(config::Environment::with_prefix("AIRSAT").separator("_"))
            .build()?
            .try_deserialize::<AirsatConfig>()
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub address: String,
}

/// PEM形式の証明書と秘密鍵
#[derive(Clone, Debug, Deserialize)]
pub struct Tls {
    pub cert: String,
    pub key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Model {
    pub path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
