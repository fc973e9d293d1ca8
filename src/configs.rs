use serde::Deserialize;
use std::env;
use std::fmt;

pub mod logging;

/// 설정 로딩 중 발생하는 에러
#[derive(Debug)]
pub enum ConfigError {
    /// 필수 환경 변수가 없음
    MissingVariable(String),
    InvalidValue(String),
    Load(config::ConfigError),
    Logging(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => write!(f, "environment variable {} must be set", name),
            ConfigError::InvalidValue(message) => write!(f, "invalid value, {}", message),
            ConfigError::Load(e) => write!(f, "cannot load config, {}", e),
            ConfigError::Logging(message) => write!(f, "cannot set up logging, {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Load(e)
    }
}

/// [`crate::Client`] 생성에 필요한 설정
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    api_key: String,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_seconds: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// `config/<RUN_MODE>` 파일(없어도 됨)과 `BRICKSET_` 접두사가 붙은 환경 변수에서
/// 클라이언트 설정을 읽는다. 환경 변수가 파일보다 우선한다.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
        .add_source(config::Environment::with_prefix("BRICKSET"))
        .build()?;

    Ok(config.try_deserialize()?)
}

/// 프로그램에서 사용할 로깅 옵션을 `LOGGER_` 환경 변수에서 읽어 설정한다.
pub fn set_global_logging_config() -> Result<tracing_appender::non_blocking::WorkerGuard, ConfigError> {
    let dir = env::var("LOGGER_DIR")
        .map_err(|_| ConfigError::MissingVariable("LOGGER_DIR".to_string()))?;
    let name = env::var("LOGGER_FILE_NAME")
        .map_err(|_| ConfigError::MissingVariable("LOGGER_FILE_NAME".to_string()))?;

    let keep = match env::var("LOGGER_KEEP") {
        Ok(v) => Some(v.parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue(format!("LOGGER_KEEP must be a number, got {}", v)))?),
        Err(_) => None,
    };
    let level = env::var("LOGGER_LEVEL").ok();
    let rotation = env::var("LOGGER_ROTATION").ok();

    let options = logging::Config {
        dir,
        name,
        keep,
        level,
        rotation,
    };

    logging::set_global_logging_config(&options)
}
