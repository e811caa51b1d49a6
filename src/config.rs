pub mod log;

use crate::ini::{IniError, IniParser};
use crate::provider::google::VOLUMES_ENDPOINT;
use crate::provider::query::DEFAULT_MAX_RESULTS;
use serde::Deserialize;
use std::env;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;

const DEFAULT_KEY_FILE: &'static str = "google_books.cfg";
const DEFAULT_KEY_SECTION: &'static str = "Api Key";
const DEFAULT_KEY_NAME: &'static str = "Key";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load settings: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Failed to read API key: {0}")]
    Ini(#[from] IniError),

    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

/// 검색 API 관련 설정
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Api {
    endpoint: String,

    /// API 키를 직접 지정한다. 지정된 경우 키 파일은 읽지 않는다.
    key: Option<String>,

    /// API 키가 저장된 INI 파일 경로
    key_file: String,
    key_section: String,
    key_name: String,

    /// 한번에 조회할 최대 도서 수
    max_results: u32,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            endpoint: VOLUMES_ENDPOINT.to_owned(),
            key: None,
            key_file: DEFAULT_KEY_FILE.to_owned(),
            key_section: DEFAULT_KEY_SECTION.to_owned(),
            key_name: DEFAULT_KEY_NAME.to_owned(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl Api {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn key_file(&self) -> &str {
        &self.key_file
    }

    pub fn key_section(&self) -> &str {
        &self.key_section
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    pub fn set_endpoint<S: Into<String>>(&mut self, endpoint: S) {
        self.endpoint = endpoint.into();
    }

    pub fn set_key<S: Into<String>>(&mut self, key: S) {
        self.key = Some(key.into());
    }

    pub fn set_key_file<S: Into<String>>(&mut self, key_file: S) {
        self.key_file = key_file.into();
    }

    pub fn set_max_results(&mut self, max_results: u32) {
        self.max_results = max_results;
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    api: Api,
    logger: Option<log::Config>,
}

impl AppConfig {
    pub fn api(&self) -> &Api {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut Api {
        &mut self.api
    }

    pub fn logger(&self) -> Option<&log::Config> {
        self.logger.as_ref()
    }
}

/// 실행 환경에 따라 .env 파일을 로드한다.
pub fn load_dotenv() {
    let env_filename = env::var("RUN_MODE")
        .map(|env| format!(".env.{}", env))
        .unwrap_or_else(|_| ".env".into());

    dotenvy::from_filename(env_filename).ok();
}

/// `config/<RUN_MODE>` 파일과 `GBOOKS_` 로 시작하는 환경 변수에서 설정을 읽는다.
///
/// 파일은 없어도 되며 중첩 키는 `__` 로 구분한다. (예: `GBOOKS_API__KEY_FILE`)
pub fn load_config() -> Result<AppConfig, LoadError> {
    let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
    let config = config::Config::builder()
        .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
        .add_source(
            config::Environment::with_prefix("GBOOKS")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// API 키를 결정한다. 설정에 키가 직접 지정 되어 있지 않으면 키 파일에서 읽는다.
pub fn resolve_api_key(api: &Api) -> Result<String, LoadError> {
    if let Some(key) = api.key() {
        return Ok(key.to_owned());
    }

    let mut parser = IniParser::new();
    parser.parse_from_file(api.key_file())?;

    Ok(parser.get_value(api.key_section(), api.key_name())?.to_owned())
}

/// logger 설정 유무에 따라 전역 로깅을 설정한다.
pub fn set_global_logging_config(c: &AppConfig) -> Result<Option<WorkerGuard>, LoadError> {
    match c.logger() {
        Some(logger) => log::set_global_logging_config(logger)
            .map(Some)
            .map_err(LoadError::Logging),
        None => log::set_default_logging_config()
            .map(|_| None)
            .map_err(LoadError::Logging),
    }
}
