use log::{debug, error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use thiserror::Error;

/// 설정 로드 오류
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 파일 오류
    #[error("설정 파일 오류: {0}")]
    FileError(String),
    /// 파싱 오류
    #[error("설정 파싱 오류: {0}")]
    ParseError(String),
    /// 유효성 검사 오류
    #[error("설정 유효성 검사 오류: {0}")]
    ValidationError(String),
}

/// 설정 로드 결과
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 설정 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON 형식
    Json,
    /// TOML 형식
    Toml,
    /// 자동 감지 (파일은 확장자, 문자열은 JSON → TOML 순으로 시도)
    Auto,
}

impl ConfigFormat {
    /// 확장자로 형식 판별 (`json`, `toml`만 인식)
    pub fn from_path(path: &Path) -> Option<ConfigFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(ConfigFormat::Json),
            Some("toml") => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    /// `Auto`를 경로 기준으로 구체 형식으로 바꿉니다.
    fn resolve(self, path: &Path) -> Option<ConfigFormat> {
        match self {
            ConfigFormat::Auto => ConfigFormat::from_path(path),
            concrete => Some(concrete),
        }
    }
}

/// 설정 유효성 검사 트레이트
pub trait ConfigValidation {
    /// 설정 유효성 검사
    fn validate(&self) -> ConfigResult<()>;
}

/// 설정 파일 로더
#[derive(Debug)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// 파일에서 설정 로드
    ///
    /// # Arguments
    /// * `path` - 설정 파일 경로
    /// * `format` - 설정 파일 형식 (`Auto`면 확장자로 감지)
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 검증된 설정 객체 또는 오류
    pub fn load_from_file<T>(path: &Path, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        debug!("설정 파일 로드 시작: {}", path.display());

        let format = format.resolve(path).ok_or_else(|| {
            error!("설정 파일 형식을 알 수 없음: {}", path.display());
            ConfigError::FileError(format!("지원되지 않는 확장자: {}", path.display()))
        })?;
        debug!("설정 형식: {:?}", format);

        let content = std::fs::read_to_string(path).map_err(|e| {
            error!("설정 파일 읽기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 읽기 실패: {}", e))
        })?;

        let config: T = Self::parse(&content, format).inspect_err(|e| {
            error!("설정 파일 파싱 실패: {} - {}", path.display(), e);
        })?;

        config.validate().inspect_err(|e| {
            error!("설정 유효성 검사 실패: {}", e);
        })?;

        info!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 문자열에서 설정 로드
    ///
    /// # Arguments
    /// * `content` - 설정 문자열
    /// * `format` - 설정 형식
    ///
    /// # Returns
    /// * `ConfigResult<T>` - 검증된 설정 객체 또는 오류
    pub fn load_from_string<T>(content: &str, format: ConfigFormat) -> ConfigResult<T>
    where
        T: DeserializeOwned + ConfigValidation,
    {
        let config: T = Self::parse(content, format)?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일 저장
    ///
    /// 저장 전에 유효성 검사를 수행하여 잘못된 설정이 파일로 남지 않게 합니다.
    ///
    /// # Arguments
    /// * `config` - 설정 객체
    /// * `path` - 저장할 파일 경로
    /// * `format` - 설정 파일 형식 (`Auto`면 확장자, 확장자가 없으면 TOML)
    ///
    /// # Returns
    /// * `ConfigResult<()>` - 성공 또는 오류
    pub fn save_to_file<T>(config: &T, path: &Path, format: ConfigFormat) -> ConfigResult<()>
    where
        T: Serialize + ConfigValidation,
    {
        debug!("설정 파일 저장 시작: {}", path.display());
        config.validate()?;

        let format = format.resolve(path).unwrap_or(ConfigFormat::Toml);

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| {
                error!("JSON 직렬화 실패: {}", e);
                ConfigError::ParseError(format!("JSON 직렬화 실패: {}", e))
            })?,
            ConfigFormat::Toml | ConfigFormat::Auto => {
                toml::to_string_pretty(config).map_err(|e| {
                    error!("TOML 직렬화 실패: {}", e);
                    ConfigError::ParseError(format!("TOML 직렬화 실패: {}", e))
                })?
            }
        };

        std::fs::write(path, &content).map_err(|e| {
            error!("설정 파일 쓰기 실패: {} - {}", path.display(), e);
            ConfigError::FileError(format!("파일 쓰기 실패: {}", e))
        })?;

        info!("설정 파일 저장 완료: {}", path.display());
        Ok(())
    }

    // 내부 헬퍼 메서드

    /// 형식에 맞게 파싱 (`Auto`는 JSON 실패 시 TOML)
    fn parse<T: DeserializeOwned>(content: &str, format: ConfigFormat) -> ConfigResult<T> {
        match format {
            ConfigFormat::Json => Self::parse_json(content),
            ConfigFormat::Toml => Self::parse_toml(content),
            ConfigFormat::Auto => {
                Self::parse_json(content).or_else(|_| Self::parse_toml(content))
            }
        }
    }

    /// JSON 파싱
    fn parse_json<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        serde_json::from_str(content).map_err(|e| {
            warn!("JSON 파싱 실패: {}", e);
            ConfigError::ParseError(format!("JSON 파싱 실패: {}", e))
        })
    }

    /// TOML 파싱
    fn parse_toml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
        toml::from_str(content).map_err(|e| {
            warn!("TOML 파싱 실패: {}", e);
            ConfigError::ParseError(format!("TOML 파싱 실패: {}", e))
        })
    }
}
