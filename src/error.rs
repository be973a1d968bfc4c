use crate::config_loader::ConfigError;
use thiserror::Error;

/// 분석 엔진 오류
///
/// 짧은 시계열이나 0 나눗셈 같은 수치적 특이점은 오류가 아니라
/// 정의된 기본값으로 처리됩니다. 오류는 입력/설정 자체가 잘못된 경우에만 발생합니다.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 유한하지 않은 값(NaN, 무한대)을 가진 캔들
    #[error("잘못된 캔들 데이터 (index={index}, field={field}): {value}")]
    InvalidBar {
        index: usize,
        field: &'static str,
        value: f64,
    },
    /// 입력 데이터 파싱 실패 (필드 누락, 숫자가 아닌 값 등)
    #[error("입력 데이터 파싱 실패: {0}")]
    Parse(String),
    /// 설정 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 분석 엔진 결과 타입
pub type Result<T> = std::result::Result<T, AnalysisError>;
