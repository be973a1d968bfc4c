//! 주가 기술적 분석 엔진
//!
//! OHLCV 시계열 하나를 받아 기술적 지표를 계산하고, 캔들/차트 패턴을 인식하고,
//! 거래량과 추세를 분석한 뒤 하나의 방향 신호로 요약합니다.
//!
//! ```no_run
//! use stock_analysis::{AnalysisEngine, Series};
//!
//! let json = std::fs::read_to_string("bars.json")?;
//! let series = Series::from_json(&json)?;
//! let result = AnalysisEngine::default().analyze(&series);
//! println!("{}", result.summary.overall_signal);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod config_loader;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod model;
pub mod series;

pub use config::EngineConfig;
pub use config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult, ConfigValidation};
pub use engine::{AnalysisEngine, AnalysisResult, analyze};
pub use error::{AnalysisError, Result};
pub use indicator::{IndicatorConfig, IndicatorName, IndicatorRow, IndicatorTable};
pub use model::{Bar, Candle, CandleExt, Signal};
pub use series::Series;
