// 분석기 모듈
// 캔들 패턴, 차트 패턴, 거래량, 추세를 분석하고 하나의 신호로 요약합니다.

pub mod base;
pub mod candle_pattern_analyzer;
pub mod chart_pattern_analyzer;
pub mod pattern_detector;
pub mod signal_aggregator;
pub mod trend_analyzer;
pub mod volume_analyzer;

pub use base::{AnalysisContext, Analyzer};
pub use candle_pattern_analyzer::{
    CandlePatternAnalyzer, CandlePatternConfig, CandleShape, ReversalLabeling,
};
pub use chart_pattern_analyzer::{ChartPatternAnalyzer, ChartPatternConfig};
pub use pattern_detector::{PatternClass, PatternConfig, PatternDetector, PatternMatch, PatternName};
pub use signal_aggregator::{SignalAggregator, SignalSummary, SignalTag};
pub use trend_analyzer::{TrendAnalysis, TrendAnalyzer, TrendConfig, TrendDirection};
pub use volume_analyzer::{VolumeAnalysis, VolumeAnalyzer, VolumeConfig, VolumeTrend};
