use crate::analyzer::base::{AnalysisContext, Analyzer};
use crate::analyzer::pattern_detector::{PatternDetector, PatternMatch};
use crate::analyzer::signal_aggregator::{SignalAggregator, SignalSummary};
use crate::analyzer::trend_analyzer::{TrendAnalysis, TrendAnalyzer};
use crate::analyzer::volume_analyzer::{VolumeAnalysis, VolumeAnalyzer};
use crate::config::EngineConfig;
use crate::config_loader::ConfigValidation;
use crate::error::Result;
use crate::indicator::IndicatorTable;
use crate::indicator::signal::{IndicatorSignal, evaluate_indicator_signal};
use crate::model::{Bar, Candle};
use crate::series::Series;
use log::{debug, info};
use serde::Serialize;
use std::fmt::Display;

/// 한 번의 분석 호출 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// 바별 지표 테이블
    pub indicators: IndicatorTable,
    /// 인식된 패턴 (바 인덱스 오름차순)
    pub patterns: Vec<PatternMatch>,
    /// 거래량 분석
    pub volume_analysis: VolumeAnalysis,
    /// 추세 분석
    pub trend_analysis: TrendAnalysis,
    /// 신호 요약
    pub summary: SignalSummary,
    /// 최신 지표 점수 신호
    pub indicator_signal: IndicatorSignal,
}

impl Display for AnalysisResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AnalysisResult(bars={}, patterns={}, {}, {})",
            self.indicators.len(),
            self.patterns.len(),
            self.summary,
            self.indicator_signal
        )
    }
}

/// 지표 계산, 패턴 인식, 거래량/추세 분석, 신호 요약을 순서대로 실행하는 엔진
///
/// 엔진은 설정만 가지며 호출 사이에 상태를 남기지 않습니다.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: EngineConfig,
    pattern_detector: PatternDetector,
    volume_analyzer: VolumeAnalyzer,
    trend_analyzer: TrendAnalyzer,
    signal_aggregator: SignalAggregator,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        AnalysisEngine::from_config(EngineConfig::default())
    }
}

impl AnalysisEngine {
    /// 설정을 검증한 뒤 새 엔진을 생성합니다.
    ///
    /// # Arguments
    /// * `config` - 엔진 설정
    ///
    /// # Returns
    /// * `Result<AnalysisEngine>` - 엔진 또는 설정 오류
    pub fn new(config: EngineConfig) -> Result<AnalysisEngine> {
        config.validate()?;
        Ok(AnalysisEngine::from_config(config))
    }

    fn from_config(config: EngineConfig) -> AnalysisEngine {
        AnalysisEngine {
            pattern_detector: PatternDetector::new(&config.pattern, &config.trend),
            volume_analyzer: VolumeAnalyzer::new(config.volume),
            trend_analyzer: TrendAnalyzer::new(config.trend),
            signal_aggregator: SignalAggregator,
            config,
        }
    }

    /// 엔진 설정
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 시계열을 분석합니다.
    pub fn analyze<C: Candle>(&self, series: &Series<C>) -> AnalysisResult {
        self.analyze_candles(series.items())
    }

    /// 캔들 슬라이스를 분석합니다.
    ///
    /// 바 수가 `min_bars`보다 적으면 지표만 계산하고 패턴/거래량/추세는
    /// 기본값(중립)을 반환합니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들
    ///
    /// # Returns
    /// * `AnalysisResult` - 분석 결과
    pub fn analyze_candles<C: Candle>(&self, candles: &[C]) -> AnalysisResult {
        info!("패턴 인식 시작, 데이터 길이: {}", candles.len());

        let indicators = IndicatorTable::calculate(candles, &self.config.indicator);
        let ctx = AnalysisContext::new(candles, &indicators);
        let close = ctx.last_candle().map(|c| c.close_price()).unwrap_or(0.0);
        let indicator_signal = evaluate_indicator_signal(
            ctx.latest_indicators(),
            close,
            &self.config.indicator.signal,
        );

        if candles.len() < self.config.min_bars {
            info!(
                "데이터 부족: {} < {}, 중립 결과 반환",
                candles.len(),
                self.config.min_bars
            );
            return AnalysisResult {
                indicators,
                patterns: Vec::new(),
                volume_analysis: VolumeAnalysis::default(),
                trend_analysis: TrendAnalysis::default(),
                summary: SignalSummary::default(),
                indicator_signal,
            };
        }

        let patterns = self.run(&self.pattern_detector, &ctx);
        let volume_analysis = self.run(&self.volume_analyzer, &ctx);
        let trend_analysis = self.run(&self.trend_analyzer, &ctx);
        let summary = self
            .signal_aggregator
            .aggregate(&patterns, &volume_analysis, &trend_analysis);

        let result = AnalysisResult {
            indicators,
            patterns,
            volume_analysis,
            trend_analysis,
            summary,
            indicator_signal,
        };
        info!("패턴 인식 완료: {result}");
        result
    }

    /// JSON 캔들 배열을 파싱하고 분석합니다.
    ///
    /// # Returns
    /// * `Result<AnalysisResult>` - 분석 결과 또는 `Parse`/`InvalidBar` 오류
    pub fn analyze_json(&self, json: &str) -> Result<AnalysisResult> {
        let series: Series<Bar> = Series::from_json(json)?;
        Ok(self.analyze(&series))
    }

    fn run<A: Analyzer, C: Candle>(&self, analyzer: &A, ctx: &AnalysisContext<'_, C>) -> A::Output {
        debug!("{} 분석 실행", analyzer.name());
        analyzer.analyze(ctx)
    }
}

/// 기본 설정으로 캔들 데이터를 분석합니다.
pub fn analyze<C: Candle>(candles: &[C]) -> AnalysisResult {
    AnalysisEngine::default().analyze_candles(candles)
}
