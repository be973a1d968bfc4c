use crate::analyzer::base::{AnalysisContext, Analyzer};
use crate::analyzer::candle_pattern_analyzer::{CandlePatternAnalyzer, CandlePatternConfig};
use crate::analyzer::chart_pattern_analyzer::{ChartPatternAnalyzer, ChartPatternConfig};
use crate::analyzer::trend_analyzer::{TrendAnalyzer, TrendConfig, TrendDirection};
use crate::model::{Candle, Signal};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;

/// 패턴 인식 설정
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// 단일/다중 캔들 패턴 기준
    pub candle: CandlePatternConfig,
    /// 차트 패턴 기준
    pub chart: ChartPatternConfig,
}

/// 패턴 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternClass {
    /// 단일 캔들
    Single,
    /// 3개 캔들
    Multi,
    /// 여러 바에 걸친 차트 패턴
    Complex,
}

/// 인식 가능한 패턴 이름
///
/// 선언 순서가 같은 바 안에서의 보고 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternName {
    Hammer,
    InvertedHammer,
    HangingMan,
    ShootingStar,
    Doji,
    GravestoneDoji,
    DragonflyDoji,
    MorningStar,
    EveningStar,
    ThreeWhiteSoldiers,
    ThreeBlackCrows,
    HeadAndShoulders,
    InverseHeadAndShoulders,
    DoubleTop,
    DoubleBottom,
    SymmetricalTriangle,
    AscendingTriangle,
    DescendingTriangle,
}

impl PatternName {
    /// 패턴 이름 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::Hammer => "hammer",
            PatternName::InvertedHammer => "inverted_hammer",
            PatternName::HangingMan => "hanging_man",
            PatternName::ShootingStar => "shooting_star",
            PatternName::Doji => "doji",
            PatternName::GravestoneDoji => "gravestone_doji",
            PatternName::DragonflyDoji => "dragonfly_doji",
            PatternName::MorningStar => "morning_star",
            PatternName::EveningStar => "evening_star",
            PatternName::ThreeWhiteSoldiers => "three_white_soldiers",
            PatternName::ThreeBlackCrows => "three_black_crows",
            PatternName::HeadAndShoulders => "head_and_shoulders",
            PatternName::InverseHeadAndShoulders => "inverse_head_and_shoulders",
            PatternName::DoubleTop => "double_top",
            PatternName::DoubleBottom => "double_bottom",
            PatternName::SymmetricalTriangle => "symmetrical_triangle",
            PatternName::AscendingTriangle => "ascending_triangle",
            PatternName::DescendingTriangle => "descending_triangle",
        }
    }

    /// 패턴 분류
    pub fn class(&self) -> PatternClass {
        match self {
            PatternName::Hammer
            | PatternName::InvertedHammer
            | PatternName::HangingMan
            | PatternName::ShootingStar
            | PatternName::Doji
            | PatternName::GravestoneDoji
            | PatternName::DragonflyDoji => PatternClass::Single,
            PatternName::MorningStar
            | PatternName::EveningStar
            | PatternName::ThreeWhiteSoldiers
            | PatternName::ThreeBlackCrows => PatternClass::Multi,
            _ => PatternClass::Complex,
        }
    }

    /// 패턴의 기본 방향성
    pub fn polarity(&self) -> Signal {
        match self {
            PatternName::Hammer
            | PatternName::InvertedHammer
            | PatternName::DragonflyDoji
            | PatternName::MorningStar
            | PatternName::ThreeWhiteSoldiers
            | PatternName::InverseHeadAndShoulders
            | PatternName::DoubleBottom => Signal::Bullish,
            PatternName::HangingMan
            | PatternName::ShootingStar
            | PatternName::GravestoneDoji
            | PatternName::EveningStar
            | PatternName::ThreeBlackCrows
            | PatternName::HeadAndShoulders
            | PatternName::DoubleTop => Signal::Bearish,
            PatternName::Doji
            | PatternName::SymmetricalTriangle
            | PatternName::AscendingTriangle
            | PatternName::DescendingTriangle => Signal::Neutral,
        }
    }
}

impl Display for PatternName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 인식된 패턴 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    /// 패턴 이름
    pub name: PatternName,
    /// 방향성
    pub polarity: Signal,
    /// 패턴이 확인된 바 인덱스
    pub bar_index: usize,
    /// 패턴 분류
    pub class: PatternClass,
}

impl PatternMatch {
    /// 패턴 이름과 바 인덱스로 생성 (방향성과 분류는 이름에서 결정)
    pub fn new(name: PatternName, bar_index: usize) -> PatternMatch {
        PatternMatch {
            name,
            polarity: name.polarity(),
            bar_index,
            class: name.class(),
        }
    }
}

impl Display for PatternMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}({})", self.name, self.bar_index, self.polarity)
    }
}

/// 전체 패턴 인식기
///
/// 모든 바에 대해 단일 → 다중 → 차트 패턴 순으로 검사하며,
/// 차트 패턴은 이름별로 처음 확인된 바에서 한 번만 보고합니다.
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    candle_analyzer: CandlePatternAnalyzer,
    chart_analyzer: ChartPatternAnalyzer,
    trend_analyzer: TrendAnalyzer,
}

impl PatternDetector {
    /// 새 패턴 인식기 생성
    ///
    /// # Arguments
    /// * `config` - 패턴 기준값
    /// * `trend` - 추세 기준 (`TrendContext` 라벨링에 사용)
    pub fn new(config: &PatternConfig, trend: &TrendConfig) -> PatternDetector {
        PatternDetector {
            candle_analyzer: CandlePatternAnalyzer::new(config.candle),
            chart_analyzer: ChartPatternAnalyzer::new(config.chart),
            trend_analyzer: TrendAnalyzer::new(*trend),
        }
    }

    /// `index` 직전 바까지의 후행 추세 방향
    fn prior_trend(&self, closes: &[f64], index: usize) -> TrendDirection {
        let period = self.trend_analyzer.config().period.max(1);
        let start = index.saturating_sub(period);
        self.trend_analyzer.direction_of(&closes[start..index])
    }

    /// 한 바의 단일 캔들 패턴 (선언 순서로 정렬)
    fn detect_single<C: Candle>(&self, candle: &C, prior_trend: TrendDirection) -> Vec<PatternName> {
        let mut names: Vec<PatternName> = self
            .candle_analyzer
            .classify_shapes(candle)
            .into_iter()
            .flat_map(|shape| self.candle_analyzer.label_shape(shape, prior_trend))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// 전체 캔들에서 패턴을 인식합니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들
    ///
    /// # Returns
    /// * `Vec<PatternMatch>` - 바 인덱스 오름차순, 같은 바에서는 단일 → 다중 → 차트 순
    pub fn detect<C: Candle>(&self, candles: &[C]) -> Vec<PatternMatch> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close_price()).collect();
        let mut patterns = Vec::new();
        let mut seen_complex: HashSet<PatternName> = HashSet::new();

        for (index, candle) in candles.iter().enumerate() {
            let prior_trend = self.prior_trend(&closes, index);

            for name in self.detect_single(candle, prior_trend) {
                trace!("단일 캔들 패턴: {name} @ {index}");
                patterns.push(PatternMatch::new(name, index));
            }

            for name in self.candle_analyzer.detect_multi_patterns(candles, index) {
                trace!("다중 캔들 패턴: {name} @ {index}");
                patterns.push(PatternMatch::new(name, index));
            }

            for name in self.chart_analyzer.detect_at(candles, index) {
                if seen_complex.insert(name) {
                    trace!("차트 패턴: {name} @ {index}");
                    patterns.push(PatternMatch::new(name, index));
                }
            }
        }

        debug!("패턴 인식 결과: {}개", patterns.len());
        patterns
    }
}

impl Analyzer for PatternDetector {
    type Output = Vec<PatternMatch>;

    fn name(&self) -> &'static str {
        "pattern"
    }

    fn analyze<C: Candle>(&self, ctx: &AnalysisContext<'_, C>) -> Vec<PatternMatch> {
        self.detect(ctx.candles)
    }
}
