use crate::analyzer::pattern_detector::PatternName;
use crate::analyzer::trend_analyzer::TrendDirection;
use crate::model::{Candle, CandleExt};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 망치형/역망치형 캔들의 라벨링 정책
///
/// 망치(Hammer)와 행잉맨(Hanging Man), 역망치(Inverted Hammer)와 슈팅스타(Shooting Star)는
/// 캔들 모양이 같고 직전 추세로만 구분됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversalLabeling {
    /// 모양이 맞으면 상승/하락 라벨을 모두 보고
    #[default]
    Both,
    /// 직전 바까지의 추세로 라벨 선택 (하락 추세 → 망치/역망치, 상승 추세 → 행잉맨/슈팅스타,
    /// 횡보 → 둘 다)
    TrendContext,
}

/// 캔들 패턴 판정 기준값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandlePatternConfig {
    /// 긴 꼬리 기준 (몸통 대비 배수, 이상)
    pub long_shadow_ratio: f64,
    /// 짧은 꼬리 기준 (몸통 대비 배수, 이하)
    pub short_shadow_ratio: f64,
    /// 도지 몸통 기준 (전체 범위 대비 비율, 미만)
    pub doji_body_ratio: f64,
    /// 적삼병/흑삼병 꼬리 기준 (몸통 대비 배수, 미만)
    pub soldier_shadow_ratio: f64,
    /// 망치형 라벨링 정책
    pub reversal_labeling: ReversalLabeling,
}

impl Default for CandlePatternConfig {
    fn default() -> Self {
        CandlePatternConfig {
            long_shadow_ratio: 2.0,
            short_shadow_ratio: 0.1,
            doji_body_ratio: 0.05,
            soldier_shadow_ratio: 0.3,
            reversal_labeling: ReversalLabeling::Both,
        }
    }
}

/// 단일 캔들 모양
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandleShape {
    /// 긴 아래꼬리, 짧은 위꼬리 (망치/행잉맨)
    HammerShape,
    /// 긴 위꼬리, 짧은 아래꼬리 (역망치/슈팅스타)
    InvertedHammerShape,
    /// 도지 - 시장 우유부단함
    Doji,
    /// 그레이브스톤 도지 - 상단 반전 신호
    GravestoneDoji,
    /// 드래곤플라이 도지 - 하단 반전 신호
    DragonflyDoji,
}

impl Display for CandleShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandleShape::HammerShape => write!(f, "망치형"),
            CandleShape::InvertedHammerShape => write!(f, "역망치형"),
            CandleShape::Doji => write!(f, "도지"),
            CandleShape::GravestoneDoji => write!(f, "그레이브스톤 도지"),
            CandleShape::DragonflyDoji => write!(f, "드래곤플라이 도지"),
        }
    }
}

/// 단일/다중 캔들 패턴 분석기
#[derive(Debug, Clone, Default)]
pub struct CandlePatternAnalyzer {
    config: CandlePatternConfig,
}

impl CandlePatternAnalyzer {
    /// 새 캔들 패턴 분석기 생성
    pub fn new(config: CandlePatternConfig) -> CandlePatternAnalyzer {
        CandlePatternAnalyzer { config }
    }

    /// 설정 참조
    pub fn config(&self) -> &CandlePatternConfig {
        &self.config
    }

    /// 망치형: 아래꼬리 ≥ 2×몸통, 위꼬리 ≤ 0.1×몸통
    pub fn is_hammer_shape<C: Candle>(&self, candle: &C) -> bool {
        let body = candle.body();
        body > 0.0
            && candle.lower_shadow() >= body * self.config.long_shadow_ratio
            && candle.upper_shadow() <= body * self.config.short_shadow_ratio
    }

    /// 역망치형: 위꼬리 ≥ 2×몸통, 아래꼬리 ≤ 0.1×몸통
    pub fn is_inverted_hammer_shape<C: Candle>(&self, candle: &C) -> bool {
        let body = candle.body();
        body > 0.0
            && candle.upper_shadow() >= body * self.config.long_shadow_ratio
            && candle.lower_shadow() <= body * self.config.short_shadow_ratio
    }

    /// 도지: 몸통이 전체 범위의 5% 미만이고 양쪽 꼬리가 모두 있음
    pub fn is_doji<C: Candle>(&self, candle: &C) -> bool {
        let range = candle.range();
        range > 0.0
            && candle.body() / range < self.config.doji_body_ratio
            && candle.upper_shadow() > 0.0
            && candle.lower_shadow() > 0.0
    }

    /// 그레이브스톤 도지: 몸통 없음, 위꼬리만 있음
    pub fn is_gravestone_doji<C: Candle>(&self, candle: &C) -> bool {
        candle.body() == 0.0 && candle.upper_shadow() > 0.0 && candle.lower_shadow() == 0.0
    }

    /// 드래곤플라이 도지: 몸통 없음, 아래꼬리만 있음
    pub fn is_dragonfly_doji<C: Candle>(&self, candle: &C) -> bool {
        candle.body() == 0.0 && candle.lower_shadow() > 0.0 && candle.upper_shadow() == 0.0
    }

    /// 캔들 하나의 모든 모양을 판정합니다.
    ///
    /// 한 캔들이 여러 모양에 동시에 해당할 수 있습니다 (예: 망치형이면서 도지).
    pub fn classify_shapes<C: Candle>(&self, candle: &C) -> Vec<CandleShape> {
        let checks = [
            (CandleShape::HammerShape, self.is_hammer_shape(candle)),
            (
                CandleShape::InvertedHammerShape,
                self.is_inverted_hammer_shape(candle),
            ),
            (CandleShape::Doji, self.is_doji(candle)),
            (CandleShape::GravestoneDoji, self.is_gravestone_doji(candle)),
            (CandleShape::DragonflyDoji, self.is_dragonfly_doji(candle)),
        ];

        checks
            .into_iter()
            .filter_map(|(shape, matched)| matched.then_some(shape))
            .collect()
    }

    /// 모양에 라벨링 정책을 적용하여 패턴 이름을 정합니다.
    ///
    /// # Arguments
    /// * `shape` - 캔들 모양
    /// * `prior_trend` - 직전 바까지의 추세 (`TrendContext` 정책에서만 사용)
    pub fn label_shape(&self, shape: CandleShape, prior_trend: TrendDirection) -> Vec<PatternName> {
        let (bullish, bearish) = match shape {
            CandleShape::HammerShape => (PatternName::Hammer, PatternName::HangingMan),
            CandleShape::InvertedHammerShape => {
                (PatternName::InvertedHammer, PatternName::ShootingStar)
            }
            CandleShape::Doji => return vec![PatternName::Doji],
            CandleShape::GravestoneDoji => return vec![PatternName::GravestoneDoji],
            CandleShape::DragonflyDoji => return vec![PatternName::DragonflyDoji],
        };

        match (self.config.reversal_labeling, prior_trend) {
            (ReversalLabeling::TrendContext, TrendDirection::Downtrend) => vec![bullish],
            (ReversalLabeling::TrendContext, TrendDirection::Uptrend) => vec![bearish],
            _ => vec![bullish, bearish],
        }
    }

    /// 샛별형: 음봉 → 갭 하락 → 첫 캔들 몸통 중간 위로 마감하는 양봉
    pub fn is_morning_star<C: Candle>(&self, first: &C, second: &C, third: &C) -> bool {
        first.is_bearish()
            && second.high_price() < first.low_price()
            && third.is_bullish()
            && third.close_price() > first.body_midpoint()
    }

    /// 석별형: 양봉 → 갭 상승 → 첫 캔들 몸통 중간 아래로 마감하는 음봉
    pub fn is_evening_star<C: Candle>(&self, first: &C, second: &C, third: &C) -> bool {
        first.is_bullish()
            && second.low_price() > first.high_price()
            && third.is_bearish()
            && third.close_price() < first.body_midpoint()
    }

    /// 적삼병: 몸통과 종가가 함께 커지는 양봉 3개, 위꼬리가 짧음
    pub fn is_three_white_soldiers<C: Candle>(&self, first: &C, second: &C, third: &C) -> bool {
        let ratio = self.config.soldier_shadow_ratio;
        let candles = [first, second, third];

        candles.iter().all(|c| c.is_bullish())
            && third.body() > second.body()
            && second.body() > first.body()
            && third.close_price() > second.close_price()
            && second.close_price() > first.close_price()
            && candles.iter().all(|c| c.upper_shadow() < c.body() * ratio)
    }

    /// 흑삼병: 몸통은 커지고 종가는 내려가는 음봉 3개, 아래꼬리가 짧음
    pub fn is_three_black_crows<C: Candle>(&self, first: &C, second: &C, third: &C) -> bool {
        let ratio = self.config.soldier_shadow_ratio;
        let candles = [first, second, third];

        candles.iter().all(|c| c.is_bearish())
            && third.body() > second.body()
            && second.body() > first.body()
            && third.close_price() < second.close_price()
            && second.close_price() < first.close_price()
            && candles.iter().all(|c| c.lower_shadow() < c.body() * ratio)
    }

    /// `index`에서 끝나는 3개 캔들의 다중 캔들 패턴을 찾습니다.
    ///
    /// # Arguments
    /// * `candles` - 전체 캔들
    /// * `index` - 마지막 캔들 인덱스 (2 미만이면 빈 결과)
    ///
    /// # Returns
    /// * `Vec<PatternName>` - 샛별형, 석별형, 적삼병, 흑삼병 순서
    pub fn detect_multi_patterns<C: Candle>(&self, candles: &[C], index: usize) -> Vec<PatternName> {
        if index < 2 || index >= candles.len() {
            return Vec::new();
        }
        let (first, second, third) = (&candles[index - 2], &candles[index - 1], &candles[index]);

        let checks = [
            (
                PatternName::MorningStar,
                self.is_morning_star(first, second, third),
            ),
            (
                PatternName::EveningStar,
                self.is_evening_star(first, second, third),
            ),
            (
                PatternName::ThreeWhiteSoldiers,
                self.is_three_white_soldiers(first, second, third),
            ),
            (
                PatternName::ThreeBlackCrows,
                self.is_three_black_crows(first, second, third),
            ),
        ];

        checks
            .into_iter()
            .filter_map(|(name, matched)| matched.then_some(name))
            .collect()
    }
}
