use crate::analyzer::base::{AnalysisContext, Analyzer};
use crate::indicator::IndicatorTable;
use crate::indicator::utils::statistics;
use crate::model::Candle;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 추세 분석 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// 추세 판단 구간 (바 수)
    pub period: usize,
    /// 상승/하락 판정 가격 변화율 기준 (%)
    pub change_threshold_pct: f64,
    /// 가격이 MA20 아래일 때 이동평균 지지선 할인 계수
    pub ma_support_discount: f64,
    /// 가격이 MA20 위일 때 이동평균 저항선 할증 계수
    pub ma_resistance_premium: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        TrendConfig {
            period: 20,
            change_threshold_pct: 5.0,
            ma_support_discount: 0.95,
            ma_resistance_premium: 1.05,
        }
    }
}

/// 추세 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// 상승 추세
    Uptrend,
    /// 하락 추세
    Downtrend,
    /// 횡보
    #[default]
    Sideways,
}

impl Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Uptrend => write!(f, "uptrend"),
            TrendDirection::Downtrend => write!(f, "downtrend"),
            TrendDirection::Sideways => write!(f, "sideways"),
        }
    }
}

/// 추세 분석 결과
///
/// 데이터가 추세 구간보다 짧으면 횡보와 0 값으로 채워집니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendAnalysis {
    /// 추세 방향
    pub direction: TrendDirection,
    /// 추세 강도 `|상관계수(인덱스, 종가)|` (0-1)
    pub strength: f64,
    /// 구간 가격 변화율 (%)
    pub price_change_pct: f64,
    /// 구간 최저가
    pub support: f64,
    /// 구간 최고가
    pub resistance: f64,
    /// 이동평균 지지선
    pub ma_support: f64,
    /// 이동평균 저항선
    pub ma_resistance: f64,
    pub ma5: f64,
    pub ma20: f64,
    /// 데이터가 60개 미만이면 MA20과 같음
    pub ma60: f64,
}

impl Display for TrendAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Trend({}, strength={:.2}, change={:.2}%)",
            self.direction, self.strength, self.price_change_pct
        )
    }
}

/// 첫 값 대비 마지막 값의 변화율 (%)
///
/// 데이터가 없거나 첫 값이 0이면 0을 반환합니다.
pub fn price_change_pct(closes: &[f64]) -> f64 {
    match (closes.first(), closes.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => (last - first) / first * 100.0,
        _ => 0.0,
    }
}

/// 변화율로 추세 방향을 판정합니다.
///
/// # Arguments
/// * `change_pct` - 가격 변화율 (%)
/// * `threshold_pct` - 판정 기준 (%)
pub fn classify_direction(change_pct: f64, threshold_pct: f64) -> TrendDirection {
    if change_pct > threshold_pct {
        TrendDirection::Uptrend
    } else if change_pct < -threshold_pct {
        TrendDirection::Downtrend
    } else {
        TrendDirection::Sideways
    }
}

/// 추세 분석기
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// 새 추세 분석기 생성
    pub fn new(config: TrendConfig) -> TrendAnalyzer {
        TrendAnalyzer { config }
    }

    /// 설정 참조
    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// 종가 구간의 추세 방향만 빠르게 판정합니다.
    ///
    /// 반전 캔들 라벨링처럼 구간 길이가 부족해도 방향이 필요한 곳에서 사용하며,
    /// 값이 2개 미만이면 횡보입니다.
    pub fn direction_of(&self, closes: &[f64]) -> TrendDirection {
        if closes.len() < 2 {
            return TrendDirection::Sideways;
        }
        classify_direction(price_change_pct(closes), self.config.change_threshold_pct)
    }

    /// 캔들과 지표 테이블로 추세를 분석합니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들
    /// * `indicators` - 같은 캔들로 계산한 지표 테이블 (MA 값 사용)
    ///
    /// # Returns
    /// * `TrendAnalysis` - 분석 결과
    pub fn analyze_trend<C: Candle>(
        &self,
        candles: &[C],
        indicators: &IndicatorTable,
    ) -> TrendAnalysis {
        let period = self.config.period.max(1);
        if candles.len() < period {
            debug!(
                "추세 분석 데이터 부족: {} < {}, 기본값 사용",
                candles.len(),
                period
            );
            return TrendAnalysis::default();
        }
        let Some(latest) = indicators.latest() else {
            return TrendAnalysis::default();
        };

        let recent = &candles[candles.len() - period..];
        let closes: Vec<f64> = recent.iter().map(|c| c.close_price()).collect();

        let change_pct = price_change_pct(&closes);
        let direction = classify_direction(change_pct, self.config.change_threshold_pct);

        let positions: Vec<f64> = (0..closes.len()).map(|i| i as f64).collect();
        let strength = statistics::pearson_correlation(&positions, &closes)
            .map(f64::abs)
            .unwrap_or(0.0);

        let support = recent
            .iter()
            .map(|c| c.low_price())
            .fold(f64::INFINITY, f64::min);
        let resistance = recent
            .iter()
            .map(|c| c.high_price())
            .fold(f64::NEG_INFINITY, f64::max);

        let ma5 = latest.ma5;
        let ma20 = latest.ma20;
        let ma60 = if candles.len() >= 60 { latest.ma60 } else { ma20 };

        let current_price = closes.last().copied().unwrap_or(0.0);
        let ma_support = if current_price > ma20 {
            ma20
        } else {
            ma20 * self.config.ma_support_discount
        };
        let ma_resistance = if current_price < ma20 {
            ma20
        } else {
            ma20 * self.config.ma_resistance_premium
        };

        let analysis = TrendAnalysis {
            direction,
            strength,
            price_change_pct: change_pct,
            support,
            resistance,
            ma_support,
            ma_resistance,
            ma5,
            ma20,
            ma60,
        };
        debug!("추세 분석 결과: {analysis}");
        analysis
    }
}

impl Analyzer for TrendAnalyzer {
    type Output = TrendAnalysis;

    fn name(&self) -> &'static str {
        "trend"
    }

    fn analyze<C: Candle>(&self, ctx: &AnalysisContext<'_, C>) -> TrendAnalysis {
        self.analyze_trend(ctx.candles, ctx.indicators)
    }
}
