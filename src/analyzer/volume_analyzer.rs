use crate::analyzer::base::{AnalysisContext, Analyzer};
use crate::indicator::utils::moving_average;
use crate::indicator::volume::Volume;
use crate::model::{Candle, Signal};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 거래량 분석 설정
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// 평균 거래량 기간
    pub period: usize,
    /// 거래량 추세 단기 이동평균 기간
    pub short_period: usize,
    /// 거래량 추세 장기 이동평균 기간
    pub long_period: usize,
    /// 거래량 증가 판정 비율 (초과)
    pub high_ratio: f64,
    /// 거래량 감소 판정 비율 (미만)
    pub low_ratio: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        VolumeConfig {
            period: 20,
            short_period: 5,
            long_period: 20,
            high_ratio: 1.2,
            low_ratio: 0.8,
        }
    }
}

/// 거래량 추세
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeTrend {
    /// 단기 평균 > 장기 평균
    Increasing,
    /// 단기 평균 < 장기 평균
    Decreasing,
    /// 같거나 데이터 부족
    #[default]
    Stable,
}

impl Display for VolumeTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolumeTrend::Increasing => write!(f, "increasing"),
            VolumeTrend::Decreasing => write!(f, "decreasing"),
            VolumeTrend::Stable => write!(f, "stable"),
        }
    }
}

/// 거래량 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeAnalysis {
    /// 평균 거래량
    pub avg_volume: f64,
    /// 마지막 바 거래량
    pub current_volume: f64,
    /// 현재/평균 비율
    pub ratio: f64,
    /// 거래량 추세
    pub trend: VolumeTrend,
    /// 가격-거래량 관계
    pub volume_price_relationship: Signal,
}

impl Default for VolumeAnalysis {
    fn default() -> Self {
        VolumeAnalysis {
            avg_volume: 0.0,
            current_volume: 0.0,
            ratio: 1.0,
            trend: VolumeTrend::Stable,
            volume_price_relationship: Signal::Neutral,
        }
    }
}

impl Display for VolumeAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VolumeAnalysis(avg={:.2}, current={:.2}, ratio={:.2}, {}, {})",
            self.avg_volume,
            self.current_volume,
            self.ratio,
            self.trend,
            self.volume_price_relationship
        )
    }
}

/// 거래량 분석기
#[derive(Debug, Clone, Default)]
pub struct VolumeAnalyzer {
    config: VolumeConfig,
}

impl VolumeAnalyzer {
    /// 새 거래량 분석기 생성
    pub fn new(config: VolumeConfig) -> VolumeAnalyzer {
        VolumeAnalyzer { config }
    }

    /// 단기/장기 거래량 평균으로 추세 판정
    ///
    /// 데이터가 단기 기간보다 적으면 `Stable`입니다.
    pub fn volume_trend(&self, volumes: &[f64]) -> VolumeTrend {
        if volumes.len() < self.config.short_period.max(1) {
            return VolumeTrend::Stable;
        }

        let short_ma = moving_average::calculate_sma(volumes, self.config.short_period);
        let long_ma = moving_average::calculate_sma(volumes, self.config.long_period);

        if short_ma > long_ma {
            VolumeTrend::Increasing
        } else if short_ma < long_ma {
            VolumeTrend::Decreasing
        } else {
            VolumeTrend::Stable
        }
    }

    /// 가격 변화와 거래량 비율로 가격-거래량 관계 판정
    ///
    /// 상승+거래량 증가 → 상승, 상승+거래량 감소 → 하락(괴리),
    /// 하락+거래량 증가 → 하락, 하락+거래량 감소 → 상승(바닥 가능성)
    pub fn volume_price_relationship(&self, price_change: f64, ratio: f64) -> Signal {
        let high = ratio > self.config.high_ratio;
        let low = ratio < self.config.low_ratio;

        if price_change > 0.0 && high {
            Signal::Bullish
        } else if price_change > 0.0 && low {
            Signal::Bearish
        } else if price_change < 0.0 && high {
            Signal::Bearish
        } else if price_change < 0.0 && low {
            Signal::Bullish
        } else {
            Signal::Neutral
        }
    }

    /// 캔들 데이터의 거래량을 분석합니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들
    ///
    /// # Returns
    /// * `VolumeAnalysis` - 빈 데이터면 기본값
    pub fn analyze_volume<C: Candle>(&self, candles: &[C]) -> VolumeAnalysis {
        if candles.is_empty() {
            return VolumeAnalysis::default();
        }

        let volumes: Vec<f64> = candles.iter().map(|c| c.volume()).collect();
        let volume = Volume::calculate(&volumes, self.config.period);
        let trend = self.volume_trend(&volumes);

        let price_change = match candles {
            [.., prev, last] => last.close_price() - prev.close_price(),
            _ => 0.0,
        };
        let relationship = self.volume_price_relationship(price_change, volume.volume_ratio);

        let analysis = VolumeAnalysis {
            avg_volume: volume.average_volume,
            current_volume: volume.current_volume,
            ratio: volume.volume_ratio,
            trend,
            volume_price_relationship: relationship,
        };
        debug!("거래량 분석 결과: {analysis}");
        analysis
    }
}

impl Analyzer for VolumeAnalyzer {
    type Output = VolumeAnalysis;

    fn name(&self) -> &'static str {
        "volume"
    }

    fn analyze<C: Candle>(&self, ctx: &AnalysisContext<'_, C>) -> VolumeAnalysis {
        self.analyze_volume(ctx.candles)
    }
}
