use crate::indicator::ma::sma::calculate_sma_series;
use crate::indicator::utils::moving_average;
use serde::Serialize;
use std::fmt::Display;

/// 거래량 지표 (마지막 바 기준)
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Volume {
    /// 거래량 평균 기간
    #[serde(skip)]
    period: usize,
    /// 평균 거래량
    pub average_volume: f64,
    /// 현재 거래량
    pub current_volume: f64,
    /// 거래량 비율 (현재/평균)
    pub volume_ratio: f64,
}

impl Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Volume({}: avg={:.2}, current={:.2}, ratio={:.2})",
            self.period, self.average_volume, self.current_volume, self.volume_ratio
        )
    }
}

impl Volume {
    /// 거래량 데이터에서 마지막 바의 거래량 지표를 계산합니다.
    ///
    /// 평균 거래량이 0이면 비율은 1.0입니다.
    ///
    /// # Arguments
    /// * `volumes` - 거래량 데이터
    /// * `period` - 평균 기간
    ///
    /// # Returns
    /// * `Volume` - 빈 데이터면 평균/현재 0, 비율 1.0
    pub fn calculate(volumes: &[f64], period: usize) -> Volume {
        let average_volume = moving_average::calculate_sma(volumes, period.max(1));
        let current_volume = volumes.last().copied().unwrap_or(0.0);

        let volume_ratio = if average_volume == 0.0 {
            1.0
        } else {
            current_volume / average_volume
        };

        Volume {
            period,
            average_volume,
            current_volume,
            volume_ratio,
        }
    }

    /// 평균 기간
    pub fn period(&self) -> usize {
        self.period
    }

    /// 평균 대비 거래량이 기준 이상으로 높은지
    pub fn is_volume_surge(&self, threshold: f64) -> bool {
        self.volume_ratio > threshold
    }

    /// 평균 대비 거래량이 기준 미만으로 낮은지
    pub fn is_volume_dry(&self, threshold: f64) -> bool {
        self.volume_ratio < threshold
    }
}

/// 바별 거래량 이동평균 (앞쪽은 사용 가능한 구간으로 축소)
pub fn calculate_volume_ma(volumes: &[f64], period: usize) -> Vec<f64> {
    calculate_sma_series(volumes, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_ratio() {
        let mut volumes = vec![1000.0; 19];
        volumes.push(3000.0);
        let volume = Volume::calculate(&volumes, 20);

        assert!((volume.average_volume - 1100.0).abs() < 1e-9);
        assert_eq!(volume.current_volume, 3000.0);
        assert!((volume.volume_ratio - 3000.0 / 1100.0).abs() < 1e-12);
        assert!(volume.is_volume_surge(1.2));
        assert!(!volume.is_volume_dry(0.8));
    }

    #[test]
    fn test_empty_and_zero_volume() {
        let empty = Volume::calculate(&[], 20);
        assert_eq!(empty.average_volume, 0.0);
        assert_eq!(empty.volume_ratio, 1.0);

        let zeros = Volume::calculate(&[0.0; 5], 20);
        assert_eq!(zeros.volume_ratio, 1.0);
        assert_eq!(zeros.period(), 20);
    }

    #[test]
    fn test_volume_ma_degrades() {
        let ma = calculate_volume_ma(&[100.0, 200.0, 300.0], 5);
        assert_eq!(ma, vec![100.0, 150.0, 200.0]);
    }
}
