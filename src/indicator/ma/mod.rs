pub mod ema;
pub mod sma;

use ema::EMA;
use serde::{Deserialize, Serialize};
use sma::SMA;
use std::fmt::Debug;
use std::fmt::Display;

/// 이동평균(Moving Average) 인터페이스
///
/// 다양한 이동평균 구현체에 대한 공통 인터페이스.
/// 구현체는 입력과 같은 길이의 전체 시계열을 보관합니다.
pub trait MA: Display + Send + Sync + Debug {
    /// 이동평균 계산 기간
    fn period(&self) -> usize;

    /// 바별 이동평균 값 (입력과 같은 길이)
    fn values(&self) -> &[f64];

    /// 마지막 바의 이동평균 값
    ///
    /// # Returns
    /// * `f64` - 계산된 이동평균 값 (데이터가 없으면 0.0)
    fn get(&self) -> f64 {
        self.values().last().copied().unwrap_or(0.0)
    }

    /// 지정된 바의 이동평균 값
    fn at(&self, index: usize) -> Option<f64> {
        self.values().get(index).copied()
    }
}

/// 이동평균 계산 방식
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MAType {
    /// 지수이동평균 (Exponential Moving Average)
    /// 최근 데이터에 더 큰 가중치를 부여합니다.
    EMA,
    /// 단순이동평균 (Simple Moving Average)
    /// 모든 데이터에 동일한 가중치를 부여합니다.
    SMA,
}

impl Display for MAType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MAType::EMA => write!(f, "EMA"),
            MAType::SMA => write!(f, "SMA"),
        }
    }
}

/// 이동평균 유형과 기간에 따라 이동평균을 계산합니다.
///
/// # Arguments
/// * `ma_type` - 이동평균 유형 (EMA, SMA)
/// * `values` - 입력 데이터
/// * `period` - 이동평균 계산 기간
///
/// # Returns
/// * `Box<dyn MA>` - 계산된 이동평균
pub fn calculate_ma(ma_type: MAType, values: &[f64], period: usize) -> Box<dyn MA> {
    match ma_type {
        MAType::EMA => Box::new(EMA::calculate(values, period)),
        MAType::SMA => Box::new(SMA::calculate(values, period)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_ma_by_type() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_ma(MAType::SMA, &values, 3);
        let ema = calculate_ma(MAType::EMA, &values, 3);

        assert_eq!(sma.period(), 3);
        assert_eq!(sma.values().len(), values.len());
        assert!((sma.get() - 4.0).abs() < 1e-12);
        assert_eq!(ema.at(0), Some(1.0));
        assert_eq!(ema.at(10), None);
        assert_eq!(MAType::EMA.to_string(), "EMA");
    }
}
