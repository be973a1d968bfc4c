use crate::indicator::ma::MA;
use crate::indicator::utils::{moving_average, trailing_window};
use std::fmt::Display;

/// 단순이동평균(SMA) 시계열
///
/// 바 `i < period - 1`에서는 사용 가능한 `i + 1`개 바의 평균을 사용하므로
/// 모든 바에 값이 존재합니다.
#[derive(Clone, Debug)]
pub struct SMA {
    period: usize,
    values: Vec<f64>,
}

impl Display for SMA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}: {:.2})", self.period, self.get())
    }
}

impl MA for SMA {
    fn period(&self) -> usize {
        self.period
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl SMA {
    /// 전체 데이터에서 SMA 시계열을 계산합니다.
    ///
    /// # Arguments
    /// * `values` - 입력 데이터
    /// * `period` - 계산 기간
    pub fn calculate(values: &[f64], period: usize) -> SMA {
        SMA {
            period,
            values: calculate_sma_series(values, period),
        }
    }

    /// 계산된 시계열 소유권을 넘깁니다.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// 바별 후행 단순이동평균
///
/// # Arguments
/// * `values` - 입력 데이터
/// * `period` - 계산 기간
///
/// # Returns
/// * `Vec<f64>` - 입력과 같은 길이의 SMA 값
pub fn calculate_sma_series(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    (0..values.len())
        .map(|index| moving_average::calculate_sma(trailing_window(values, index, period), period))
        .collect()
}
