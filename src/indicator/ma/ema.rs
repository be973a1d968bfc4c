use crate::indicator::ma::MA;
use crate::indicator::utils::moving_average;
use std::fmt::Display;

/// 지수이동평균(EMA) 시계열
///
/// `EMA[0] = x[0]`에서 시작하여 `α = 2 / (period + 1)`로 재귀 계산합니다.
#[derive(Clone, Debug)]
pub struct EMA {
    /// EMA 계산 기간
    period: usize,
    /// 바별 EMA 값
    values: Vec<f64>,
}

impl Display for EMA {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}: {:.2})", self.period, self.get())
    }
}

impl MA for EMA {
    fn period(&self) -> usize {
        self.period
    }

    fn values(&self) -> &[f64] {
        &self.values
    }
}

impl EMA {
    /// 전체 데이터에서 EMA 시계열을 계산합니다.
    ///
    /// # Arguments
    /// * `values` - 입력 데이터
    /// * `period` - EMA 계산 기간
    pub fn calculate(values: &[f64], period: usize) -> EMA {
        EMA {
            period,
            values: calculate_ema_series(values, period),
        }
    }

    /// 계산된 시계열 소유권을 넘깁니다.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// 바별 지수이동평균
///
/// # Arguments
/// * `values` - 입력 데이터
/// * `period` - EMA 계산 기간
///
/// # Returns
/// * `Vec<f64>` - 입력과 같은 길이의 EMA 값
pub fn calculate_ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = moving_average::calculate_ema_alpha(period.max(1));
    let mut result = Vec::with_capacity(values.len());

    let mut previous: Option<f64> = None;
    for &value in values {
        let ema = match previous {
            Some(prev) => moving_average::calculate_ema_step(value, prev, alpha),
            None => value,
        };
        result.push(ema);
        previous = Some(ema);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_calculation() {
        // alpha = 0.5
        let ema = EMA::calculate(&[10.0, 20.0, 30.0], 3);
        assert_eq!(ema.values(), &[10.0, 15.0, 22.5]);
        assert_eq!(ema.to_string(), "EMA(3: 22.50)");
    }

    #[test]
    fn test_rising_input_raises_ema() {
        let ema = EMA::calculate(&[100.0, 105.0, 110.0, 115.0, 125.0], 2);
        let values = ema.values();
        assert!(values.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_empty_data() {
        let ema = EMA::calculate(&[], 5);
        assert_eq!(ema.get(), 0.0);
        assert_eq!(ema.period(), 5);
    }
}
