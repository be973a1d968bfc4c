use crate::indicator::utils::rolling;
use std::fmt::Display;

/// 최저값(LLV) 시계열
#[derive(Clone, Debug)]
pub struct MIN {
    period: usize,
    pub values: Vec<f64>,
}

impl Display for MIN {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.values.last() {
            Some(min) => write!(f, "MIN({}: {})", self.period, min),
            None => write!(f, "MIN({}: -)", self.period),
        }
    }
}

impl MIN {
    /// 저가 데이터에서 후행 최저값을 계산합니다.
    pub fn calculate(lows: &[f64], period: usize) -> MIN {
        MIN {
            period,
            values: calculate_llv(lows, period),
        }
    }
}

/// 바별 후행 최저값 (앞쪽은 사용 가능한 구간으로 축소)
///
/// # Arguments
/// * `values` - 입력 데이터 (보통 저가)
/// * `period` - 구간 길이
pub fn calculate_llv(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        window.iter().fold(f64::INFINITY, |a, &b| a.min(b))
    })
}
