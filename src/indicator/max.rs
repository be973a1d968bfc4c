use crate::indicator::utils::rolling;
use std::fmt::Display;

/// 최고값(HHV) 시계열
#[derive(Clone, Debug)]
pub struct MAX {
    period: usize,
    pub values: Vec<f64>,
}

impl Display for MAX {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.values.last() {
            Some(max) => write!(f, "MAX({}: {})", self.period, max),
            None => write!(f, "MAX({}: -)", self.period),
        }
    }
}

impl MAX {
    /// 고가 데이터에서 후행 최고값을 계산합니다.
    pub fn calculate(highs: &[f64], period: usize) -> MAX {
        MAX {
            period,
            values: calculate_hhv(highs, period),
        }
    }
}

/// 바별 후행 최고값 (앞쪽은 사용 가능한 구간으로 축소)
///
/// # Arguments
/// * `values` - 입력 데이터 (보통 고가)
/// * `period` - 구간 길이
pub fn calculate_hhv(values: &[f64], period: usize) -> Vec<f64> {
    rolling(values, period, |window| {
        window.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hhv() {
        let hhv = calculate_hhv(&[3.0, 1.0, 4.0, 1.0, 5.0, 2.0, 1.0], 3);
        assert_eq!(hhv, vec![3.0, 3.0, 4.0, 4.0, 5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(MAX::calculate(&[1.0, 2.0], 9).to_string(), "MAX(9: 2)");
        assert_eq!(MAX::calculate(&[], 9).to_string(), "MAX(9: -)");
    }
}
