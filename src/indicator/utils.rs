/// 공통 이동평균 계산 함수들
pub mod moving_average {
    /// 단순이동평균(SMA) 계산 - 공통 유틸리티 함수
    ///
    /// 데이터가 `period`보다 적으면 사용 가능한 전체 데이터의 평균을 반환합니다.
    ///
    /// # Arguments
    /// * `values` - 가격 데이터 배열
    /// * `period` - 계산 기간
    ///
    /// # Returns
    /// * `f64` - 계산된 SMA 값 (데이터가 없거나 period가 0이면 0.0 반환)
    pub fn calculate_sma(values: &[f64], period: usize) -> f64 {
        if values.is_empty() || period == 0 {
            return 0.0;
        }

        if values.len() >= period {
            let start_idx = values.len() - period;
            let slice = &values[start_idx..];
            slice.iter().sum::<f64>() / period as f64
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    /// 지수이동평균(EMA) 계산을 위한 알파값 계산
    ///
    /// # Arguments
    /// * `period` - EMA 기간
    ///
    /// # Returns
    /// * `f64` - 알파값 (평활화 계수)
    pub fn calculate_ema_alpha(period: usize) -> f64 {
        2.0 / (period + 1) as f64
    }

    /// 지수이동평균(EMA) 한 스텝 계산
    ///
    /// `alpha * current + (1 - alpha) * previous`와 같은 값이며,
    /// 입력이 이전 값과 같으면 결과도 정확히 같습니다.
    ///
    /// # Arguments
    /// * `current_price` - 현재 가격
    /// * `previous_ema` - 이전 EMA 값
    /// * `alpha` - 평활화 계수
    ///
    /// # Returns
    /// * `f64` - 계산된 EMA 값
    pub fn calculate_ema_step(current_price: f64, previous_ema: f64, alpha: f64) -> f64 {
        previous_ema + alpha * (current_price - previous_ema)
    }
}

/// 기초 통계 함수들
pub mod statistics {
    /// 산술 평균
    ///
    /// # Returns
    /// * `Option<f64>` - 빈 배열이면 None
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// 표본 표준편차 (ddof = 1)
    ///
    /// # Arguments
    /// * `values` - 데이터 배열
    ///
    /// # Returns
    /// * `Option<f64>` - 데이터가 2개 미만이면 None
    pub fn sample_std(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }

        let mean = mean(values)?;
        let variance = values
            .iter()
            .map(|&x| {
                let diff = x - mean;
                diff * diff
            })
            .sum::<f64>()
            / (values.len() - 1) as f64;

        Some(variance.sqrt())
    }

    /// 피어슨 상관계수
    ///
    /// # Arguments
    /// * `xs` - 첫 번째 데이터
    /// * `ys` - 두 번째 데이터 (xs와 길이가 같아야 함)
    ///
    /// # Returns
    /// * `Option<f64>` - 길이가 다르거나 2개 미만이거나 분산이 0이면 None
    pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }

        let mean_x = mean(xs)?;
        let mean_y = mean(ys)?;

        let mut covariance = 0.0;
        let mut var_x = 0.0;
        let mut var_y = 0.0;
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            covariance += dx * dy;
            var_x += dx * dx;
            var_y += dy * dy;
        }

        let denominator = (var_x * var_y).sqrt();
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }

        let r = covariance / denominator;
        r.is_finite().then_some(r.clamp(-1.0, 1.0))
    }
}

/// `index`에서 끝나는 최대 `period`개의 후행 구간을 반환합니다.
///
/// 앞쪽 데이터가 부족하면 사용 가능한 만큼만 포함합니다.
///
/// # Arguments
/// * `values` - 전체 데이터
/// * `index` - 구간의 마지막 인덱스 (포함)
/// * `period` - 구간 길이 (0이면 1로 취급)
pub fn trailing_window(values: &[f64], index: usize, period: usize) -> &[f64] {
    let end = index + 1;
    let start = end.saturating_sub(period.max(1));
    &values[start..end]
}

/// 모든 인덱스에 대해 후행 구간 함수를 적용합니다.
///
/// # Arguments
/// * `values` - 전체 데이터
/// * `period` - 구간 길이
/// * `f` - 구간에 적용할 함수
///
/// # Returns
/// * `Vec<T>` - 입력과 같은 길이의 결과
pub fn rolling<T>(values: &[f64], period: usize, f: impl Fn(&[f64]) -> T) -> Vec<T> {
    (0..values.len())
        .map(|index| f(trailing_window(values, index, period)))
        .collect()
}

/// 값들의 배열 정렬 여부를 확인하는 내부 함수
///
/// # Arguments
/// * `values` - 확인할 값들
/// * `init` - 초기 비교값
/// * `cmp` - 비교 함수
///
/// # Returns
/// * `bool` - 정렬 조건 만족 여부
fn is_arrangement(values: &[f64], init: f64, cmp: impl Fn(f64, f64) -> bool) -> bool {
    let mut prev = init;
    for &value in values {
        if !cmp(value, prev) {
            return false;
        }
        prev = value;
    }

    true
}

/// 값들이 엄격한 내림차순(정배열)인지 확인
///
/// 단기 → 장기 이동평균 순으로 넘기면 상승 정배열 여부가 됩니다.
pub fn is_regular_arrangement(values: &[f64]) -> bool {
    is_arrangement(values, f64::MAX, |current, prev| current < prev)
}

/// 값들이 엄격한 오름차순(역배열)인지 확인
pub fn is_reverse_arrangement(values: &[f64]) -> bool {
    is_arrangement(values, f64::MIN, |current, prev| current > prev)
}

#[cfg(test)]
mod tests {
    use super::moving_average::*;
    use super::statistics::*;
    use super::*;

    #[test]
    fn test_calculate_sma_degrades() {
        assert_eq!(calculate_sma(&[1.0, 2.0, 3.0, 4.0], 2), 3.5);
        assert_eq!(calculate_sma(&[1.0, 2.0], 5), 1.5);
        assert_eq!(calculate_sma(&[], 5), 0.0);
    }

    #[test]
    fn test_ema_step_flat_is_exact() {
        let alpha = calculate_ema_alpha(12);
        assert_eq!(calculate_ema_step(100.0, 100.0, alpha), 100.0);
        assert!((calculate_ema_alpha(9) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std() {
        assert_eq!(sample_std(&[5.0]), None);
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.138089935299395).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        assert!((pearson_correlation(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson_correlation(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson_correlation(&xs, &[1.0, 1.0, 1.0, 1.0]), None);
    }

    #[test]
    fn test_trailing_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(trailing_window(&values, 0, 3), &[1.0]);
        assert_eq!(trailing_window(&values, 4, 3), &[3.0, 4.0, 5.0]);
        assert_eq!(rolling(&values, 2, |w| w.len()), vec![1, 2, 2, 2, 2]);
    }

    #[test]
    fn test_arrangement() {
        assert!(is_regular_arrangement(&[3.0, 2.0, 1.0]));
        assert!(!is_regular_arrangement(&[3.0, 2.0, 2.0]));
        assert!(is_reverse_arrangement(&[1.0, 2.0, 3.0]));
        assert!(!is_reverse_arrangement(&[1.0, 3.0, 2.0]));
        assert!(is_regular_arrangement(&[]));
    }
}
