use crate::indicator::utils::{moving_average, statistics, trailing_window};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// 볼린저 밴드 계산 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerBandsParams {
    /// 이동평균 기간
    pub period: usize,
    /// 표준편차 승수
    pub multiplier: f64,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        BollingerBandsParams {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// 볼린저 밴드 한 바의 값
///
/// 중간 밴드는 항상 존재하지만, 표본 표준편차(ddof=1)는 구간에
/// 값이 2개 이상 있어야 정의되므로 첫 바의 상/하단은 `None`입니다.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BollingerBands {
    /// 상단 밴드
    pub upper: Option<f64>,
    /// 중간 밴드 (이동평균)
    pub middle: f64,
    /// 하단 밴드
    pub lower: Option<f64>,
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.upper, self.lower) {
            (Some(upper), Some(lower)) => write!(
                f,
                "BBand({:.2}, {:.2}, {:.2})",
                upper, self.middle, lower
            ),
            _ => write!(f, "BBand(-, {:.2}, -)", self.middle),
        }
    }
}

impl BollingerBands {
    /// 밴드 폭 (상단 - 하단)
    pub fn width(&self) -> Option<f64> {
        Some(self.upper? - self.lower?)
    }

    /// 가격이 하단 밴드 아래에 있는지
    pub fn is_below_lower(&self, price: f64) -> bool {
        self.lower.is_some_and(|lower| price < lower)
    }

    /// 가격이 상단 밴드 위에 있는지
    pub fn is_above_upper(&self, price: f64) -> bool {
        self.upper.is_some_and(|upper| price > upper)
    }
}

/// 바별 볼린저 밴드 계산
///
/// # Arguments
/// * `closes` - 종가 데이터
/// * `params` - 볼린저 밴드 파라미터
///
/// # Returns
/// * `Vec<BollingerBands>` - 입력과 같은 길이의 볼린저 밴드 값
pub fn calculate_bollinger_bands(
    closes: &[f64],
    params: &BollingerBandsParams,
) -> Vec<BollingerBands> {
    let period = params.period.max(1);

    (0..closes.len())
        .map(|index| {
            let window = trailing_window(closes, index, period);
            let middle = moving_average::calculate_sma(window, period);
            let std_dev = statistics::sample_std(window);

            BollingerBands {
                upper: std_dev.map(|std| middle + params.multiplier * std),
                middle,
                lower: std_dev.map(|std| middle - params.multiplier * std),
            }
        })
        .collect()
}
