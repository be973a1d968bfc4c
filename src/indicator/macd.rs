use crate::indicator::ma::ema::calculate_ema_series;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// MACD 계산 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct MACDParams {
    /// 빠른 EMA 기간 (일반적으로 12)
    pub fast_period: usize,
    /// 느린 EMA 기간 (일반적으로 26)
    pub slow_period: usize,
    /// 시그널 라인(DEA) 기간 (일반적으로 9)
    pub signal_period: usize,
}

impl Default for MACDParams {
    fn default() -> Self {
        MACDParams {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Display for MACDParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{}",
            self.fast_period, self.slow_period, self.signal_period
        )
    }
}

/// MACD(Moving Average Convergence Divergence) 한 바의 값
///
/// MACD는 추세 추종 모멘텀 지표로, 추세의 방향과 강도를 나타냅니다.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MACD {
    /// DIF (빠른 EMA - 느린 EMA)
    pub dif: f64,
    /// DEA (DIF의 EMA)
    pub dea: f64,
    /// 히스토그램 ((DIF - DEA) × 2)
    pub histogram: f64,
}

impl Display for MACD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({:.2}, {:.2}, {:.2})",
            self.dif, self.dea, self.histogram
        )
    }
}

impl MACD {
    /// DIF가 DEA 위에 있는지 (상승 모멘텀)
    pub fn is_above_signal(&self) -> bool {
        self.dif > self.dea
    }
}

/// 바별 MACD 계산
///
/// # Arguments
/// * `closes` - 종가 데이터
/// * `params` - MACD 파라미터
///
/// # Returns
/// * `Vec<MACD>` - 입력과 같은 길이의 MACD 값
pub fn calculate_macd(closes: &[f64], params: &MACDParams) -> Vec<MACD> {
    let fast = calculate_ema_series(closes, params.fast_period);
    let slow = calculate_ema_series(closes, params.slow_period);

    let difs: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let deas = calculate_ema_series(&difs, params.signal_period);

    difs.into_iter()
        .zip(deas)
        .map(|(dif, dea)| MACD {
            dif,
            dea,
            histogram: (dif - dea) * 2.0,
        })
        .collect()
}
