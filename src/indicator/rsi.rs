use crate::indicator::ma::ema::calculate_ema_series;
use serde::Serialize;
use std::fmt::Display;

/// 과매수 기준 RSI 기본값
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;
/// 과매도 기준 RSI 기본값
pub const DEFAULT_OVERSOLD: f64 = 30.0;

/// 바별 RSI 계산
///
/// 가격 변화량의 상승분/하락분을 각각 EMA로 평활화합니다.
/// 첫 바의 변화량은 0으로 취급합니다.
///
/// # Arguments
/// * `closes` - 종가 데이터
/// * `period` - RSI 계산 기간
///
/// # Returns
/// * `Vec<f64>` - 입력과 같은 길이의 RSI 값 (0-100)
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());

    // 가격 변화량 계산
    for i in 0..closes.len() {
        let change = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let avg_gains = calculate_ema_series(&gains, period);
    let avg_losses = calculate_ema_series(&losses, period);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(avg_gain, avg_loss)| rsi_from_averages(avg_gain, avg_loss))
        .collect()
}

/// 평균 상승분/하락분으로 RSI 값 계산
///
/// 하락분이 0이면 상승분 유무에 따라 100 또는 50을 반환합니다.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 50.0 };
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// RSI 구간
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    /// 과매수
    Overbought,
    /// 과매도
    Oversold,
    /// 중립
    Neutral,
}

impl Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsiZone::Overbought => write!(f, "과매수"),
            RsiZone::Oversold => write!(f, "과매도"),
            RsiZone::Neutral => write!(f, "중립"),
        }
    }
}

/// 상대강도지수(RSI) 한 바의 값
///
/// RSI는 가격 변동의 상대적 강도를 측정하여 과매수/과매도 상태를 판단
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RSI {
    /// RSI 계산 기간
    period: usize,
    /// RSI 값 (0-100)
    pub value: f64,
}

impl Display for RSI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}: {:.2})", self.period, self.value)
    }
}

impl RSI {
    /// 새 RSI 값 생성
    pub fn new(period: usize, value: f64) -> RSI {
        RSI { period, value }
    }

    /// RSI가 과매수 상태인지 확인 (기준값 초과)
    ///
    /// # Arguments
    /// * `threshold` - 과매수 기준값 (기본값 70.0)
    ///
    /// # Returns
    /// * `bool` - 과매수 여부
    pub fn is_overbought(&self, threshold: Option<f64>) -> bool {
        self.value > threshold.unwrap_or(DEFAULT_OVERBOUGHT)
    }

    /// RSI가 과매도 상태인지 확인 (기준값 미만)
    ///
    /// # Arguments
    /// * `threshold` - 과매도 기준값 (기본값 30.0)
    ///
    /// # Returns
    /// * `bool` - 과매도 여부
    pub fn is_oversold(&self, threshold: Option<f64>) -> bool {
        self.value < threshold.unwrap_or(DEFAULT_OVERSOLD)
    }

    /// 과매수/과매도 구간 판정
    ///
    /// # Arguments
    /// * `overbought` - 과매수 기준값
    /// * `oversold` - 과매도 기준값
    pub fn zone(&self, overbought: f64, oversold: f64) -> RsiZone {
        if self.is_overbought(Some(overbought)) {
            RsiZone::Overbought
        } else if self.is_oversold(Some(oversold)) {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }

    /// RSI 기간 반환
    pub fn period(&self) -> usize {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_rsi_is_50() {
        let rsi = calculate_rsi(&[10.0; 30], 6);
        assert!(rsi.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn test_rising_series_rsi_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
        let rsi = calculate_rsi(&closes, 6);
        assert_eq!(rsi[0], 50.0);
        assert!(rsi[1..].iter().all(|&v| v == 100.0));
    }

    #[test]
    fn test_falling_series_rsi_is_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let rsi = calculate_rsi(&closes, 12);
        assert!(rsi[1..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_known_value() {
        // alpha = 0.5 (period 3)
        // gains: 0, 2, 0 → ema: 0, 1, 0.5
        // losses: 0, 0, 1 → ema: 0, 0, 0.5
        let rsi = calculate_rsi(&[10.0, 12.0, 11.0], 3);
        assert_eq!(rsi[1], 100.0);
        assert!((rsi[2] - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_rsi_bounds_on_zigzag() {
        let closes: Vec<f64> = (0..50)
            .map(|i| 100.0 + if i % 3 == 0 { 5.0 } else { -2.5 } * (i % 7) as f64)
            .collect();
        for period in [6, 12, 24] {
            assert!(
                calculate_rsi(&closes, period)
                    .iter()
                    .all(|&v| (0.0..=100.0).contains(&v))
            );
        }
    }

    #[test]
    fn test_rsi_zone() {
        assert_eq!(RSI::new(6, 75.0).zone(70.0, 30.0), RsiZone::Overbought);
        assert_eq!(RSI::new(6, 25.0).zone(70.0, 30.0), RsiZone::Oversold);
        assert_eq!(RSI::new(6, 70.0).zone(70.0, 30.0), RsiZone::Neutral);
        assert_eq!(RSI::new(6, 55.5).to_string(), "RSI(6: 55.50)");
    }
}
