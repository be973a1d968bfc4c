use crate::indicator::IndicatorRow;
use crate::indicator::rsi::{DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD, RSI, RsiZone};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 지표 점수 신호 기준값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalScoreConfig {
    /// RSI6 과매수 기준
    pub rsi_overbought: f64,
    /// RSI6 과매도 기준
    pub rsi_oversold: f64,
    /// K 상단 기준 (이 값 미만에서만 골든크로스를 매수로 인정)
    pub kdj_upper: f64,
    /// K 하단 기준 (이 값 초과에서만 데드크로스를 매도로 인정)
    pub kdj_lower: f64,
    /// 매수 판정 최소 점수
    pub buy_score: i32,
    /// 매도 판정 최대 점수
    pub sell_score: i32,
}

impl Default for SignalScoreConfig {
    fn default() -> Self {
        SignalScoreConfig {
            rsi_overbought: DEFAULT_OVERBOUGHT,
            rsi_oversold: DEFAULT_OVERSOLD,
            kdj_upper: 80.0,
            kdj_lower: 20.0,
            buy_score: 2,
            sell_score: -2,
        }
    }
}

/// 매매 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
    Neutral,
}

impl Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "buy"),
            TradeAction::Sell => write!(f, "sell"),
            TradeAction::Neutral => write!(f, "neutral"),
        }
    }
}

/// 최신 지표 기반 점수 신호
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorSignal {
    /// 합산 점수
    pub score: i32,
    /// 점수에 따른 매매 방향
    pub signal: TradeAction,
    /// RSI6 구간
    pub rsi_zone: RsiZone,
}

impl Default for IndicatorSignal {
    fn default() -> Self {
        IndicatorSignal {
            score: 0,
            signal: TradeAction::Neutral,
            rsi_zone: RsiZone::Neutral,
        }
    }
}

impl Display for IndicatorSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndicatorSignal({}, score={}, rsi={})",
            self.signal, self.score, self.rsi_zone
        )
    }
}

/// 최신 지표 행과 종가로 점수 신호를 계산합니다.
///
/// MACD, KDJ, RSI6, MA20, 볼린저 밴드를 각각 +1/-1/0으로 채점합니다.
///
/// # Arguments
/// * `row` - 마지막 바의 지표 행 (없으면 중립)
/// * `close` - 마지막 종가
/// * `config` - 기준값
///
/// # Returns
/// * `IndicatorSignal` - 점수와 매매 방향
pub fn evaluate_indicator_signal(
    row: Option<&IndicatorRow>,
    close: f64,
    config: &SignalScoreConfig,
) -> IndicatorSignal {
    let Some(row) = row else {
        return IndicatorSignal::default();
    };

    let mut score = 0;

    // MACD
    score += if row.dif > row.dea { 1 } else { -1 };

    // KDJ
    if row.k > row.d && row.k < config.kdj_upper {
        score += 1;
    } else if row.k < row.d && row.k > config.kdj_lower {
        score -= 1;
    }

    // RSI6
    let rsi_zone = RSI::new(6, row.rsi6).zone(config.rsi_overbought, config.rsi_oversold);
    match rsi_zone {
        RsiZone::Oversold => score += 1,
        RsiZone::Overbought => score -= 1,
        RsiZone::Neutral => {}
    }

    // MA20
    score += if close > row.ma20 { 1 } else { -1 };

    // 볼린저 밴드
    if row.boll_lower.is_some_and(|lower| close < lower) {
        score += 1;
    } else if row.boll_upper.is_some_and(|upper| close > upper) {
        score -= 1;
    }

    let signal = if score >= config.buy_score {
        TradeAction::Buy
    } else if score <= config.sell_score {
        TradeAction::Sell
    } else {
        TradeAction::Neutral
    };

    debug!("지표 점수 신호: score={score}, signal={signal}");

    IndicatorSignal {
        score,
        signal,
        rsi_zone,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> IndicatorRow {
        IndicatorRow {
            ma5: 100.0,
            ma10: 100.0,
            ma20: 100.0,
            ma60: 100.0,
            ema12: 100.0,
            ema26: 100.0,
            dif: 0.0,
            dea: 0.0,
            macd_hist: 0.0,
            rsi6: 50.0,
            rsi12: 50.0,
            rsi24: 50.0,
            boll_upper: Some(110.0),
            boll_mid: 100.0,
            boll_lower: Some(90.0),
            k: 50.0,
            d: 50.0,
            j: 50.0,
        }
    }

    #[test]
    fn test_empty_is_neutral() {
        let signal = evaluate_indicator_signal(None, 0.0, &SignalScoreConfig::default());
        assert_eq!(signal, IndicatorSignal::default());
    }

    #[test]
    fn test_buy_signal() {
        let mut row = row();
        row.dif = 1.0;
        row.dea = 0.5;
        row.k = 60.0;
        row.d = 50.0;
        row.rsi6 = 25.0;

        // MACD +1, KDJ +1, RSI +1, MA20 +1, 밴드 내부 0
        let signal = evaluate_indicator_signal(Some(&row), 105.0, &SignalScoreConfig::default());
        assert_eq!(signal.score, 4);
        assert_eq!(signal.signal, TradeAction::Buy);
        assert_eq!(signal.rsi_zone, RsiZone::Oversold);
    }

    #[test]
    fn test_sell_signal() {
        let mut row = row();
        row.dif = -1.0;
        row.k = 40.0;
        row.d = 50.0;
        row.rsi6 = 75.0;

        // MACD -1, KDJ -1, RSI -1, MA20 -1 (종가 95), 밴드 내부 0
        let signal = evaluate_indicator_signal(Some(&row), 95.0, &SignalScoreConfig::default());
        assert_eq!(signal.score, -4);
        assert_eq!(signal.signal, TradeAction::Sell);
    }

    #[test]
    fn test_bollinger_contribution() {
        let mut row = row();
        row.dif = 1.0;
        row.boll_upper = Some(101.0);

        // MACD +1, MA20 +1, 상단 돌파 -1
        let signal = evaluate_indicator_signal(Some(&row), 102.0, &SignalScoreConfig::default());
        assert_eq!(signal.score, 1);
        assert_eq!(signal.signal, TradeAction::Neutral);
    }
}
