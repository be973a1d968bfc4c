// 기술적 지표 모듈
// 시계열 전체에서 바별 지표 값을 계산하고 IndicatorTable로 묶습니다.

pub mod bband;
pub mod kdj;
pub mod ma;
pub mod macd;
pub mod max;
pub mod min;
pub mod rsi;
pub mod signal;
pub mod utils;
pub mod volume;

use crate::model::Candle;
use bband::{BollingerBandsParams, calculate_bollinger_bands};
use kdj::{KDJParams, calculate_kdj};
use log::debug;
use ma::{MA, MAType, calculate_ma};
use macd::{MACDParams, calculate_macd};
use rsi::calculate_rsi;
use serde::{Deserialize, Serialize};
use signal::SignalScoreConfig;
use std::fmt::Display;

/// 지표 계산 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// MACD 파라미터
    pub macd: MACDParams,
    /// 볼린저 밴드 파라미터
    pub bollinger: BollingerBandsParams,
    /// KDJ 파라미터
    pub kdj: KDJParams,
    /// 지표 점수 신호 기준값
    pub signal: SignalScoreConfig,
}

/// 지표 테이블의 열 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorName {
    Ma5,
    Ma10,
    Ma20,
    Ma60,
    Ema12,
    Ema26,
    Dif,
    Dea,
    MacdHist,
    Rsi6,
    Rsi12,
    Rsi24,
    BollUpper,
    BollMid,
    BollLower,
    K,
    D,
    J,
}

impl IndicatorName {
    /// 모든 열 (테이블 열 순서)
    pub const ALL: [IndicatorName; 18] = [
        IndicatorName::Ma5,
        IndicatorName::Ma10,
        IndicatorName::Ma20,
        IndicatorName::Ma60,
        IndicatorName::Ema12,
        IndicatorName::Ema26,
        IndicatorName::Dif,
        IndicatorName::Dea,
        IndicatorName::MacdHist,
        IndicatorName::Rsi6,
        IndicatorName::Rsi12,
        IndicatorName::Rsi24,
        IndicatorName::BollUpper,
        IndicatorName::BollMid,
        IndicatorName::BollLower,
        IndicatorName::K,
        IndicatorName::D,
        IndicatorName::J,
    ];

    /// 열 이름 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorName::Ma5 => "ma5",
            IndicatorName::Ma10 => "ma10",
            IndicatorName::Ma20 => "ma20",
            IndicatorName::Ma60 => "ma60",
            IndicatorName::Ema12 => "ema12",
            IndicatorName::Ema26 => "ema26",
            IndicatorName::Dif => "dif",
            IndicatorName::Dea => "dea",
            IndicatorName::MacdHist => "macd_hist",
            IndicatorName::Rsi6 => "rsi6",
            IndicatorName::Rsi12 => "rsi12",
            IndicatorName::Rsi24 => "rsi24",
            IndicatorName::BollUpper => "boll_upper",
            IndicatorName::BollMid => "boll_mid",
            IndicatorName::BollLower => "boll_lower",
            IndicatorName::K => "k",
            IndicatorName::D => "d",
            IndicatorName::J => "j",
        }
    }
}

impl Display for IndicatorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 한 바의 지표 값
///
/// 볼린저 상/하단만 첫 바에서 정의되지 않을 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorRow {
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub dif: f64,
    pub dea: f64,
    pub macd_hist: f64,
    pub rsi6: f64,
    pub rsi12: f64,
    pub rsi24: f64,
    pub boll_upper: Option<f64>,
    pub boll_mid: f64,
    pub boll_lower: Option<f64>,
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

impl IndicatorRow {
    /// 이름으로 값을 조회합니다.
    ///
    /// # Returns
    /// * `Option<f64>` - 정의되지 않은 볼린저 상/하단이면 None
    pub fn get(&self, name: IndicatorName) -> Option<f64> {
        match name {
            IndicatorName::Ma5 => Some(self.ma5),
            IndicatorName::Ma10 => Some(self.ma10),
            IndicatorName::Ma20 => Some(self.ma20),
            IndicatorName::Ma60 => Some(self.ma60),
            IndicatorName::Ema12 => Some(self.ema12),
            IndicatorName::Ema26 => Some(self.ema26),
            IndicatorName::Dif => Some(self.dif),
            IndicatorName::Dea => Some(self.dea),
            IndicatorName::MacdHist => Some(self.macd_hist),
            IndicatorName::Rsi6 => Some(self.rsi6),
            IndicatorName::Rsi12 => Some(self.rsi12),
            IndicatorName::Rsi24 => Some(self.rsi24),
            IndicatorName::BollUpper => self.boll_upper,
            IndicatorName::BollMid => Some(self.boll_mid),
            IndicatorName::BollLower => self.boll_lower,
            IndicatorName::K => Some(self.k),
            IndicatorName::D => Some(self.d),
            IndicatorName::J => Some(self.j),
        }
    }

    /// 단기 → 장기 이동평균이 정배열(MA5 > MA10 > MA20)인지
    pub fn is_ma_regular_arrangement(&self) -> bool {
        utils::is_regular_arrangement(&[self.ma5, self.ma10, self.ma20])
    }

    /// 단기 → 장기 이동평균이 역배열(MA5 < MA10 < MA20)인지
    pub fn is_ma_reverse_arrangement(&self) -> bool {
        utils::is_reverse_arrangement(&[self.ma5, self.ma10, self.ma20])
    }
}

/// 바별 지표 테이블
///
/// 행 수는 입력 시계열 길이와 항상 같습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorTable {
    rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    /// 캔들 데이터에서 전체 지표 테이블을 계산합니다.
    ///
    /// # Arguments
    /// * `candles` - 시간 오름차순 캔들 데이터
    /// * `config` - 지표 설정
    ///
    /// # Returns
    /// * `IndicatorTable` - 캔들 수와 같은 행 수의 테이블
    pub fn calculate<C: Candle>(candles: &[C], config: &IndicatorConfig) -> IndicatorTable {
        let closes: Vec<f64> = candles.iter().map(|c| c.close_price()).collect();
        let highs: Vec<f64> = candles.iter().map(|c| c.high_price()).collect();
        let lows: Vec<f64> = candles.iter().map(|c| c.low_price()).collect();

        let ma5 = calculate_ma(MAType::SMA, &closes, 5);
        let ma10 = calculate_ma(MAType::SMA, &closes, 10);
        let ma20 = calculate_ma(MAType::SMA, &closes, 20);
        let ma60 = calculate_ma(MAType::SMA, &closes, 60);
        let ema12 = calculate_ma(MAType::EMA, &closes, 12);
        let ema26 = calculate_ma(MAType::EMA, &closes, 26);
        let macds = calculate_macd(&closes, &config.macd);
        let rsi6 = calculate_rsi(&closes, 6);
        let rsi12 = calculate_rsi(&closes, 12);
        let rsi24 = calculate_rsi(&closes, 24);
        let bbands = calculate_bollinger_bands(&closes, &config.bollinger);
        let kdjs = calculate_kdj(&highs, &lows, &closes, &config.kdj);

        let rows = (0..closes.len())
            .map(|i| IndicatorRow {
                ma5: ma5.values()[i],
                ma10: ma10.values()[i],
                ma20: ma20.values()[i],
                ma60: ma60.values()[i],
                ema12: ema12.values()[i],
                ema26: ema26.values()[i],
                dif: macds[i].dif,
                dea: macds[i].dea,
                macd_hist: macds[i].histogram,
                rsi6: rsi6[i],
                rsi12: rsi12[i],
                rsi24: rsi24[i],
                boll_upper: bbands[i].upper,
                boll_mid: bbands[i].middle,
                boll_lower: bbands[i].lower,
                k: kdjs[i].k,
                d: kdjs[i].d,
                j: kdjs[i].j,
            })
            .collect::<Vec<_>>();

        debug!("지표 테이블 계산 완료: {}행", rows.len());
        IndicatorTable { rows }
    }

    /// 행 수
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 전체 행
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// 지정된 바의 행
    pub fn get(&self, bar_index: usize) -> Option<&IndicatorRow> {
        self.rows.get(bar_index)
    }

    /// 마지막 바의 행 (현재 지표)
    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    /// `(bar_index, name)`으로 값을 조회합니다.
    pub fn value(&self, bar_index: usize, name: IndicatorName) -> Option<f64> {
        self.get(bar_index)?.get(name)
    }

    /// 한 열 전체
    pub fn column(&self, name: IndicatorName) -> Vec<Option<f64>> {
        self.rows.iter().map(|row| row.get(name)).collect()
    }
}
