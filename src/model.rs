use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// OHLCV 캔들 데이터에 접근하기 위한 트레이트
///
/// 엔진은 이 트레이트만을 통해 입력 데이터를 읽으므로,
/// 호출자는 자신만의 캔들 타입을 그대로 넘길 수 있습니다.
pub trait Candle: Debug {
    /// 캔들 시작 시각 (시계열 키)
    fn datetime(&self) -> DateTime<Utc>;
    /// 시가
    fn open_price(&self) -> f64;
    /// 고가
    fn high_price(&self) -> f64;
    /// 저가
    fn low_price(&self) -> f64;
    /// 종가
    fn close_price(&self) -> f64;
    /// 거래량
    fn volume(&self) -> f64;
}

/// 캔들 형태 계산 헬퍼
///
/// 모든 `Candle` 구현체에 자동으로 제공됩니다.
pub trait CandleExt: Candle {
    /// 몸통 크기 `|close - open|`
    fn body(&self) -> f64 {
        (self.close_price() - self.open_price()).abs()
    }

    /// 위꼬리 길이 `high - max(open, close)`
    fn upper_shadow(&self) -> f64 {
        self.high_price() - self.open_price().max(self.close_price())
    }

    /// 아래꼬리 길이 `min(open, close) - low`
    fn lower_shadow(&self) -> f64 {
        self.open_price().min(self.close_price()) - self.low_price()
    }

    /// 전체 변동폭 `high - low`
    fn range(&self) -> f64 {
        self.high_price() - self.low_price()
    }

    /// 양봉 여부
    fn is_bullish(&self) -> bool {
        self.close_price() > self.open_price()
    }

    /// 음봉 여부
    fn is_bearish(&self) -> bool {
        self.close_price() < self.open_price()
    }

    /// 몸통 중간값 `(open + close) / 2`
    fn body_midpoint(&self) -> f64 {
        (self.open_price() + self.close_price()) / 2.0
    }
}

impl<T: Candle + ?Sized> CandleExt for T {}

/// 기본 OHLCV 캔들
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub datetime: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// 새 캔들 생성
    pub fn new(
        datetime: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Bar {
            datetime,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bar({}, o={}, h={}, l={}, c={}, v={})",
            self.datetime.format("%Y-%m-%d %H:%M:%S"),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        )
    }
}

impl Candle for Bar {
    fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    fn open_price(&self) -> f64 {
        self.open
    }

    fn high_price(&self) -> f64 {
        self.high
    }

    fn low_price(&self) -> f64 {
        self.low
    }

    fn close_price(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// 방향성 신호 (패턴 극성 및 종합 신호에 공통 사용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// 상승 신호
    Bullish,
    /// 하락 신호
    Bearish,
    /// 중립
    Neutral,
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Bullish => write!(f, "bullish"),
            Signal::Bearish => write!(f, "bearish"),
            Signal::Neutral => write!(f, "neutral"),
        }
    }
}
