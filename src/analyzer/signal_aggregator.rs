use crate::analyzer::pattern_detector::{PatternMatch, PatternName};
use crate::analyzer::trend_analyzer::{TrendAnalysis, TrendDirection};
use crate::analyzer::volume_analyzer::VolumeAnalysis;
use crate::model::Signal;
use indexmap::IndexSet;
use log::debug;
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// 종합 신호를 구성하는 개별 신호 태그
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalTag {
    /// 인식된 패턴
    Pattern(PatternName),
    /// 가격-거래량 관계 상승
    VolumeBullish,
    /// 가격-거래량 관계 하락
    VolumeBearish,
    /// 상승 추세
    Uptrend,
    /// 하락 추세
    Downtrend,
}

impl SignalTag {
    /// 태그 문자열 (패턴이면 패턴 이름)
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalTag::Pattern(name) => name.as_str(),
            SignalTag::VolumeBullish => "volume_bullish",
            SignalTag::VolumeBearish => "volume_bearish",
            SignalTag::Uptrend => "uptrend",
            SignalTag::Downtrend => "downtrend",
        }
    }
}

impl Display for SignalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for SignalTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 신호 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalSummary {
    /// 상승 신호 (처음 나온 순서, 중복 없음)
    pub bullish_signals: Vec<SignalTag>,
    /// 하락 신호
    pub bearish_signals: Vec<SignalTag>,
    /// 중립 신호
    pub neutral_signals: Vec<SignalTag>,
    /// 종합 신호
    pub overall_signal: Signal,
}

impl Default for SignalSummary {
    fn default() -> Self {
        SignalSummary {
            bullish_signals: Vec::new(),
            bearish_signals: Vec::new(),
            neutral_signals: Vec::new(),
            overall_signal: Signal::Neutral,
        }
    }
}

impl Display for SignalSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SignalSummary({}, bullish={}, bearish={}, neutral={})",
            self.overall_signal,
            self.bullish_signals.len(),
            self.bearish_signals.len(),
            self.neutral_signals.len()
        )
    }
}

/// 상승/하락 신호 개수로 종합 신호를 결정합니다.
///
/// 한쪽이 다른 쪽보다 2개 이상 많거나, 한쪽만 존재하면 그 방향입니다.
pub fn determine_overall_signal(bullish_count: usize, bearish_count: usize) -> Signal {
    if bullish_count > bearish_count + 1 {
        Signal::Bullish
    } else if bearish_count > bullish_count + 1 {
        Signal::Bearish
    } else if bullish_count > 0 && bearish_count == 0 {
        Signal::Bullish
    } else if bearish_count > 0 && bullish_count == 0 {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

/// 패턴, 거래량, 추세 결과를 하나의 신호 요약으로 합칩니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalAggregator;

impl SignalAggregator {
    /// 신호 요약 생성
    ///
    /// # Arguments
    /// * `patterns` - 인식된 패턴
    /// * `volume` - 거래량 분석 결과
    /// * `trend` - 추세 분석 결과
    ///
    /// # Returns
    /// * `SignalSummary` - 방향별 중복 제거된 태그와 종합 신호
    pub fn aggregate(
        &self,
        patterns: &[PatternMatch],
        volume: &VolumeAnalysis,
        trend: &TrendAnalysis,
    ) -> SignalSummary {
        let mut bullish: IndexSet<SignalTag> = IndexSet::new();
        let mut bearish: IndexSet<SignalTag> = IndexSet::new();
        let mut neutral: IndexSet<SignalTag> = IndexSet::new();

        for pattern in patterns {
            let tag = SignalTag::Pattern(pattern.name);
            match pattern.polarity {
                Signal::Bullish => bullish.insert(tag),
                Signal::Bearish => bearish.insert(tag),
                Signal::Neutral => neutral.insert(tag),
            };
        }

        match volume.volume_price_relationship {
            Signal::Bullish => {
                bullish.insert(SignalTag::VolumeBullish);
            }
            Signal::Bearish => {
                bearish.insert(SignalTag::VolumeBearish);
            }
            Signal::Neutral => {}
        }

        match trend.direction {
            TrendDirection::Uptrend => {
                bullish.insert(SignalTag::Uptrend);
            }
            TrendDirection::Downtrend => {
                bearish.insert(SignalTag::Downtrend);
            }
            TrendDirection::Sideways => {}
        }

        let overall_signal = determine_overall_signal(bullish.len(), bearish.len());
        let summary = SignalSummary {
            bullish_signals: bullish.into_iter().collect(),
            bearish_signals: bearish.into_iter().collect(),
            neutral_signals: neutral.into_iter().collect(),
            overall_signal,
        };
        debug!("신호 요약: {summary}");
        summary
    }
}
