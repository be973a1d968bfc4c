use crate::analyzer::pattern_detector::PatternConfig;
use crate::analyzer::trend_analyzer::TrendConfig;
use crate::analyzer::volume_analyzer::VolumeConfig;
use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::indicator::IndicatorConfig;
use serde::{Deserialize, Serialize};

/// 분석 엔진 설정
///
/// 모든 필드는 생략 가능하며 생략된 값은 기본값으로 채워집니다.
///
/// ```toml
/// min_bars = 5
///
/// [indicator.macd]
/// fast_period = 12
/// slow_period = 26
/// signal_period = 9
///
/// [trend]
/// period = 20
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 패턴/거래량/추세 분석에 필요한 최소 바 수
    pub min_bars: usize,
    /// 지표 설정
    pub indicator: IndicatorConfig,
    /// 패턴 인식 설정
    pub pattern: PatternConfig,
    /// 거래량 분석 설정
    pub volume: VolumeConfig,
    /// 추세 분석 설정
    pub trend: TrendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_bars: 5,
            indicator: IndicatorConfig::default(),
            pattern: PatternConfig::default(),
            volume: VolumeConfig::default(),
            trend: TrendConfig::default(),
        }
    }
}

fn ensure_positive(name: &str, value: usize) -> ConfigResult<()> {
    if value == 0 {
        return Err(ConfigError::ValidationError(format!(
            "{name}은(는) 0보다 커야 합니다"
        )));
    }
    Ok(())
}

fn ensure_non_negative(name: &str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::ValidationError(format!(
            "{name}은(는) 0 이상의 유한한 값이어야 합니다: {value}"
        )));
    }
    Ok(())
}

impl ConfigValidation for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        ensure_positive("min_bars", self.min_bars)?;

        // 지표
        let macd = &self.indicator.macd;
        ensure_positive("macd.fast_period", macd.fast_period)?;
        ensure_positive("macd.slow_period", macd.slow_period)?;
        ensure_positive("macd.signal_period", macd.signal_period)?;
        if macd.fast_period >= macd.slow_period {
            return Err(ConfigError::ValidationError(format!(
                "MACD 단기 기간({})은 장기 기간({})보다 짧아야 합니다",
                macd.fast_period, macd.slow_period
            )));
        }

        ensure_positive("bollinger.period", self.indicator.bollinger.period)?;
        ensure_non_negative("bollinger.multiplier", self.indicator.bollinger.multiplier)?;

        let kdj = &self.indicator.kdj;
        ensure_positive("kdj.n", kdj.n)?;
        ensure_positive("kdj.m1", kdj.m1)?;
        ensure_positive("kdj.m2", kdj.m2)?;

        let signal = &self.indicator.signal;
        if signal.rsi_oversold >= signal.rsi_overbought {
            return Err(ConfigError::ValidationError(
                "RSI 과매도 기준은 과매수 기준보다 작아야 합니다".to_string(),
            ));
        }
        if signal.kdj_lower >= signal.kdj_upper {
            return Err(ConfigError::ValidationError(
                "KDJ 하단 기준은 상단 기준보다 작아야 합니다".to_string(),
            ));
        }
        if signal.sell_score >= signal.buy_score {
            return Err(ConfigError::ValidationError(
                "매도 점수는 매수 점수보다 작아야 합니다".to_string(),
            ));
        }

        // 패턴
        let candle = &self.pattern.candle;
        ensure_non_negative("candle.long_shadow_ratio", candle.long_shadow_ratio)?;
        ensure_non_negative("candle.short_shadow_ratio", candle.short_shadow_ratio)?;
        ensure_non_negative("candle.doji_body_ratio", candle.doji_body_ratio)?;
        ensure_non_negative("candle.soldier_shadow_ratio", candle.soldier_shadow_ratio)?;

        let chart = &self.pattern.chart;
        ensure_positive("chart.reversal_lookback", chart.reversal_lookback)?;
        ensure_positive("chart.triangle_lookback", chart.triangle_lookback)?;
        if chart.min_window_bars < 3 {
            return Err(ConfigError::ValidationError(format!(
                "chart.min_window_bars는 3 이상이어야 합니다: {}",
                chart.min_window_bars
            )));
        }
        ensure_non_negative("chart.shoulder_tolerance", chart.shoulder_tolerance)?;
        ensure_non_negative("chart.double_tolerance", chart.double_tolerance)?;
        ensure_non_negative("chart.flat_slope_tolerance", chart.flat_slope_tolerance)?;

        // 거래량
        let volume = &self.volume;
        ensure_positive("volume.period", volume.period)?;
        ensure_positive("volume.short_period", volume.short_period)?;
        ensure_positive("volume.long_period", volume.long_period)?;
        ensure_non_negative("volume.low_ratio", volume.low_ratio)?;
        ensure_non_negative("volume.high_ratio", volume.high_ratio)?;
        if volume.low_ratio >= volume.high_ratio {
            return Err(ConfigError::ValidationError(format!(
                "거래량 감소 비율({})은 증가 비율({})보다 작아야 합니다",
                volume.low_ratio, volume.high_ratio
            )));
        }

        // 추세
        let trend = &self.trend;
        ensure_positive("trend.period", trend.period)?;
        ensure_non_negative("trend.change_threshold_pct", trend.change_threshold_pct)?;
        ensure_non_negative("trend.ma_support_discount", trend.ma_support_discount)?;
        ensure_non_negative("trend.ma_resistance_premium", trend.ma_resistance_premium)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_bars, 5);
        assert_eq!(config.indicator.macd.slow_period, 26);
        assert_eq!(config.pattern.chart.reversal_lookback, 30);
        assert_eq!(config.volume.high_ratio, 1.2);
        assert_eq!(config.trend.change_threshold_pct, 5.0);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut config = EngineConfig::default();
        config.trend.period = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_macd_order_rejected() {
        let mut config = EngineConfig::default();
        config.indicator.macd.fast_period = 26;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_volume_ratio_order_rejected() {
        let mut config = EngineConfig::default();
        config.volume.low_ratio = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut config = EngineConfig::default();
        config.pattern.chart.double_tolerance = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_window_bars_rejected() {
        let mut config = EngineConfig::default();
        config.pattern.chart.min_window_bars = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_kdj_smoothing_rejected() {
        let mut config = EngineConfig::default();
        config.indicator.kdj.m1 = 0;
        assert!(config.validate().is_err());
    }
}
