use common_test_utils::*;

use stock_analysis::analyzer::signal_aggregator::SignalTag;
use stock_analysis::analyzer::trend_analyzer::TrendDirection;
use stock_analysis::indicator::signal::TradeAction;
use stock_analysis::{
    AnalysisEngine, AnalysisError, Bar, EngineConfig, IndicatorName, Series, Signal, analyze,
};

#[test]
fn test_fewer_than_five_bars_is_neutral() {
    init_logger();
    for n in 0..5 {
        let candles = create_uptrend_candles(n, 100.0, 1.0);
        let result = analyze(&candles);

        assert_eq!(result.indicators.len(), n);
        assert!(result.patterns.is_empty());
        assert_eq!(result.summary.overall_signal, Signal::Neutral);
        assert!(result.summary.bullish_signals.is_empty());
        assert!(result.summary.bearish_signals.is_empty());
    }
}

#[test]
fn test_idempotence() {
    let mut candles = create_sideways_candles(40, 100.0, 5.0);
    candles.extend(create_uptrend_candles(30, 100.0, 1.5));
    let engine = AnalysisEngine::default();

    let first = engine.analyze_candles(&candles);
    let second = engine.analyze_candles(&candles);
    assert_eq!(first, second);
}

#[test]
fn test_uptrend_summary() {
    let candles = create_uptrend_candles(40, 100.0, 2.0);
    let result = AnalysisEngine::default().analyze(&Series::new(candles));

    assert_eq!(result.trend_analysis.direction, TrendDirection::Uptrend);
    assert!(result.summary.bullish_signals.contains(&SignalTag::Uptrend));
    assert_eq!(result.summary.overall_signal, Signal::Bullish);
    // MACD +1, K 과열(80 이상) 0, RSI6 과매수 -1, MA20 위 +1
    assert_eq!(result.indicator_signal.score, 1);
    assert_eq!(result.indicator_signal.signal, TradeAction::Neutral);
}

#[test]
fn test_downtrend_summary() {
    let candles = create_downtrend_candles(40, 200.0, 2.0);
    let result = AnalysisEngine::default().analyze_candles(&candles);

    assert_eq!(result.trend_analysis.direction, TrendDirection::Downtrend);
    assert!(result.summary.bearish_signals.contains(&SignalTag::Downtrend));
    assert_eq!(result.summary.overall_signal, Signal::Bearish);
}

#[test]
fn test_custom_min_bars() {
    let config = EngineConfig {
        min_bars: 50,
        ..EngineConfig::default()
    };
    let engine = AnalysisEngine::new(config).unwrap();
    let result = engine.analyze_candles(&create_uptrend_candles(40, 100.0, 2.0));

    assert!(result.patterns.is_empty());
    assert_eq!(result.summary.overall_signal, Signal::Neutral);
    assert_eq!(result.indicators.len(), 40);
    assert_eq!(engine.config().min_bars, 50);
}

#[test]
fn test_analyze_json() {
    let json = r#"[
        {"datetime": "2024-01-01T00:00:00Z", "open": 10.0, "high": 10.5, "low": 9.5, "close": 10.2, "volume": 1000.0},
        {"datetime": "2024-01-02T00:00:00Z", "open": 10.2, "high": 10.8, "low": 10.0, "close": 10.6, "volume": 1100.0},
        {"datetime": "2024-01-03T00:00:00Z", "open": 10.6, "high": 11.0, "low": 10.4, "close": 10.9, "volume": 1200.0},
        {"datetime": "2024-01-04T00:00:00Z", "open": 10.9, "high": 11.2, "low": 10.5, "close": 10.7, "volume": 900.0},
        {"datetime": "2024-01-05T00:00:00Z", "open": 10.0, "high": 11.05, "low": 8.0, "close": 11.0, "volume": 1500.0}
    ]"#;
    let result = AnalysisEngine::default().analyze_json(json).unwrap();

    assert_eq!(result.indicators.len(), 5);
    assert!(result.indicators.value(4, IndicatorName::Ma5).is_some());
    assert!(!result.patterns.is_empty());
}

#[test]
fn test_analyze_json_missing_field() {
    let json = r#"[{"datetime": "2024-01-01T00:00:00Z", "open": 10.0, "high": 10.5, "low": 9.5}]"#;
    let result = AnalysisEngine::default().analyze_json(json);
    assert!(matches!(result, Err(AnalysisError::Parse(_))));
}

#[test]
fn test_non_finite_bar_rejected() {
    let mut candles = create_uptrend_candles(6, 100.0, 1.0);
    candles[3].close = f64::NAN;
    match Series::try_new(candles) {
        Err(AnalysisError::InvalidBar { index, field, .. }) => {
            assert_eq!(index, 3);
            assert_eq!(field, "close");
        }
        other => panic!("InvalidBar 오류가 발생해야 함: {other:?}"),
    }
}

#[test]
fn test_result_serialization() {
    let candles = create_uptrend_candles(30, 100.0, 1.0);
    let result = analyze(&candles);
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["summary"]["overall_signal"], "bullish");
    assert_eq!(value["trend_analysis"]["direction"], "uptrend");
    assert_eq!(value["indicators"].as_array().unwrap().len(), 30);
    assert!(value["indicators"][0]["boll_upper"].is_null());
}

#[test]
fn test_bar_input() {
    let candles: Vec<Bar> = create_uptrend_candles(10, 100.0, 1.0)
        .iter()
        .map(|c| Bar::new(stock_analysis::Candle::datetime(c), c.open, c.high, c.low, c.close, c.volume))
        .collect();
    let from_bars = analyze(&candles);
    let from_test = analyze(&create_uptrend_candles(10, 100.0, 1.0));
    assert_eq!(from_bars, from_test);
}
