use common_test_utils::*;

use stock_analysis::analyzer::trend_analyzer::{
    TrendAnalysis, TrendAnalyzer, TrendConfig, TrendDirection,
};
use stock_analysis::indicator::{IndicatorConfig, IndicatorTable};

fn analyze(candles: &[TestCandle]) -> TrendAnalysis {
    let indicators = IndicatorTable::calculate(candles, &IndicatorConfig::default());
    TrendAnalyzer::default().analyze_trend(candles, &indicators)
}

#[test]
fn test_uptrend() {
    init_logger();
    let candles = create_uptrend_candles(30, 100.0, 1.0);
    let analysis = analyze(&candles);

    assert_eq!(analysis.direction, TrendDirection::Uptrend);
    assert!((analysis.strength - 1.0).abs() < 1e-9);
    assert!(analysis.price_change_pct > 5.0);

    // 최근 20개 바 (i = 10..30)
    assert_eq!(analysis.support, 109.0);
    assert_eq!(analysis.resistance, 130.0);
    assert!((analysis.ma20 - 120.0).abs() < 1e-9);
    assert_eq!(analysis.ma_support, analysis.ma20);
    assert!((analysis.ma_resistance - analysis.ma20 * 1.05).abs() < 1e-9);
    // 60개 미만이면 MA60은 MA20으로 대체
    assert_eq!(analysis.ma60, analysis.ma20);
}

#[test]
fn test_downtrend() {
    let candles = create_downtrend_candles(30, 200.0, 2.0);
    let analysis = analyze(&candles);

    assert_eq!(analysis.direction, TrendDirection::Downtrend);
    assert!(analysis.price_change_pct < -5.0);
    assert!(analysis.strength > 0.99);
    assert_eq!(analysis.ma_resistance, analysis.ma20);
    assert!((analysis.ma_support - analysis.ma20 * 0.95).abs() < 1e-9);
}

#[test]
fn test_sideways() {
    let candles = create_sideways_candles(30, 100.0, 4.0);
    let analysis = analyze(&candles);

    assert_eq!(analysis.direction, TrendDirection::Sideways);
    assert!((0.0..=1.0).contains(&analysis.strength));
    assert!(analysis.support <= analysis.resistance);
}

#[test]
fn test_insufficient_data_defaults() {
    let candles = create_uptrend_candles(10, 100.0, 1.0);
    let analysis = analyze(&candles);
    assert_eq!(analysis, TrendAnalysis::default());
    assert_eq!(analysis.direction, TrendDirection::Sideways);
}

#[test]
fn test_flat_strength_is_zero() {
    let candles = create_flat_candles(30, 50.0);
    let analysis = analyze(&candles);

    assert_eq!(analysis.direction, TrendDirection::Sideways);
    assert_eq!(analysis.strength, 0.0);
    assert_eq!(analysis.price_change_pct, 0.0);
}

#[test]
fn test_custom_period() {
    let config = TrendConfig {
        period: 5,
        ..TrendConfig::default()
    };
    let candles = create_uptrend_candles(8, 100.0, 3.0);
    let indicators = IndicatorTable::calculate(&candles, &IndicatorConfig::default());
    let analysis = TrendAnalyzer::new(config).analyze_trend(&candles, &indicators);

    assert_eq!(analysis.direction, TrendDirection::Uptrend);
}
