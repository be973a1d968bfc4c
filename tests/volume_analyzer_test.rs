use common_test_utils::*;

use stock_analysis::analyzer::volume_analyzer::{
    VolumeAnalysis, VolumeAnalyzer, VolumeConfig, VolumeTrend,
};
use stock_analysis::model::Signal;

#[test]
fn test_volume_analyzer_stable() {
    init_logger();
    let candles = create_uptrend_candles(30, 100.0, 1.0);
    let analysis = VolumeAnalyzer::default().analyze_volume(&candles);

    assert_eq!(analysis.avg_volume, 1000.0);
    assert_eq!(analysis.current_volume, 1000.0);
    assert_eq!(analysis.ratio, 1.0);
    assert_eq!(analysis.trend, VolumeTrend::Stable);
    assert_eq!(analysis.volume_price_relationship, Signal::Neutral);
}

#[test]
fn test_volume_surge_on_rising_price() {
    let mut candles = create_uptrend_candles(30, 100.0, 1.0);
    for candle in candles.iter_mut().skip(25) {
        candle.volume = 3000.0;
    }
    let analysis = VolumeAnalyzer::default().analyze_volume(&candles);

    assert!(analysis.ratio > 1.2);
    assert_eq!(analysis.trend, VolumeTrend::Increasing);
    assert_eq!(analysis.volume_price_relationship, Signal::Bullish);
}

#[test]
fn test_volume_surge_on_falling_price() {
    let mut candles = create_downtrend_candles(30, 100.0, 1.0);
    if let Some(last) = candles.last_mut() {
        last.volume = 5000.0;
    }
    let analysis = VolumeAnalyzer::default().analyze_volume(&candles);

    assert_eq!(analysis.volume_price_relationship, Signal::Bearish);
}

#[test]
fn test_volume_dry_on_rising_price() {
    let mut candles = create_uptrend_candles(30, 100.0, 1.0);
    for candle in candles.iter_mut().skip(25) {
        candle.volume = 200.0;
    }
    let analysis = VolumeAnalyzer::default().analyze_volume(&candles);

    assert!(analysis.ratio < 0.8);
    assert_eq!(analysis.trend, VolumeTrend::Decreasing);
    assert_eq!(analysis.volume_price_relationship, Signal::Bearish);
}

#[test]
fn test_zero_volume_ratio() {
    let mut candles = create_flat_candles(25, 10.0);
    for candle in candles.iter_mut() {
        candle.volume = 0.0;
    }
    let analysis = VolumeAnalyzer::default().analyze_volume(&candles);

    assert_eq!(analysis.avg_volume, 0.0);
    assert_eq!(analysis.ratio, 1.0);
    assert!(analysis.ratio.is_finite());
}

#[test]
fn test_custom_thresholds() {
    let config = VolumeConfig {
        high_ratio: 1.05,
        low_ratio: 0.95,
        ..VolumeConfig::default()
    };
    let mut candles = create_uptrend_candles(30, 100.0, 1.0);
    if let Some(last) = candles.last_mut() {
        last.volume = 1100.0;
    }

    let analysis = VolumeAnalyzer::new(config).analyze_volume(&candles);
    assert_eq!(analysis.volume_price_relationship, Signal::Bullish);

    let default_analysis = VolumeAnalyzer::default().analyze_volume(&candles);
    assert_eq!(default_analysis.volume_price_relationship, Signal::Neutral);
}

#[test]
fn test_empty_candles() {
    let analysis = VolumeAnalyzer::default().analyze_volume::<TestCandle>(&[]);
    assert_eq!(analysis, VolumeAnalysis::default());
}
