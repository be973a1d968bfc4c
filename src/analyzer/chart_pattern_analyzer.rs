use crate::analyzer::pattern_detector::PatternName;
use crate::model::Candle;
use serde::{Deserialize, Serialize};

/// 차트 패턴 판정 기준값
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPatternConfig {
    /// 차트 패턴 검사를 시작하는 최소 바 인덱스
    pub min_history: usize,
    /// 구간에 필요한 최소 바 수
    pub min_window_bars: usize,
    /// 헤드앤숄더/이중천장/이중바닥 구간 길이
    pub reversal_lookback: usize,
    /// 삼각형 구간 길이
    pub triangle_lookback: usize,
    /// 양 어깨 높이 차이 허용 비율
    pub shoulder_tolerance: f64,
    /// 어깨와 머리 사이 최소 바 간격
    pub min_shoulder_gap: usize,
    /// 이중 천장/바닥 높이 차이 허용 비율
    pub double_tolerance: f64,
    /// 이중 천장/바닥 사이 최소 바 간격
    pub min_double_gap: usize,
    /// 삼각형 수평 추세선 기울기 허용치
    pub flat_slope_tolerance: f64,
}

impl Default for ChartPatternConfig {
    fn default() -> Self {
        ChartPatternConfig {
            min_history: 10,
            min_window_bars: 10,
            reversal_lookback: 30,
            triangle_lookback: 20,
            shoulder_tolerance: 0.2,
            min_shoulder_gap: 3,
            double_tolerance: 0.03,
            min_double_gap: 5,
            flat_slope_tolerance: 0.01,
        }
    }
}

/// 구간 내 극값 (위치는 구간 기준)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub position: usize,
    pub price: f64,
}

/// 엄격한 국소 최대값 (`v[j] > v[j-1]` 그리고 `v[j] > v[j+1]`)
pub fn find_local_maxima(values: &[f64]) -> Vec<Extremum> {
    find_extrema(values, |center, neighbor| center > neighbor)
}

/// 엄격한 국소 최소값 (`v[j] < v[j-1]` 그리고 `v[j] < v[j+1]`)
pub fn find_local_minima(values: &[f64]) -> Vec<Extremum> {
    find_extrema(values, |center, neighbor| center < neighbor)
}

fn find_extrema(values: &[f64], beats: impl Fn(f64, f64) -> bool) -> Vec<Extremum> {
    values
        .windows(3)
        .enumerate()
        .filter(|(_, w)| beats(w[1], w[0]) && beats(w[1], w[2]))
        .map(|(i, w)| Extremum {
            position: i + 1,
            price: w[1],
        })
        .collect()
}

/// 가장 극단적인 `count`개 극값을 골라 위치 순으로 반환합니다.
///
/// 같은 값이면 앞선 위치가 우선합니다 (안정 정렬).
///
/// # Arguments
/// * `extrema` - 극값 목록 (위치 순)
/// * `count` - 고를 개수
/// * `highest` - true면 큰 값, false면 작은 값 우선
///
/// # Returns
/// * `Option<Vec<Extremum>>` - 극값이 `count`개 미만이면 None
fn select_extreme(mut extrema: Vec<Extremum>, count: usize, highest: bool) -> Option<Vec<Extremum>> {
    if extrema.len() < count {
        return None;
    }

    if highest {
        extrema.sort_by(|a, b| b.price.total_cmp(&a.price));
    } else {
        extrema.sort_by(|a, b| a.price.total_cmp(&b.price));
    }
    extrema.truncate(count);
    extrema.sort_by_key(|e| e.position);
    Some(extrema)
}

/// 기준값 대비 상대 차이 (기준값이 0이면 None)
fn relative_diff(base: f64, other: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    Some((base - other).abs() / base)
}

/// 다중 바 차트 패턴 분석기
#[derive(Debug, Clone, Default)]
pub struct ChartPatternAnalyzer {
    config: ChartPatternConfig,
}

impl ChartPatternAnalyzer {
    /// 새 차트 패턴 분석기 생성
    pub fn new(config: ChartPatternConfig) -> ChartPatternAnalyzer {
        ChartPatternAnalyzer { config }
    }

    /// `index`에서 끝나는 `lookback + 1`개 바 구간
    ///
    /// 구간을 온전히 만들 수 없거나 최소 바 수보다 짧으면 None
    fn window<'a, C: Candle>(&self, candles: &'a [C], index: usize, lookback: usize) -> Option<&'a [C]> {
        if index < lookback || index >= candles.len() {
            return None;
        }
        let window = &candles[index - lookback..=index];
        (window.len() >= self.config.min_window_bars).then_some(window)
    }

    /// 헤드앤숄더 (하락 반전)
    ///
    /// 가장 높은 고점 3개가 왼쪽 어깨, 머리, 오른쪽 어깨를 이루고
    /// 마지막 종가가 넥라인(양 어깨 평균) 아래로 내려가야 합니다.
    pub fn is_head_and_shoulders<C: Candle>(&self, window: &[C]) -> bool {
        let highs: Vec<f64> = window.iter().map(|c| c.high_price()).collect();
        let Some(peaks) = select_extreme(find_local_maxima(&highs), 3, true) else {
            return false;
        };
        let (left, head, right) = (peaks[0], peaks[1], peaks[2]);

        if head.price <= left.price || head.price <= right.price {
            return false;
        }
        if !self.shoulders_match(left, head, right) {
            return false;
        }

        let neckline = (left.price + right.price) / 2.0;
        window
            .last()
            .is_some_and(|last| last.close_price() < neckline)
    }

    /// 역헤드앤숄더 (상승 반전)
    pub fn is_inverse_head_and_shoulders<C: Candle>(&self, window: &[C]) -> bool {
        let lows: Vec<f64> = window.iter().map(|c| c.low_price()).collect();
        let Some(troughs) = select_extreme(find_local_minima(&lows), 3, false) else {
            return false;
        };
        let (left, head, right) = (troughs[0], troughs[1], troughs[2]);

        if head.price >= left.price || head.price >= right.price {
            return false;
        }
        if !self.shoulders_match(left, head, right) {
            return false;
        }

        let neckline = (left.price + right.price) / 2.0;
        window
            .last()
            .is_some_and(|last| last.close_price() > neckline)
    }

    /// 양 어깨 높이 차이와 머리와의 간격 검사
    fn shoulders_match(&self, left: Extremum, head: Extremum, right: Extremum) -> bool {
        let gap = self.config.min_shoulder_gap;
        relative_diff(left.price, right.price).is_some_and(|d| d <= self.config.shoulder_tolerance)
            && right.position - head.position >= gap
            && head.position - left.position >= gap
    }

    /// 이중 천장 (하락 반전)
    ///
    /// 비슷한 높이의 두 고점 사이 최저가를 마지막 종가가 하향 돌파해야 합니다.
    pub fn is_double_top<C: Candle>(&self, window: &[C]) -> bool {
        let highs: Vec<f64> = window.iter().map(|c| c.high_price()).collect();
        let Some(peaks) = select_extreme(find_local_maxima(&highs), 2, true) else {
            return false;
        };
        let (first, second) = (peaks[0], peaks[1]);

        if !self.doubles_match(first, second) {
            return false;
        }

        let middle_low = window[first.position..=second.position]
            .iter()
            .map(|c| c.low_price())
            .fold(f64::INFINITY, f64::min);
        window
            .last()
            .is_some_and(|last| last.close_price() < middle_low)
    }

    /// 이중 바닥 (상승 반전)
    pub fn is_double_bottom<C: Candle>(&self, window: &[C]) -> bool {
        let lows: Vec<f64> = window.iter().map(|c| c.low_price()).collect();
        let Some(troughs) = select_extreme(find_local_minima(&lows), 2, false) else {
            return false;
        };
        let (first, second) = (troughs[0], troughs[1]);

        if !self.doubles_match(first, second) {
            return false;
        }

        let middle_high = window[first.position..=second.position]
            .iter()
            .map(|c| c.high_price())
            .fold(f64::NEG_INFINITY, f64::max);
        window
            .last()
            .is_some_and(|last| last.close_price() > middle_high)
    }

    fn doubles_match(&self, first: Extremum, second: Extremum) -> bool {
        relative_diff(first.price, second.price).is_some_and(|d| d <= self.config.double_tolerance)
            && second.position - first.position >= self.config.min_double_gap
    }

    /// 삼각형 수렴 패턴
    ///
    /// 구간 첫 바와 마지막 바로 고가/저가 기울기를 구해
    /// 대칭 → 상승 → 하락 삼각형 순으로 판정합니다.
    pub fn detect_triangle<C: Candle>(&self, window: &[C]) -> Option<PatternName> {
        let (first, last) = (window.first()?, window.last()?);
        let len = window.len() as f64;

        let high_slope = (last.high_price() - first.high_price()) / len;
        let low_slope = (last.low_price() - first.low_price()) / len;
        let flat = self.config.flat_slope_tolerance;

        if high_slope < 0.0 && low_slope > 0.0 {
            Some(PatternName::SymmetricalTriangle)
        } else if low_slope > 0.0 && high_slope.abs() < flat {
            Some(PatternName::AscendingTriangle)
        } else if high_slope < 0.0 && low_slope.abs() < flat {
            Some(PatternName::DescendingTriangle)
        } else {
            None
        }
    }

    /// `index`에서 확인되는 차트 패턴을 모두 찾습니다.
    ///
    /// # Arguments
    /// * `candles` - 전체 캔들
    /// * `index` - 확인할 바 인덱스
    ///
    /// # Returns
    /// * `Vec<PatternName>` - 헤드앤숄더, 역헤드앤숄더, 이중천장, 이중바닥, 삼각형 순
    pub fn detect_at<C: Candle>(&self, candles: &[C], index: usize) -> Vec<PatternName> {
        let mut found = Vec::new();
        if index < self.config.min_history {
            return found;
        }

        if let Some(window) = self.window(candles, index, self.config.reversal_lookback) {
            if self.is_head_and_shoulders(window) {
                found.push(PatternName::HeadAndShoulders);
            }
            if self.is_inverse_head_and_shoulders(window) {
                found.push(PatternName::InverseHeadAndShoulders);
            }
            if self.is_double_top(window) {
                found.push(PatternName::DoubleTop);
            }
            if self.is_double_bottom(window) {
                found.push(PatternName::DoubleBottom);
            }
        }

        if let Some(window) = self.window(candles, index, self.config.triangle_lookback) {
            if let Some(triangle) = self.detect_triangle(window) {
                found.push(triangle);
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Bar;
    use chrono::{DateTime, Utc};

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(DateTime::<Utc>::default(), open, high, low, close, 1000.0)
    }

    /// 고가 프로파일만 다른 31개 캔들 (저가 98, 종가 99)
    fn with_highs(peaks: &[(usize, f64)]) -> Vec<Bar> {
        (0..31)
            .map(|i| {
                let high = peaks
                    .iter()
                    .find(|(pos, _)| *pos == i)
                    .map_or(100.0, |(_, h)| *h);
                candle(99.0, high, 98.0, 99.0)
            })
            .collect()
    }

    #[test]
    fn test_local_extrema_are_strict() {
        let values = [1.0, 3.0, 2.0, 2.0, 5.0, 5.0, 1.0, 0.5, 4.0];
        let maxima = find_local_maxima(&values);
        assert_eq!(maxima, vec![Extremum { position: 1, price: 3.0 }]);
        let minima = find_local_minima(&values);
        assert_eq!(minima, vec![Extremum { position: 7, price: 0.5 }]);
    }

    #[test]
    fn test_select_extreme_ties_keep_earlier() {
        let extrema = vec![
            Extremum { position: 2, price: 5.0 },
            Extremum { position: 6, price: 7.0 },
            Extremum { position: 9, price: 5.0 },
        ];
        let top = select_extreme(extrema.clone(), 2, true).unwrap();
        assert_eq!(top.iter().map(|e| e.position).collect::<Vec<_>>(), vec![2, 6]);
        assert!(select_extreme(extrema, 4, true).is_none());
    }

    #[test]
    fn test_head_and_shoulders() {
        let analyzer = ChartPatternAnalyzer::default();
        let candles = with_highs(&[(5, 110.0), (15, 120.0), (25, 108.0)]);
        assert_eq!(
            analyzer.detect_at(&candles, 30),
            vec![PatternName::HeadAndShoulders]
        );
    }

    #[test]
    fn test_head_and_shoulders_needs_neckline_break() {
        let analyzer = ChartPatternAnalyzer::default();
        let mut candles = with_highs(&[(5, 110.0), (15, 120.0), (25, 108.0)]);
        candles[30] = candle(99.0, 112.0, 98.0, 111.0);
        assert!(!analyzer.is_head_and_shoulders(&candles));
    }

    #[test]
    fn test_inverse_head_and_shoulders() {
        let analyzer = ChartPatternAnalyzer::default();
        let troughs = [(5, 90.0), (15, 80.0), (25, 92.0)];
        let candles: Vec<Bar> = (0..31)
            .map(|i| {
                let low = troughs
                    .iter()
                    .find(|(pos, _)| *pos == i)
                    .map_or(100.0, |(_, l)| *l);
                candle(100.5, 101.0, low, 100.5)
            })
            .collect();
        assert_eq!(
            analyzer.detect_at(&candles, 30),
            vec![PatternName::InverseHeadAndShoulders]
        );
    }

    #[test]
    fn test_double_top() {
        let analyzer = ChartPatternAnalyzer::default();
        let mut candles = with_highs(&[(8, 110.0), (20, 110.5)]);
        candles[30] = candle(99.0, 100.0, 96.0, 97.0);
        assert_eq!(analyzer.detect_at(&candles, 30), vec![PatternName::DoubleTop]);
    }

    #[test]
    fn test_double_bottom() {
        let analyzer = ChartPatternAnalyzer::default();
        let troughs = [(8, 90.0), (20, 90.5)];
        let mut candles: Vec<Bar> = (0..31)
            .map(|i| {
                let low = troughs
                    .iter()
                    .find(|(pos, _)| *pos == i)
                    .map_or(100.0, |(_, l)| *l);
                candle(101.0, 102.0, low, 101.0)
            })
            .collect();
        candles[30] = candle(101.0, 104.0, 100.0, 103.5);
        assert_eq!(
            analyzer.detect_at(&candles, 30),
            vec![PatternName::DoubleBottom]
        );
    }

    #[test]
    fn test_double_top_rejects_close_peaks() {
        let analyzer = ChartPatternAnalyzer::default();
        let mut candles = with_highs(&[(8, 110.0), (11, 110.5)]);
        candles[30] = candle(99.0, 100.0, 96.0, 97.0);
        assert!(!analyzer.is_double_top(&candles));
    }

    fn triangle(highs: impl Fn(f64) -> f64, lows: impl Fn(f64) -> f64) -> Vec<Bar> {
        (0..21)
            .map(|i| {
                let (h, l) = (highs(i as f64), lows(i as f64));
                let mid = (h + l) / 2.0;
                candle(mid, h, l, mid)
            })
            .collect()
    }

    #[test]
    fn test_triangles() {
        let analyzer = ChartPatternAnalyzer::default();

        let symmetrical = triangle(|i| 120.0 - i * 0.5, |i| 100.0 + i * 0.25);
        assert_eq!(
            analyzer.detect_at(&symmetrical, 20),
            vec![PatternName::SymmetricalTriangle]
        );

        let ascending = triangle(|_| 110.0, |i| 100.0 + i * 0.4);
        assert_eq!(
            analyzer.detect_at(&ascending, 20),
            vec![PatternName::AscendingTriangle]
        );

        let descending = triangle(|i| 120.0 - i * 0.4, |_| 100.0);
        assert_eq!(
            analyzer.detect_at(&descending, 20),
            vec![PatternName::DescendingTriangle]
        );

        let widening = triangle(|i| 110.0 + i * 0.4, |i| 100.0 - i * 0.4);
        assert!(analyzer.detect_at(&widening, 20).is_empty());
    }

    #[test]
    fn test_insufficient_history() {
        let analyzer = ChartPatternAnalyzer::default();
        let candles = triangle(|i| 120.0 - i * 0.5, |i| 100.0 + i * 0.25);
        assert!(analyzer.detect_at(&candles, 9).is_empty());
        // 삼각형 구간(20) 미만
        assert!(analyzer.detect_at(&candles, 19).is_empty());
    }
}
