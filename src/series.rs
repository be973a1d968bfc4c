use crate::error::{AnalysisError, Result};
use crate::model::{Bar, Candle};
use log::{debug, warn};

/// 단일 종목의 시간 순서 OHLCV 시계열
///
/// 생성 이후 변경되지 않으며, 데이터는 datetime 오름차순(과거 → 최신)으로
/// 저장됩니다. 정렬과 키 중복 여부는 호출자가 보장합니다.
#[derive(Debug, Clone)]
pub struct Series<T: Candle> {
    items: Vec<T>,
}

/// 캔들의 모든 수치 필드가 유한한 값인지 확인합니다.
///
/// # Arguments
/// * `index` - 캔들 위치 (오류 보고용)
/// * `candle` - 검사할 캔들
///
/// # Returns
/// * `Result<()>` - 유한하지 않은 필드가 있으면 `InvalidBar` 오류
fn validate_candle<T: Candle>(index: usize, candle: &T) -> Result<()> {
    let fields = [
        ("open", candle.open_price()),
        ("high", candle.high_price()),
        ("low", candle.low_price()),
        ("close", candle.close_price()),
        ("volume", candle.volume()),
    ];

    for (field, value) in fields {
        if !value.is_finite() {
            warn!("유효하지 않은 캔들 값: index={index}, {field}={value}");
            return Err(AnalysisError::InvalidBar {
                index,
                field,
                value,
            });
        }
    }

    Ok(())
}

impl<T> Series<T>
where
    T: Candle,
{
    /// 검증 없이 새 시계열을 생성합니다.
    ///
    /// # Arguments
    /// * `items` - 시간 오름차순으로 정렬된 캔들 목록
    pub fn new(items: Vec<T>) -> Series<T> {
        Series { items }
    }

    /// 모든 수치 필드가 유한한지 검증한 뒤 시계열을 생성합니다.
    ///
    /// # Arguments
    /// * `items` - 시간 오름차순으로 정렬된 캔들 목록
    ///
    /// # Returns
    /// * `Result<Series<T>>` - 검증된 시계열 또는 첫 번째 잘못된 캔들에 대한 오류
    pub fn try_new(items: Vec<T>) -> Result<Series<T>> {
        for (index, candle) in items.iter().enumerate() {
            validate_candle(index, candle)?;
        }
        debug!("시계열 검증 완료: {}개 캔들", items.len());
        Ok(Series { items })
    }

    /// 캔들 수
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 시계열이 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 지정된 인덱스의 캔들을 반환합니다.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// 가장 오래된 캔들
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// 가장 최근 캔들
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// 전체 캔들 슬라이스 (과거 → 최신)
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 최근 `n`개 캔들 슬라이스
    ///
    /// # Arguments
    /// * `n` - 가져올 캔들 수 (전체보다 크면 전체)
    pub fn tail(&self, n: usize) -> &[T] {
        let start = self.items.len().saturating_sub(n);
        &self.items[start..]
    }

    /// 시가 배열
    pub fn opens(&self) -> Vec<f64> {
        self.items.iter().map(|c| c.open_price()).collect()
    }

    /// 고가 배열
    pub fn highs(&self) -> Vec<f64> {
        self.items.iter().map(|c| c.high_price()).collect()
    }

    /// 저가 배열
    pub fn lows(&self) -> Vec<f64> {
        self.items.iter().map(|c| c.low_price()).collect()
    }

    /// 종가 배열
    pub fn closes(&self) -> Vec<f64> {
        self.items.iter().map(|c| c.close_price()).collect()
    }

    /// 거래량 배열
    pub fn volumes(&self) -> Vec<f64> {
        self.items.iter().map(|c| c.volume()).collect()
    }
}

impl Series<Bar> {
    /// JSON 배열에서 시계열을 파싱합니다.
    ///
    /// 각 원소는 `datetime`, `open`, `high`, `low`, `close`, `volume` 필드를
    /// 가져야 하며, 파싱 후 `try_new`와 동일한 검증을 거칩니다.
    ///
    /// # Arguments
    /// * `json` - `Bar` 객체의 JSON 배열 문자열
    ///
    /// # Returns
    /// * `Result<Series<Bar>>` - 파싱된 시계열 또는 `Parse`/`InvalidBar` 오류
    pub fn from_json(json: &str) -> Result<Series<Bar>> {
        let bars: Vec<Bar> = serde_json::from_str(json).map_err(|e| {
            warn!("캔들 JSON 파싱 실패: {e}");
            AnalysisError::Parse(e.to_string())
        })?;
        Series::try_new(bars)
    }
}

impl<T: Candle> From<Vec<T>> for Series<T> {
    fn from(items: Vec<T>) -> Self {
        Series::new(items)
    }
}

impl<T: Candle> AsRef<[T]> for Series<T> {
    fn as_ref(&self) -> &[T] {
        &self.items
    }
}
