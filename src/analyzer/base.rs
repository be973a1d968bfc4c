use crate::indicator::{IndicatorRow, IndicatorTable};
use crate::model::Candle;

/// 분석기 입력 컨텍스트
///
/// 한 번의 분석 호출 동안 캔들과 미리 계산된 지표 테이블을 함께 빌려줍니다.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a, C: Candle> {
    /// 시간 오름차순 캔들
    pub candles: &'a [C],
    /// 캔들과 같은 길이의 지표 테이블
    pub indicators: &'a IndicatorTable,
}

impl<'a, C: Candle> AnalysisContext<'a, C> {
    /// 새 컨텍스트 생성
    pub fn new(candles: &'a [C], indicators: &'a IndicatorTable) -> Self {
        AnalysisContext {
            candles,
            indicators,
        }
    }

    /// 캔들 수
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// 비어 있는지 확인
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// 마지막 캔들
    pub fn last_candle(&self) -> Option<&'a C> {
        self.candles.last()
    }

    /// 마지막 바의 지표 행
    pub fn latest_indicators(&self) -> Option<&'a IndicatorRow> {
        self.indicators.latest()
    }
}

/// 분석기 인터페이스
///
/// 모든 분석기는 같은 컨텍스트를 받아 자신의 결과 타입을 반환합니다.
/// 분석기는 상태를 갖지 않으므로 같은 입력에는 항상 같은 결과를 냅니다.
pub trait Analyzer {
    /// 분석 결과 타입
    type Output;

    /// 로그용 분석기 이름
    fn name(&self) -> &'static str;

    /// 컨텍스트를 분석합니다.
    fn analyze<C: Candle>(&self, ctx: &AnalysisContext<'_, C>) -> Self::Output;
}
