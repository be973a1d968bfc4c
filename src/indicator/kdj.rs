use crate::indicator::max::calculate_hhv;
use crate::indicator::min::calculate_llv;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// KDJ 계산 파라미터
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KDJParams {
    /// RSV 계산 구간 (HHV/LLV 기간)
    pub n: usize,
    /// K 평활 계수
    pub m1: usize,
    /// D 평활 계수
    pub m2: usize,
}

impl Default for KDJParams {
    fn default() -> Self {
        KDJParams { n: 9, m1: 3, m2: 3 }
    }
}

/// KDJ(스토캐스틱) 한 바의 값
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KDJ {
    pub k: f64,
    pub d: f64,
    /// `3K - 2D` (0-100 범위로 제한하지 않음)
    pub j: f64,
}

impl Display for KDJ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KDJ({:.2}, {:.2}, {:.2})", self.k, self.d, self.j)
    }
}

/// 바별 RSV(Raw Stochastic Value) 계산
///
/// 구간 최고가와 최저가가 같으면 50을 사용합니다.
///
/// # Arguments
/// * `highs` - 고가 데이터
/// * `lows` - 저가 데이터
/// * `closes` - 종가 데이터
/// * `period` - HHV/LLV 구간
pub fn calculate_rsv(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<f64> {
    let hhv = calculate_hhv(highs, period);
    let llv = calculate_llv(lows, period);

    closes
        .iter()
        .zip(hhv.iter().zip(&llv))
        .map(|(&close, (&highest, &lowest))| {
            let denominator = highest - lowest;
            if denominator == 0.0 {
                50.0
            } else {
                (close - lowest) / denominator * 100.0
            }
        })
        .collect()
}

/// 바별 KDJ 계산
///
/// K와 D는 이전 값에 의존하는 재귀식이므로 단일 전진 루프로 계산합니다.
/// `K[0] = D[0] = 50`에서 시작합니다.
///
/// # Arguments
/// * `highs` - 고가 데이터
/// * `lows` - 저가 데이터
/// * `closes` - 종가 데이터
/// * `params` - KDJ 파라미터
///
/// # Returns
/// * `Vec<KDJ>` - 입력과 같은 길이의 KDJ 값
pub fn calculate_kdj(highs: &[f64], lows: &[f64], closes: &[f64], params: &KDJParams) -> Vec<KDJ> {
    let rsv = calculate_rsv(highs, lows, closes, params.n);
    let m1 = params.m1.max(1) as f64;
    let m2 = params.m2.max(1) as f64;

    let mut result = Vec::with_capacity(rsv.len());
    let mut k = 50.0;
    let mut d = 50.0;

    for (i, &value) in rsv.iter().enumerate() {
        if i > 0 {
            k = (m1 - 1.0) / m1 * k + value / m1;
            d = (m2 - 1.0) / m2 * d + k / m2;
        }
        result.push(KDJ {
            k,
            d,
            j: 3.0 * k - 2.0 * d,
        });
    }

    result
}
