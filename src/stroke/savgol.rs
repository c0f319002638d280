use nalgebra::DMatrix;

use crate::config::SegmentConfig;

/// Savitzky-Golay 平滑化フィルタ
///
/// 窓内の点に `poly_order` 次多項式を最小二乗で当てはめ、その値で置き換える。
/// 端は先頭/末尾の窓全体に当てはめた多項式をそのまま評価する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavitzkyGolay {
    window_length: usize,
    poly_order: usize,
}

impl SavitzkyGolay {
    pub fn new(window_length: usize, poly_order: usize) -> Self {
        Self {
            window_length,
            poly_order,
        }
    }

    pub fn from_config(config: &SegmentConfig) -> Self {
        Self::new(config.window_length, config.poly_order)
    }

    /// 系列長 `n` に対して実際に使う窓長（奇数, n 以下）
    pub fn effective_window(&self, n: usize) -> usize {
        let configured = largest_odd_at_most(self.window_length);
        configured.min(largest_odd_at_most(n))
    }

    /// 平滑化。窓が次数に対して小さすぎる場合は入力をそのまま返す。
    pub fn apply(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let window = self.effective_window(n);
        if window < self.poly_order + 2 {
            return series.to_vec();
        }
        let hat = match projection_matrix(window, self.poly_order) {
            Some(h) => h,
            None => {
                log::debug!("savgol: singular normal matrix (window={window}), skipping smoothing");
                return series.to_vec();
            }
        };

        let half = window / 2;
        let fit = |row: usize, start: usize| -> f64 {
            (0..window).map(|j| hat[(row, j)] * series[start + j]).sum()
        };

        let mut out = vec![0.0; n];
        for (i, v) in out.iter_mut().enumerate().take(n - half).skip(half) {
            *v = fit(half, i - half);
        }
        // 先頭/末尾は端の窓の当てはめ多項式で評価
        let tail = n - window;
        for row in 0..half {
            out[row] = fit(row, 0);
            out[tail + window - 1 - row] = fit(window - 1 - row, tail);
        }
        out
    }
}

impl Default for SavitzkyGolay {
    fn default() -> Self {
        Self::from_config(&SegmentConfig::default())
    }
}

fn largest_odd_at_most(n: usize) -> usize {
    if n % 2 == 1 {
        n
    } else {
        n.saturating_sub(1)
    }
}

/// 射影行列 H = A (AᵀA)⁻¹ Aᵀ（A は中心化した Vandermonde 行列）
///
/// H の i 行目は窓内 i 番目の位置での当てはめ値を与える重み。
fn projection_matrix(window: usize, order: usize) -> Option<DMatrix<f64>> {
    let half = (window / 2) as f64;
    let a = DMatrix::from_fn(window, order + 1, |r, c| (r as f64 - half).powi(c as i32));
    let normal = a.transpose() * &a;
    let inv = normal.try_inverse()?;
    Some(&a * inv * a.transpose())
}
