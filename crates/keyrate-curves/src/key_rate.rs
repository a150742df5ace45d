//! Key-rate shock weights.
//!
//! Each key tenor owns a triangular weight profile that is 1 at the key and
//! falls linearly to 0 at the neighbouring keys. The first key is held at 1
//! for all shorter tenors and the last key at 1 for all longer tenors, so
//! the profiles tile: at any tenor the weights over all keys sum to 1.
//!
//! The outermost ramps are bounded by sentinels at 0 and [`KEY_TENOR_CAP`]
//! years. With a single key, its profile falls from 1 at the key to 0 at the
//! cap.

use ndarray::{Array2, Array3, Axis};

use crate::error::{CurveError, CurveResult};

/// Key tenors (years) used for key-rate DV01.
pub const STANDARD_KEY_TENORS: [f64; 8] = [1.0, 2.0, 3.0, 5.0, 7.0, 10.0, 20.0, 30.0];

/// Upper sentinel tenor bounding the last ramp.
pub const KEY_TENOR_CAP: f64 = 50.0;

/// One basis point expressed in percentage points.
pub const ONE_BP_PCT: f64 = 0.01;

/// Weight in `[0, 1]` of key `index` at tenor `t`.
///
/// `keys` must be ascending. An out-of-range `index` or a non-finite `t`
/// yields 0.
///
/// # Example
///
/// ```rust
/// use keyrate_curves::key_rate_weight;
///
/// let keys = [1.0, 2.0, 3.0];
/// assert_eq!(key_rate_weight(&keys, 0, 0.5), 1.0);
/// assert_eq!(key_rate_weight(&keys, 1, 1.5), 0.5);
/// assert_eq!(key_rate_weight(&keys, 2, 40.0), 1.0);
/// ```
pub fn key_rate_weight(keys: &[f64], index: usize, t: f64) -> f64 {
    let Some(&k) = keys.get(index) else {
        return 0.0;
    };
    let n = keys.len();
    let t_prev = if index == 0 { 0.0 } else { keys[index - 1] };
    let t_next = if index + 1 == n {
        KEY_TENOR_CAP
    } else {
        keys[index + 1]
    };

    if index == 0 {
        if t <= k {
            1.0
        } else if t < t_next {
            (t_next - t) / (t_next - k)
        } else {
            0.0
        }
    } else if index + 1 == n {
        if t >= k {
            1.0
        } else if t > t_prev {
            (t - t_prev) / (k - t_prev)
        } else {
            0.0
        }
    } else if t >= t_prev && t <= k {
        (t - t_prev) / (k - t_prev)
    } else if t > k && t <= t_next {
        (t_next - t) / (t_next - k)
    } else {
        0.0
    }
}

/// Builds per-key weights and shock matrices for a validated key set.
///
/// # Example
///
/// ```rust
/// use keyrate_curves::KeyRateShockBuilder;
/// use ndarray::array;
///
/// let builder = KeyRateShockBuilder::standard();
/// let ttm = array![[0.5, 4.0], [25.0, 0.0]];
/// let shocks = builder.shock_matrices(&ttm);
///
/// assert_eq!(shocks.dim(), (8, 2, 2));
/// // 4y sits halfway between the 3y and 5y keys.
/// assert!((shocks[[2, 0, 1]] - 0.005).abs() < 1e-12);
/// assert!((shocks[[3, 0, 1]] - 0.005).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRateShockBuilder {
    keys: Vec<f64>,
    shift_bps: f64,
}

impl KeyRateShockBuilder {
    /// Creates a builder for the given key tenors with a 1bp shift.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyTenors` unless the keys are non-empty, finite,
    /// strictly ascending, and inside `(0, KEY_TENOR_CAP)`.
    pub fn new(keys: Vec<f64>) -> CurveResult<Self> {
        if keys.is_empty() {
            return Err(CurveError::invalid_key_tenors("no key tenors given"));
        }
        for (i, &k) in keys.iter().enumerate() {
            if !k.is_finite() || k <= 0.0 || k >= KEY_TENOR_CAP {
                return Err(CurveError::invalid_key_tenors(format!(
                    "key {k} must lie in (0, {KEY_TENOR_CAP})"
                )));
            }
            if i > 0 && k <= keys[i - 1] {
                return Err(CurveError::invalid_key_tenors(format!(
                    "keys must be strictly ascending: {} then {k}",
                    keys[i - 1]
                )));
            }
        }
        Ok(Self {
            keys,
            shift_bps: 1.0,
        })
    }

    /// Builder over [`STANDARD_KEY_TENORS`].
    #[must_use]
    pub fn standard() -> Self {
        Self {
            keys: STANDARD_KEY_TENORS.to_vec(),
            shift_bps: 1.0,
        }
    }

    /// Sets the shock size in basis points.
    #[must_use]
    pub fn with_shift_bps(mut self, shift_bps: f64) -> Self {
        self.shift_bps = shift_bps;
        self
    }

    /// Returns the key tenors.
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// Returns the shock size in basis points.
    pub fn shift_bps(&self) -> f64 {
        self.shift_bps
    }

    /// Returns the shock size in percentage points.
    pub fn shift_pct(&self) -> f64 {
        self.shift_bps * ONE_BP_PCT
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; the builder holds at least one key.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Weight of key `index` at tenor `t`.
    pub fn weight(&self, index: usize, t: f64) -> f64 {
        key_rate_weight(&self.keys, index, t)
    }

    /// Weights for every key over `grid`, shaped keys × grid points.
    pub fn weights(&self, grid: &[f64]) -> Array2<f64> {
        Array2::from_shape_fn((self.keys.len(), grid.len()), |(k, j)| {
            self.weight(k, grid[j])
        })
    }

    /// Additive rate shocks (percent) for every key over a time-to-cashflow
    /// table, shaped keys × rows × columns.
    pub fn shock_matrices(&self, ttm: &Array2<f64>) -> Array3<f64> {
        let (rows, cols) = ttm.dim();
        let shift = self.shift_pct();
        let mut shocks = Array3::<f64>::zeros((self.keys.len(), rows, cols));
        for (k, mut slab) in shocks.axis_iter_mut(Axis(0)).enumerate() {
            slab.zip_mut_with(ttm, |s, &t| *s = self.weight(k, t) * shift);
        }
        shocks
    }
}

impl Default for KeyRateShockBuilder {
    fn default() -> Self {
        Self::standard()
    }
}
