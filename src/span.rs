//! Spanwise discretisation and the mirroring conventions shared by all solvers.
//!
//! Half-span quantities are ordered from midspan (index 0) to the tip. The
//! full span is measured from one tip (`y = 0`) to the other (`y = span`), so
//! midspan sits at `y = span / 2` and full-span index `n_cuts - 1`.

use crate::errors::GeometryError;

/// Mirror a half-span station list onto the full span.
///
/// The midspan entry is shared by both halves and appears once, so a list of
/// `n` entries becomes `2n - 1`: `full[i] = half[n - 1 - i]` for `i < n`,
/// otherwise `half[i - n + 1]`.
///
/// # Examples
/// ```
/// use spoilerx::mirror;
///
/// assert_eq!(mirror(&[0, 1, 2]), vec![2, 1, 0, 1, 2]);
/// ```
#[must_use]
pub fn mirror<T: Clone>(half: &[T]) -> Vec<T> {
    let n = half.len();
    (0..(2 * n).saturating_sub(1))
        .map(|i| {
            if i < n {
                half[n - 1 - i].clone()
            } else {
                half[i - n + 1].clone()
            }
        })
        .collect()
}

/// Mirror half-span strip values onto the full span.
///
/// Strips lie between stations, so no strip sits on the midspan plane and
/// every entry appears twice: `n` strips become `2n`.
///
/// # Examples
/// ```
/// use spoilerx::mirror_strips;
///
/// assert_eq!(mirror_strips(&[0, 1]), vec![1, 0, 0, 1]);
/// ```
#[must_use]
pub fn mirror_strips<T: Clone>(half: &[T]) -> Vec<T> {
    half.iter().rev().chain(half.iter()).cloned().collect()
}

/// Index of the entry of `values` closest to `target`.
///
/// Ties resolve to the lower index. Returns `None` for an empty slice.
#[must_use]
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (index, value)| {
            let distance = (value - target).abs();
            match best {
                Some((_, best_distance)) if best_distance <= distance => best,
                _ => Some((index, distance)),
            }
        })
        .map(|(index, _)| index)
}

/// Equally spaced stations over the half span.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanDiscretization {
    /// Full span in metres.
    span: f64,
    /// Distance of each station from midspan, midspan first.
    half: Vec<f64>,
}

impl SpanDiscretization {
    /// Cut the half span into `n_cuts` equally spaced stations.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewStations`] when `n_cuts < 2` and
    /// [`GeometryError::NonPositive`] for a non-positive span.
    pub fn new(span: f64, n_cuts: usize) -> Result<Self, GeometryError> {
        if n_cuts < 2 {
            return Err(GeometryError::TooFewStations(n_cuts));
        }
        if !(span.is_finite() && span > 0.0) {
            return Err(GeometryError::NonPositive {
                name: "span",
                value: span,
            });
        }
        let spacing = span / 2.0 / (n_cuts - 1) as f64;
        let half = (0..n_cuts).map(|i| i as f64 * spacing).collect();
        Ok(Self { span, half })
    }

    /// Full span in metres.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Number of half-span stations.
    #[must_use]
    pub fn n_cuts(&self) -> usize {
        self.half.len()
    }

    /// Number of full-span stations.
    #[must_use]
    pub fn full_len(&self) -> usize {
        2 * self.half.len() - 1
    }

    /// Number of load strips between full-span stations.
    #[must_use]
    pub fn strip_count(&self) -> usize {
        2 * (self.half.len() - 1)
    }

    /// Distance between neighbouring stations.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.span / self.strip_count() as f64
    }

    /// Half-span station coordinates measured from midspan.
    #[must_use]
    pub fn half_span(&self) -> &[f64] {
        &self.half
    }

    /// Full-span station coordinates measured from the first tip.
    #[must_use]
    pub fn full_span(&self) -> Vec<f64> {
        let spacing = self.spacing();
        (0..self.full_len()).map(|i| i as f64 * spacing).collect()
    }

    /// Centres of the load strips measured from the first tip.
    #[must_use]
    pub fn strip_centres(&self) -> Vec<f64> {
        let spacing = self.spacing();
        (0..self.strip_count())
            .map(|i| (i as f64 + 0.5) * spacing)
            .collect()
    }

    /// Half-span index of a full-span station.
    #[must_use]
    pub fn half_index(&self, full_index: usize) -> usize {
        let midspan = self.half.len() - 1;
        full_index.abs_diff(midspan)
    }

    /// Full-span indices of `n_ribs + 2` equally spaced ribs, end caps included.
    ///
    /// Each rib is snapped to the station nearest its exact position.
    #[must_use]
    pub fn rib_stations(&self, n_ribs: usize) -> Vec<usize> {
        let full = self.full_span();
        let panels = (n_ribs + 1) as f64;
        (0..n_ribs + 2)
            .filter_map(|i| nearest_index(&full, i as f64 * self.span / panels))
            .collect()
    }
}
