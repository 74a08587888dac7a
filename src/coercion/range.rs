//! Min/max range normalization
//!
//! Maps raw magnitudes (RMS, attack times, SNR in dB, ...) onto `[0, 1]` so
//! that tracks with unrelated units can share one visual scale.

/// Projection of a magnitude sequence onto its own `[min, max]` range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeNormalizer {
    /// Smallest observed value (0.0 for empty input)
    pub min: f64,
    /// Largest observed value (1.0 for empty input)
    pub max: f64,
    span: f64,
    empty: bool,
}

impl RangeNormalizer {
    /// Build a projection from a sequence of magnitudes
    ///
    /// Non-finite values are ignored when computing the range.
    ///
    /// # Example
    ///
    /// ```
    /// use onset_ingest::coercion::RangeNormalizer;
    ///
    /// let norm = RangeNormalizer::from_values([2.0, 4.0, 6.0]);
    /// assert_eq!(norm.project(2.0), 0.0);
    /// assert_eq!(norm.project(4.0), 0.5);
    /// assert_eq!(norm.project(6.0), 1.0);
    ///
    /// // Empty input projects everything to the neutral mid-point
    /// let empty = RangeNormalizer::from_values(std::iter::empty());
    /// assert_eq!(empty.project(123.0), 0.5);
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;

        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
            seen = true;
        }

        if !seen {
            return Self {
                min: 0.0,
                max: 1.0,
                span: 1.0,
                empty: true,
            };
        }

        // All-equal input would divide by zero
        let span = if max > min { max - min } else { 1.0 };

        Self {
            min,
            max,
            span,
            empty: false,
        }
    }

    /// Project `v` relative to the observed range
    ///
    /// Values outside the observed range project outside `[0, 1]`; callers
    /// that need a hard bound clamp the result.
    pub fn project(&self, v: f64) -> f64 {
        if self.empty {
            return 0.5;
        }
        (v - self.min) / self.span
    }

    /// True if the normalizer was built from no usable values
    pub fn is_empty(&self) -> bool {
        self.empty
    }
}
