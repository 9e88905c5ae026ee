//! Open interest values

/// Factor approximating the rolling average from the latest value; the
/// bulk feeds only carry the latest figure.
pub const OI_AVERAGE_FACTOR: f64 = 0.999;

/// Latest open interest for one symbol plus its approximated average.
///
/// The zero value doubles as the placeholder for symbols the feeds do not
/// track and for degraded enrichment fetches.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpenInterest {
    pub latest: f64,
    pub average: f64,
}

impl OpenInterest {
    /// Placeholder for an unknown or unavailable open interest.
    pub const ZERO: OpenInterest = OpenInterest {
        latest: 0.0,
        average: 0.0,
    };

    /// Build from the latest reported value.
    pub fn from_latest(latest: f64) -> Self {
        Self {
            latest,
            average: latest * OI_AVERAGE_FACTOR,
        }
    }
}
