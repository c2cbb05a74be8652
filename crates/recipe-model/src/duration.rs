/// Duration with nanosecond precision.
///
/// Signed so that arithmetic on raw telemetry cannot wrap; consumers clamp
/// to zero where a negative value makes no sense for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    nanos: i64,
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self { nanos: 0 };

    /// Creates a duration from raw nanoseconds.
    #[must_use]
    pub fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    /// Creates a duration from milliseconds.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        Self {
            nanos: millis.saturating_mul(1_000_000),
        }
    }

    /// Creates a duration from whole seconds.
    #[must_use]
    pub fn from_secs(secs: i64) -> Self {
        Self {
            nanos: secs.saturating_mul(1_000_000_000),
        }
    }

    /// Creates a duration from fractional seconds.
    ///
    /// This is the shape durations arrive in from the field bus. The cast
    /// saturates at the representable range and maps NaN to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_secs_f64(secs: f64) -> Self {
        Self {
            nanos: (secs * 1_000_000_000.0) as i64,
        }
    }

    /// Raw nanoseconds.
    #[must_use]
    pub fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Whole milliseconds, truncating.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        self.nanos / 1_000_000
    }

    /// Fractional seconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_secs_f64(self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Returns `true` for the zero-length duration.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.nanos == 0
    }

    /// Adds two durations, saturating at the representable range.
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_add(rhs.nanos),
        }
    }

    /// Subtracts a duration, saturating at the representable range.
    #[must_use]
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self {
            nanos: self.nanos.saturating_sub(rhs.nanos),
        }
    }

    /// Multiplies by an iteration count, saturating at the representable
    /// range.
    #[must_use]
    pub fn saturating_mul(self, count: u64) -> Self {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        Self {
            nanos: self.nanos.saturating_mul(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Duration;

    #[test]
    fn fractional_seconds_round_trip() {
        let d = Duration::from_secs_f64(1.5);
        assert_eq!(d.as_nanos(), 1_500_000_000);
        assert!((d.as_secs_f64() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn nan_elapsed_becomes_zero() {
        assert_eq!(Duration::from_secs_f64(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn multiplication_saturates() {
        let d = Duration::from_secs(i64::MAX / 2_000_000_000);
        assert_eq!(d.saturating_mul(u64::MAX).as_nanos(), i64::MAX);
    }

    #[test]
    fn subtraction_can_go_negative() {
        let d = Duration::from_secs(1).saturating_sub(Duration::from_secs(3));
        assert_eq!(d, Duration::from_secs(-2));
        assert_eq!(d.max(Duration::ZERO), Duration::ZERO);
    }
}
