use std::time::Duration;

use rand::Rng;

use crate::error::ValidationError;

/// Delay inserted between two task runs of the same user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitTime {
    min: Duration,
    max: Duration,
}

impl WaitTime {
    pub const DEFAULT_MIN: Duration = Duration::from_secs(5);
    pub const DEFAULT_MAX: Duration = Duration::from_secs(10);

    /// Uniform wait in `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns an error when `min` is greater than `max`.
    pub const fn between(min: Duration, max: Duration) -> Result<Self, ValidationError> {
        if min.as_nanos() > max.as_nanos() {
            return Err(ValidationError::WaitRangeInverted { min, max });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn constant(wait: Duration) -> Self {
        Self {
            min: wait,
            max: wait,
        }
    }

    #[must_use]
    pub const fn min(&self) -> Duration {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Duration {
        self.max
    }

    /// Draws one wait, at millisecond resolution.
    pub fn sample<R>(&self, rng: &mut R) -> Duration
    where
        R: Rng + ?Sized,
    {
        let min_ms = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        if min_ms >= max_ms {
            return self.min;
        }
        Duration::from_millis(rng.gen_range(min_ms..=max_ms)).clamp(self.min, self.max)
    }
}

impl Default for WaitTime {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
