#![forbid(unsafe_code)]

//! Monotonic and wall clocks.
//!
//! Everything time-dependent in the client reads time through [`Clock`] so the
//! host decides what "now" means. Production code uses [`SystemClock`]; tests
//! and host-driven embeddings (a WebView bridge pumping frames) use
//! [`DeterministicClock`], which only moves when told to.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// `2024-01-01T00:00:04.000Z`
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// A source of monotonic and wall-clock time.
pub trait Clock: Send + Sync {
    /// Monotonic time since an arbitrary, fixed origin.
    fn now_mono(&self) -> Duration;

    /// Current wall-clock time in UTC.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Real time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_mono(&self) -> Duration {
        self.origin.elapsed()
    }

    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Deterministic clock controlled by the host.
///
/// Time is stored as nanoseconds in an atomic so one clock can be shared
/// (`Arc<DeterministicClock>`) between a reporter and the code driving it.
/// Wall time is `epoch + now_mono()`.
#[derive(Debug)]
pub struct DeterministicClock {
    nanos: AtomicU64,
    epoch: OffsetDateTime,
}

impl DeterministicClock {
    /// Create a clock at `0` whose wall time starts at the Unix epoch.
    #[must_use]
    pub fn new() -> Self {
        Self::with_epoch(OffsetDateTime::UNIX_EPOCH)
    }

    /// Create a clock at `0` whose wall time starts at `epoch`.
    #[must_use]
    pub fn with_epoch(epoch: OffsetDateTime) -> Self {
        Self {
            nanos: AtomicU64::new(0),
            epoch,
        }
    }

    /// Set current monotonic time.
    pub fn set(&self, now: Duration) {
        self.nanos.store(duration_to_nanos(now), Ordering::SeqCst);
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&self, dt: Duration) {
        let dt = duration_to_nanos(dt);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(dt))
            });
    }
}

impl Default for DeterministicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for DeterministicClock {
    fn now_mono(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    fn now_utc(&self) -> OffsetDateTime {
        self.epoch
            .checked_add(self.now_mono().try_into().unwrap_or(time::Duration::MAX))
            .unwrap_or(self.epoch)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_mono(&self) -> Duration {
        (**self).now_mono()
    }

    fn now_utc(&self) -> OffsetDateTime {
        (**self).now_utc()
    }
}

/// Render a wall-clock instant as an ISO-8601 UTC timestamp with
/// millisecond precision.
#[must_use]
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.to_offset(UtcOffset::UTC)
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00.000Z"))
}

fn duration_to_nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}
