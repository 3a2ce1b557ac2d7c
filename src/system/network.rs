use std::time::Duration;

use log::{debug, warn};

use crate::clock::Clock;
use crate::sinks::Announcer;
use crate::system::counters::{CounterReadError, CounterSnapshot, CounterSource};

/// Length of the fixed measurement window. Deltas over this window are
/// numerically bytes per second.
pub const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Download/upload throughput in bytes per second (`None` = unavailable)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rate {
    pub download: Option<f64>,
    pub upload: Option<f64>,
}

impl Rate {
    pub const UNAVAILABLE: Rate = Rate {
        download: None,
        upload: None,
    };

    /// Raw byte deltas between two snapshots taken one window apart.
    /// A counter reset shows up as a negative rate and is left as is.
    pub fn between(first: &CounterSnapshot, second: &CounterSnapshot) -> Self {
        Self {
            download: Some(delta(first.bytes_received, second.bytes_received)),
            upload: Some(delta(first.bytes_sent, second.bytes_sent)),
        }
    }
}

fn delta(before: u64, after: u64) -> f64 {
    (i128::from(after) - i128::from(before)) as f64
}

/// Fixed-window measurement: read, wait one second, read again.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedWindow;

impl FixedWindow {
    /// Blocks the caller for [`SAMPLE_WINDOW`]. Read failures are announced
    /// and turn into [`Rate::UNAVAILABLE`].
    pub fn measure(&self, source: &dyn CounterSource, clock: &dyn Clock, announcer: &dyn Announcer) -> Rate {
        match self.sample(source, clock) {
            Ok(rate) => {
                debug!("measured rate: {rate:?}");
                rate
            }
            Err(e) => {
                warn!("network counter read failed: {e}");
                announcer.announce(&format!("Error retrieving network statistics: {e}"));
                Rate::UNAVAILABLE
            }
        }
    }

    fn sample(&self, source: &dyn CounterSource, clock: &dyn Clock) -> Result<Rate, CounterReadError> {
        let first = source.read()?;
        clock.sleep(SAMPLE_WINDOW);
        let second = source.read()?;
        Ok(Rate::between(&first, &second))
    }
}
