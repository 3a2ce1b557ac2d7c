use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::system::collector::SysinfoCounterSource;

/// Cumulative byte counters summed across all interfaces at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Bytes received since boot (or since the counters were last reset)
    pub bytes_received: u64,
    /// Bytes sent since boot
    pub bytes_sent: u64,
    pub taken_at: Instant,
}

/// The OS refused or failed to hand out network counters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{description}")]
pub struct CounterReadError {
    pub description: String,
}

impl CounterReadError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Reads the system-wide network counters.
#[cfg_attr(test, automock)]
pub trait CounterSource: Send + Sync {
    fn read(&self) -> Result<CounterSnapshot, CounterReadError>;
}

/// Whether a counter source exists at all on this host.
///
/// A missing source is not an error: the sampler is still built and every
/// request reports that the speed cannot be measured.
#[derive(Clone)]
pub enum CounterCapability {
    Available(Arc<dyn CounterSource>),
    Missing { reason: String },
}

impl CounterCapability {
    /// Detect the platform counter source.
    pub fn probe() -> Self {
        if sysinfo::IS_SUPPORTED_SYSTEM {
            info!("network counters available through sysinfo");
            Self::Available(Arc::new(SysinfoCounterSource::new()))
        } else {
            let reason = format!(
                "network counters are not supported on {}",
                std::env::consts::OS
            );
            warn!("{reason}");
            Self::Missing { reason }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl fmt::Debug for CounterCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("Available"),
            Self::Missing { reason } => f.debug_struct("Missing").field("reason", reason).finish(),
        }
    }
}
