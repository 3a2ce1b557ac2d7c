//! Announcement controller: debounces presses, measures, formats, announces.
//!
//! Each presentation (bits, bytes) owns one [`AnnouncementController`] with
//! its own [`SamplerState`]. A press within [`DOUBLE_PRESS_WINDOW`] of the last
//! successful announcement copies that announcement to the clipboard instead
//! of measuring again.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::clock::Clock;
use crate::format::{BitRate, ByteRate, Presentation};
use crate::sinks::{Announcer, Clipboard};
use crate::system::counters::CounterCapability;
use crate::system::network::{FixedWindow, Rate};

/// A repeat press sooner than this after an announcement is a double-press
pub const DOUBLE_PRESS_WINDOW: Duration = Duration::from_millis(500);

pub const UNABLE_TO_MEASURE: &str = "Unable to measure speed.";

/// Which announcement the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// kbps / Mbps
    Bits,
    /// KB/s / MB/s
    Bytes,
}

impl Variant {
    /// Gesture help text shown next to the key binding
    pub fn description(self) -> &'static str {
        match self {
            Variant::Bits => {
                "Announces current download and upload speed. Press twice to copy to clipboard."
            }
            Variant::Bytes => {
                "Announces current download and upload speed in bytes. Press twice to copy to clipboard."
            }
        }
    }
}

/// What a controller remembers between presses.
///
/// Text and timestamp only ever change together.
#[derive(Debug, Clone, Default)]
pub struct SamplerState {
    last_announced_text: Option<String>,
    last_announcement_at: Option<Instant>,
}

impl SamplerState {
    /// The cached text, if `now` is still inside the double-press window.
    fn replayable(&self, now: Instant) -> Option<&str> {
        let at = self.last_announcement_at?;
        let text = self.last_announced_text.as_deref().filter(|t| !t.is_empty())?;
        (now.saturating_duration_since(at) < DOUBLE_PRESS_WINDOW).then_some(text)
    }

    fn record(&mut self, text: String, at: Instant) {
        self.last_announced_text = Some(text);
        self.last_announcement_at = Some(at);
    }
}

/// Everything a controller talks to. Shared by both variants.
#[derive(Clone)]
pub struct Collaborators {
    pub capability: CounterCapability,
    pub announcer: Arc<dyn Announcer>,
    pub clipboard: Arc<dyn Clipboard>,
    pub clock: Arc<dyn Clock>,
}

/// Debounce and measurement for one presentation `P`
pub struct AnnouncementController<P: Presentation> {
    /// Held for the whole request, measurement included
    state: Mutex<SamplerState>,
    /// Copy of the last announced text for readers that must not wait on
    /// a running measurement
    published: RwLock<Option<String>>,
    env: Collaborators,
    measurement: FixedWindow,
    _presentation: PhantomData<fn() -> P>,
}

impl<P: Presentation> AnnouncementController<P> {
    pub fn new(env: Collaborators) -> Self {
        Self {
            state: Mutex::new(SamplerState::default()),
            published: RwLock::new(None),
            env,
            measurement: FixedWindow,
            _presentation: PhantomData,
        }
    }

    /// Handle one press. Never fails; every outcome ends in an announcement.
    ///
    /// Overlapping presses queue on the state lock, and the double-press
    /// check runs only once the lock is held, so a second press made while
    /// the first is still measuring copies the fresh result.
    pub fn request_announcement(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.env.clock.now();

        // The timestamp is left alone here: a third quick press is compared
        // against the same announcement time and may copy again.
        if let Some(text) = state.replayable(now) {
            debug!("[{}] double press, copying last announcement", P::NAME);
            self.env.clipboard.copy_to_clipboard(text);
            self.env.announcer.announce(&format!("Copied to clipboard: {text}"));
            return;
        }

        let rate = match &self.env.capability {
            CounterCapability::Available(source) => {
                self.measurement
                    .measure(source.as_ref(), self.env.clock.as_ref(), self.env.announcer.as_ref())
            }
            CounterCapability::Missing { .. } => Rate::UNAVAILABLE,
        };

        let (Some(download), Some(upload)) = (rate.download, rate.upload) else {
            debug!("[{}] no rate available", P::NAME);
            self.env.announcer.announce(UNABLE_TO_MEASURE);
            return;
        };

        let message = format!(
            "Download: {}, Upload: {}",
            P::format(Some(download)),
            P::format(Some(upload))
        );
        self.env.announcer.announce(&message);

        // Stamped after the announcement so the double-press window starts
        // when the user heard the result, not when the key went down.
        let announced_at = self.env.clock.now();
        *self.published.write().unwrap_or_else(PoisonError::into_inner) = Some(message.clone());
        state.record(message, announced_at);
    }

    /// Last successfully announced text, if any. Does not wait for a
    /// measurement in progress.
    pub fn last_announcement(&self) -> Option<String> {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// The two user-facing operations, each with independent state
pub struct NetSpeedPlugin {
    bits: AnnouncementController<BitRate>,
    bytes: AnnouncementController<ByteRate>,
    available: bool,
}

impl NetSpeedPlugin {
    /// Build both controllers. When no counter source exists, the user is
    /// told once, here.
    pub fn new(env: Collaborators) -> Self {
        match &env.capability {
            CounterCapability::Available(_) => info!("network speed monitor ready"),
            CounterCapability::Missing { reason } => {
                warn!("network speed monitor started without counters: {reason}");
                env.announcer.announce(&format!(
                    "Network speed monitor: network statistics are unavailable ({reason})."
                ));
            }
        }

        Self {
            available: env.capability.is_available(),
            bits: AnnouncementController::new(env.clone()),
            bytes: AnnouncementController::new(env),
        }
    }

    pub fn announce_bit_rate(&self) {
        self.bits.request_announcement();
    }

    pub fn announce_byte_rate(&self) {
        self.bytes.request_announcement();
    }

    pub fn request(&self, variant: Variant) {
        match variant {
            Variant::Bits => self.announce_bit_rate(),
            Variant::Bytes => self.announce_byte_rate(),
        }
    }

    pub fn last_announcement(&self, variant: Variant) -> Option<String> {
        match variant {
            Variant::Bits => self.bits.last_announcement(),
            Variant::Bytes => self.bytes.last_announcement(),
        }
    }

    /// Whether measurements can be taken at all
    pub fn is_available(&self) -> bool {
        self.available
    }
}
