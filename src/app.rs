use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::warn;

use crate::config::NetspeedConfig;
use crate::host::AnnouncementLog;
use crate::sampler::{NetSpeedPlugin, Variant};

/// Which view the app is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    Help,
}

/// Main application state for the interactive host
pub struct App {
    pub mode: AppMode,
    pub should_quit: bool,
    pub config: NetspeedConfig,
    pub plugin: Arc<NetSpeedPlugin>,
    pub log: Arc<AnnouncementLog>,
    /// Requests currently measuring or waiting for their variant's lock
    in_flight: Arc<AtomicUsize>,
}

impl App {
    pub fn new(config: NetspeedConfig, plugin: Arc<NetSpeedPlugin>, log: Arc<AnnouncementLog>) -> Self {
        Self {
            mode: AppMode::Normal,
            should_quit: false,
            config,
            plugin,
            log,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Run one announcement request off the input thread. Requests for the
    /// same variant queue inside the controller.
    pub fn trigger(&self, variant: Variant) {
        let plugin = self.plugin.clone();
        let guard = InFlight::enter(self.in_flight.clone());

        let spawned = std::thread::Builder::new()
            .name(format!("netspeed-{variant:?}").to_lowercase())
            .spawn(move || {
                let _guard = guard;
                plugin.request(variant);
            });

        if let Err(e) = spawned {
            warn!("could not start worker thread ({e}), measuring inline");
            let _guard = InFlight::enter(self.in_flight.clone());
            self.plugin.request(variant);
        }
    }

    /// Number of requests not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Counts a request as in flight until dropped
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
