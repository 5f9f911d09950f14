//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::{ApiConfig, EventConfig};
use crate::content::SiteContent;
use crate::countdown::Countdown;
use crate::guestbook::GuestBook;
use crate::websocket::{EventHub, HubConfig};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Guest book and excitement counter; the lock serializes every mutation
    pub guestbook: Arc<Mutex<GuestBook>>,
    /// Countdown to the ceremony
    pub countdown: Countdown,
    /// Period between countdown pushes to an open page
    pub tick_interval: Duration,
    /// Event details for the calendar download
    pub event: Arc<EventConfig>,
    /// Static page copy
    pub site: Arc<SiteContent>,
    /// Broadcasts events to open pages
    pub events: Arc<EventHub>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        guestbook: GuestBook,
        countdown: Countdown,
        event: EventConfig,
        site: SiteContent,
        config: ApiConfig,
    ) -> Self {
        Self::with_hub_config(guestbook, countdown, event, site, config, HubConfig::default())
    }

    /// Create AppState with custom WebSocket hub configuration
    pub fn with_hub_config(
        guestbook: GuestBook,
        countdown: Countdown,
        event: EventConfig,
        site: SiteContent,
        config: ApiConfig,
        hub_config: HubConfig,
    ) -> Self {
        Self {
            guestbook: Arc::new(Mutex::new(guestbook)),
            countdown,
            tick_interval: event.tick_interval(),
            event: Arc::new(event),
            site: Arc::new(site),
            events: Arc::new(EventHub::new(hub_config)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
