//! The owned shelf runtime.
//!
//! [`ShelfRuntime`] holds the edge trigger and the panel controller (which in
//! turn owns the reference store). The platform host calls [`ShelfRuntime::tick`]
//! and the `on_*` handlers from its UI thread; everything happens on that one
//! thread, and outbound notifications go out over an mpsc channel.

use crate::edge::EdgeTrigger;
use crate::locator::LocatorCodec;
use crate::panel::{DropTarget, Opener, PanelController, PanelEvent, PanelFrame, PanelVisibility, RowProvider};
use crate::runtime::error::HostError;
use crate::settings::SettingsStore;
use crate::settings::error::SettingsError;
use crate::store::ReferenceStore;
use crate::types::{AppConfig, Config, PanelLayout, Point, Row, Screen, TriggerTuning};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, info, warn};

pub mod error {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum HostError {
        #[error("Pointer location unavailable: {0}")]
        PointerUnavailable(String),

        #[error("Screen enumeration failed: {0}")]
        ScreensUnavailable(String),
    }
}

/// What the runtime needs from the windowing platform on each sample tick.
pub trait Host {
    fn pointer_location(&self) -> Result<Point, HostError>;
    fn screens(&self) -> Result<Vec<Screen>, HostError>;
}

/// Notifications for the shelf view.
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfEvent {
    ListChanged(Vec<Row>),
    VisibilityChanged(PanelVisibility),
    FrameChanged(PanelFrame),
    OpenFailed { index: usize, message: String },
    QuitRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Quit,
}

/// Context menu offered on the shelf title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub items: Vec<MenuItem>,
}

pub struct ShelfRuntime<C> {
    trigger: EdgeTrigger,
    panel: PanelController<C>,
    events: Sender<ShelfEvent>,
    sample_interval: Duration,
    validation_interval: Duration,
    next_sample: Instant,
    /// `None` when the interval reaches past what `Instant` can represent.
    next_validation: Option<Instant>,
    running: bool,
}

impl<C: LocatorCodec> ShelfRuntime<C> {
    /// Opens the settings database under `config.base_path` and builds the runtime on it.
    pub fn open(
        config: &Config,
        app_config: &AppConfig,
        codec: C,
        opener: Box<dyn Opener>,
        events: Sender<ShelfEvent>,
        now: Instant,
    ) -> Result<Self, SettingsError> {
        let app_config = effective_config(app_config);
        let settings = SettingsStore::open(&config.db_path())?;
        let store = ReferenceStore::open(codec, settings);
        let panel = PanelController::new(PanelLayout::from(&app_config), store, opener);

        info!(path = %config.base_path.display(), "shelf storage opened");
        Ok(Self::new(&app_config, panel, events, now))
    }

    /// Builds the runtime around `panel`. Invalid settings in `app_config`
    /// fall back to their defaults.
    pub fn new(
        app_config: &AppConfig,
        panel: PanelController<C>,
        events: Sender<ShelfEvent>,
        now: Instant,
    ) -> Self {
        let app_config = &effective_config(app_config);
        let validation_interval = app_config.validation_interval();

        let mut runtime = Self {
            trigger: EdgeTrigger::new(TriggerTuning::from(app_config)),
            panel,
            events,
            sample_interval: app_config.sample_interval(),
            validation_interval,
            next_sample: now,
            next_validation: now.checked_add(validation_interval),
            running: true,
        };

        if app_config.store.validate_on_load {
            runtime.panel.store_mut().validate(SystemTime::now());
        }
        runtime.publish_list();
        runtime
    }

    pub fn panel(&self) -> &PanelController<C> {
        &self.panel
    }

    pub fn trigger(&self) -> &EdgeTrigger {
        &self.trigger
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_wakeup(&self) -> Instant {
        [Some(self.next_sample), self.next_validation, self.panel.animation_deadline()]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(self.next_sample)
    }
}

/// Timeline.
impl<C: LocatorCodec> ShelfRuntime<C> {
    /// Runs whatever is due at `now`: pointer sampling, animation completion,
    /// reachability validation.
    pub fn tick(&mut self, host: &impl Host, now: Instant) {
        if !self.running {
            return;
        }

        if now >= self.next_sample {
            self.sample(host, now);
            self.next_sample = now.checked_add(self.sample_interval).unwrap_or(now);
        }

        let events = self.panel.advance(now);
        self.forward(events);

        if self.next_validation.is_some_and(|due| now >= due) {
            self.validate(SystemTime::now());
            self.next_validation = now.checked_add(self.validation_interval);
        }
    }

    /// Prunes unreachable references, notifying the view when any were removed.
    pub fn validate(&mut self, at: SystemTime) -> usize {
        let pruned = self.panel.store_mut().validate(at);
        if pruned > 0 {
            self.publish_list();
        }
        pruned
    }

    fn sample(&mut self, host: &impl Host, now: Instant) {
        let pointer = match host.pointer_location() {
            Ok(pointer) => pointer,
            Err(e) => {
                debug!(error = %e, "skipping sample tick");
                return;
            }
        };
        let screens = match host.screens() {
            Ok(screens) => screens,
            Err(e) => {
                debug!(error = %e, "skipping sample tick");
                return;
            }
        };

        if let Some(intent) = self.trigger.sample(now, pointer, &screens) {
            let events = self.panel.apply(intent, now);
            self.forward(events);
        }
    }

    /// Cancels every timer and flushes the store. Later ticks do nothing.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.trigger.cancel_all();

        if let Err(e) = self.panel.store_mut().flush() {
            warn!(error = %e, "failed to flush shelf references on shutdown");
        }
        info!("shelf runtime shut down");
    }
}

/// View event handlers. Handlers that change the list are ignored after
/// [`shutdown`](ShelfRuntime::shutdown).
impl<C: LocatorCodec> ShelfRuntime<C> {
    pub fn on_drop(&mut self, paths: &[PathBuf]) -> bool {
        if !self.accepts_changes("drop") {
            return false;
        }
        let accepted = self.panel.accept_drop(paths);
        if accepted {
            self.publish_list();
        }
        accepted
    }

    pub fn on_double_click(&mut self, index: usize) {
        if let Err(e) = self.panel.open(index) {
            warn!(index, error = %e, "could not open shelf item");
            self.publish(ShelfEvent::OpenFailed {
                index,
                message: e.to_string(),
            });
        }
    }

    pub fn on_clear_clicked(&mut self) {
        if !self.accepts_changes("clear") {
            return;
        }
        self.panel.clear();
        self.publish_list();
    }

    pub fn on_remove(&mut self, index: usize) -> bool {
        if !self.accepts_changes("remove") {
            return false;
        }
        let removed = self.panel.remove(index);
        if removed {
            self.publish_list();
        }
        removed
    }

    fn accepts_changes(&self, action: &str) -> bool {
        if !self.running {
            debug!(action, "ignoring list change after shutdown");
        }
        self.running
    }

    pub fn on_right_click_label(&self) -> ContextMenu {
        ContextMenu {
            items: vec![MenuItem::Quit],
        }
    }

    pub fn on_menu_item(&mut self, item: MenuItem) {
        match item {
            MenuItem::Quit => {
                self.shutdown();
                self.publish(ShelfEvent::QuitRequested);
            }
        }
    }
}

/// Outbound notifications.
impl<C: LocatorCodec> ShelfRuntime<C> {
    fn forward(&self, events: Vec<PanelEvent>) {
        for event in events {
            self.publish(match event {
                PanelEvent::VisibilityChanged(state) => ShelfEvent::VisibilityChanged(state),
                PanelEvent::FrameChanged(frame) => ShelfEvent::FrameChanged(frame),
            });
        }
    }

    fn publish_list(&self) {
        self.publish(ShelfEvent::ListChanged(self.panel.rows()));
    }

    fn publish(&self, event: ShelfEvent) {
        let _ = self.events.send(event);
    }
}

fn effective_config(app_config: &AppConfig) -> AppConfig {
    let errors = app_config.validate();
    if errors.is_empty() {
        return app_config.clone();
    }
    warn!(?errors, "invalid shelf settings replaced by defaults");
    app_config.with_defaults_for_invalid()
}
