//! Panel visibility state machine and the shelf's UI-facing operations.
//!
//! `Hidden -> Showing -> Visible -> Hiding -> Hidden`, no state skipped.
//! An opposite request that arrives mid-animation is queued and applied once
//! the running animation completes; a newer request replaces the queued one
//! and a request matching the running animation clears it.

use crate::edge::EdgeIntent;
use crate::locator::LocatorCodec;
use crate::panel::error::OpenError;
use crate::store::ReferenceStore;
use crate::types::{Edge, PanelLayout, Rect, Row, Screen, ScreenId};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

pub mod error {
    use std::path::PathBuf;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum OpenError {
        #[error("No row at index {0}")]
        NoSuchRow(usize),

        #[error("Bookmark at index {0} cannot be read")]
        Unresolvable(usize),

        #[error("Target is unreachable: {}", .0.display())]
        Unreachable(PathBuf),

        #[error("Failed to open {}: {source}", path.display())]
        Launch {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
    }
}

mod opener;
mod ui;

pub use opener::{Opener, SystemOpener};
pub use ui::{DragSource, DropTarget, RowProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelVisibility {
    Hidden,
    Showing,
    Visible,
    Hiding,
}

/// Where the panel sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub screen: ScreenId,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelEvent {
    VisibilityChanged(PanelVisibility),
    FrameChanged(PanelFrame),
}

pub struct PanelController<C> {
    layout: PanelLayout,
    store: ReferenceStore<C>,
    opener: Box<dyn Opener>,
    visibility: PanelVisibility,
    frame: Option<PanelFrame>,
    animation_ends_at: Option<Instant>,
    queued: Option<EdgeIntent>,
}

impl<C: LocatorCodec> PanelController<C> {
    pub fn new(layout: PanelLayout, store: ReferenceStore<C>, opener: Box<dyn Opener>) -> Self {
        Self {
            layout,
            store,
            opener,
            visibility: PanelVisibility::Hidden,
            frame: None,
            animation_ends_at: None,
            queued: None,
        }
    }

    pub fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    pub fn frame(&self) -> Option<PanelFrame> {
        self.frame
    }

    /// When the running animation completes, if one is running.
    pub fn animation_deadline(&self) -> Option<Instant> {
        self.animation_ends_at
    }

    pub fn store(&self) -> &ReferenceStore<C> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ReferenceStore<C> {
        &mut self.store
    }

    /// Panel placement on `screen`: full height below the menu region minus
    /// the bottom margin, fixed width, flush with the attached edge.
    pub fn frame_for(&self, screen: &Screen) -> PanelFrame {
        let inset = screen.top_inset();
        let height = (screen.frame.height - inset - self.layout.bottom_margin).max(0.0);
        let x = match self.layout.edge {
            Edge::Left => screen.frame.min_x(),
            Edge::Right => screen.frame.max_x() - self.layout.width,
        };

        PanelFrame {
            screen: screen.id,
            rect: Rect::new(x, screen.frame.min_y() + inset, self.layout.width, height),
        }
    }
}

/// Visibility transitions.
impl<C: LocatorCodec> PanelController<C> {
    pub fn apply(&mut self, intent: EdgeIntent, now: Instant) -> Vec<PanelEvent> {
        match intent {
            EdgeIntent::ShowRequested(screen) => self.show_requested(&screen, now),
            EdgeIntent::HideRequested => self.hide_requested(now),
        }
    }

    pub fn show_requested(&mut self, screen: &Screen, now: Instant) -> Vec<PanelEvent> {
        let on_same_screen = self.frame.is_some_and(|frame| frame.screen == screen.id);

        match self.visibility {
            PanelVisibility::Visible if on_same_screen => vec![],
            PanelVisibility::Visible => {
                let frame = self.frame_for(screen);
                self.frame = Some(frame);
                info!(screen = %screen.id, "re-homed panel");
                vec![PanelEvent::FrameChanged(frame)]
            }
            PanelVisibility::Showing if on_same_screen => {
                self.queued = None;
                vec![]
            }
            PanelVisibility::Showing | PanelVisibility::Hiding => {
                debug!(screen = %screen.id, state = ?self.visibility, "queued show");
                self.queued = Some(EdgeIntent::ShowRequested(*screen));
                vec![]
            }
            PanelVisibility::Hidden => {
                let frame = self.frame_for(screen);
                self.frame = Some(frame);
                self.begin(PanelVisibility::Showing, now);
                vec![
                    PanelEvent::FrameChanged(frame),
                    PanelEvent::VisibilityChanged(PanelVisibility::Showing),
                ]
            }
        }
    }

    pub fn hide_requested(&mut self, now: Instant) -> Vec<PanelEvent> {
        match self.visibility {
            PanelVisibility::Hidden => vec![],
            PanelVisibility::Hiding => {
                self.queued = None;
                vec![]
            }
            PanelVisibility::Showing => {
                debug!("queued hide");
                self.queued = Some(EdgeIntent::HideRequested);
                vec![]
            }
            PanelVisibility::Visible => {
                self.begin(PanelVisibility::Hiding, now);
                vec![PanelEvent::VisibilityChanged(PanelVisibility::Hiding)]
            }
        }
    }

    /// Completes the running animation once its deadline has passed.
    pub fn advance(&mut self, now: Instant) -> Vec<PanelEvent> {
        match self.animation_ends_at {
            Some(ends_at) if ends_at <= now => self.finish_animation(now),
            _ => vec![],
        }
    }

    /// Completion callback for the running animation.
    pub fn finish_animation(&mut self, now: Instant) -> Vec<PanelEvent> {
        let settled = match self.visibility {
            PanelVisibility::Showing => PanelVisibility::Visible,
            PanelVisibility::Hiding => PanelVisibility::Hidden,
            PanelVisibility::Hidden | PanelVisibility::Visible => return vec![],
        };

        self.visibility = settled;
        self.animation_ends_at = None;
        debug!(state = ?settled, "panel animation finished");

        let mut events = vec![PanelEvent::VisibilityChanged(settled)];
        if let Some(intent) = self.queued.take() {
            events.extend(self.apply(intent, now));
        }
        events
    }

    fn begin(&mut self, state: PanelVisibility, now: Instant) {
        debug!(?state, "panel animation started");
        self.visibility = state;
        // An animation too long to schedule completes on the next advance.
        self.animation_ends_at = Some(now.checked_add(self.layout.animation).unwrap_or(now));
    }
}

/// Shelf content operations.
impl<C: LocatorCodec> PanelController<C> {
    /// Opens the referenced location with the platform default handler.
    pub fn open(&self, index: usize) -> Result<(), OpenError> {
        let resolution = self.store.resolve(index).ok_or_else(|| {
            if index < self.store.len() {
                OpenError::Unresolvable(index)
            } else {
                OpenError::NoSuchRow(index)
            }
        })?;

        if !resolution.reachable {
            return Err(OpenError::Unreachable(resolution.path));
        }

        self.opener
            .open(&resolution.path)
            .map_err(|source| OpenError::Launch {
                path: resolution.path,
                source,
            })
    }

    pub fn remove(&mut self, index: usize) -> bool {
        self.store.remove(index)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}

impl<C: LocatorCodec> RowProvider for PanelController<C> {
    fn row_count(&self) -> usize {
        self.store.len()
    }

    fn row(&self, index: usize) -> Option<Row> {
        self.store.row(index)
    }

    fn rows(&self) -> Vec<Row> {
        self.store.snapshot()
    }
}

impl<C: LocatorCodec> DropTarget for PanelController<C> {
    fn accept_drop(&mut self, paths: &[PathBuf]) -> bool {
        let mut accepted = false;

        for path in paths {
            match self.store.add(path) {
                Ok(added) => accepted |= added,
                Err(e) => warn!(path = %path.display(), error = %e, "rejected dropped item"),
            }
        }

        accepted
    }
}

impl<C: LocatorCodec> DragSource for PanelController<C> {
    fn drag_items(&self, rows: &[usize]) -> Vec<PathBuf> {
        rows.iter()
            .filter_map(|&index| self.store.resolve(index))
            .filter(|resolution| resolution.reachable)
            .map(|resolution| resolution.path)
            .collect()
    }
}
