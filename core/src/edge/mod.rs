//! Pointer-driven edge detection.
//!
//! [`EdgeTrigger::sample`] is fed one pointer reading per tick and decides
//! whether the shelf should be shown or hidden:
//!
//! - Touching the narrow trigger band arms a show deadline. The first touch
//!   wins: jitter inside the band never postpones it.
//! - The deadline fires on the first tick at or after it, unless the pointer
//!   retreated in between.
//! - Moving past the retreat depth (panel width plus a margin) cancels every
//!   pending deadline and requests a hide on that same tick.
//!
//! The arm band is 1 px wide while the disarm band starts past the panel, so
//! hovering the open panel never hides it.

use crate::types::{Edge, Point, Screen, ScreenId, TriggerTuning, locate_screen};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum EdgeIntent {
    ShowRequested(Screen),
    HideRequested,
}

/// Conceptual per-screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgePhase {
    Idle,
    ArmedForShow,
    ArmedToHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeState {
    pub edge: Edge,
    pub pending_show_deadline: Option<Instant>,
}

pub struct EdgeTrigger {
    tuning: TriggerTuning,
    states: HashMap<ScreenId, EdgeState>,
    /// Screen the last show was requested for, until the next hide.
    shown_on: Option<ScreenId>,
}

impl EdgeTrigger {
    pub fn new(tuning: TriggerTuning) -> Self {
        Self {
            tuning,
            states: HashMap::new(),
            shown_on: None,
        }
    }

    pub fn state(&self, screen: ScreenId) -> Option<&EdgeState> {
        self.states.get(&screen)
    }

    pub fn phase(&self, screen: ScreenId) -> EdgePhase {
        if self.shown_on == Some(screen) {
            return EdgePhase::ArmedToHide;
        }
        match self.states.get(&screen) {
            Some(EdgeState {
                pending_show_deadline: Some(_),
                ..
            }) => EdgePhase::ArmedForShow,
            _ => EdgePhase::Idle,
        }
    }

    /// Earliest pending show deadline across all screens.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.states
            .values()
            .filter_map(|state| state.pending_show_deadline)
            .min()
    }

    /// Drops every pending show timer.
    pub fn cancel_all(&mut self) {
        for state in self.states.values_mut() {
            state.pending_show_deadline = None;
        }
    }

    /// Processes one pointer reading.
    pub fn sample(&mut self, now: Instant, pointer: Point, screens: &[Screen]) -> Option<EdgeIntent> {
        if let Some(intent) = self.sync_screens(screens) {
            return Some(intent);
        }

        let Some(screen) = locate_screen(screens, self.tuning.edge, pointer).copied() else {
            return None;
        };

        // The pointer is not on any other screen, so their timers lost their touch.
        for (id, state) in &mut self.states {
            if *id != screen.id {
                state.pending_show_deadline = None;
            }
        }

        let depth = screen.depth_from(self.tuning.edge, pointer);

        if depth > self.tuning.retreat_depth {
            return self.retreat();
        }

        let already_shown_here = self.shown_on == Some(screen.id);
        let trigger_band = self.tuning.trigger_band;
        let show_delay = self.tuning.show_delay;
        let state = self.state_mut(screen.id);

        if depth <= trigger_band
            && !already_shown_here
            && state.pending_show_deadline.is_none()
        {
            match now.checked_add(show_delay) {
                Some(deadline) => {
                    state.pending_show_deadline = Some(deadline);
                    debug!(screen = %screen.id, "armed show timer");
                }
                None => warn!(?show_delay, "show delay out of range; timer not armed"),
            }
        }

        let deadline = state.pending_show_deadline;
        match deadline {
            Some(deadline) if deadline <= now => {
                state.pending_show_deadline = None;
                self.shown_on = Some(screen.id);
                debug!(screen = %screen.id, "show requested");
                Some(EdgeIntent::ShowRequested(screen))
            }
            _ => None,
        }
    }

    fn retreat(&mut self) -> Option<EdgeIntent> {
        let had_pending = self
            .states
            .values()
            .any(|state| state.pending_show_deadline.is_some());
        let was_shown = self.shown_on.take().is_some();

        self.cancel_all();

        if had_pending || was_shown {
            debug!(had_pending, was_shown, "hide requested");
            Some(EdgeIntent::HideRequested)
        } else {
            None
        }
    }

    /// Creates state for new screens and drops state for disconnected ones.
    ///
    /// Losing the screen the shelf is shown on requests a hide.
    fn sync_screens(&mut self, screens: &[Screen]) -> Option<EdgeIntent> {
        let edge = self.tuning.edge;
        for screen in screens {
            self.states.entry(screen.id).or_insert(EdgeState {
                edge,
                pending_show_deadline: None,
            });
        }
        self.states
            .retain(|id, _| screens.iter().any(|screen| screen.id == *id));

        match self.shown_on {
            Some(id) if !self.states.contains_key(&id) => {
                debug!(screen = %id, "shown screen disconnected");
                self.shown_on = None;
                Some(EdgeIntent::HideRequested)
            }
            _ => None,
        }
    }

    fn state_mut(&mut self, screen: ScreenId) -> &mut EdgeState {
        let edge = self.tuning.edge;
        self.states.entry(screen).or_insert(EdgeState {
            edge,
            pending_show_deadline: None,
        })
    }
}
