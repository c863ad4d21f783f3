//! Desktop geometry shared by the edge trigger and the panel controller.
//!
//! Coordinates are global desktop coordinates with the origin at the top-left
//! corner and y growing downward.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive on every side: a pointer resting on the last pixel column
    /// reports the boundary coordinate itself.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

/// Host-assigned display identifier, stable while the display stays connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(pub u32);

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "screen#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub id: ScreenId,
    /// Full display bounds.
    pub frame: Rect,
    /// Bounds minus the menu/task bar region.
    pub visible_frame: Rect,
}

impl Screen {
    /// Height reserved at the top of the display for the menu region.
    pub fn top_inset(&self) -> f64 {
        (self.visible_frame.min_y() - self.frame.min_y()).abs()
    }

    /// Distance of `point` from `edge`, measured inward.
    ///
    /// Zero or negative means the point sits on the edge itself.
    pub fn depth_from(&self, edge: Edge, point: Point) -> f64 {
        match edge {
            Edge::Left => point.x - self.frame.min_x(),
            Edge::Right => self.frame.max_x() - point.x,
        }
    }
}

/// The screen edge the shelf is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    #[default]
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
        }
    }
}

/// Finds the screen under `point`.
///
/// Screens are disjoint, but adjacent displays share a boundary coordinate.
/// When more than one screen contains the point, the one whose `edge` the
/// point is closest to wins, so a pointer parked on the shared boundary
/// counts as touching that screen's monitored edge.
pub fn locate_screen(screens: &[Screen], edge: Edge, point: Point) -> Option<&Screen> {
    screens
        .iter()
        .filter(|screen| screen.frame.contains(point))
        .min_by(|a, b| a.depth_from(edge, point).total_cmp(&b.depth_from(edge, point)))
}
