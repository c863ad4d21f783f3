use super::AppConfig;
use crate::types::Edge;
use std::time::Duration;

/// Edge detection parameters passed to the edge trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerTuning {
    pub edge: Edge,
    /// Depth from the edge that arms the show timer.
    pub trigger_band: f64,
    /// Depth from the edge past which the panel hides immediately.
    pub retreat_depth: f64,
    pub show_delay: Duration,
}

impl From<&AppConfig> for TriggerTuning {
    fn from(config: &AppConfig) -> Self {
        Self {
            edge: config.trigger.edge,
            trigger_band: config.trigger.trigger_band_px,
            retreat_depth: config.panel.width_px + config.trigger.retreat_margin_px,
            show_delay: Duration::from_millis(config.trigger.show_delay_ms),
        }
    }
}

/// Panel placement and animation parameters passed to the panel controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelLayout {
    pub edge: Edge,
    pub width: f64,
    pub bottom_margin: f64,
    pub animation: Duration,
}

impl From<&AppConfig> for PanelLayout {
    fn from(config: &AppConfig) -> Self {
        Self {
            edge: config.trigger.edge,
            width: config.panel.width_px,
            bottom_margin: config.panel.bottom_margin_px,
            animation: Duration::from_millis(config.panel.animation_ms),
        }
    }
}
