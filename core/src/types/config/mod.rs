mod app;
mod core;
mod tuning;

pub use app::{AppConfig, AppConfigError, PanelConfig, StoreConfig, TriggerConfig};
pub use core::Config;
pub use tuning::{PanelLayout, TriggerTuning};
