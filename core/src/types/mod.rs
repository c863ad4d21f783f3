pub(crate) mod config;
pub use config::{
    AppConfig, AppConfigError, Config, PanelConfig, PanelLayout, StoreConfig, TriggerConfig,
    TriggerTuning,
};

pub(crate) mod geometry;
pub use geometry::{Edge, Point, Rect, Screen, ScreenId, locate_screen};

pub(crate) mod bookmark;
pub use bookmark::Bookmark;

pub(crate) mod metadata;
pub use metadata::MaintenanceMetadata;

pub(crate) mod row;
pub use row::Row;
