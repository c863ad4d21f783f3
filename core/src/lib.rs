pub mod edge;
pub mod locator;
pub mod logging;
pub mod panel;
pub mod runtime;
pub mod settings;
pub mod store;
pub mod types;

pub use edge::{EdgeIntent, EdgeTrigger};
pub use locator::{CanonicalPathCodec, LocatorCodec, Resolution};
pub use panel::{PanelController, PanelVisibility, SystemOpener};
pub use runtime::{ContextMenu, Host, MenuItem, ShelfEvent, ShelfRuntime};
pub use settings::SettingsStore;
pub use store::ReferenceStore;
