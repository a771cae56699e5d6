pub mod charset;
pub mod config;
pub mod error;
pub mod export;
pub mod html;
pub mod loader;
pub mod models;
pub mod render;
pub mod table;
pub mod toggle;
pub mod viewer;

pub use config::Config;
pub use error::{ExportError, LoadError};
pub use export::{ExportTrigger, GridRasterizer, Rasterizer};
pub use loader::{DataLoader, Source};
pub use models::*;
pub use render::{Cell, RenderedRow, RenderedTable, RowKind, render};
pub use table::TableModel;
pub use toggle::LanguageToggle;
pub use viewer::Viewer;
