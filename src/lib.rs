// Inventory dashboard client library.
// The terminal frontend lives behind the `tui` feature; the coordinator
// and gateway build without it so tests stay terminal-free.

pub mod app;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod model;

#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use app::{App, Tab};
pub use error::{GatewayError, Result};
pub use filters::FilterSelection;
pub use gateway::{Gateway, HttpGateway, ProductDraft, ProductUpdate, StockMovement};
pub use model::{Product, ReportSummary, StockStatus, LOW_STOCK_THRESHOLD};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
