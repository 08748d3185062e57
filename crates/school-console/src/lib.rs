//! # school-console: App-Facing Layer for the School Console
//!
//! Wraps [`school_core`] with what a running console needs but the pure
//! kernel must not touch: a config file, environment overrides, log output,
//! and the UI's translator.
//!
//! ## Startup
//! ```rust,no_run
//! use school_console::{config::ConsoleConfig, telemetry, Catalog, Console};
//!
//! let config = ConsoleConfig::load_or_default(None);
//! telemetry::init_tracing(&config.logging);
//!
//! let catalog: Catalog = [("percentage", "Percentage"), ("fixedAmount", "Fixed Amount")]
//!     .into_iter()
//!     .collect();
//! let console = Console::new(config, catalog);
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod telemetry;

pub use config::ConsoleConfig;
pub use console::{Catalog, Console, DiscountSummary};
pub use error::{ConsoleError, ConsoleResult};
