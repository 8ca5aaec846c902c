//! Configuration loading for the Statutory Entitlement Engine.
//!
//! This module loads the statutory limit table (the weekly pay cap and the
//! date each revision takes effect) from YAML files. The table is read-only
//! reference data handed to the calculators as a plain slice.
//!
//! # Example
//!
//! ```no_run
//! use entitlement_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/rps").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LimitRevision, SchemeMetadata, StatutoryLimits};
