//! flip-ledger - expense and profit tracking for real-estate flip projects
//!
//! Users create projects (properties bought at auction), record expenses
//! against them by category, record a sale, and close the project. The
//! metrics engine in [`reports`] turns those records into per-project and
//! portfolio-wide figures.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (projects, expenses, categories, money)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `reports`: Per-project and portfolio metrics
//! - `audit`: Audit logging system
//! - `export`: JSON, YAML and CSV export
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use flip_ledger::config::paths::LedgerPaths;
//! use flip_ledger::reports::{FetchPolicy, PortfolioReport};
//! use flip_ledger::storage::Storage;
//!
//! let mut storage = Storage::new(LedgerPaths::new()?)?;
//! storage.load_all()?;
//! let report = PortfolioReport::generate(&storage, FetchPolicy::Strict)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
