//! Utility functions and shared configuration.
//!
//! ## Modules
//!
//! - [`collate`] - Locale-aware, case-insensitive title ordering
//! - [`config`] - Site configuration (`lexis.json`)
//!
//! ```no_run
//! use lexis::utils::compare;
//! use std::cmp::Ordering;
//!
//! assert_eq!(compare("apple", "Banana"), Ordering::Less);
//! ```

pub mod collate;
pub mod config;

pub use collate::*;
pub use config::*;
