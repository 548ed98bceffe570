//! pin: applies base16/base24 color schemes to the config files of
//! registered applications.
//!
//! A pass loads one scheme, expands it into template variables, renders
//! every active app's mustache template against them and writes the result
//! into the app's target file, either replacing it or splicing it between
//! marker lines. Post-apply hooks run once every file is written.
//!
//! # Quick start
//!
//! ```no_run
//! use pin::apply::Applier;
//! use pin::catalog::Catalog;
//! use pin::config::load_config;
//!
//! # async fn example() {
//! let config = load_config(None).unwrap();
//! let theme = Catalog::new(config.clone()).find_theme("nord").unwrap();
//! let report = Applier::new(config).apply(&theme).await.unwrap();
//! println!("{} apps updated", report.updated_count());
//! # }
//! ```

pub mod apply;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod registry;
pub mod render;
pub mod scheme;
pub mod splice;
pub mod template;
#[cfg(test)]
pub mod testsupport;
pub mod variables;
