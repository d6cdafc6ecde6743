//! Kernel utilities shared by the workspace binaries.
//! Keep this crate lightweight; it re-exports the domain crate and hosts the
//! layered configuration loader.
//!
//! ## Config loading
//! ```rust,no_run
//! use nf_kernel::config::load_config;
//! use nf_kernel::domain::config::SiteConfig;
//!
//! let cfg: SiteConfig = load_config(Some("config/local")).unwrap_or_default();
//! println!("{}", cfg.content.url());
//! ```

pub mod config;

pub use nf_domain as domain;
