//! # Domain Models
//!
//! Pure data for the site content loader: the [`content::ContentDocument`] model,
//! the built-in [`fallback`] values consumers substitute for absent fields, and
//! the configuration types.
//! Keep it lean: no I/O, networking, or async, just data and simple helpers.

pub mod config;
pub mod constants;
pub mod content;
pub mod fallback;
mod lenient;
