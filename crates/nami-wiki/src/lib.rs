//! Wikipedia-backed document source.
//!
//! Resolves search terms against the MediaWiki action API and retries a few
//! casing variants of the title before giving up.

pub mod client;
pub mod error;
pub mod variants;

pub use client::WikiSource;
pub use error::WikiError;
pub use variants::title_variants;
