pub mod config;
pub mod error;
pub mod source;
pub mod text;
pub mod types;

pub use config::NamiConfig;
pub use error::{NamiError, Result};
pub use source::{DocumentSource, UnavailableSource};
pub use types::{Document, LookupResult};
