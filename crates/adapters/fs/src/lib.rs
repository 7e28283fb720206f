//! # roomconf-adapter-fs
//!
//! Filesystem adapter.
//!
//! ## Responsibilities
//! - Implement `SectionSource` by reading a JSON file of split sections
//! - Implement `ConfigurationSink` by writing the compiled document to disk
//!   (`room_configuration.json` by default)
//!
//! ## Dependency rule
//! Depends on `roomconf-app` (for port traits) and `roomconf-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod sink;
mod source;

pub use error::FsError;
pub use sink::{DEFAULT_FILE_NAME, JsonFileSink};
pub use source::JsonFileSource;
