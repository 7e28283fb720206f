//! # roomconf-app
//!
//! Application layer: the section compilers, use-cases and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Compile split spreadsheet sections into a room configuration:
//!   - `compiler::Compiler`: runs device → group → scene → remote phases
//!     against one per-run device registry
//!   - `error_format`: the flat marker-text error transport
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SectionSource`: where split sections come from
//!   - `ConfigurationSink`: where the compiled document goes
//! - Define **driving/inbound ports** as use-case structs:
//!   - `ConfigurationService`: compile, serialize, submit
//!
//! ## Dependency rule
//! Depends on `roomconf-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod compiler;
pub mod error_format;
pub mod ports;
pub mod services;
