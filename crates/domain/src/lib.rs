//! # roomconf-domain
//!
//! Pure domain model for the roomconf room-configuration compiler.
//!
//! ## Responsibilities
//! - Describe the **input**: spreadsheet sections already split into rows
//!   ([`section`])
//! - Define **Devices** and their kind-specific attributes ([`device`])
//! - Define **Groups**, **Scenes** and **Remote controls**, the entities that
//!   reference devices by name
//! - Define the per-run **device registry** used to resolve those references
//! - Define the compiled **document** handed to the control backend
//! - Contain all invariant enforcement and value parsing
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod section;

pub mod device;
pub mod document;
pub mod group;
pub mod registry;
pub mod remote;
pub mod scene;
pub mod target;
