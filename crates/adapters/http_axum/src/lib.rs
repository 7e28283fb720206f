//! # roomconf-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a small JSON API over the compiler:
//!   - `POST /api/compile`: compile split sections into a document
//!   - `POST /api/validate/devices`: device step only, name → type table
//!   - `POST /api/configuration`: compile and hand the document to the sink
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map validation failures into `422` responses carrying both the display
//!   lines and the structured records
//!
//! ## Dependency rule
//! Depends on `roomconf-app` (for port traits and services) and
//! `roomconf-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
