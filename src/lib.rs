//! Coal plant layout viewer: plant documents in, renderable scene out.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
/// Primitive mapping and colors.
pub mod geometry;
pub mod io;
pub mod library;
/// Plant document schema, ingestion and drop notes.
pub mod model;
pub mod reporting;
pub mod scene;
pub mod session;
pub mod store;
#[cfg(feature = "tui")]
pub mod tui;
pub mod visibility;
