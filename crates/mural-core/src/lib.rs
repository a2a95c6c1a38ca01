//! # mural-core
//!
//! Core domain models and business logic for Mural's local image store.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the image record table, the strip snapshot engine, the
//! referential-integrity sweep, the persistence-time cache window, and
//! the port traits the adapters implement.

pub mod ids;
pub mod image;
pub mod manifest;
pub mod persistence;
pub mod ports;

pub use ids::{ImageId, StripId, ToolId};
pub use image::{ImagePayload, ImageRecord, MimeType, RecordOrigin, ThumbnailStripsSnapshot};
pub use persistence::PersistedState;
