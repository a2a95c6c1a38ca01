//! # mural-app
//!
//! Use cases and the session persistence controller for Mural's image
//! store: load/save orchestration, batched hydration, upload ingestion,
//! garbage-collection side effects, and the single-slot remote calls.

pub mod controller;
pub mod folder;
pub mod generation;
pub mod library;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::SessionController;
pub use folder::FolderPersistence;
pub use library::ImageLibrary;
