//! # mural-infra
//!
//! Infrastructure adapters for Mural's image store: the SQLite session
//! database, the filesystem folder store, the remembered folder binding,
//! the native directory picker, and format sniffing.

pub mod db;
pub mod fs;
pub mod media;
pub mod time;

pub use media::ImageMediaProbe;
pub use time::SystemClock;
