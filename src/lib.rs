//! voxcat - text-to-speech voice catalog
//!
//! Tracks which voices (language/country/variant) a speech engine offers and
//! which one is loaded into it. Voices register with the engine either all
//! up front or one at a time, swapped as locales are requested.

pub mod config;
pub mod error;
pub mod speech;

pub use error::{Result, VoxError};
pub use speech::{EngineHandle, Locale, RegistrationMode, Voice, VoiceBinding, VoiceCatalog};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voxcat";
