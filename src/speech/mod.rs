//! Voice catalog and engine bindings

pub mod backends;
pub mod binding;
pub mod catalog;
pub mod locale;
pub mod voice;

pub use binding::{EngineHandle, FnBinding, VoiceBinding};
pub use catalog::{RegistrationMode, VoiceCatalog};
pub use locale::Locale;
pub use voice::Voice;
