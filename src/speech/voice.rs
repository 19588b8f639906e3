//! A single voice and its engine registration lifecycle

use super::binding::{EngineHandle, VoiceBinding};
use super::locale::Locale;
use log::{debug, info, warn};
use std::fmt;
use std::path::Path;

/// One (language, country, variant) voice plus its engine binding
///
/// The voice is registered with the engine while `handle` is `Some`.
/// Dropping a registered voice unregisters it first, so no engine
/// registration outlives the `Voice`.
pub struct Voice {
    locale: Locale,
    binding: Box<dyn VoiceBinding>,
    handle: Option<EngineHandle>,
}

impl Voice {
    /// Create an unregistered voice
    pub fn new(locale: Locale, binding: Box<dyn VoiceBinding>) -> Self {
        Self {
            locale,
            binding,
            handle: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.locale.language
    }

    pub fn country(&self) -> &str {
        &self.locale.country
    }

    pub fn variant(&self) -> &str {
        &self.locale.variant
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Exact match on all three locale parts
    pub fn is_same_locale(&self, language: &str, country: &str, variant: &str) -> bool {
        self.locale.matches(language, country, variant)
    }

    /// Engine handle, `Some` while registered
    pub fn handle(&self) -> Option<EngineHandle> {
        self.handle
    }

    pub fn is_registered(&self) -> bool {
        self.handle.is_some()
    }

    /// Register this voice with the engine
    ///
    /// Must not be called while already registered: the earlier handle is
    /// overwritten and never released.
    pub fn register(&mut self, voxdir: &Path) -> Option<EngineHandle> {
        if let Some(old) = self.handle {
            warn!(
                "Voice {} registered twice, dropping handle {}",
                self.locale, old
            );
        }

        debug!("Registering voice {} from {:?}", self.locale, voxdir);
        self.handle = self.binding.register(voxdir);
        match self.handle {
            Some(handle) => debug!("Voice {} registered as {}", self.locale, handle),
            None => info!("Engine returned no handle for voice {}", self.locale),
        }
        self.handle
    }

    /// Unregister from the engine; no-op if not registered
    pub fn unregister(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!("Unregistering voice {} ({})", self.locale, handle);
            self.binding.unregister(handle);
        }
    }
}

impl Drop for Voice {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl fmt::Debug for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Voice")
            .field("locale", &self.locale)
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}
