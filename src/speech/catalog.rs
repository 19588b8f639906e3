//! Fixed-capacity catalog of engine voices
//!
//! The catalog owns every `Voice` added to it and decides when each one is
//! registered with the engine, according to its `RegistrationMode`:
//!
//! - `Eager`: voices register as they are added and stay registered until
//!   the catalog is dropped. Selecting a voice only moves the selection.
//! - `Single`: at most one voice is registered at a time, and it is always
//!   the current one. Selecting another voice swaps registrations.

use super::binding::{EngineHandle, FnBinding, VoiceBinding};
use super::locale::Locale;
use super::voice::Voice;
use crate::VoxError;
use log::{debug, error, info};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// When voices get registered with the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationMode {
    /// Every voice is registered at add time and stays registered
    Eager,
    /// At most one voice registered, swapped on selection
    Single,
}

impl FromStr for RegistrationMode {
    type Err = VoxError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "eager" => Ok(RegistrationMode::Eager),
            "single" | "one" => Ok(RegistrationMode::Single),
            other => Err(VoxError::Config(format!(
                "Unknown registration mode {:?} (expected \"single\" or \"all\")",
                other
            ))),
        }
    }
}

impl fmt::Display for RegistrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationMode::Eager => f.write_str("all"),
            RegistrationMode::Single => f.write_str("single"),
        }
    }
}

/// Ordered, fixed-capacity set of voices with a current selection
pub struct VoiceCatalog {
    /// Voices in insertion order, never more than `max_count`
    entries: Vec<Voice>,

    max_count: usize,

    mode: RegistrationMode,

    /// Index into `entries` of the selected voice
    current: Option<usize>,

    /// Voice data directory handed to every registration
    voxdir: PathBuf,
}

impl VoiceCatalog {
    /// Create an empty catalog holding at most `max_count` voices
    pub fn new(max_count: usize, mode: RegistrationMode, voxdir: impl Into<PathBuf>) -> Self {
        let voxdir = voxdir.into();
        debug!(
            "Creating voice catalog (capacity {}, mode {}, voxdir {:?})",
            max_count, mode, voxdir
        );

        Self {
            entries: Vec::with_capacity(max_count),
            max_count,
            mode,
            current: None,
            voxdir,
        }
    }

    /// Add a voice backed by `binding`
    ///
    /// Dropped with an error log if the catalog is full. In eager mode the
    /// voice is registered right away. The first voice added while nothing
    /// is selected becomes the current voice.
    pub fn add_voice(
        &mut self,
        language: &str,
        country: &str,
        variant: &str,
        binding: Box<dyn VoiceBinding>,
    ) {
        let locale = Locale::new(language, country, variant);
        debug!("Adding voice {}", locale);

        if self.is_full() {
            error!(
                "Could not add voice {}: catalog full ({} voices)",
                locale, self.max_count
            );
            return;
        }

        let mut voice = Voice::new(locale, binding);
        if self.mode == RegistrationMode::Eager {
            voice.register(&self.voxdir);
        }
        self.entries.push(voice);

        // Default selection, registering it if the mode calls for it
        if self.current.is_none() {
            self.get_voice_for_locale(language, country, variant);
        }
    }

    /// Add a voice from a register/unregister closure pair
    pub fn add_voice_with<R, U>(
        &mut self,
        language: &str,
        country: &str,
        variant: &str,
        register: R,
        unregister: U,
    ) where
        R: FnMut(&Path) -> Option<EngineHandle> + 'static,
        U: FnMut(EngineHandle) + 'static,
    {
        let binding = FnBinding::new(register, unregister);
        self.add_voice(language, country, variant, Box::new(binding));
    }

    /// Whether some voice has exactly this locale, registered or not
    pub fn is_locale_available(&self, language: &str, country: &str, variant: &str) -> bool {
        self.entries
            .iter()
            .any(|v| v.is_same_locale(language, country, variant))
    }

    pub fn is_available(&self, locale: &Locale) -> bool {
        self.is_locale_available(&locale.language, &locale.country, &locale.variant)
    }

    /// Select the first voice matching the locale and make sure it is registered
    ///
    /// When nothing matches the selection is cleared and `None` returned.
    pub fn get_voice_for_locale(
        &mut self,
        language: &str,
        country: &str,
        variant: &str,
    ) -> Option<&Voice> {
        let Some(idx) = self
            .entries
            .iter()
            .position(|v| v.is_same_locale(language, country, variant))
        else {
            info!(
                "No voice for locale {}",
                Locale::new(language, country, variant)
            );
            self.deselect();
            return None;
        };

        match self.mode {
            RegistrationMode::Eager => {
                self.current = Some(idx);
            }
            RegistrationMode::Single => {
                if self.current == Some(idx) {
                    debug!(
                        "Requested voice {} is already current",
                        self.entries[idx].locale()
                    );
                } else {
                    debug!("Swapping to voice {}", self.entries[idx].locale());
                    if let Some(prev) = self.current.take() {
                        self.entries[prev].unregister();
                    }
                    self.entries[idx].register(&self.voxdir);
                    self.current = Some(idx);
                }
            }
        }

        self.entries.get(idx)
    }

    pub fn get_voice_for(&mut self, locale: &Locale) -> Option<&Voice> {
        self.get_voice_for_locale(&locale.language, &locale.country, &locale.variant)
    }

    /// Currently selected voice, if any
    pub fn get_current_voice(&self) -> Option<&Voice> {
        self.current.and_then(|idx| self.entries.get(idx))
    }

    /// Clear the selection; in single mode the deselected voice is unloaded
    fn deselect(&mut self) {
        if let Some(prev) = self.current.take() {
            if self.mode == RegistrationMode::Single {
                self.entries[prev].unregister();
            }
        }
    }

    /// Voices in insertion order
    pub fn voices(&self) -> impl Iterator<Item = &Voice> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_count
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.max_count
    }

    pub fn mode(&self) -> RegistrationMode {
        self.mode
    }

    pub fn voxdir(&self) -> &Path {
        &self.voxdir
    }
}

impl Drop for VoiceCatalog {
    fn drop(&mut self) {
        info!("Dropping voice catalog ({} voices)", self.entries.len());
        self.current = None;
        // Each voice unregisters itself on drop
        self.entries.clear();
        debug!("Voice catalog dropped");
    }
}

impl fmt::Debug for VoiceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCatalog")
            .field("entries", &self.entries)
            .field("max_count", &self.max_count)
            .field("mode", &self.mode)
            .field("current", &self.current)
            .field("voxdir", &self.voxdir)
            .finish()
    }
}
