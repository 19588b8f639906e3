//! Native engine binding using the tts crate
//!
//! The `tts` crate fronts the platform engine:
//! - Speech Dispatcher on Linux
//! - AVFoundation on macOS/iOS
//! - WinRT/SAPI on Windows
//!
//! Registering a voice selects it on the shared engine instance; the handle
//! is the voice's 1-based position in the engine's voice list. Unregistering
//! puts the engine back on the voice it started with. The engine speaks with
//! one voice at a time, so only single-mode catalogs can be filled from it.

use crate::speech::{EngineHandle, Locale, RegistrationMode, VoiceBinding, VoiceCatalog};
use crate::{Result, VoxError};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use tts::Tts as TtsCrate;

/// An installed voice as reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeVoice {
    /// Language and country from the voice's language tag. The variant is
    /// empty for the first voice of each language/country pair and the
    /// voice name for the others.
    pub locale: Locale,
    /// Engine-specific voice identifier
    pub id: String,
    /// Human readable name
    pub name: String,
}

/// Shared handle on the platform TTS engine
pub struct NativeEngine {
    tts: Rc<RefCell<TtsCrate>>,

    /// Voice the engine was using before we touched it
    default_voice: Option<tts::Voice>,
}

impl NativeEngine {
    /// Connect to the platform engine
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS engine");

        let tts = TtsCrate::default()
            .map_err(|e| VoxError::Engine(format!("Failed to initialize TTS: {}", e)))?;

        if !tts.supported_features().voice {
            return Err(VoxError::Engine(
                "Voice selection not supported on this platform".to_string(),
            ));
        }

        let default_voice = tts.voice().ok().flatten();
        debug!("Engine default voice: {:?}", default_voice);

        Ok(Self {
            tts: Rc::new(RefCell::new(tts)),
            default_voice,
        })
    }

    /// List installed voices in engine order
    pub fn voices(&self) -> Result<Vec<NativeVoice>> {
        let voices = self
            .tts
            .borrow()
            .voices()
            .map_err(|e| VoxError::Engine(format!("Failed to get voices: {}", e)))?;

        let mut seen = HashSet::new();
        Ok(voices
            .iter()
            .map(|v| NativeVoice {
                locale: native_locale(v.language().as_str(), &v.name(), &mut seen),
                id: v.id(),
                name: v.name(),
            })
            .collect())
    }

    /// Binding that loads `voice` into this engine
    pub fn binding(&self, voice: &NativeVoice) -> NativeBinding {
        NativeBinding {
            tts: Rc::clone(&self.tts),
            id: voice.id.clone(),
            default_voice: self.default_voice.clone(),
        }
    }

    /// Add installed voices to `catalog`, optionally keeping only `languages`
    ///
    /// Returns how many voices were offered to the catalog; anything past its
    /// capacity is dropped by the catalog itself. Eager catalogs are refused:
    /// registering every voice on one engine leaves only the last one active.
    pub fn fill_catalog(&self, catalog: &mut VoiceCatalog, languages: &[String]) -> Result<usize> {
        require_single_mode(catalog.mode())?;
        let mut offered = 0;

        for voice in self.voices()? {
            if !languages.is_empty() && !languages.contains(&voice.locale.language) {
                debug!("Skipping voice {} (language filtered)", voice.locale);
                continue;
            }

            let binding = self.binding(&voice);
            let Locale {
                language,
                country,
                variant,
            } = &voice.locale;
            catalog.add_voice(language, country, variant, Box::new(binding));
            offered += 1;
        }

        info!(
            "Offered {} engine voices to catalog ({} accepted)",
            offered,
            catalog.len()
        );
        Ok(offered)
    }
}

/// The native engine holds a single active voice
fn require_single_mode(mode: RegistrationMode) -> Result<()> {
    match mode {
        RegistrationMode::Single => Ok(()),
        RegistrationMode::Eager => Err(VoxError::Engine(
            "Native engine holds one voice at a time; use registration_mode = single".to_string(),
        )),
    }
}

/// Map an engine language tag and voice name onto a locale triple
///
/// `seen` tracks language/country pairs already handed out, so the first
/// voice for `en-US` answers to plain `en_US` and later ones need their name.
fn native_locale(tag: &str, name: &str, seen: &mut HashSet<(String, String)>) -> Locale {
    let mut locale = tag
        .parse::<Locale>()
        .unwrap_or_else(|_| Locale::new(tag, "", ""));

    let pair = (locale.language.clone(), locale.country.clone());
    locale.variant = if seen.insert(pair) {
        String::new()
    } else {
        name.to_string()
    };
    locale
}

/// `VoiceBinding` selecting one voice on the shared engine
pub struct NativeBinding {
    tts: Rc<RefCell<TtsCrate>>,
    id: String,
    default_voice: Option<tts::Voice>,
}

impl VoiceBinding for NativeBinding {
    fn register(&mut self, voxdir: &Path) -> Option<EngineHandle> {
        // The platform engine owns its voice data; voxdir is informational
        debug!("Registering native voice {} (voxdir {:?})", self.id, voxdir);

        let mut tts = self.tts.borrow_mut();
        let voices = match tts.voices() {
            Ok(voices) => voices,
            Err(e) => {
                error!("Failed to get voices: {}", e);
                return None;
            }
        };

        let Some((idx, voice)) = voices.iter().enumerate().find(|(_, v)| v.id() == self.id)
        else {
            error!("Voice {} is no longer installed", self.id);
            return None;
        };

        if let Err(e) = tts.set_voice(voice) {
            error!("Failed to set voice {}: {}", self.id, e);
            return None;
        }

        EngineHandle::new(idx + 1)
    }

    fn unregister(&mut self, handle: EngineHandle) {
        debug!("Unregistering native voice {} ({})", self.id, handle);

        let Some(default) = &self.default_voice else {
            return;
        };

        if let Err(e) = self.tts.borrow_mut().set_voice(default) {
            warn!("Failed to restore default voice: {}", e);
        }
    }
}
