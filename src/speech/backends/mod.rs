//! Engine bindings producing `VoiceBinding`s

// Platform TTS engine via the tts crate
pub mod native;
