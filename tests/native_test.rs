//! Integration tests for the native engine binding
//!
//! These need a working platform TTS engine. Hosts without one (CI,
//! headless containers) skip the checks instead of failing.

use voxcat::speech::backends::native::NativeEngine;
use voxcat::{RegistrationMode, VoiceCatalog};

#[test]
fn test_fill_single_mode_catalog() {
    let engine = match NativeEngine::new() {
        Ok(engine) => engine,
        Err(e) => {
            println!("⚠ Skipping native catalog test (TTS not available): {}", e);
            return;
        }
    };

    let mut catalog = VoiceCatalog::new(4, RegistrationMode::Single, "/tmp");
    match engine.fill_catalog(&mut catalog, &[]) {
        Ok(offered) => {
            assert_eq!(catalog.len(), offered.min(4));
            assert!(catalog.voices().filter(|v| v.is_registered()).count() <= 1);
            println!("✓ Catalog filled with {} native voices", catalog.len());
        }
        Err(e) => println!("⚠ Voice listing failed (may be expected): {}", e),
    }
}

#[test]
fn test_language_filter() {
    let Ok(engine) = NativeEngine::new() else {
        println!("⚠ Skipping language filter test (TTS not available)");
        return;
    };

    let mut catalog = VoiceCatalog::new(64, RegistrationMode::Single, "/tmp");
    if engine
        .fill_catalog(&mut catalog, &["zz".to_string()])
        .is_ok()
    {
        assert!(catalog.is_empty());
        assert!(catalog.get_current_voice().is_none());
    }
}
