//! Locale triples identifying a voice
//!
//! A voice is keyed by (language, country, variant). All three parts are
//! opaque strings compared exactly; parsing only splits them apart.

use crate::{Result, VoxError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Accepts `en`, `en_US`, `en-US`, `en_US_male`, `en-US-male`.
/// The variant keeps everything after the second separator.
static LOCALE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z]{1,8})(?:[-_]([A-Za-z0-9]*))?(?:[-_](.+))?$")
        .expect("locale pattern is valid")
});

/// Composite (language, country, variant) key of a voice
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Locale {
    pub language: String,
    pub country: String,
    pub variant: String,
}

impl Locale {
    pub fn new(
        language: impl Into<String>,
        country: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            country: country.into(),
            variant: variant.into(),
        }
    }

    /// Exact, case-sensitive comparison against the three parts
    pub fn matches(&self, language: &str, country: &str, variant: &str) -> bool {
        self.language == language && self.country == country && self.variant == variant
    }
}

impl FromStr for Locale {
    type Err = VoxError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = LOCALE_RE
            .captures(s.trim())
            .ok_or_else(|| VoxError::InvalidLocale(s.to_string()))?;

        let part = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
        Ok(Locale::new(part(1), part(2), part(3)))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if !self.country.is_empty() || !self.variant.is_empty() {
            write!(f, "_{}", self.country)?;
        }
        if !self.variant.is_empty() {
            write!(f, "_{}", self.variant)?;
        }
        Ok(())
    }
}
