//! Embedded language resources
//!
//! Resource files ship inside the binary and are parsed once on first access.

use super::types::LanguageResources;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

type Registry = HashMap<String, LanguageResources>;

/// Parsed registry, or the message of the first embedded file that failed
static LANGUAGE_RESOURCES: OnceLock<std::result::Result<Registry, String>> = OnceLock::new();

macro_rules! embed_language_resources {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

fn parse_embedded(code: &str, toml_content: &str) -> Result<LanguageResources> {
    let parsed = LanguageResources::from_toml_str(toml_content)
        .map_err(|e| Error::Configuration(format!("Failed to parse {code} resources: {e}")))?;

    if parsed.metadata.code != code {
        return Err(Error::Configuration(format!(
            "Resource code mismatch: expected {}, got {}",
            code, parsed.metadata.code
        )));
    }
    Ok(parsed)
}

fn load_embedded_resources() -> Result<Registry> {
    let embedded = [embed_language_resources!(
        "el",
        "../../configs/languages/greek.toml"
    )];

    embedded
        .into_iter()
        .map(|(code, toml_content)| -> Result<(String, LanguageResources)> {
            Ok((code.to_string(), parse_embedded(code, toml_content)?))
        })
        .collect()
}

fn registry() -> Result<&'static Registry> {
    LANGUAGE_RESOURCES
        .get_or_init(|| load_embedded_resources().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|message| {
            Error::Configuration(format!("Embedded language resources are unusable: {message}"))
        })
}

/// Look up the embedded resources for a language code
pub fn get_language_resources(code: &str) -> Result<&'static LanguageResources> {
    registry()?
        .get(code)
        .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
}

/// Codes of all embedded languages, sorted
pub fn list_available_languages() -> Vec<&'static str> {
    let registry = match registry() {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("{e}");
            return Vec::new();
        }
    };
    let mut codes: Vec<&'static str> = registry.keys().map(|s| s.as_str()).collect();
    codes.sort_unstable();
    codes
}
