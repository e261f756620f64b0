//! Agent identifier rules.

use crate::error::WizardError;
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").expect("agent id pattern is valid"));

/// Coerce raw input into an identifier candidate.
///
/// ASCII uppercase is lowercased and every other character outside
/// `[a-z0-9-]` becomes a single `-`. The result may still be empty.
pub fn normalize_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Check an identifier against the creation guard.
pub fn validate_id(id: &str) -> Result<(), WizardError> {
    if id.trim().is_empty() {
        return Err(WizardError::IdRequired);
    }
    if !VALID_ID.is_match(id) {
        return Err(WizardError::InvalidId);
    }
    Ok(())
}
