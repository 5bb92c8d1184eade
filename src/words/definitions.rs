//! Definitions dictionary
//!
//! Embedded as `word|definition|definition...` lines.
//! Lookup is case-insensitive.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static DEFINITIONS_DATA: &str = include_str!("../../data/definitions.txt");

static DEFINITIONS: Lazy<HashMap<String, Vec<&'static str>>> = Lazy::new(|| {
    DEFINITIONS_DATA
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split('|').map(str::trim);
            let word = parts.next()?.to_lowercase();
            let defs: Vec<&'static str> = parts.filter(|d| !d.is_empty()).collect();
            (!defs.is_empty()).then_some((word, defs))
        })
        .collect()
});

/// Definitions for `word`, in dictionary order, if any exist.
pub fn define(word: &str) -> Option<&'static [&'static str]> {
    DEFINITIONS
        .get(word.trim().to_lowercase().as_str())
        .map(Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_known_word() {
        let defs = define("compass").unwrap();
        assert_eq!(defs.len(), 2);
        assert!(defs[0].contains("north"));
    }

    #[test]
    fn test_define_case_insensitive() {
        assert_eq!(define("Glacier"), define("glacier"));
        assert!(define("GLACIER").is_some());
    }

    #[test]
    fn test_define_unknown_word() {
        assert!(define("apple").is_none());
        assert!(define("").is_none());
    }
}
