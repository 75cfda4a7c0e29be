/*!
 * Tests for ISO language code utilities
 */

use prova::language_utils::{lexicon_for, normalize_to_part1, parse_language};

#[test]
fn test_normalizeToPart1_withThreeLetterCodes_shouldReturnTwoLetters() {
    assert_eq!(normalize_to_part1("ita").unwrap(), "it");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
    assert_eq!(normalize_to_part1("EN").unwrap(), "en");
}

#[test]
fn test_parseLanguage_withMixedForms_shouldResolveSameLanguage() {
    assert_eq!(parse_language("en").unwrap(), parse_language("eng").unwrap());
    assert!(parse_language("zz").is_err());
}

#[test]
fn test_lexiconFor_withUnsupportedLanguage_shouldListAvailable() {
    let error = lexicon_for("fr").unwrap_err().to_string();
    assert!(error.contains("it"));
    assert!(error.contains("en"));
}
