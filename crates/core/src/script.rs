//! Script detection used to decide when an answer should be pronounced.

/// Locale passed to the pronunciation service for Japanese text.
pub const JAPANESE_LOCALE: &str = "ja-JP";

const LATIN_EXTRAS: &str = "áéíóúÁÉÍÓÚüÜñÑ";

/// True when `text` contains a character outside ASCII and the accented Latin
/// letters used by the Spanish prompts.
#[must_use]
pub fn needs_pronunciation(text: &str) -> bool {
    text.chars()
        .any(|c| !c.is_ascii() && !LATIN_EXTRAS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kana_and_kanji_need_pronunciation() {
        assert!(needs_pronunciation("ねこ"));
        assert!(needs_pronunciation("カタカナ"));
        assert!(needs_pronunciation("猫"));
        assert!(needs_pronunciation("el 犬"));
    }

    #[test]
    fn latin_text_does_not() {
        assert!(!needs_pronunciation("perro"));
        assert!(!needs_pronunciation("Gramática y niño"));
        assert!(!needs_pronunciation("PINGÜINO"));
        assert!(!needs_pronunciation(""));
    }
}
