use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{
    COMMERCIAL_TERMS, DEEP_CONTENT, ENGAGEMENT_TERMS, FRESHNESS_TERMS, GENERIC_TERMS,
    IRAN_CITIES, NEWNESS_TERMS, PREMIUM_BRANDS, SERP_FEATURES, any_hit, count_hits,
};
use super::{char_len, word_count};

pub const MIN_DIFFICULTY: i32 = 5;
pub const MAX_DIFFICULTY: i32 = 100;

/// ASCII, Arabic-Indic and Extended Arabic-Indic (Persian) digits
static DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9\x{0660}-\x{0669}\x{06F0}-\x{06F9}]").expect("valid digit regex"));

/// Ranking difficulty in [5, 100] for normalized `text`
pub fn estimate_difficulty(text: &str) -> u8 {
    let mut difficulty: i32 = 15;

    // shorter queries have more competitors
    difficulty += match char_len(text) {
        0 | 1 => 55,
        2 => 50,
        3..=4 => 40,
        5..=6 => 28,
        7..=10 => 15,
        11..=15 => 8,
        _ => 2,
    };

    difficulty += match word_count(text) {
        0 | 1 => 30,
        2 => 15,
        3 => 8,
        _ => -10,
    };

    difficulty += 18 * hits(text, PREMIUM_BRANDS);
    difficulty += 12 * hits(text, GENERIC_TERMS);
    difficulty += 10 * hits(text, DEEP_CONTENT);
    difficulty += 8 * hits(text, SERP_FEATURES);
    difficulty += 14 * hits(text, COMMERCIAL_TERMS);

    if any_hit(text, FRESHNESS_TERMS) {
        difficulty += 5;
    }
    if any_hit(text, IRAN_CITIES) {
        difficulty -= 15;
    }

    difficulty += 8 * hits(text, ENGAGEMENT_TERMS);

    // model numbers and sizes
    if DIGIT.is_match(text) {
        difficulty += 8;
    }
    if any_hit(text, NEWNESS_TERMS) {
        difficulty -= 5;
    }

    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY) as u8
}

fn hits(text: &str, terms: &[&str]) -> i32 {
    count_hits(text, terms) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commercial_query() {
        // 15 + 15 (length 9) + 15 (two words) + 8 (SERP) + 14 (commercial)
        assert_eq!(estimate_difficulty("خرید گوشی"), 67);
    }

    #[test]
    fn single_characters_are_hardest() {
        // 15 + 55 + 30
        assert_eq!(estimate_difficulty("a"), 100);
    }

    #[test]
    fn local_long_tail_is_easy() {
        let text = "رستوران سنتی خوب در شیراز برای شام";
        // 15 + 2 (long) - 10 (7 words) - 15 (city)
        assert_eq!(estimate_difficulty(text), 5);
    }

    #[test]
    fn digits_raise_difficulty() {
        // 15 + 2 (length 16) + 8 (three words) + 18 (brand) + 8 (digit)
        assert_eq!(estimate_difficulty("گوشی سامسونگ a54"), 51);
        assert!(estimate_difficulty("گوشی سامسونگ ۵۴") > estimate_difficulty("گوشی سامسونگ اس"));
        assert!(estimate_difficulty("گوشی سامسونگ ٥٤") > estimate_difficulty("گوشی سامسونگ اس"));
    }

    #[test]
    fn newness_lowers_difficulty() {
        // "جدید" hits SERP (+8), freshness (+5) and newness (-5)
        let base = estimate_difficulty("گوشی خوب");
        assert_eq!(estimate_difficulty("گوشی جدید"), base + 8);
    }

    #[test]
    fn stays_in_range() {
        let samples = ["", "خرید قیمت بهترین قیمت سامسونگ اپل بانک", "a b c d e f g h"];
        for text in samples {
            let difficulty = estimate_difficulty(text);
            assert!((5..=100).contains(&difficulty), "{text}: {difficulty}");
        }
    }
}
