use chrono::NaiveDate;

use super::lexicon::{
    DEMAND_COMMERCIAL, DEMAND_INFORMATIONAL, DEMAND_NAVIGATIONAL, DEMAND_TRANSACTIONAL,
    HIGH_INTENT, IRAN_CITIES, any_hit, count_hits,
};
use super::season::seasonal_multiplier;
use super::{char_len, is_persian_char, word_count};

pub const MIN_VOLUME: f64 = 1.0;
pub const MAX_VOLUME: f64 = 100.0;

/// User demand in [50, 100] from intent lexicon hits
pub fn user_demand(text: &str) -> f64 {
    let demand = 50
        + 15 * count_hits(text, DEMAND_COMMERCIAL)
        + 12 * count_hits(text, DEMAND_INFORMATIONAL)
        + 14 * count_hits(text, DEMAND_TRANSACTIONAL)
        + 8 * count_hits(text, DEMAND_NAVIGATIONAL);
    demand.min(100) as f64
}

/// Relative monthly search volume in [1, 100] for normalized `text` on `today`
pub fn estimate_search_volume(text: &str, today: NaiveDate) -> u8 {
    let length = char_len(text);
    let mut volume = 40.0 + user_demand(text) / 100.0 * 30.0;

    volume += match length {
        0 | 1 => 35.0,
        2 => 32.0,
        3..=4 => 25.0,
        5..=6 => 15.0,
        7..=10 => 8.0,
        11..=15 => 2.0,
        _ => -3.0,
    };

    volume += match word_count(text) {
        0 | 1 => 20.0,
        2 => 10.0,
        3 => 2.0,
        _ => -8.0,
    };

    volume *= seasonal_multiplier(text, today);

    // local queries trade national volume for local intent
    if any_hit(text, IRAN_CITIES) {
        volume *= 0.8;
    }

    if length > 0 {
        let persian = text.chars().filter(|c| is_persian_char(*c)).count();
        let ratio = persian as f64 / length as f64;
        if ratio > 0.9 {
            volume += 5.0;
        }
        if ratio < 0.3 {
            volume -= 10.0;
        }
    }

    if text.ends_with("ها") {
        volume *= 0.95;
    }
    if text.contains("تر") {
        volume *= 0.92;
    }

    volume += 8.0 * count_hits(text, HIGH_INTENT) as f64;

    volume.clamp(MIN_VOLUME, MAX_VOLUME).round() as u8
}
