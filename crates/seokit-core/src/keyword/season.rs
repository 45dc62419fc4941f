use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, FixedOffset, Local, NaiveDate, Utc};

/// Calendar window in which certain terms see extra searches.
///
/// Bounds are inclusive `(month, day)` pairs; a window whose end precedes
/// its start wraps over the new year.
#[derive(Debug, Clone, Copy)]
pub struct SeasonalWindow {
    pub name: &'static str,
    pub start: (u32, u32),
    pub end: (u32, u32),
    pub terms: &'static [&'static str],
    pub multiplier: f64,
}

impl SeasonalWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        let day = (date.month(), date.day());
        if self.start <= self.end {
            self.start <= day && day <= self.end
        } else {
            day >= self.start || day <= self.end
        }
    }

    pub fn applies_to(&self, text: &str, date: NaiveDate) -> bool {
        self.contains(date) && self.terms.iter().any(|term| text.contains(term))
    }
}

/// Checked in order; the first window matching both date and text wins
pub const SEASONAL_WINDOWS: &[SeasonalWindow] = &[
    SeasonalWindow {
        name: "nowruz",
        start: (2, 20),
        end: (3, 31),
        terms: &["نوروز", "سال", "هدیه"],
        multiplier: 2.5,
    },
    SeasonalWindow {
        name: "summer",
        start: (6, 1),
        end: (8, 31),
        terms: &["تابستان", "گردشگری", "سفر"],
        multiplier: 1.8,
    },
    SeasonalWindow {
        name: "back-to-school",
        start: (8, 1),
        end: (9, 30),
        terms: &["مدرسه", "تحصیل", "دانشگاه"],
        multiplier: 1.7,
    },
    SeasonalWindow {
        name: "year-end",
        start: (12, 1),
        end: (1, 31),
        terms: &["سال", "جشن", "تخفیف"],
        multiplier: 1.6,
    },
];

pub fn seasonal_multiplier(text: &str, date: NaiveDate) -> f64 {
    SEASONAL_WINDOWS
        .iter()
        .find(|window| window.applies_to(text, date))
        .map_or(1.0, |window| window.multiplier)
}

/// Where "today" comes from when picking a seasonal window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonClock {
    #[default]
    Local,
    Utc,
    Offset(FixedOffset),
}

impl SeasonClock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::Local => Local::now().date_naive(),
            Self::Utc => Utc::now().date_naive(),
            Self::Offset(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

impl fmt::Display for SeasonClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Utc => f.write_str("utc"),
            Self::Offset(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for SeasonClock {
    type Err = String;

    /// Accepts `local`, `utc` or an offset such as `+03:30`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Utc),
            _ => parse_offset(trimmed)
                .map(Self::Offset)
                .ok_or_else(|| format!("invalid timezone '{s}', expected local, utc or +HH:MM")),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn nowruz_window_bounds() {
        assert_eq!(seasonal_multiplier("هدیه نوروز", date(2, 19)), 1.0);
        assert_eq!(seasonal_multiplier("هدیه نوروز", date(2, 20)), 2.5);
        assert_eq!(seasonal_multiplier("هدیه نوروز", date(3, 31)), 2.5);
        assert_eq!(seasonal_multiplier("هدیه نوروز", date(4, 1)), 1.0);
    }

    #[test]
    fn year_end_wraps_over_january() {
        assert_eq!(seasonal_multiplier("جشن", date(12, 15)), 1.6);
        assert_eq!(seasonal_multiplier("جشن", date(1, 10)), 1.6);
        assert_eq!(seasonal_multiplier("جشن", date(2, 1)), 1.0);
    }

    #[test]
    fn first_matching_window_wins() {
        // August sits in both summer and back-to-school
        assert_eq!(seasonal_multiplier("سفر دانشگاه", date(8, 10)), 1.8);
        assert_eq!(seasonal_multiplier("دانشگاه", date(8, 10)), 1.7);
        assert_eq!(seasonal_multiplier("دانشگاه", date(9, 10)), 1.7);
    }

    #[test]
    fn unrelated_terms_get_no_boost() {
        assert_eq!(seasonal_multiplier("خرید گوشی", date(3, 1)), 1.0);
    }

    #[test]
    fn parses_clocks() {
        assert_eq!("local".parse::<SeasonClock>(), Ok(SeasonClock::Local));
        assert_eq!("UTC".parse::<SeasonClock>(), Ok(SeasonClock::Utc));
        assert_eq!(
            "+03:30".parse::<SeasonClock>(),
            Ok(SeasonClock::Offset(FixedOffset::east_opt(12_600).unwrap()))
        );
        assert_eq!(
            "-05".parse::<SeasonClock>(),
            Ok(SeasonClock::Offset(FixedOffset::west_opt(18_000).unwrap()))
        );
        assert!("tehran".parse::<SeasonClock>().is_err());
        assert!("+25:00".parse::<SeasonClock>().is_err());
    }

    #[test]
    fn clock_display_round_trips() {
        let clock: SeasonClock = "+03:30".parse().unwrap();
        assert_eq!(clock.to_string().parse::<SeasonClock>(), Ok(clock));
        assert_eq!(SeasonClock::Local.to_string(), "local");
    }
}
