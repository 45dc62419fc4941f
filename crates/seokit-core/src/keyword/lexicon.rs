//! Term lists driving the volume and difficulty heuristics.
//!
//! Every entry is already in normalized form (Farsi Yeh and Keheh), so plain
//! substring matching against normalized input is enough.

/// Buying intent; each hit adds 15 to demand
pub const DEMAND_COMMERCIAL: &[&str] = &[
    "خرید", "قیمت", "فروش", "سفارش", "فروشنده", "فروشگاه", "کیف", "پول", "پرداخت", "کارت",
];

/// Learning intent; each hit adds 12 to demand
pub const DEMAND_INFORMATIONAL: &[&str] = &[
    "آموزش", "نحوه", "چیست", "توضیح", "تعریف", "راهنما", "آشنایی", "معنی",
];

/// Action intent; each hit adds 14 to demand
pub const DEMAND_TRANSACTIONAL: &[&str] = &[
    "دانلود", "ثبت نام", "ورود", "رزرو", "حجز", "اپلیکیشن", "پلگین",
];

/// Looking for a specific place or site; each hit adds 8 to demand
pub const DEMAND_NAVIGATIONAL: &[&str] = &["رسمی", "سایت", "اپ", "شماره", "تماس", "آدرس"];

/// Strong search intent; each hit adds 8 to volume
pub const HIGH_INTENT: &[&str] = &["خرید", "قیمت", "آموزش", "نحوه", "بهترین"];

pub const IRAN_CITIES: &[&str] = &[
    "تهران", "اصفهان", "شیراز", "مشهد", "تبریز", "کرج", "قزوین", "رشت", "کیش", "قشم", "کرمانشاه",
    "اهواز",
];

/// Brands and institutions with strong competitors
pub const PREMIUM_BRANDS: &[&str] = &[
    "سامسونگ", "اپل", "ایسوس", "لنوو", "ایچ‌پی", "بانک", "شرکت", "دولتی", "رسمی",
];

/// Superlatives that draw high-authority listicles and directories
pub const GENERIC_TERMS: &[&str] = &["بهترین", "مشهور", "معروف", "پرطرفدار", "محبوب", "سفارش"];

pub const DEEP_CONTENT: &[&str] = &["آموزش", "راهنما", "نحوه", "گام به گام", "جامع", "کامل"];

/// Queries that trigger news, shopping or media SERP features
pub const SERP_FEATURES: &[&str] = &["خبر", "جدید", "امروز", "خرید", "قیمت", "تصویر", "ویدیو"];

pub const COMMERCIAL_TERMS: &[&str] = &[
    "خرید", "قیمت", "فروش", "سفارش", "کمترین قیمت", "بهترین قیمت",
];

pub const FRESHNESS_TERMS: &[&str] = &["خبر", "جدید", "امروز", "دیروز", "هفته", "ماه", "سال"];

pub const ENGAGEMENT_TERMS: &[&str] = &["بهترین", "مقایسه", "رتبه بندی", "نظر", "کامنت"];

/// Newness markers; fresh content has an edge
pub const NEWNESS_TERMS: &[&str] = &["جدید", "نوتر"];

/// Number of `terms` contained in `text`
pub fn count_hits(text: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|term| text.contains(*term)).count()
}

pub fn any_hit(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::normalize_persian;

    const ALL: &[&[&str]] = &[
        DEMAND_COMMERCIAL,
        DEMAND_INFORMATIONAL,
        DEMAND_TRANSACTIONAL,
        DEMAND_NAVIGATIONAL,
        HIGH_INTENT,
        IRAN_CITIES,
        PREMIUM_BRANDS,
        GENERIC_TERMS,
        DEEP_CONTENT,
        SERP_FEATURES,
        COMMERCIAL_TERMS,
        FRESHNESS_TERMS,
        ENGAGEMENT_TERMS,
        NEWNESS_TERMS,
    ];

    #[test]
    fn lexicons_are_normalized() {
        for list in ALL {
            for term in *list {
                assert_eq!(normalize_persian(term), *term, "{term} is not normalized");
            }
        }
    }

    #[test]
    fn counts_each_term_once() {
        assert_eq!(count_hits("خرید و قیمت خرید", DEMAND_COMMERCIAL), 2);
        assert_eq!(count_hits("hello", DEMAND_COMMERCIAL), 0);
        assert!(any_hit("کیش", IRAN_CITIES));
    }
}
