//! On-page SEO checklist
//!
//! Every check is an independent function of the parsed document and yields
//! exactly one [`Finding`]. The order of [`CHECKS`] only affects presentation.

use chrono::Local;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::parser;
use crate::types::{Finding, SeoReport};

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const DESCRIPTION_MIN_CHARS: usize = 120;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const CONTENT_MIN_WORDS: usize = 300;
pub const CONTENT_MAX_WORDS: usize = 3000;

const PREVIEW_CHARS: usize = 50;

const TITLE_CHECK: &str = "عنوان صفحه (Title)";
const DESCRIPTION_CHECK: &str = "توضیح صفحه (Meta Description)";
const H1_CHECK: &str = "تگ H1";
const HEADINGS_CHECK: &str = "ساختار عناوین";
const IMAGES_CHECK: &str = "تصاویر (Alt Text)";
const VIEWPORT_CHECK: &str = "Viewport Meta Tag";
const CANONICAL_CHECK: &str = "Canonical Tag";
const OPEN_GRAPH_CHECK: &str = "Open Graph Tags";
const STRUCTURED_DATA_CHECK: &str = "Structured Data";
const CONTENT_CHECK: &str = "طول محتوا";
const LINKS_CHECK: &str = "لینک‌های داخلی";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css}: {e}"))
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static H1: Lazy<Selector> = Lazy::new(|| selector("h1"));
static H2: Lazy<Selector> = Lazy::new(|| selector("h2"));
static H3: Lazy<Selector> = Lazy::new(|| selector("h3"));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img"));
static VIEWPORT: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="viewport"]"#));
static CANONICAL: Lazy<Selector> = Lazy::new(|| selector(r#"link[rel="canonical"]"#));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:title"]"#));
static OG_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| selector(r#"meta[property="og:description"]"#));
static OG_IMAGE: Lazy<Selector> = Lazy::new(|| selector(r#"meta[property="og:image"]"#));
static LINKS: Lazy<Selector> = Lazy::new(|| selector("a[href]"));

/// A single page check
pub type Check = fn(&Html) -> Finding;

/// All checks, in presentation order
pub const CHECKS: &[Check] = &[
    check_title,
    check_meta_description,
    check_h1,
    check_heading_structure,
    check_image_alt,
    check_viewport,
    check_canonical,
    check_open_graph,
    check_structured_data,
    check_content_length,
    check_links,
];

/// Analyze a parsed document, stamping the report with the local time
pub fn analyze(document: &Html, url: &str) -> SeoReport {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    analyze_with_timestamp(document, url, timestamp)
}

/// Parse and analyze raw HTML
pub fn analyze_html(html: &str, url: &str) -> SeoReport {
    analyze(&parser::parse_document(html), url)
}

pub fn analyze_with_timestamp(document: &Html, url: &str, timestamp: String) -> SeoReport {
    let findings = run_checks(document);
    let report = SeoReport::from_findings(url.to_string(), timestamp, findings);
    tracing::debug!(
        url,
        score = report.score,
        issues = report.issue_count(),
        warnings = report.warning_count(),
        "page analyzed"
    );
    report
}

pub fn run_checks(document: &Html) -> Vec<Finding> {
    CHECKS.iter().map(|check| check(document)).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn count(document: &Html, selector: &Selector) -> usize {
    document.select(selector).count()
}

fn exists(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}

pub fn check_title(document: &Html) -> Finding {
    let title = document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let length = char_len(&title);

    if length == 0 {
        Finding::issue(TITLE_CHECK, "تگ title یافت نشد")
    } else if length < TITLE_MIN_CHARS {
        Finding::warning(
            TITLE_CHECK,
            format!("عنوان بسیار کوتاه است: {length} کاراکتر (توصیه: 50-60 کاراکتر)"),
        )
    } else if length > TITLE_MAX_CHARS {
        Finding::warning(
            TITLE_CHECK,
            format!("عنوان بسیار طویل است: {length} کاراکتر (توصیه: 50-60 کاراکتر)"),
        )
    } else {
        Finding::success(TITLE_CHECK, format!("✓ عنوان مناسب: \"{}\"", preview(&title)))
    }
}

pub fn check_meta_description(document: &Html) -> Finding {
    let description = document
        .select(&META_DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .unwrap_or_default();
    let length = char_len(description);

    if length == 0 {
        Finding::issue(DESCRIPTION_CHECK, "Meta Description یافت نشد")
    } else if length < DESCRIPTION_MIN_CHARS {
        Finding::warning(
            DESCRIPTION_CHECK,
            format!("توضیح بسیار کوتاه: {length} کاراکتر (توصیه: 150-160 کاراکتر)"),
        )
    } else if length > DESCRIPTION_MAX_CHARS {
        Finding::warning(
            DESCRIPTION_CHECK,
            format!("توضیح بسیار طویل: {length} کاراکتر (توصیه: 150-160 کاراکتر)"),
        )
    } else {
        Finding::success(DESCRIPTION_CHECK, "✓ Meta Description مناسب")
    }
}

pub fn check_h1(document: &Html) -> Finding {
    let headings: Vec<_> = document.select(&H1).collect();
    match headings.as_slice() {
        [] => Finding::issue(H1_CHECK, "تگ H1 یافت نشد"),
        [only] => {
            let text = only.text().collect::<String>();
            Finding::success(
                H1_CHECK,
                format!("✓ یک H1 پیدا شد: \"{}\"", preview(text.trim())),
            )
        }
        many => Finding::warning(
            H1_CHECK,
            format!("تعداد H1 بیش از حد: {} (توصیه: فقط 1 عدد)", many.len()),
        ),
    }
}

pub fn check_heading_structure(document: &Html) -> Finding {
    let h2 = count(document, &H2);
    let h3 = count(document, &H3);
    if h2 + h3 == 0 {
        Finding::warning(HEADINGS_CHECK, "هیچ H2 یا H3 یافت نشد")
    } else {
        Finding::success(HEADINGS_CHECK, format!("✓ {h2} H2 و {h3} H3 پیدا شد"))
    }
}

pub fn check_image_alt(document: &Html) -> Finding {
    let mut total = 0;
    let mut with_alt = 0;
    for img in document.select(&IMG) {
        total += 1;
        if img.value().attr("alt").is_some_and(|alt| !alt.is_empty()) {
            with_alt += 1;
        }
    }

    if total == 0 {
        Finding::success(IMAGES_CHECK, "هیچ تصویری در صفحه یافت نشد")
    } else if with_alt < total {
        Finding::warning(
            IMAGES_CHECK,
            format!("{} از {total} تصویر بدون Alt Text", total - with_alt),
        )
    } else {
        Finding::success(IMAGES_CHECK, format!("✓ تمام {total} تصویر دارای Alt Text"))
    }
}

pub fn check_viewport(document: &Html) -> Finding {
    if exists(document, &VIEWPORT) {
        Finding::success(VIEWPORT_CHECK, "✓ Viewport meta tag موجود است")
    } else {
        Finding::issue(
            VIEWPORT_CHECK,
            "Viewport meta tag یافت نشد (ضروری برای موبایل)",
        )
    }
}

pub fn check_canonical(document: &Html) -> Finding {
    match document.select(&CANONICAL).next() {
        Some(link) => Finding::success(
            CANONICAL_CHECK,
            format!(
                "✓ Canonical tag موجود: {}",
                link.value().attr("href").unwrap_or_default()
            ),
        ),
        None => Finding::warning(CANONICAL_CHECK, "Canonical tag یافت نشد"),
    }
}

pub fn check_open_graph(document: &Html) -> Finding {
    let complete = [&*OG_TITLE, &*OG_DESCRIPTION, &*OG_IMAGE]
        .into_iter()
        .all(|sel| exists(document, sel));
    if complete {
        Finding::success(OPEN_GRAPH_CHECK, "✓ Open Graph tags کامل")
    } else {
        Finding::warning(OPEN_GRAPH_CHECK, "Open Graph tags ناقص است")
    }
}

pub fn check_structured_data(document: &Html) -> Finding {
    // an empty script tag still counts as declared structured data
    let count = parser::json_ld_script_count(document);
    if count == 0 {
        return Finding::warning(
            STRUCTURED_DATA_CHECK,
            "هیچ Schema.org Structured Data یافت نشد",
        );
    }

    let types = parser::schema_types(&parser::json_ld_blocks(document));
    let mut message = format!("✓ {count} Schema.org Structured Data پیدا شد");
    if !types.is_empty() {
        message.push_str(&format!(" ({})", types.join(", ")));
    }
    Finding::success(STRUCTURED_DATA_CHECK, message)
}

pub fn check_content_length(document: &Html) -> Finding {
    let words = parser::word_count(&parser::visible_text(document));
    if words < CONTENT_MIN_WORDS {
        Finding::warning(
            CONTENT_CHECK,
            format!("محتوا بسیار کوتاه است: {words} کلمه (توصیه: حداقل 300 کلمه)"),
        )
    } else if words > CONTENT_MAX_WORDS {
        Finding::warning(CONTENT_CHECK, format!("محتوا بسیار طویل است: {words} کلمه"))
    } else {
        Finding::success(CONTENT_CHECK, format!("✓ محتوا مناسب: {words} کلمه"))
    }
}

pub fn check_links(document: &Html) -> Finding {
    let links = count(document, &LINKS);
    if links == 0 {
        Finding::warning(LINKS_CHECK, "هیچ لینک داخلی یافت نشد")
    } else {
        Finding::success(LINKS_CHECK, format!("✓ {links} لینک داخلی پیدا شد"))
    }
}
