//! Plain-text rendering of reports, keyword metrics and the session history

use std::fmt::Write;

use seokit_core::{FindingCategory, History, HistoryEntry, KeywordMetrics, SeoReport};

const DIVIDER: &str = "─────────────────────────────────────────────────────────────";
const LABEL_WIDTH: usize = 16;

fn push_section_header(buf: &mut String, icon: &str, title: &str) {
    let _ = writeln!(buf, "{DIVIDER}");
    let _ = writeln!(buf, "{icon} {title}");
    let _ = writeln!(buf, "{DIVIDER}");
}

fn push_key_value(buf: &mut String, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let _ = writeln!(buf, "• {:<width$} : {}", label, value, width = LABEL_WIDTH);
}

pub fn render_entry(entry: &HistoryEntry) -> String {
    match entry {
        HistoryEntry::Page { report, .. } => render_report(report),
        HistoryEntry::Keyword { metrics, .. } => render_keyword(metrics),
    }
}

pub fn render_report(report: &SeoReport) -> String {
    let mut buf = String::new();
    push_section_header(&mut buf, "🔍", "SEO Report");
    push_key_value(&mut buf, "URL", &report.url);
    push_key_value(&mut buf, "Checked at", &report.timestamp_local);
    let grade = report.grade();
    push_key_value(
        &mut buf,
        "Score",
        &format!("{}/100 ({} / {})", report.score, grade.label_en(), grade.label_fa()),
    );
    push_key_value(
        &mut buf,
        "Findings",
        &format!(
            "{} issues, {} warnings, {} passed",
            report.issue_count(),
            report.warning_count(),
            report.success_count()
        ),
    );

    for (category, icon, title) in [
        (FindingCategory::Issue, "❌", "Issues"),
        (FindingCategory::Warning, "⚠️", "Warnings"),
        (FindingCategory::Success, "✅", "Passed"),
    ] {
        let findings: Vec<_> = report.findings_in(category).collect();
        if findings.is_empty() {
            continue;
        }
        buf.push('\n');
        push_section_header(&mut buf, icon, &format!("{title} ({})", findings.len()));
        for finding in findings {
            let _ = writeln!(buf, "• {}: {}", finding.title, finding.message);
        }
    }

    if let (Some(da), Some(pa)) = (report.domain_authority, report.page_authority) {
        buf.push('\n');
        push_section_header(&mut buf, "📈", "Authority");
        push_key_value(&mut buf, "Domain Authority", &format!("{da}/100"));
        push_key_value(&mut buf, "Page Authority", &format!("{pa}/100"));
        if let Some(backlinks) = report.backlinks {
            push_key_value(&mut buf, "Backlinks", &backlinks.to_string());
        }
    }

    buf
}

pub fn render_keyword(metrics: &KeywordMetrics) -> String {
    let mut buf = String::new();
    push_section_header(&mut buf, "🔑", "Keyword");
    push_key_value(&mut buf, "Keyword", &metrics.normalized_keyword);
    push_key_value(
        &mut buf,
        "Language",
        if metrics.is_persian { "Persian" } else { "Other" },
    );

    let volume = metrics.volume_level();
    push_key_value(
        &mut buf,
        "Search volume",
        &format!(
            "{}/100 ({} / {})",
            metrics.search_volume,
            volume.label_en(),
            volume.label_fa()
        ),
    );

    let difficulty = metrics.difficulty_level();
    push_key_value(
        &mut buf,
        "Difficulty",
        &format!(
            "{}/100 {} ({} / {})",
            metrics.difficulty,
            difficulty.icon(),
            difficulty.label_en(),
            difficulty.label_fa()
        ),
    );
    push_key_value(&mut buf, "Opportunity", &format!("{:.1}", metrics.opportunity));
    push_key_value(&mut buf, "Data source", &metrics.data_source);
    buf
}

/// One line per entry, newest first
pub fn render_history(history: &History<HistoryEntry>) -> String {
    let mut buf = String::new();
    push_section_header(&mut buf, "🕘", &format!("History ({})", history.len()));
    if history.is_empty() {
        let _ = writeln!(buf, "(empty)");
        return buf;
    }
    for (index, entry) in history.iter().enumerate() {
        let summary = match entry {
            HistoryEntry::Page { report, .. } => format!("page     score {}/100", report.score),
            HistoryEntry::Keyword { metrics, .. } => format!(
                "keyword  volume {} difficulty {}",
                metrics.search_volume, metrics.difficulty
            ),
        };
        let _ = writeln!(buf, "{:>2}. {summary}  {}", index + 1, entry.input());
    }
    buf
}
