use std::fmt::Write;

use console::style;

use crate::extractor::Report;
use crate::extractor::model::{OgValue, OpenGraph};

const LABEL_WIDTH: usize = 18;

/// Human-readable multi-line summary of a report.
pub fn render_summary(report: &Report) -> String {
    let seo = &report.seo;
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", style("SEO report for").bold(), style(&report.url).cyan());
    let _ = writeln!(
        out,
        "{}",
        style(format!("captured {}", report.timestamp.to_rfc3339())).dim()
    );

    section(&mut out, "Basic");
    line(&mut out, "Title", optional_with_length(seo.basic.title.as_deref()));
    line(
        &mut out,
        "Description",
        optional_with_length(seo.basic.description.as_deref()),
    );
    line(&mut out, "Canonical", optional(seo.basic.canonical.as_deref()));
    line(&mut out, "Robots", optional(seo.basic.robots.as_deref()));
    line(&mut out, "Viewport", presence(seo.technical.has_viewport));
    line(&mut out, "Language", optional(seo.basic.language.as_deref()));

    section(&mut out, "Social & structured data");
    line(&mut out, "Open Graph tags", og_tag_count(&seo.open_graph).to_string());
    line(&mut out, "Twitter tags", seo.twitter.len().to_string());
    line(&mut out, "JSON-LD blocks", seo.schema.json_ld.len().to_string());
    line(
        &mut out,
        "Microdata items",
        seo.schema.microdata.values().map(Vec::len).sum::<usize>().to_string(),
    );

    section(&mut out, "Technical");
    line(&mut out, "HTML version", seo.technical.html_version.to_string());
    line(&mut out, "Charset", presence(seo.technical.has_charset));
    line(&mut out, "Canonical link", presence(seo.technical.has_canonical));

    let h = &seo.headings.counts;
    section(&mut out, "Content");
    line(
        &mut out,
        "Headings",
        format!(
            "H1 {} · H2 {} · H3 {} · H4 {} · H5 {} · H6 {}",
            h.h1, h.h2, h.h3, h.h4, h.h5, h.h6
        ),
    );
    let images = &seo.images.counts;
    line(
        &mut out,
        "Images",
        format!(
            "{} total, {} with alt, {} missing alt, {} lazy",
            images.total, images.with_alt, images.without_alt, images.lazy_loaded
        ),
    );
    let links = &seo.links.counts;
    line(
        &mut out,
        "Links",
        format!(
            "{} internal, {} external, {} nofollow",
            links.internal, links.external, links.nofollow
        ),
    );

    let weight = &seo.performance.estimated_page_weight;
    section(&mut out, "Size");
    line(&mut out, "HTML", format_bytes(weight.html));
    line(
        &mut out,
        "External (est.)",
        format_bytes(weight.estimated_external_resources),
    );
    line(&mut out, "Total (est.)", format_bytes(weight.total_estimated));

    if !report.failures.is_empty() {
        section(&mut out, "Warnings");
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "  {} {}: {}",
                style("!").yellow(),
                failure.category,
                failure.message
            );
        }
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", style(title).bold().underlined());
}

fn line(out: &mut String, label: &str, value: String) {
    let _ = writeln!(
        out,
        "  {:<width$} {}",
        format!("{label}:"),
        value,
        width = LABEL_WIDTH
    );
}

fn optional(value: Option<&str>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => style("(none)").dim().to_string(),
    }
}

fn optional_with_length(value: Option<&str>) -> String {
    match value {
        Some(value) => format!(
            "{} {}",
            value,
            style(format!("({} chars)", value.chars().count())).dim()
        ),
        None => style("(none)").red().to_string(),
    }
}

fn presence(present: bool) -> String {
    if present {
        style("yes").green().to_string()
    } else {
        style("no").red().to_string()
    }
}

/// Leaf values, so `{image: {width, height}}` counts as two tags.
fn og_tag_count(og: &OpenGraph) -> usize {
    og.values()
        .map(|value| match value {
            OgValue::Text(_) => 1,
            OgValue::Nested(children) => children.len(),
        })
        .sum()
}

fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;

    let value = bytes as f64;
    if value >= GB {
        format!("{:.1} GB", value / GB)
    } else if value >= MB {
        format!("{:.1} MB", value / MB)
    } else if value >= KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{bytes} B")
    }
}
