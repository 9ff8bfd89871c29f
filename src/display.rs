use crate::history::{ConversationRecord, UsageStats, UNKNOWN_BRAND};
use crate::knowledge::KnowledgeBase;
use crate::theme::Theme;
use std::fmt::Write;

#[derive(Debug, PartialEq)]
enum LineKind {
    Urgent,
    Header,
    Heading,
    Code,
    Step,
    Plain,
}

fn classify(line: &str) -> LineKind {
    if line.starts_with('🚨') {
        LineKind::Urgent
    } else if line.starts_with('🤖') {
        LineKind::Header
    } else if line.starts_with("**") || line.starts_with('📞') {
        LineKind::Heading
    } else if line.starts_with("- `") {
        LineKind::Code
    } else if line
        .split_once(". ")
        .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    {
        LineKind::Step
    } else {
        LineKind::Plain
    }
}

/// Renders a composed response for the terminal: markdown emphasis markers
/// are dropped and each line is styled after what it holds.
pub fn render_response(response: &str, theme: &Theme) -> String {
    let mut out = String::new();
    for line in response.lines() {
        let text = line.replace("**", "").replace('`', "");
        let styled = match classify(line) {
            LineKind::Urgent => theme.urgent.apply(&text),
            LineKind::Header => theme.header.apply(&text),
            LineKind::Heading => theme.heading.apply(&text),
            LineKind::Code => theme.code.apply(&text),
            LineKind::Step => theme.step.apply(&text),
            LineKind::Plain => text.as_str().into(),
        };
        let _ = writeln!(out, "{}", styled);
    }
    out
}

pub fn render_brands(kb: &KnowledgeBase, theme: &Theme) -> String {
    let mut out = String::new();
    for brand in kb.brands() {
        let _ = writeln!(
            out,
            "{} {}",
            theme.heading.apply(&brand.name),
            theme.muted.apply(&format!("({} codes)", brand.codes.len()))
        );
        for model in &brand.models {
            let _ = writeln!(out, "  • {}", model);
        }
    }
    out
}

pub fn render_history(records: &[ConversationRecord], theme: &Theme, show_timestamps: bool) -> String {
    if records.is_empty() {
        return format!("{}\n", theme.muted.apply("No conversations yet"));
    }

    let mut out = String::new();
    for record in records {
        let status = if record.solved { "✔" } else { " " };
        let brand = record.brand.as_deref().unwrap_or("-");
        let when = if show_timestamps {
            format!("{} ", record.timestamp.format("%Y-%m-%d %H:%M"))
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{} [{}] {}{} {}",
            theme.code.apply(&format!("#{}", record.id)),
            status,
            theme.muted.apply(&when),
            theme.heading.apply(brand),
            record.user_message
        );
    }
    out
}

pub fn render_stats(stats: &UsageStats, theme: &Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", theme.header.apply("Usage statistics"));
    let _ = writeln!(out, "Conversations: {}", stats.total);
    let _ = writeln!(
        out,
        "Solved:        {} ({:.0}%)",
        stats.solved,
        stats.solve_rate * 100.0
    );

    if !stats.by_brand.is_empty() {
        let _ = writeln!(out, "\n{}", theme.heading.apply("By brand"));
        for (brand, count) in &stats.by_brand {
            let label = if brand == UNKNOWN_BRAND { "(none)" } else { brand };
            let _ = writeln!(out, "  {:<14} {}", label, count);
        }
    }
    if !stats.by_issue.is_empty() {
        let _ = writeln!(out, "\n{}", theme.heading.apply("By issue"));
        for (issue, count) in &stats.by_issue {
            let _ = writeln!(out, "  {:<14} {}", issue, count);
        }
    }
    out
}
