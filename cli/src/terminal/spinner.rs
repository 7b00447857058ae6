use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICK_STRINGS)
}

/// A span that shows the spinner for as long as it is entered.
pub fn resolution_span(fact_sources: usize) -> Span {
    let span: Span = info_span!("resolution", indicatif.pb_show = true);
    span.pb_set_style(&style());
    span.pb_set_message(
        &format!(
            "Resolving hosts from {} fact sources...",
            fact_sources.to_string().green().bold()
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
    span
}
