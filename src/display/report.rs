//! Report formatting utilities for terminal output
//!
//! Small text helpers shared by the summary views.

use crate::models::Money;

/// Describe a budget variance as under or over
pub fn format_variance(variance: Money) -> String {
    if variance.is_negative() {
        format!("{} over", variance.abs())
    } else if variance.is_positive() {
        format!("{} under", variance)
    } else {
        "on budget".to_string()
    }
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let len = title.chars().count();
    let padding = if len >= width { 0 } else { (width - len) / 2 };
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Compress a sorted list of months into ranges, e.g. "01-03, 07"
pub fn format_month_ranges(months: &[u8]) -> String {
    let mut parts = Vec::new();
    let mut iter = months.iter().copied().peekable();
    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(format!("{:02}", start));
        } else {
            parts.push(format!("{:02}-{:02}", start, end));
        }
    }
    parts.join(", ")
}
