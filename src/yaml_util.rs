use crate::domain::QuoteReason;

/// Characters that change the meaning of a plain scalar when they lead it.
const LEADING_INDICATORS: [char; 19] = [
    '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
    '`',
];

/// Words YAML loaders may read back as booleans or null.
const RESERVED_WORDS: [&str; 7] = ["true", "false", "null", "yes", "no", "on", "off"];

/// Escapes a value for the right-hand side of a frontmatter `key: value` line.
///
/// Absent, empty and whitespace-only values become `""` (an empty string, not
/// a pair of quotes). Line breaks are folded into single spaces, so the result
/// is always one line. Values that a YAML loader would misread get wrapped in
/// double quotes; everything else is returned trimmed and untouched.
pub fn escape_yaml_value(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let normalized = normalize_value(value);
    if quote_reason(&normalized).is_some() {
        double_quote(&normalized)
    } else {
        normalized
    }
}

/// Trims the value and collapses every whitespace run holding a CR or LF into
/// one space.
pub fn normalize_value(value: &str) -> String {
    let trimmed = value.trim();
    if !trimmed.contains(['\r', '\n']) {
        return trimmed.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut run = String::new();
    let mut run_breaks = false;
    for ch in trimmed.chars() {
        if ch.is_whitespace() {
            run_breaks |= ch == '\r' || ch == '\n';
            run.push(ch);
            continue;
        }
        flush_run(&mut out, &mut run, &mut run_breaks);
        out.push(ch);
    }
    // trimmed input never ends inside a run
    flush_run(&mut out, &mut run, &mut run_breaks);
    out
}

fn flush_run(out: &mut String, run: &mut String, run_breaks: &mut bool) {
    if *run_breaks {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
    *run_breaks = false;
}

/// Reports why a normalized value has to be double-quoted, or `None` when it
/// can stay a plain scalar.
pub fn quote_reason(normalized: &str) -> Option<QuoteReason> {
    if let Some(first) = normalized.chars().next() {
        if LEADING_INDICATORS.contains(&first) {
            return Some(QuoteReason::LeadingIndicator(first));
        }
    }
    let mut chars = normalized.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ':' && chars.peek().is_some_and(|n| n.is_whitespace()) {
            return Some(QuoteReason::ColonSpace);
        }
    }
    if RESERVED_WORDS
        .iter()
        .any(|w| normalized.eq_ignore_ascii_case(w))
    {
        return Some(QuoteReason::ReservedWord);
    }
    None
}

/// Wraps `s` in double quotes. Backslashes are escaped before quotes so the
/// `\"` sequences are not doubled up.
pub fn double_quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}
