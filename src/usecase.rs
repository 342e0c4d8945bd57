use std::io::BufRead;

use anyhow::{anyhow, Context, Result};
use serde_yaml::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{EscapeReport, InputMode};
use crate::yaml_util::{escape_yaml_value, normalize_value, quote_reason};

pub fn inspect(value: &str) -> EscapeReport {
    let normalized = normalize_value(value);
    EscapeReport {
        input: value.to_string(),
        reason: quote_reason(&normalized),
        output: escape_yaml_value(Some(value)),
        collapsed_newlines: value.trim().contains(['\r', '\n']),
        normalized,
    }
}

/// Renders one frontmatter line. Empty values leave no trailing space.
pub fn render_field(key: &str, value: &str) -> String {
    let escaped = escape_yaml_value(Some(value));
    if escaped.is_empty() {
        format!("{}:", key)
    } else {
        format!("{}: {}", key, escaped)
    }
}

pub fn read_values<R: BufRead>(mut reader: R, mode: InputMode) -> Result<Vec<String>> {
    match mode {
        InputMode::Lines => reader
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("Reading input lines"),
        InputMode::Whole => {
            let mut buf = String::new();
            reader
                .read_to_string(&mut buf)
                .context("Reading input")?;
            Ok(vec![buf])
        }
    }
}

/// Loads `v: <output>` back through a YAML parser and checks the scalar is
/// the normalized string.
pub fn verify_round_trip(report: &EscapeReport) -> Result<()> {
    let doc = format!("v: {}\n", report.output);
    let parsed: Value = serde_yaml::from_str(&doc)
        .with_context(|| format!("Reading back {:?} as YAML", report.output))?;
    match parsed.get("v") {
        Some(Value::String(s)) if *s == report.normalized => Ok(()),
        Some(Value::Null) | None if report.normalized.is_empty() => Ok(()),
        Some(other) => Err(anyhow!(
            "Value {:?} reads back as {:?}, expected the string {:?}",
            report.output,
            other,
            report.normalized
        )),
        None => Err(anyhow!("Value {:?} did not read back at all", report.output)),
    }
}

pub fn escape_all(cfg: &Config, values: &[String]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        let report = inspect(value);
        debug!(
            input = ?report.input,
            output = %report.output,
            reason = ?report.reason,
            collapsed = report.collapsed_newlines,
            "escaped value"
        );
        if cfg.verify {
            if let Err(e) = verify_round_trip(&report) {
                warn!(output = %report.output, "value does not read back intact");
                return Err(e);
            }
        }
        let line = match &cfg.key {
            Some(k) => render_field(k, value),
            None => report.output,
        };
        out.push(line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuoteReason;
    use std::io::Cursor;

    #[test]
    fn test_inspect_reports_collapse_and_reason() {
        let r = inspect("  Title:\r\n  Subtitle ");
        assert_eq!(r.normalized, "Title: Subtitle");
        assert_eq!(r.output, "\"Title: Subtitle\"");
        assert_eq!(r.reason, Some(QuoteReason::ColonSpace));
        assert!(r.collapsed_newlines);

        let r = inspect("plain");
        assert_eq!(r.output, "plain");
        assert_eq!(r.reason, None);
        assert!(!r.collapsed_newlines);
    }

    #[test]
    fn test_inspect_ignores_edge_newlines() {
        let r = inspect("\nplain\n");
        assert_eq!(r.output, "plain");
        assert!(!r.collapsed_newlines);
    }

    #[test]
    fn test_render_field() {
        assert_eq!(render_field("title", "  My Title "), "title: My Title");
        assert_eq!(render_field("draft", "no"), "draft: \"no\"");
        assert_eq!(render_field("summary", "   "), "summary:");
    }

    #[test]
    fn test_read_values_lines() {
        let input = Cursor::new("one\r\ntwo\n\nfour\n");
        let vals = read_values(input, InputMode::Lines).unwrap();
        assert_eq!(vals, vec!["one", "two", "", "four"]);
    }

    #[test]
    fn test_read_values_whole() {
        let input = Cursor::new("first\nsecond\n");
        let vals = read_values(input, InputMode::Whole).unwrap();
        assert_eq!(vals, vec!["first\nsecond\n"]);
        let vals = read_values(Cursor::new(""), InputMode::Whole).unwrap();
        assert_eq!(vals, vec![""]);
    }

    #[test]
    fn test_verify_accepts_escaped_values() {
        for v in [
            "Title: Subtitle",
            "yes",
            "Off",
            "\"quoted\" start",
            "@C:\\dir\\",
            "He said \"hi\"",
            "Line1\nLine2",
            "",
            "   ",
        ] {
            verify_round_trip(&inspect(v)).unwrap();
        }
    }

    #[test]
    fn test_verify_flags_values_outside_heuristic() {
        let err = verify_round_trip(&inspect("123")).unwrap_err();
        assert!(format!("{}", err).contains("reads back as"));
        let err = verify_round_trip(&inspect("note #todo")).unwrap_err();
        assert!(format!("{}", err).contains("expected the string"));
    }

    #[test]
    fn test_escape_all_plain_and_keyed() {
        let vals = vec!["a: b".to_string(), "plain".to_string()];
        let cfg = Config::default();
        assert_eq!(escape_all(&cfg, &vals).unwrap(), vec!["\"a: b\"", "plain"]);

        let cfg = Config {
            key: Some("title".into()),
            ..Config::default()
        };
        assert_eq!(
            escape_all(&cfg, &vals).unwrap(),
            vec!["title: \"a: b\"", "title: plain"]
        );
    }

    #[test]
    fn test_escape_all_verify_fails_batch() {
        let cfg = Config {
            verify: true,
            ..Config::default()
        };
        let vals = vec!["fine".to_string(), "42".to_string()];
        assert!(escape_all(&cfg, &vals).is_err());
    }
}
