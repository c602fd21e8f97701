//! Indicator extraction from structural scan reports
//!
//! Turns the line-oriented text emitted by the structural scan engine into a
//! [`Summary`] of counts and header metadata plus an ordered list of
//! [`Finding`]s. The report format is untrusted, so parsing never fails:
//! lines that match nothing simply contribute nothing.
//!
//! ```
//! use pdfscope::indicators::{parse_report, SummaryValue};
//!
//! let parsed = parse_report("PDF Header: %PDF-1.4\nCount obj: 12\n/JavaScript present\n");
//!
//! assert_eq!(parsed.summary.header(), Some("%PDF-1.4"));
//! assert_eq!(parsed.summary.get("obj"), Some(&SummaryValue::Count(12)));
//! assert_eq!(parsed.findings[0].as_str(), "/JavaScript present");
//! ```

mod summary;

pub use summary::{Finding, Summary, SummaryValue, ENTROPY_KEY, HEADER_KEY};

use lazy_static::lazy_static;
use regex::Regex;

const HEADER_TOKEN: &str = "PDF Header:";
const ENTROPY_TOKEN: &str = "Total entropy:";
const COUNT_TOKEN: &str = "Count ";

/// Names whose presence in a report line marks it as suspicious.
///
/// Plain, case-sensitive substring match against each trimmed line.
pub const SUSPICIOUS_KEYWORDS: [&str; 4] = ["JavaScript", "OpenAction", "Launch", "EmbeddedFile"];

lazy_static! {
    static ref COUNT_PATTERN: Regex =
        Regex::new(r"Count ([A-Za-z0-9_]+):\s*([0-9]+)").expect("count pattern is valid");
}

/// Normalized view of one raw scan report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReport {
    pub summary: Summary,
    pub findings: Vec<Finding>,
}

/// Parse a raw scan report. Total and deterministic.
pub fn parse_report(raw: &str) -> ParsedReport {
    let mut parsed = ParsedReport::default();

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        extract_summary(line, &mut parsed.summary);

        if is_suspicious(line) {
            parsed.findings.push(Finding::new(line));
        }
    }

    parsed
}

/// Whether a single line names any of the [`SUSPICIOUS_KEYWORDS`].
pub fn is_suspicious(line: &str) -> bool {
    SUSPICIOUS_KEYWORDS
        .iter()
        .any(|keyword| line.contains(keyword))
}

fn extract_summary(line: &str, summary: &mut Summary) {
    if let Some(header) = text_after(line, HEADER_TOKEN) {
        summary.insert(HEADER_KEY, SummaryValue::Text(header));
    } else if let Some(entropy) = text_after(line, ENTROPY_TOKEN) {
        summary.insert(ENTROPY_KEY, SummaryValue::Text(entropy));
    } else if line.contains(COUNT_TOKEN) {
        if let Some((name, count)) = parse_count(line) {
            summary.insert(name, SummaryValue::Count(count));
        }
    }
}

/// Text between the first occurrence of `token` and the next one (or end of line).
fn text_after(line: &str, token: &str) -> Option<String> {
    line.split(token).nth(1).map(|rest| rest.trim().to_string())
}

fn parse_count(line: &str) -> Option<(String, u64)> {
    let captures = COUNT_PATTERN.captures(line)?;
    // Counts too large for u64 are dropped rather than clamped
    let count = captures[2].parse::<u64>().ok()?;
    Some((captures[1].to_lowercase(), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary_of(pairs: &[(&str, SummaryValue)]) -> Summary {
        let mut summary = Summary::new();
        for (k, v) in pairs {
            summary.insert(*k, v.clone());
        }
        summary
    }

    #[test]
    fn test_end_to_end_example() {
        let raw = "PDF Header: %PDF-1.4\nCount obj: 12\n/JavaScript present\n";
        let parsed = parse_report(raw);

        assert_eq!(
            parsed.summary,
            summary_of(&[
                ("header", SummaryValue::Text("%PDF-1.4".to_string())),
                ("obj", SummaryValue::Count(12)),
            ])
        );
        assert_eq!(parsed.findings, vec![Finding::new("/JavaScript present")]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_report(""), ParsedReport::default());
        assert_eq!(parse_report("\n\n   \r\n"), ParsedReport::default());
    }

    #[test]
    fn test_unrecognized_lines_contribute_nothing() {
        let parsed = parse_report("PDFiD 0.2.8 sample.pdf\n obj 12\n endobj 12\ntrailer 1\n");
        assert!(parsed.summary.is_empty());
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_entropy_line() {
        let parsed = parse_report("  Total entropy:           7.942031 (     12345 bytes)");
        assert_eq!(parsed.summary.entropy(), Some("7.942031 (     12345 bytes)"));
        assert_eq!(parsed.summary.len(), 1);
    }

    #[test]
    fn test_header_with_empty_value() {
        let parsed = parse_report("PDF Header:");
        assert_eq!(parsed.summary.header(), Some(""));
    }

    #[test]
    fn test_header_stops_at_repeated_token() {
        let parsed = parse_report("PDF Header: %PDF-1.7 PDF Header: junk");
        assert_eq!(parsed.summary.header(), Some("%PDF-1.7"));
    }

    #[test]
    fn test_header_takes_priority_over_count() {
        let parsed = parse_report("PDF Header: %PDF-1.5 Count obj: 3");
        assert_eq!(parsed.summary.header(), Some("%PDF-1.5 Count obj: 3"));
        assert_eq!(parsed.summary.count("obj"), None);
    }

    #[test]
    fn test_count_keys_are_lowercased() {
        let parsed = parse_report("Count XRef: 2\nCount ObjStm: 4");
        assert_eq!(parsed.summary.get("xref"), Some(&SummaryValue::Count(2)));
        assert_eq!(parsed.summary.get("objstm"), Some(&SummaryValue::Count(4)));
        assert_eq!(parsed.summary.get("XRef"), None);
    }

    #[test]
    fn test_duplicate_counts_overwrite() {
        let parsed = parse_report("Count obj: 12\nCount endobj: 12\nCount OBJ: 40");
        assert_eq!(parsed.summary.count("obj"), Some(40));
        assert_eq!(parsed.summary.len(), 2);
    }

    #[test]
    fn test_count_without_space_after_colon() {
        let parsed = parse_report("Count stream:7");
        assert_eq!(parsed.summary.count("stream"), Some(7));
    }

    #[test]
    fn test_count_inside_longer_line() {
        let parsed = parse_report("** Count page: 3 (estimated)");
        assert_eq!(parsed.summary.count("page"), Some(3));
    }

    #[test]
    fn test_malformed_count_lines_are_ignored() {
        let parsed = parse_report("Count obj: many\nCount : 3\nCount obj 12\nCounter obj: 1");
        assert!(parsed.summary.is_empty());
    }

    #[test]
    fn test_overflowing_count_is_ignored() {
        let parsed = parse_report("Count obj: 999999999999999999999999");
        assert!(parsed.summary.is_empty());
    }

    #[test]
    fn test_findings_keep_order_and_are_trimmed() {
        let raw = "  /OpenAction 1  \n /Launch 0\n/Page 2\n\t/EmbeddedFile 1\n /JS 1\n";
        let parsed = parse_report(raw);
        let findings: Vec<&str> = parsed.findings.iter().map(Finding::as_str).collect();
        assert_eq!(findings, vec!["/OpenAction 1", "/Launch 0", "/EmbeddedFile 1"]);
    }

    #[test]
    fn test_keyword_match_is_case_sensitive() {
        let parsed = parse_report("/javascript 1\nLAUNCH\nopenaction");
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_line_can_be_summary_and_finding() {
        let parsed = parse_report("Count JavaScript: 2");
        assert_eq!(parsed.summary.count("javascript"), Some(2));
        assert_eq!(parsed.findings, vec![Finding::new("Count JavaScript: 2")]);
    }

    #[test]
    fn test_plain_substring_over_flags() {
        // Unrelated prose still matches; the rule is deliberately not stricter
        let parsed = parse_report("Launched by scheduler");
        assert_eq!(parsed.findings.len(), 1);
    }

    #[test]
    fn test_crlf_input() {
        let parsed = parse_report("PDF Header: %PDF-1.3\r\nCount obj: 5\r\n/JavaScript 1\r\n");
        assert_eq!(parsed.summary.header(), Some("%PDF-1.3"));
        assert_eq!(parsed.summary.count("obj"), Some(5));
        assert_eq!(parsed.findings[0].as_str(), "/JavaScript 1");
    }

    #[test]
    fn test_findings_are_lines_of_the_raw_report() {
        let raw = "PDF Header: %PDF-1.6\n /JavaScript 2\n /OpenAction 1\n /AA 0\n";
        let parsed = parse_report(raw);
        for finding in &parsed.findings {
            assert!(raw.lines().any(|l| l.trim() == finding.as_str()));
        }
    }

    #[test]
    fn test_large_report_with_many_distinct_counts() {
        let raw: String = (0..40_000)
            .map(|i| format!("Count k{i}: {i}\n"))
            .collect();
        let parsed = parse_report(&raw);

        assert_eq!(parsed.summary.len(), 40_000);
        assert_eq!(parsed.summary.count("k39999"), Some(39_999));
        assert_eq!(parsed.summary.iter().next().map(|(k, _)| k), Some("k0"));
        assert!(parsed.findings.is_empty());
    }

    #[test]
    fn test_is_suspicious() {
        assert!(is_suspicious("/JavaScript 1"));
        assert!(is_suspicious("xxEmbeddedFilexx"));
        assert!(!is_suspicious("/JS 1"));
        assert!(!is_suspicious(""));
    }
}
