//! Static-analyzer alert extraction from a build log.
//!
//! The build tool summarises analyzer findings with a marker line such as
//! `(3 commands with analyzer issues)` immediately after the lines that
//! produced them. Each marker's preceding `N` lines form one alert group.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Captures the declared number of alert lines in group 1.
static ANALYZER_ISSUES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((\d+) commands with analyzer issues\)")
        .expect("analyzer marker pattern is valid")
});

/// Noise prefix the formatter puts in front of analyzed files.
const ANALYZE_PREFIX: &str = "Analyze ";

/// Collect every alert group in log order, with the `Analyze ` prefix removed.
///
/// A marker declaring more lines than precede it is clamped to the start of
/// the log.
pub fn extract_alerts(lines: &[String]) -> Vec<String> {
    let mut alerts = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some(captures) = ANALYZER_ISSUES_PATTERN.captures(line) else {
            continue;
        };
        let Ok(declared) = captures[1].parse::<usize>() else {
            warn!(line = %line, "Ignoring analyzer marker with unparseable count");
            continue;
        };

        if declared > index {
            warn!(
                declared,
                available = index,
                "Analyzer marker declares more alerts than preceding lines, clamping"
            );
        }
        let start = index.saturating_sub(declared);
        alerts.extend(lines[start..index].iter().cloned());
    }

    alerts
        .into_iter()
        .map(|line| match line.strip_prefix(ANALYZE_PREFIX) {
            Some(rest) => rest.to_string(),
            None => line,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(lines: &[&str]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_extracts_preceding_window() {
        let lines = log(&[
            "Build settings from command line:",
            "Analyze Classes/AppDelegate.m",
            "Analyze Classes/ViewController.m",
            "Analyze Classes/Model.m",
            "(3 commands with analyzer issues)",
            "Test Suite 'All tests' started",
        ]);

        assert_eq!(
            extract_alerts(&lines),
            [
                "Classes/AppDelegate.m",
                "Classes/ViewController.m",
                "Classes/Model.m"
            ]
        );
    }

    #[test]
    fn test_lines_without_prefix_kept_verbatim() {
        let lines = log(&["warning: something", "(1 commands with analyzer issues)"]);
        assert_eq!(extract_alerts(&lines), ["warning: something"]);
    }

    #[test]
    fn test_only_leading_prefix_removed() {
        let lines = log(&[
            "Analyze Analyze Helper.m",
            "(1 commands with analyzer issues)",
        ]);
        assert_eq!(extract_alerts(&lines), ["Analyze Helper.m"]);
    }

    #[test]
    fn test_mid_line_prefix_kept() {
        let lines = log(&[
            "▸ Analyze Sources/A.m",
            "(1 commands with analyzer issues)",
        ]);
        assert_eq!(extract_alerts(&lines), ["▸ Analyze Sources/A.m"]);
    }

    #[test]
    fn test_multiple_markers_concatenate_in_log_order() {
        let lines = log(&[
            "Analyze A.m",
            "(1 commands with analyzer issues)",
            "noise",
            "Analyze B.m",
            "Analyze C.m",
            "(2 commands with analyzer issues)",
        ]);
        assert_eq!(extract_alerts(&lines), ["A.m", "B.m", "C.m"]);
    }

    #[test]
    fn test_multi_digit_counts() {
        let mut raw: Vec<String> = (0..12).map(|i| format!("Analyze File{i}.m")).collect();
        raw.push("(12 commands with analyzer issues)".to_string());
        assert_eq!(extract_alerts(&raw).len(), 12);
    }

    #[test]
    fn test_oversized_count_clamps_to_log_start() {
        let lines = log(&["Analyze Only.m", "(5 commands with analyzer issues)"]);
        assert_eq!(extract_alerts(&lines), ["Only.m"]);

        let lines = log(&["(2 commands with analyzer issues)"]);
        assert!(extract_alerts(&lines).is_empty());
    }

    #[test]
    fn test_zero_count_contributes_nothing() {
        let lines = log(&["Analyze A.m", "(0 commands with analyzer issues)"]);
        assert!(extract_alerts(&lines).is_empty());
    }

    #[test]
    fn test_no_marker_no_alerts() {
        let lines = log(&["Analyze A.m", "** TEST SUCCEEDED **"]);
        assert!(extract_alerts(&lines).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let lines = log(&[
            "Analyze A.m",
            "Analyze B.m",
            "(2 commands with analyzer issues)",
        ]);
        assert_eq!(extract_alerts(&lines), extract_alerts(&lines));
    }
}
