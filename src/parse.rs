//! Heuristic parsing of raw model output into a summary result.
//!
//! Models are asked for a delimited key-points section but do not reliably
//! produce one, so parsing is defensive: it is a pure, total function that
//! always returns a well-formed result, falling back to placeholder key
//! points when the response is inconclusive.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted key-point length range, in characters. Excludes marker
/// artifacts on the low end and run-on lines on the high end.
const MIN_POINT_CHARS: usize = 11;
const MAX_POINT_CHARS: usize = 199;
/// At most this many candidate lines are collected after the header.
const MAX_CANDIDATES: usize = 10;
/// Fewer surviving candidates than this keeps the placeholder list whole;
/// partial real lists are never padded with placeholders.
const MIN_REAL_POINTS: usize = 3;
/// Final key-point count when enough candidates survive.
const MAX_POINTS: usize = 5;
/// Character cap on the narrative excerpt handed to speech synthesis,
/// roughly 3-4 minutes of speech.
const TTS_EXCERPT_CHARS: usize = 2000;

/// Parsed summary: the narrative portion and the key learning points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    /// Everything before the key-points header, or the full response when
    /// no header was found.
    pub narrative: String,
    /// Ordered key learning points. The placeholder list unless at least
    /// three well-formed candidates were parsed, in which case the first
    /// five (three or four near the boundary).
    pub key_points: Vec<String>,
}

impl SummaryResult {
    /// The narrative excerpt used for speech synthesis, capped at 2000
    /// characters with an ellipsis marker when truncated.
    pub fn tts_excerpt(&self) -> String {
        let count = self.narrative.chars().count();
        if count > TTS_EXCERPT_CHARS {
            let truncated: String = self.narrative.chars().take(TTS_EXCERPT_CHARS).collect();
            format!("{}...", truncated)
        } else {
            self.narrative.clone()
        }
    }
}

/// Parse a raw model response into narrative and key points.
///
/// Total function: never fails, holds no state, and parsing the same input
/// twice yields identical results.
pub fn parse(raw: &str) -> SummaryResult {
    let lines: Vec<&str> = raw.split('\n').collect();

    let header_idx = lines.iter().position(|line| is_points_header(line));

    let mut key_points = placeholder_points();
    if let Some(idx) = header_idx {
        let points = collect_points(&lines[idx + 1..]);
        if points.len() >= MIN_REAL_POINTS {
            key_points = points.into_iter().take(MAX_POINTS).collect();
        }
    }

    let narrative = match header_idx {
        Some(idx) => lines[..idx].join("\n").trim().to_string(),
        None => raw.to_string(),
    };

    SummaryResult {
        narrative,
        key_points,
    }
}

/// The guaranteed-non-empty fallback key points.
fn placeholder_points() -> Vec<String> {
    (1..=5).map(|i| format!("Key point {}", i)).collect()
}

/// Whether a line announces the key-points section.
fn is_points_header(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    line.contains("key learning points")
        || line.contains("key points")
        || line.contains("learning points")
        || line.contains("actionable takeaways")
        || (line.contains("key") && line.contains("points"))
}

/// Compiled marker patterns for candidate point lines.
struct PointPatterns {
    numbered: Regex,
    bulleted: Regex,
    parenthesized: Regex,
    strip_numbered: Regex,
    strip_bulleted: Regex,
    strip_parenthesized: Regex,
}

fn point_patterns() -> &'static PointPatterns {
    static PATTERNS: std::sync::OnceLock<PointPatterns> = std::sync::OnceLock::new();
    PATTERNS.get_or_init(|| PointPatterns {
        numbered: Regex::new(r"^\d+\.").expect("Invalid regex"),
        bulleted: Regex::new(r"^[•\-\*]").expect("Invalid regex"),
        parenthesized: Regex::new(r"^\(\d+\)").expect("Invalid regex"),
        strip_numbered: Regex::new(r"^\d+\.\s*").expect("Invalid regex"),
        strip_bulleted: Regex::new(r"^[•\-\*]\s*").expect("Invalid regex"),
        strip_parenthesized: Regex::new(r"^\(\d+\)\s*").expect("Invalid regex"),
    })
}

/// Collect candidate point lines following the header.
///
/// Blank lines and markdown heading/bold markers are skipped before the
/// marker patterns are tried, so a `**bold**` interlude is never mistaken
/// for a starred bullet. A candidate is a numbered, bulleted, or
/// parenthesized-number line whose cleaned text falls within the accepted
/// length range; any other line terminates the scan once at least one
/// point has been collected, since the key-points block is contiguous.
fn collect_points(lines: &[&str]) -> Vec<String> {
    let patterns = point_patterns();
    let mut points = Vec::new();

    for line in lines {
        if points.len() >= MAX_CANDIDATES {
            break;
        }

        let line = line.trim();

        if line.is_empty() || line.starts_with("**") || line.starts_with('#') {
            continue;
        }

        if patterns.numbered.is_match(line)
            || patterns.bulleted.is_match(line)
            || patterns.parenthesized.is_match(line)
        {
            let clean = patterns.strip_numbered.replace(line, "");
            let clean = patterns.strip_bulleted.replace(&clean, "");
            let clean = patterns.strip_parenthesized.replace(&clean, "").to_string();

            let len = clean.chars().count();
            if (MIN_POINT_CHARS..=MAX_POINT_CHARS).contains(&len) {
                points.push(clean);
            }
        } else if !points.is_empty() {
            break;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_POINTS: &str = "\
This video walks through building a REST API from scratch.

It covers routing, middleware, and deployment in detail.

**Key Learning Points:**
1. Start every project with a clear routing structure.
2. Middleware should do one thing and compose cleanly.
3. Validate request payloads at the boundary, not in handlers.
4. Integration tests catch wiring bugs unit tests miss.
5. Automate deployment before the first release, not after.";

    #[test]
    fn test_five_numbered_points() {
        let result = parse(FIVE_POINTS);

        assert_eq!(result.key_points.len(), 5);
        assert_eq!(
            result.key_points[0],
            "Start every project with a clear routing structure."
        );
        assert_eq!(
            result.key_points[4],
            "Automate deployment before the first release, not after."
        );
        for point in &result.key_points {
            let len = point.chars().count();
            assert!((11..=199).contains(&len));
        }
    }

    #[test]
    fn test_narrative_excludes_points_block() {
        let result = parse(FIVE_POINTS);

        assert!(result.narrative.contains("REST API"));
        assert!(!result.narrative.to_lowercase().contains("key learning points"));
        assert!(!result.narrative.contains("routing structure."));
        // trailing blank line before the header is trimmed
        assert!(result.narrative.ends_with("deployment in detail."));
    }

    #[test]
    fn test_no_header_keeps_placeholders_and_full_narrative() {
        let raw = "Just a plain narrative.\nNothing else in here.";
        let result = parse(raw);

        assert_eq!(result.narrative, raw);
        assert_eq!(
            result.key_points,
            vec![
                "Key point 1",
                "Key point 2",
                "Key point 3",
                "Key point 4",
                "Key point 5"
            ]
        );
    }

    #[test]
    fn test_header_variants_recognized() {
        for header in [
            "Key Points:",
            "Actionable Takeaways",
            "## Learning Points",
            "The key takeaway points are:",
        ] {
            let raw = format!(
                "Intro.\n{}\n1. A sufficiently long takeaway line.\n2. Another sufficiently long line.\n3. Third sufficiently long line.",
                header
            );
            let result = parse(&raw);
            assert_eq!(result.key_points.len(), 3, "header not recognized: {}", header);
        }
    }

    #[test]
    fn test_exactly_three_points_boundary() {
        // Three valid candidates pass the minimum check and come through
        // as a 3-element list, never padded with placeholders.
        let raw = "Intro.\n\nKey Points:\n1. First takeaway, long enough to pass.\n2. Second takeaway, long enough to pass.\n3. Third takeaway, long enough to pass.";
        let result = parse(raw);

        assert_eq!(result.key_points.len(), 3);
        assert_eq!(result.key_points[0], "First takeaway, long enough to pass.");
    }

    #[test]
    fn test_two_points_falls_back_to_placeholders() {
        let raw = "Intro.\n\nKey Points:\n1. First takeaway, long enough to pass.\n2. Second takeaway, long enough to pass.";
        let result = parse(raw);

        assert_eq!(result.key_points.len(), 5);
        assert_eq!(result.key_points[0], "Key point 1");
    }

    #[test]
    fn test_short_points_rejected() {
        // "Learn A" is under the 11-character floor, so all three are
        // dropped and the placeholders survive.
        let raw = "Narrative text\n\n**Key Learning Points:**\n1. Learn A\n2. Learn B\n3. Learn C";
        let result = parse(raw);

        assert_eq!(result.key_points[0], "Key point 1");
        assert_eq!(result.narrative, "Narrative text");
    }

    #[test]
    fn test_oversized_point_rejected() {
        let long_point = "x".repeat(250);
        let raw = format!(
            "Intro.\nKey Points:\n1. {}\n2. Second takeaway, long enough to pass.\n3. Third takeaway, long enough to pass.\n4. Fourth takeaway, long enough to pass.",
            long_point
        );
        let result = parse(&raw);

        assert_eq!(result.key_points.len(), 3);
        assert!(!result.key_points.iter().any(|p| p.contains("xxx")));
    }

    #[test]
    fn test_bullet_and_paren_markers() {
        let raw = "Intro.\nKey Points:\n• Bulleted takeaway, long enough to pass.\n- Dashed takeaway, long enough to pass.\n* Starred takeaway, long enough to pass.\n(4) Parenthesized takeaway, long enough.";
        let result = parse(raw);

        assert_eq!(result.key_points.len(), 4);
        assert_eq!(result.key_points[0], "Bulleted takeaway, long enough to pass.");
        assert_eq!(result.key_points[3], "Parenthesized takeaway, long enough.");
    }

    #[test]
    fn test_blank_and_markdown_lines_do_not_terminate() {
        let raw = "Intro.\nKey Points:\n\n**bold interlude**\n# heading\n1. First takeaway, long enough to pass.\n\n2. Second takeaway, long enough to pass.\n3. Third takeaway, long enough to pass.";
        let result = parse(raw);

        assert_eq!(result.key_points.len(), 3);
        // A bold interlude is skipped, never collected as a starred bullet
        assert!(!result.key_points.iter().any(|p| p.contains("bold interlude")));
    }

    #[test]
    fn test_scan_stops_at_prose_after_first_point() {
        let raw = "Intro.\nKey Points:\n1. First takeaway, long enough to pass.\n2. Second takeaway, long enough to pass.\n3. Third takeaway, long enough to pass.\nClosing prose that is not a point.\n4. Fourth takeaway, long enough to pass.";
        let result = parse(raw);

        assert_eq!(result.key_points.len(), 3);
    }

    #[test]
    fn test_more_than_five_points_truncated() {
        let mut raw = String::from("Intro.\nKey Points:\n");
        for i in 1..=8 {
            raw.push_str(&format!("{}. Takeaway number {} long enough to pass.\n", i, i));
        }
        let result = parse(&raw);

        assert_eq!(result.key_points.len(), 5);
        assert!(result.key_points[4].contains("number 5"));
    }

    #[test]
    fn test_idempotent() {
        let first = parse(FIVE_POINTS);
        let second = parse(FIVE_POINTS);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tts_excerpt_cap() {
        let narrative = "n".repeat(5000);
        let raw = format!("{}\nKey Points:\n1. A sufficiently long takeaway line.", narrative);
        let result = parse(&raw);

        let excerpt = result.tts_excerpt();
        assert_eq!(excerpt.chars().count(), 2003);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_tts_excerpt_short_narrative_untouched() {
        let result = parse("Short narrative only.");
        assert_eq!(result.tts_excerpt(), "Short narrative only.");
    }
}
