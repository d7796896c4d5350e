//! Free-text field normalization
//!
//! Pure, total parsers that turn one raw questionnaire cell into a typed
//! value. None of them can fail: unrecognized input falls back to the most
//! conservative value so a malformed answer never aborts a batch.
//!
//! Phrase matching is driven by ordered vocabulary tables rather than
//! scattered conditionals; the first matching entry wins. Numeric extraction
//! is permissive substring search, so descriptive text around a number is
//! tolerated ("大约30分钟" parses as 30).

use crate::types::ClockTime;

/// Weekly-frequency vocabulary, checked in order.
///
/// Entries cover the rubric's CJK phrasing and the Latin variants seen in
/// exported sheets, matched after lowercasing and slash stripping.
const FREQUENCY_VOCAB: &[(&[&str], u8)] = &[
    (&["无", "none"], 0),
    (&["<1", "＜1", "less than once"], 1),
    (&["1-2", "1–2"], 2),
    (&[">=3", ">或=3", "≥3", "3 or more"], 3),
];

/// Self-rated sleep quality vocabulary (Q6)
const QUALITY_VOCAB: &[(&[&str], u8)] = &[
    (&["很好", "very good"], 0),
    (&["较好", "fairly good"], 1),
    (&["较差", "fairly bad"], 2),
    (&["很差", "very bad"], 3),
];

/// Daytime-trouble vocabulary (Q9), a four-level scale distinct from the
/// weekly-frequency phrasing
const DAYTIME_TROUBLE_VOCAB: &[(&[&str], u8)] = &[
    (&["无", "none"], 0),
    (&["偶尔", "occasionally"], 1),
    (&["有时", "sometimes"], 2),
    (&["经常", "often"], 3),
];

/// First entry whose patterns appear in the text wins; no match scores 0.
fn match_vocab(text: &str, vocab: &[(&[&str], u8)]) -> u8 {
    for (patterns, code) in vocab {
        if patterns.iter().any(|p| text.contains(p)) {
            return *code;
        }
    }
    0
}

/// Parse a "how often per week" phrase into its 0-3 frequency code.
///
/// Matching is case-insensitive and ignores slash glyphs, so "1-2次/周" and
/// "1-2 times/week" both land on code 2. Unrecognized or empty input is 0.
pub fn parse_frequency(text: &str) -> u8 {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| *c != '/' && *c != '／')
        .collect();
    match_vocab(&cleaned, FREQUENCY_VOCAB)
}

/// Map a Q6 self-rating phrase to its component score, defaulting to 0.
pub fn parse_quality(text: &str) -> u8 {
    match_vocab(&text.to_lowercase(), QUALITY_VOCAB)
}

/// Map a Q9 daytime-trouble phrase (none/occasionally/sometimes/often) to
/// its 0-3 code, defaulting to 0.
pub fn parse_daytime_trouble(text: &str) -> u8 {
    match_vocab(&text.to_lowercase(), DAYTIME_TROUBLE_VOCAB)
}

/// Extract the first run of decimal digits found anywhere in the text as a
/// minute count; 0 when there is none.
pub fn parse_minutes(text: &str) -> u32 {
    let start = match text.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return 0,
    };
    let rest = &text[start..];
    let len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..len].parse().unwrap_or(0)
}

/// Extract the first decimal number (integer or with one fractional part)
/// found anywhere in the text; 0.0 when there is none.
pub fn parse_hours(text: &str) -> f64 {
    let start = match text.find(|c: char| c.is_ascii_digit()) {
        Some(i) => i,
        None => return 0.0,
    };
    let rest = &text[start..];
    let int_len = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    // A fractional part counts only when at least one digit follows the dot.
    let mut end = int_len;
    if let Some(frac) = rest[int_len..].strip_prefix('.') {
        let frac_len = frac
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(frac.len());
        if frac_len > 0 {
            end = int_len + 1 + frac_len;
        }
    }

    rest[..end].parse().unwrap_or(0.0)
}

/// Parse a free-text clock time such as "23:30", "23点30分", or "7".
///
/// The hour glyph `点` acts as a separator and the minute glyph `分` is
/// dropped, so CJK-formatted answers normalize to the colon form before
/// splitting. Each segment contributes its leading digits; anything
/// unparseable defaults to 0.
pub fn parse_time(text: &str) -> ClockTime {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '分')
        .map(|c| if c == '点' { ':' } else { c })
        .collect();

    let mut parts = cleaned.split(':');
    let hour = parts.next().map(leading_digits).unwrap_or(0);
    let minute = parts.next().map(leading_digits).unwrap_or(0);
    ClockTime { hour, minute }
}

/// Leading decimal digits of a segment, 0 when there are none
fn leading_digits(segment: &str) -> u32 {
    let len = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment[..len].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_matches_rubric_phrases() {
        assert_eq!(parse_frequency("无"), 0);
        assert_eq!(parse_frequency("None"), 0);
        assert_eq!(parse_frequency("<1次/周"), 1);
        assert_eq!(parse_frequency("＜1"), 1);
        assert_eq!(parse_frequency("less than once a week"), 1);
        assert_eq!(parse_frequency("1-2次/周"), 2);
        assert_eq!(parse_frequency("1–2 times"), 2);
        assert_eq!(parse_frequency(">=3"), 3);
        assert_eq!(parse_frequency("≥3次/周"), 3);
        assert_eq!(parse_frequency(">或=3次/周"), 3);
        assert_eq!(parse_frequency("3 or more times a week"), 3);
    }

    #[test]
    fn frequency_unrecognized_defaults_to_zero() {
        assert_eq!(parse_frequency(""), 0);
        assert_eq!(parse_frequency("every night"), 0);
        assert_eq!(parse_frequency("N/A"), 0);
    }

    #[test]
    fn frequency_earlier_vocabulary_entries_win() {
        // A no-occurrence marker beats any later marker in the same answer.
        assert_eq!(parse_frequency("无 (1-2)"), 0);
    }

    #[test]
    fn frequency_codes_are_stable_over_canonical_markers() {
        for (expected, marker) in [(0, "无"), (1, "<1"), (2, "1-2"), (3, ">=3")] {
            assert_eq!(parse_frequency(marker), expected);
        }
    }

    #[test]
    fn quality_maps_four_categories() {
        assert_eq!(parse_quality("很好"), 0);
        assert_eq!(parse_quality("较好"), 1);
        assert_eq!(parse_quality("较差"), 2);
        assert_eq!(parse_quality("很差"), 3);
        assert_eq!(parse_quality("Very Good"), 0);
        assert_eq!(parse_quality("fairly bad"), 2);
        assert_eq!(parse_quality(""), 0);
        assert_eq!(parse_quality("一般"), 0);
    }

    #[test]
    fn daytime_trouble_maps_four_levels() {
        assert_eq!(parse_daytime_trouble("无"), 0);
        assert_eq!(parse_daytime_trouble("偶尔"), 1);
        assert_eq!(parse_daytime_trouble("有时"), 2);
        assert_eq!(parse_daytime_trouble("经常"), 3);
        assert_eq!(parse_daytime_trouble("Sometimes"), 2);
        assert_eq!(parse_daytime_trouble("unclear"), 0);
    }

    #[test]
    fn minutes_takes_first_digit_run() {
        assert_eq!(parse_minutes("30"), 30);
        assert_eq!(parse_minutes("大约30分钟"), 30);
        assert_eq!(parse_minutes("about 45 min"), 45);
        assert_eq!(parse_minutes("10-20分钟"), 10);
        assert_eq!(parse_minutes(""), 0);
        assert_eq!(parse_minutes("半小时"), 0);
    }

    #[test]
    fn hours_takes_first_decimal_number() {
        assert_eq!(parse_hours("7"), 7.0);
        assert_eq!(parse_hours("7.5"), 7.5);
        assert_eq!(parse_hours("大约6.5个小时"), 6.5);
        assert_eq!(parse_hours("8小时"), 8.0);
        assert_eq!(parse_hours(""), 0.0);
        assert_eq!(parse_hours("没睡"), 0.0);
    }

    #[test]
    fn hours_dot_without_digits_is_not_fractional() {
        assert_eq!(parse_hours("7."), 7.0);
        assert_eq!(parse_hours("7.x"), 7.0);
    }

    #[test]
    fn time_parses_colon_and_cjk_forms() {
        assert_eq!(parse_time("23:30"), ClockTime { hour: 23, minute: 30 });
        assert_eq!(parse_time("23点30分"), ClockTime { hour: 23, minute: 30 });
        assert_eq!(parse_time(" 6:05 "), ClockTime { hour: 6, minute: 5 });
        assert_eq!(parse_time("7"), ClockTime { hour: 7, minute: 0 });
        assert_eq!(parse_time("22点"), ClockTime { hour: 22, minute: 0 });
    }

    #[test]
    fn time_unparseable_segments_default_to_zero() {
        assert_eq!(parse_time(""), ClockTime { hour: 0, minute: 0 });
        assert_eq!(parse_time("晚上"), ClockTime { hour: 0, minute: 0 });
        assert_eq!(parse_time("23:半"), ClockTime { hour: 23, minute: 0 });
    }
}
