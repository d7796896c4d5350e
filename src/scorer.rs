//! PSQI component scoring
//!
//! Seven independent rubric functions, each pure and total, producing an
//! integer in 0-3. Components that sum several item scores share a single
//! threshold-mapping rule.
//!
//! Two rubric quirks are intentional and must not be "fixed" without a
//! clinical source: sleeping exactly 7 hours scores 1 (the 0 band is strictly
//! above 7), and a non-positive bed window scores the degenerate 3.

use crate::normalizer::{
    parse_daytime_trouble, parse_frequency, parse_hours, parse_minutes, parse_quality, parse_time,
};

/// Map a sum of item scores onto a 0-3 component score.
///
/// `thresholds` holds the upper bounds for scores 1 and 2: with `[9, 18]`,
/// a sum of 0 maps to 0, 1-9 to 1, 10-18 to 2, and anything above to 3.
pub fn map_sum_to_score(sum: u8, thresholds: [u8; 2]) -> u8 {
    if sum == 0 {
        0
    } else if sum <= thresholds[0] {
        1
    } else if sum <= thresholds[1] {
        2
    } else {
        3
    }
}

/// C1, subjective sleep quality: the self-rating phrase scores directly.
pub fn score_sleep_quality(quality_rating: &str) -> u8 {
    parse_quality(quality_rating)
}

/// C2, sleep latency: minutes-to-sleep banded at 15/30/60 minutes, summed
/// with the cannot-fall-asleep-within-30-minutes frequency.
pub fn score_sleep_latency(minutes_to_sleep: &str, latency_frequency: &str) -> u8 {
    let minutes = parse_minutes(minutes_to_sleep);
    let minutes_score = if minutes <= 15 {
        0
    } else if minutes <= 30 {
        1
    } else if minutes <= 60 {
        2
    } else {
        3
    };

    map_sum_to_score(minutes_score + parse_frequency(latency_frequency), [2, 4])
}

/// C3, sleep duration. More than seven hours scores 0; the remaining bands
/// are closed on the left, so exactly 7.0 falls in the 6-7 band and scores 1.
pub fn score_sleep_duration(hours_slept: &str) -> u8 {
    let hours = parse_hours(hours_slept);
    if hours > 7.0 {
        0
    } else if hours >= 6.0 {
        1
    } else if hours >= 5.0 {
        2
    } else {
        3
    }
}

/// C4, habitual sleep efficiency: reported sleep over the bed window.
///
/// A wake time at or before the bedtime is read as crossing midnight, so
/// textually identical bed and wake times produce a full 24-hour window.
/// A non-positive window or zero reported sleep scores the degenerate 3.
pub fn score_sleep_efficiency(bedtime: &str, wake_time: &str, hours_slept: &str) -> u8 {
    let bed_minutes = parse_time(bedtime).minutes_from_midnight() as f64;
    let mut wake_minutes = parse_time(wake_time).minutes_from_midnight() as f64;

    if wake_minutes <= bed_minutes {
        wake_minutes += 24.0 * 60.0;
    }

    let in_bed_minutes = wake_minutes - bed_minutes;
    if in_bed_minutes <= 0.0 {
        return 3;
    }

    let actual_sleep_minutes = parse_hours(hours_slept) * 60.0;
    if actual_sleep_minutes <= 0.0 {
        return 3;
    }

    let efficiency = actual_sleep_minutes / in_bed_minutes * 100.0;
    if efficiency >= 85.0 {
        0
    } else if efficiency >= 75.0 {
        1
    } else if efficiency >= 65.0 {
        2
    } else {
        3
    }
}

/// C5, sleep disturbances: the nine sub-item frequencies summed, then banded.
pub fn score_disturbances(disturbances: &[String; 9]) -> u8 {
    let sum = disturbances
        .iter()
        .map(|text| parse_frequency(text))
        .sum::<u8>();
    map_sum_to_score(sum, [9, 18])
}

/// C6, sleeping medication: the frequency code scores directly.
pub fn score_medication_use(medication_frequency: &str) -> u8 {
    parse_frequency(medication_frequency)
}

/// C7, daytime dysfunction: trouble staying awake plus the four-level
/// daytime-trouble scale.
pub fn score_daytime_dysfunction(staying_awake_frequency: &str, daytime_trouble: &str) -> u8 {
    let sum = parse_frequency(staying_awake_frequency) + parse_daytime_trouble(daytime_trouble);
    map_sum_to_score(sum, [2, 4])
}
