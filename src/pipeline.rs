//! Batch scoring orchestration
//!
//! This module provides the public API for scoring questionnaire batches.
//! Records lacking an identifier are dropped, everything else is scored
//! independently and emitted in input order. Scoring itself is total; the
//! only fallible entry point is the one that also reads a file.

use std::path::Path;

use crate::error::ExtractError;
use crate::extractor;
use crate::scorer;
use crate::types::{ComponentScores, RawRecord, ScoreResult};

/// Score a single record, or `None` when it has no identifier.
pub fn score_record(record: &RawRecord) -> Option<ScoreResult> {
    if record.id.is_empty() {
        return None;
    }

    let scores = ComponentScores {
        sleep_quality: scorer::score_sleep_quality(&record.quality_rating),
        sleep_latency: scorer::score_sleep_latency(
            &record.minutes_to_sleep,
            &record.latency_frequency,
        ),
        sleep_duration: scorer::score_sleep_duration(&record.hours_slept),
        sleep_efficiency: scorer::score_sleep_efficiency(
            &record.bedtime,
            &record.wake_time,
            &record.hours_slept,
        ),
        disturbances: scorer::score_disturbances(&record.disturbances),
        medication_use: scorer::score_medication_use(&record.medication_frequency),
        daytime_dysfunction: scorer::score_daytime_dysfunction(
            &record.staying_awake_frequency,
            &record.daytime_trouble,
        ),
    };

    Some(ScoreResult {
        id: record.id.clone(),
        name: record.name.clone(),
        age: record.age.clone(),
        total_score: scores.total(),
        scores,
    })
}

/// Score a batch; output order matches the order of the valid input records.
pub fn score_batch(records: &[RawRecord]) -> Vec<ScoreResult> {
    records.iter().filter_map(score_record).collect()
}

/// Read a questionnaire CSV export and score every valid row.
///
/// Convenience entry point chaining the extractor and the scorer.
pub fn score_csv_path(path: &Path) -> Result<Vec<ScoreResult>, ExtractError> {
    let records = extractor::extract_csv_path(path)?;
    Ok(score_batch(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_record(id: &str) -> RawRecord {
        RawRecord {
            id: id.to_string(),
            name: "王芳".to_string(),
            age: "34".to_string(),
            bedtime: "23:00".to_string(),
            minutes_to_sleep: "10".to_string(),
            wake_time: "07:00".to_string(),
            hours_slept: "7".to_string(),
            latency_frequency: "无".to_string(),
            disturbances: std::array::from_fn(|_| "无".to_string()),
            quality_rating: "很好".to_string(),
            medication_frequency: "无".to_string(),
            staying_awake_frequency: "无".to_string(),
            daytime_trouble: "无".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn healthy_sleeper_end_to_end() {
        let result = score_record(&filled_record("1")).expect("record has an id");

        assert_eq!(result.id, "1");
        assert_eq!(result.name, "王芳");
        assert_eq!(result.age, "34");
        assert_eq!(result.scores.sleep_quality, 0);
        assert_eq!(result.scores.sleep_latency, 0);
        // exactly 7 hours is the 6-7 band, not the >7 band
        assert_eq!(result.scores.sleep_duration, 1);
        // 420 minutes over a 480-minute window is 87.5%
        assert_eq!(result.scores.sleep_efficiency, 0);
        assert_eq!(result.scores.disturbances, 0);
        assert_eq!(result.scores.medication_use, 0);
        assert_eq!(result.scores.daytime_dysfunction, 0);
        assert_eq!(result.total_score, 1);
    }

    #[test]
    fn total_equals_component_sum() {
        let mut record = filled_record("7");
        record.hours_slept = "5.5".to_string();
        record.quality_rating = "较差".to_string();
        record.medication_frequency = "1-2".to_string();
        record.daytime_trouble = "经常".to_string();

        let result = score_record(&record).expect("record has an id");
        let sum: u8 = result.scores.as_array().iter().sum();
        assert_eq!(result.total_score, sum);
        assert!(result.total_score <= 21);
    }

    #[test]
    fn record_without_id_is_dropped() {
        assert!(score_record(&filled_record("")).is_none());
    }

    #[test]
    fn batch_drops_invalid_and_keeps_order() {
        let records = vec![
            filled_record("3"),
            filled_record(""),
            filled_record("1"),
            filled_record(""),
            filled_record("2"),
        ];

        let results = score_batch(&records);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn empty_strings_score_conservatively() {
        let record = RawRecord {
            id: "9".to_string(),
            ..Default::default()
        };

        let result = score_record(&record).expect("record has an id");
        assert_eq!(result.scores.sleep_quality, 0);
        assert_eq!(result.scores.sleep_latency, 0);
        // no reported hours: duration bottoms out, efficiency is degenerate
        assert_eq!(result.scores.sleep_duration, 3);
        assert_eq!(result.scores.sleep_efficiency, 3);
        assert_eq!(result.total_score, 6);
    }
}
