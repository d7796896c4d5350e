//! Result encoding and export
//!
//! Read-only projections of a scored batch for the downstream presentation
//! and export collaborators: a JSON batch report carrying provenance and
//! per-component aggregates (the feed for tables and charts), and a flat
//! CSV of the result rows.

use std::io::Write;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ScoreResult, SleepRating};
use crate::{ENGINE_NAME, ENGINE_VERSION};

/// Component display labels in rubric order, matching
/// [`ComponentScores::as_array`](crate::types::ComponentScores::as_array)
pub const COMPONENT_LABELS: [&str; 7] = [
    "Sleep Quality",
    "Sleep Latency",
    "Sleep Duration",
    "Sleep Efficiency",
    "Disturbances",
    "Medication",
    "Daytime Dysfunction",
];

/// Report metadata identifying the producing engine run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub run_id: String,
}

/// Mean component scores across a batch, the feed for radar-style charts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentAverages {
    pub sleep_quality: f64,
    pub sleep_latency: f64,
    pub sleep_duration: f64,
    pub sleep_efficiency: f64,
    pub disturbances: f64,
    pub medication_use: f64,
    pub daytime_dysfunction: f64,
}

/// Aggregate view of one scored batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub respondent_count: usize,
    /// Respondents whose total lands above the clinical cutoff
    pub poor_sleeper_count: usize,
    pub component_averages: ComponentAverages,
    pub results: Vec<ScoreResult>,
}

/// Encoder producing batch reports with a stable run identity
pub struct ReportEncoder {
    run_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create an encoder with a fresh run id
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a caller-supplied run id
    pub fn with_run_id(run_id: String) -> Self {
        Self { run_id }
    }

    /// Assemble the aggregate report for a scored batch
    pub fn encode(&self, results: &[ScoreResult]) -> BatchReport {
        BatchReport {
            producer: ReportProducer {
                name: ENGINE_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                run_id: self.run_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            respondent_count: results.len(),
            poor_sleeper_count: results
                .iter()
                .filter(|r| r.rating() == SleepRating::Poor)
                .count(),
            component_averages: component_averages(results),
            results: results.to_vec(),
        }
    }

    /// Encode the report as pretty-printed JSON
    pub fn encode_to_json(&self, results: &[ScoreResult]) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.encode(results))
    }
}

/// Mean of each component across the batch; all zeros for an empty batch.
pub fn component_averages(results: &[ScoreResult]) -> ComponentAverages {
    if results.is_empty() {
        return ComponentAverages::default();
    }

    let mut sums = [0u32; 7];
    for result in results {
        for (slot, value) in sums.iter_mut().zip(result.scores.as_array()) {
            *slot += value as u32;
        }
    }

    let n = results.len() as f64;
    ComponentAverages {
        sleep_quality: sums[0] as f64 / n,
        sleep_latency: sums[1] as f64 / n,
        sleep_duration: sums[2] as f64 / n,
        sleep_efficiency: sums[3] as f64 / n,
        disturbances: sums[4] as f64 / n,
        medication_use: sums[5] as f64 / n,
        daytime_dysfunction: sums[6] as f64 / n,
    }
}

/// Write the result rows as CSV with a header row.
pub fn write_csv<W: Write>(results: &[ScoreResult], writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "id",
        "name",
        "age",
        "sleep_quality",
        "sleep_latency",
        "sleep_duration",
        "sleep_efficiency",
        "disturbances",
        "medication_use",
        "daytime_dysfunction",
        "total_score",
        "rating",
    ])?;

    for result in results {
        let scores = result.scores.as_array();
        let mut row = vec![result.id.clone(), result.name.clone(), result.age.clone()];
        row.extend(scores.iter().map(|s| s.to_string()));
        row.push(result.total_score.to_string());
        row.push(result.rating().as_str().to_string());
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render the result rows as CSV in memory.
pub fn to_csv_string(results: &[ScoreResult]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_csv(results, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentScores;

    fn result(id: &str, scores: [u8; 7]) -> ScoreResult {
        let scores = ComponentScores {
            sleep_quality: scores[0],
            sleep_latency: scores[1],
            sleep_duration: scores[2],
            sleep_efficiency: scores[3],
            disturbances: scores[4],
            medication_use: scores[5],
            daytime_dysfunction: scores[6],
        };
        ScoreResult {
            id: id.to_string(),
            name: format!("respondent-{id}"),
            age: "40".to_string(),
            total_score: scores.total(),
            scores,
        }
    }

    #[test]
    fn averages_over_batch() {
        let results = vec![result("1", [0, 0, 1, 0, 0, 0, 0]), result("2", [2, 2, 3, 2, 1, 0, 2])];
        let averages = component_averages(&results);

        assert_eq!(averages.sleep_quality, 1.0);
        assert_eq!(averages.sleep_duration, 2.0);
        assert_eq!(averages.medication_use, 0.0);
        assert_eq!(averages.daytime_dysfunction, 1.0);
    }

    #[test]
    fn averages_of_empty_batch_are_zero() {
        let averages = component_averages(&[]);
        assert_eq!(averages.sleep_quality, 0.0);
        assert_eq!(averages.disturbances, 0.0);
    }

    #[test]
    fn report_counts_poor_sleepers() {
        let results = vec![
            result("1", [0, 0, 1, 0, 0, 0, 0]),  // total 1, good
            result("2", [2, 2, 3, 2, 1, 0, 2]),  // total 12, poor
            result("3", [1, 1, 1, 1, 1, 0, 0]),  // total 5, good
        ];

        let report = ReportEncoder::with_run_id("run-1".to_string()).encode(&results);
        assert_eq!(report.respondent_count, 3);
        assert_eq!(report.poor_sleeper_count, 1);
        assert_eq!(report.producer.run_id, "run-1");
        assert_eq!(report.producer.name, ENGINE_NAME);
        assert_eq!(report.results.len(), 3);
    }

    #[test]
    fn csv_has_header_and_one_row_per_result() {
        let results = vec![result("1", [0, 0, 1, 0, 0, 0, 0]), result("2", [2, 2, 3, 2, 1, 0, 2])];
        let csv = to_csv_string(&results).expect("in-memory write");
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("id,name,age,sleep_quality"));
        assert!(lines[1].ends_with(",1,good"));
        assert!(lines[2].ends_with(",12,poor"));
    }
}
