//! Core types for the PSQI scoring pipeline
//!
//! This module defines the data structures that flow through each stage of the
//! pipeline: raw questionnaire records, normalized clock times, component
//! scores, and the per-respondent result.

use serde::{Deserialize, Serialize};

/// One respondent's unprocessed questionnaire answers.
///
/// Every field is an opaque string exactly as it appeared in the uploaded
/// sheet. The extractor coerces missing cells to `""` before a record reaches
/// the scoring core, so the core never has to reason about nulls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Respondent identifier; records with an empty id are dropped from output
    pub id: String,
    /// Time the respondent spent filling the questionnaire
    pub time_taken: String,
    /// Submission date as written in the sheet
    pub date: String,
    /// Respondent name, carried through to the result unchanged
    pub name: String,
    /// Respondent age, carried through to the result unchanged
    pub age: String,
    /// Q1: usual bedtime, free text ("23:00", "23点30分")
    pub bedtime: String,
    /// Q2: minutes needed to fall asleep
    pub minutes_to_sleep: String,
    /// Q3: usual wake time
    pub wake_time: String,
    /// Q4: hours of actual sleep per night
    pub hours_slept: String,
    /// Q5a: cannot-fall-asleep-within-30-minutes frequency, feeds the latency component
    pub latency_frequency: String,
    /// Q5b-Q5j: the nine disturbance frequency sub-items
    pub disturbances: [String; 9],
    /// Q6: self-rated overall sleep quality
    pub quality_rating: String,
    /// Q7: sleeping-medication frequency
    pub medication_frequency: String,
    /// Q8: trouble-staying-awake frequency
    pub staying_awake_frequency: String,
    /// Q9: daytime-enthusiasm trouble, a four-level phrase scale
    pub daytime_trouble: String,
}

/// Wall-clock time of day parsed from a free-text answer, no timezone.
///
/// The parser is permissive and does not clamp out-of-range segments; the
/// efficiency component absorbs oversized values through its midnight
/// wraparound and non-positive-window guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Minutes elapsed since midnight
    pub fn minutes_from_midnight(&self) -> u32 {
        self.hour * 60 + self.minute
    }
}

/// The seven PSQI component sub-scores, each in 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// C1: subjective sleep quality
    pub sleep_quality: u8,
    /// C2: sleep latency
    pub sleep_latency: u8,
    /// C3: sleep duration
    pub sleep_duration: u8,
    /// C4: habitual sleep efficiency
    pub sleep_efficiency: u8,
    /// C5: sleep disturbances
    pub disturbances: u8,
    /// C6: use of sleeping medication
    pub medication_use: u8,
    /// C7: daytime dysfunction
    pub daytime_dysfunction: u8,
}

impl ComponentScores {
    /// Sum of the seven components (0-21)
    pub fn total(&self) -> u8 {
        self.sleep_quality
            + self.sleep_latency
            + self.sleep_duration
            + self.sleep_efficiency
            + self.disturbances
            + self.medication_use
            + self.daytime_dysfunction
    }

    /// Component values in rubric order, for tabular export and charting
    pub fn as_array(&self) -> [u8; 7] {
        [
            self.sleep_quality,
            self.sleep_latency,
            self.sleep_duration,
            self.sleep_efficiency,
            self.disturbances,
            self.medication_use,
            self.daytime_dysfunction,
        ]
    }
}

/// Scored outcome for one respondent. Produced once per valid record and
/// immutable thereafter; downstream collaborators only read it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub id: String,
    pub name: String,
    pub age: String,
    /// The seven component sub-scores
    pub scores: ComponentScores,
    /// Sum of the seven component scores (0-21)
    pub total_score: u8,
}

impl ScoreResult {
    /// Global rating at the conventional clinical cutoff: totals above 5
    /// indicate poor sleep.
    pub fn rating(&self) -> SleepRating {
        if self.total_score > 5 {
            SleepRating::Poor
        } else {
            SleepRating::Good
        }
    }
}

/// Two-level interpretation of the total score used by the results views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepRating {
    Good,
    Poor,
}

impl SleepRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            SleepRating::Good => "good",
            SleepRating::Poor => "poor",
        }
    }
}
