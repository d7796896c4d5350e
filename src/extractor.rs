//! Tabular row extraction
//!
//! Maps the fixed 23-column questionnaire export onto [`RawRecord`]s. The
//! first row is a header and is skipped; structural problems (too few
//! columns, no data rows) surface as one batch-level error instead of
//! per-row failures. Individual cells are never validated here: missing
//! cells become `""` and flow to the scoring core, which degrades them to
//! conservative scores.

use std::io::Read;
use std::path::Path;

use crate::error::ExtractError;
use crate::types::RawRecord;

/// Minimum number of columns a data row must carry.
///
/// Column layout, 0-indexed: id, time taken, date, name, age, Q1-Q4,
/// Q5a-Q5j, Q6-Q9.
pub const MIN_COLUMNS: usize = 23;

/// Human-readable column names in sheet order, for schema listings
pub const COLUMN_NAMES: [&str; MIN_COLUMNS] = [
    "id",
    "time_taken",
    "date",
    "name",
    "age",
    "q1_bedtime",
    "q2_minutes_to_sleep",
    "q3_wake_time",
    "q4_hours_slept",
    "q5a_latency_frequency",
    "q5b_wake_during_night",
    "q5c_bathroom",
    "q5d_breathing",
    "q5e_cough_snore",
    "q5f_too_cold",
    "q5g_too_hot",
    "q5h_bad_dreams",
    "q5i_pain",
    "q5j_other",
    "q6_quality_rating",
    "q7_medication_frequency",
    "q8_staying_awake_frequency",
    "q9_daytime_trouble",
];

/// Build one record from an ordered row of cells; absent cells become "".
pub fn record_from_cells(cells: &[String]) -> RawRecord {
    let cell = |i: usize| cells.get(i).cloned().unwrap_or_default();

    RawRecord {
        id: cell(0),
        time_taken: cell(1),
        date: cell(2),
        name: cell(3),
        age: cell(4),
        bedtime: cell(5),
        minutes_to_sleep: cell(6),
        wake_time: cell(7),
        hours_slept: cell(8),
        latency_frequency: cell(9),
        disturbances: std::array::from_fn(|i| cell(10 + i)),
        quality_rating: cell(19),
        medication_frequency: cell(20),
        staying_awake_frequency: cell(21),
        daytime_trouble: cell(22),
    }
}

/// Extract records from in-memory rows, header row included.
///
/// The first row is skipped as the header. The column-count check runs
/// against the first data row, mirroring how exported sheets keep a uniform
/// width.
pub fn extract_rows(rows: &[Vec<String>]) -> Result<Vec<RawRecord>, ExtractError> {
    let data_rows = rows.get(1..).unwrap_or(&[]);

    if data_rows.is_empty() {
        return Err(ExtractError::NoDataRows);
    }
    if data_rows[0].len() < MIN_COLUMNS {
        return Err(ExtractError::ColumnCount {
            found: data_rows[0].len(),
        });
    }

    Ok(data_rows.iter().map(|row| record_from_cells(row)).collect())
}

/// Extract records from CSV data behind any reader.
pub fn extract_csv_reader<R: Read>(reader: R) -> Result<Vec<RawRecord>, ExtractError> {
    // The csv reader consumes the header row itself; ragged rows are allowed
    // and padded to "" during mapping.
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let cells: Vec<String> = row.iter().map(str::to_string).collect();

        // The first data row's width is authoritative for the whole sheet.
        if records.is_empty() && cells.len() < MIN_COLUMNS {
            return Err(ExtractError::ColumnCount { found: cells.len() });
        }

        records.push(record_from_cells(&cells));
    }

    if records.is_empty() {
        return Err(ExtractError::NoDataRows);
    }

    Ok(records)
}

/// Extract records from a CSV file on disk.
pub fn extract_csv_path(path: &Path) -> Result<Vec<RawRecord>, ExtractError> {
    let file = std::fs::File::open(path).map_err(csv::Error::from)?;
    extract_csv_reader(file)
}
