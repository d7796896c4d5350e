//! psqi CLI - Command-line interface for the PSQI scoring engine
//!
//! Commands:
//! - score: Score a questionnaire export and emit the results
//! - validate: Check an export for structural problems before scoring
//! - schema: Print the expected input column layout

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use psqi_score::export::{self, ReportEncoder};
use psqi_score::extractor::{self, COLUMN_NAMES, MIN_COLUMNS};
use psqi_score::types::{RawRecord, ScoreResult};
use psqi_score::{score_batch, ENGINE_NAME, ENGINE_VERSION};

/// psqi - scoring engine for Pittsburgh Sleep Quality Index exports
#[derive(Parser)]
#[command(name = "psqi")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score PSQI questionnaire exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a questionnaire export and emit the results
    Score {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format; defaults to a table on a terminal, JSON otherwise
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Run id recorded in report provenance (defaults to a fresh id)
        #[arg(long)]
        run_id: Option<String>,
    },

    /// Check an export for structural problems before scoring
    Validate {
        /// Input CSV path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output the validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the expected input column layout
    Schema {
        /// Output the layout as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON array of score results
    Json,
    /// Pretty-printed JSON array
    JsonPretty,
    /// Flat CSV of the result rows
    Csv,
    /// Aggregate batch report with provenance and averages
    Report,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PsqiCliError> {
    match cli.command {
        Commands::Score {
            input,
            output,
            format,
            run_id,
        } => cmd_score(&input, &output, format, run_id),
        Commands::Validate { input, json } => cmd_validate(&input, json),
        Commands::Schema { json } => cmd_schema(json),
    }
}

fn cmd_score(
    input: &Path,
    output: &Path,
    format: Option<OutputFormat>,
    run_id: Option<String>,
) -> Result<(), PsqiCliError> {
    let records = read_records(input)?;
    let results = score_batch(&records);

    let to_stdout = output.to_string_lossy() == "-";
    let format = format.unwrap_or_else(|| {
        if to_stdout && atty::is(atty::Stream::Stdout) {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    });

    let rendered = render_results(&results, format, run_id)?;

    if to_stdout {
        print!("{rendered}");
    } else {
        fs::write(output, rendered)?;
    }

    Ok(())
}

fn cmd_validate(input: &Path, json: bool) -> Result<(), PsqiCliError> {
    let records = read_records(input)?;

    let missing_id_rows: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.id.is_empty())
        .map(|(index, _)| index)
        .collect();

    let report = ValidationReport {
        data_rows: records.len(),
        scoreable_rows: records.len() - missing_id_rows.len(),
        dropped_rows: missing_id_rows.len(),
        missing_id_rows,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Data rows:      {}", report.data_rows);
        println!("Scoreable rows: {}", report.scoreable_rows);
        println!("Dropped rows:   {}", report.dropped_rows);

        if !report.missing_id_rows.is_empty() {
            println!("\nRows without an identifier (0-indexed, header excluded):");
            for index in &report.missing_id_rows {
                println!("  - row {index}");
            }
        }
    }

    Ok(())
}

fn cmd_schema(json: bool) -> Result<(), PsqiCliError> {
    if json {
        let schema = serde_json::json!({
            "min_columns": MIN_COLUMNS,
            "header_rows": 1,
            "columns": COLUMN_NAMES,
        });
        println!("{}", serde_json::to_string_pretty(&schema)?);
    } else {
        println!("Input layout: {MIN_COLUMNS}-column questionnaire export");
        println!("Row 1 is a header and is skipped.");
        println!();
        for (index, name) in COLUMN_NAMES.iter().enumerate() {
            println!("  {index:>2}  {name}");
        }
    }

    Ok(())
}

// Helper functions

fn read_records(input: &Path) -> Result<Vec<RawRecord>, PsqiCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(extractor::extract_csv_reader(buffer.as_bytes())?)
    } else {
        Ok(extractor::extract_csv_path(input)?)
    }
}

fn render_results(
    results: &[ScoreResult],
    format: OutputFormat,
    run_id: Option<String>,
) -> Result<String, PsqiCliError> {
    match format {
        OutputFormat::Table => Ok(render_table(results)),
        OutputFormat::Json => Ok(serde_json::to_string(results)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(results)? + "\n"),
        OutputFormat::Csv => Ok(export::to_csv_string(results)?),
        OutputFormat::Report => {
            let encoder = match run_id {
                Some(id) => ReportEncoder::with_run_id(id),
                None => ReportEncoder::new(),
            };
            Ok(encoder.encode_to_json(results)? + "\n")
        }
    }
}

fn render_table(results: &[ScoreResult]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{ENGINE_NAME} results ({} respondents)\n", results.len()));
    output.push_str(&format!(
        "{:<8} {:<16} {:<5} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>6} {:<6}\n",
        "id", "name", "age", "c1", "c2", "c3", "c4", "c5", "c6", "c7", "total", "rating"
    ));

    for result in results {
        let s = result.scores.as_array();
        output.push_str(&format!(
            "{:<8} {:<16} {:<5} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>3} {:>6} {:<6}\n",
            result.id,
            result.name,
            result.age,
            s[0],
            s[1],
            s[2],
            s[3],
            s[4],
            s[5],
            s[6],
            result.total_score,
            result.rating().as_str(),
        ));
    }

    output
}

// Error types

#[derive(Debug)]
enum PsqiCliError {
    Io(io::Error),
    Extract(psqi_score::ExtractError),
    Json(serde_json::Error),
    Csv(csv::Error),
}

impl From<io::Error> for PsqiCliError {
    fn from(e: io::Error) -> Self {
        PsqiCliError::Io(e)
    }
}

impl From<psqi_score::ExtractError> for PsqiCliError {
    fn from(e: psqi_score::ExtractError) -> Self {
        PsqiCliError::Extract(e)
    }
}

impl From<serde_json::Error> for PsqiCliError {
    fn from(e: serde_json::Error) -> Self {
        PsqiCliError::Json(e)
    }
}

impl From<csv::Error> for PsqiCliError {
    fn from(e: csv::Error) -> Self {
        PsqiCliError::Csv(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<PsqiCliError> for CliError {
    fn from(e: PsqiCliError) -> Self {
        match e {
            PsqiCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PsqiCliError::Extract(e) => CliError {
                code: "EXTRACT_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'psqi schema' to see the expected column layout".to_string()),
            },
            PsqiCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            PsqiCliError::Csv(e) => CliError {
                code: "CSV_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check the CSV output destination".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    data_rows: usize,
    scoreable_rows: usize,
    dropped_rows: usize,
    missing_id_rows: Vec<usize>,
}
