// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Carbontrace CLI
//!
//! Command-line interface for assessing the carbon footprint of plain-language
//! activity descriptions.

use anyhow::{Context, Result};
use carbontrace_core::{
    EmissionFactorTable, FootprintConfig, FootprintContext, FootprintReport, Lexicon,
    PhraseRecognizer,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carbontrace")]
#[command(about = "Carbontrace - carbon emissions from everyday activity descriptions", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emission factor CSV (overrides factors_path from the config)
    #[arg(short, long)]
    factors: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and price a description
    Assess {
        /// Activity description (reads --input or stdin when omitted)
        text: Option<String>,

        /// Read the description from a file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the activity-quantity pairs found in a description
    Parse {
        /// Activity description (reads --input or stdin when omitted)
        text: Option<String>,

        /// Read the description from a file
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// List phrase -> activity mappings
    Lexicon {
        /// Only show phrases for this activity
        #[arg(long)]
        activity: Option<String>,
    },

    /// List loaded emission factors
    Factors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging on stderr so reports stay machine-readable
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => FootprintConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FootprintConfig::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Assess {
            text,
            input,
            format,
            output,
        } => {
            // Reference data is loaded before any input is read
            let ctx = FootprintContext::from_config(&config, cli.factors.as_deref())
                .context("Failed to initialize assessment context")?;
            let text = read_text(text, input.as_deref())?;
            let report = ctx.assess(&text)?;
            info!(
                activities = report.results.len(),
                total_kg = report.total_emissions,
                "assessment finished"
            );

            let rendered = match format {
                OutputFormat::Json => report.to_json_pretty()? + "\n",
                OutputFormat::Csv => report.to_csv_string()?,
                OutputFormat::Table => render_table(&report, config.report.precision),
            };
            emit(&rendered, output.as_deref())?;
        }

        Commands::Parse { text, input } => {
            let lexicon = config.lexicon.build().context("Failed to build lexicon")?;
            let text = read_text(text, input.as_deref())?;
            anyhow::ensure!(!text.trim().is_empty(), "Please enter some activities.");

            let parsed = carbontrace_core::parse_activities(&PhraseRecognizer::new(&lexicon), &text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::Lexicon { activity } => {
            let lexicon = config.lexicon.build().context("Failed to build lexicon")?;
            print!("{}", render_lexicon(&lexicon, activity.as_deref()));
        }

        Commands::Factors => {
            let path = cli
                .factors
                .as_deref()
                .or(config.factors_path.as_deref())
                .context("No emission factor file configured (set factors_path or pass --factors)")?;
            let table = EmissionFactorTable::from_csv_path(path)
                .with_context(|| format!("Failed to load factors from {}", path.display()))?;
            for row in table.rows() {
                println!("{:<32} {}", row.activity, row.factor);
            }
        }
    }

    Ok(())
}

/// Positional text, else the input file, else stdin
fn read_text(text: Option<String>, input: Option<&Path>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn render_table(report: &FootprintReport, precision: usize) -> String {
    if report.is_empty() {
        return format!(
            "No activities with quantities recognized.\n{}\n",
            report.summary_line(precision)
        );
    }

    let width = report
        .results
        .iter()
        .map(|r| r.activity.len())
        .max()
        .unwrap_or(0)
        .max("Activity".len());

    let mut out = format!(
        "{:<width$}  {:>12}  {:>16}\n",
        "Activity", "Quantity", "Emissions (kg)"
    );
    for r in &report.results {
        out.push_str(&format!(
            "{:<width$}  {:>12}  {:>16.*}\n",
            r.activity, r.quantity, precision, r.emissions
        ));
    }
    out.push('\n');
    out.push_str(&report.summary_line(precision));
    out.push('\n');
    out
}

fn render_lexicon(lexicon: &Lexicon, activity: Option<&str>) -> String {
    let mut out = String::new();
    for entry in lexicon.entries() {
        if activity.map_or(true, |a| entry.activity.eq_ignore_ascii_case(a)) {
            out.push_str(&format!("{:<20} -> {}\n", entry.phrase, entry.activity));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbontrace_core::{EmissionFactorRow, EmissionResult, ParsedActivity};

    #[test]
    fn test_render_table() {
        let report = FootprintReport::new(
            vec![ParsedActivity::new("driving", 50.0)],
            vec![EmissionResult {
                activity: "driving".to_string(),
                quantity: 50.0,
                emissions: 9.6,
            }],
            9.6,
        );
        let table = render_table(&report, 2);
        let lines: Vec<_> = table.lines().collect();
        assert!(lines[0].starts_with("Activity"));
        assert!(lines[1].starts_with("driving"));
        assert!(lines[1].ends_with("9.60"));
        assert_eq!(lines.last().copied(), Some("Your total emissions: 9.60 kg CO2"));
    }

    #[test]
    fn test_render_empty_table() {
        let report = FootprintReport::new(Vec::new(), Vec::new(), 0.0);
        assert!(render_table(&report, 2).contains("Your total emissions: 0.00 kg CO2"));
    }

    #[test]
    fn test_render_lexicon_filter() {
        let listing = render_lexicon(&Lexicon::builtin(), Some("Cycling"));
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.lines().all(|l| l.ends_with("-> cycling")));
    }

    #[test]
    fn test_read_text_prefers_argument_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "took the bus 4 km").unwrap();

        assert_eq!(read_text(Some("drove 3".into()), Some(path.as_path())).unwrap(), "drove 3");
        assert_eq!(read_text(None, Some(path.as_path())).unwrap(), "took the bus 4 km");
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let report = FootprintReport::from_parsed(
            vec![ParsedActivity::new("bus travel", 10.0)],
            &EmissionFactorTable::from_rows([EmissionFactorRow::new("bus travel", 0.1)]),
        );
        emit(&report.to_csv_string().unwrap(), Some(path.as_path())).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("activity,quantity,emissions\nbus travel,10"));
    }

    #[test]
    fn test_cli_parses_assess() {
        let cli = Cli::try_parse_from([
            "carbontrace",
            "--factors",
            "f.csv",
            "assess",
            "drove 5 km",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.factors, Some(PathBuf::from("f.csv")));
        match cli.command {
            Commands::Assess { text, format, .. } => {
                assert_eq!(text.as_deref(), Some("drove 5 km"));
                assert_eq!(format, OutputFormat::Csv);
            }
            _ => panic!("expected assess"),
        }
    }
}
