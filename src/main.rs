use std::path::{Path, PathBuf};
use std::process::ExitCode;

use appreport::{
    AnalyticsBundle, Cadence, DEFAULT_CHART_ENDPOINT, Error, HttpChartBackend, ReportConfig,
    ReportRequest, render_markdown_report, render_pdf_report,
};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Markdown,
    Pdf,
}

/// Compose an app marketing report from an analytics bundle.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Analytics bundle JSON
    #[arg(short, long)]
    input: PathBuf,

    /// App name shown on the report
    #[arg(short, long)]
    name: String,

    #[arg(long, default_value = "weekly", value_parser = parse_cadence)]
    cadence: Cadence,

    /// Free-form period label, e.g. "Mar 3 - Mar 9"
    #[arg(long)]
    period: Option<String>,

    /// Locale code (en, es, de, ja, zh, ko); anything else renders in English
    #[arg(short, long)]
    locale: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
    format: Format,

    #[arg(short, long)]
    output: PathBuf,

    #[arg(long, env = "APPREPORT_CHART_ENDPOINT", default_value = DEFAULT_CHART_ENDPOINT)]
    chart_endpoint: String,

    /// Report date as YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

fn parse_cadence(s: &str) -> Result<Cadence, String> {
    Cadence::parse(s).ok_or_else(|| format!("unknown cadence {s:?} (daily, weekly, monthly)"))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("{s:?}: {e}"))
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    std::fs::write(path, bytes)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let bundle = match AnalyticsBundle::from_path(&cli.input) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let mut request = ReportRequest::new(cli.name, cli.cadence);
    if let Some(period) = cli.period {
        request = request.period(period);
    }
    if let Some(locale) = cli.locale {
        request = request.locale(locale);
    }
    if let Some(date) = cli.date {
        request = request.generated_on(date);
    }

    let (bytes, error, empty) = match cli.format {
        Format::Markdown => {
            let outcome = render_markdown_report(&bundle, &request);
            (outcome.output.into_bytes(), outcome.error, outcome.empty)
        }
        Format::Pdf => {
            let config = match ReportConfig::builder().chart_endpoint(cli.chart_endpoint).build() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let backend = match HttpChartBackend::from_config(&config) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let outcome = render_pdf_report(&bundle, &request, &backend, &config).await;
            (outcome.output, outcome.error, outcome.empty)
        }
    };

    if let Some(e) = error {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    if empty {
        eprintln!("No ratings, analytics or narrative in {}, nothing written", cli.input.display());
        return ExitCode::SUCCESS;
    }
    if let Err(e) = write_output(&cli.output, &bytes) {
        eprintln!("Error: {}: {e}", cli.output.display());
        return ExitCode::FAILURE;
    }
    eprintln!("Wrote {} ({} bytes)", cli.output.display(), bytes.len());
    ExitCode::SUCCESS
}
