//! price-scraper CLI - scrape a listing page and convert its prices
//!
//! ## Example Usage
//!
//! ```bash
//! # Ten books from the default catalogue, priced in Kenyan shillings
//! price-scraper
//!
//! # Twenty products in euros, written to ./out
//! price-scraper --currency EUR --max-products 20 --output-dir out
//!
//! # Work from a saved page, print only
//! price-scraper --input page.html --no-files
//!
//! # Ask for currency and count at a prompt
//! price-scraper --interactive
//! ```

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use price_scraper::config::Config;
use price_scraper::export::{
    timestamped_path, ChartSink, CsvSink, ExportSink, JsonSink, TableSink, CHART_FILE_STEM,
    RECORDS_FILE_STEM,
};
use price_scraper::extract::RecordExtractor;
use price_scraper::fetch::{DocumentSource, FileSource};
use price_scraper::fx::{CurrencyConverter, RateTable};
use price_scraper::pipeline::{Outcome, Pipeline, PipelineReport, RunRequest};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

/// price-scraper: product prices in the currency you want
#[derive(Parser)]
#[command(name = "price-scraper")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scrape product prices and convert them into another currency", long_about = None)]
struct Cli {
    /// Target currency code
    #[arg(short = 'c', long)]
    currency: Option<String>,

    /// Maximum number of products to scrape
    #[arg(short = 'n', long)]
    max_products: Option<usize>,

    /// Listing page URL
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Read the listing page from a file instead of fetching it
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Directory for CSV, JSON and chart files
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Print results only, write no files
    #[arg(long)]
    no_files: bool,

    /// Skip the comparison chart
    #[arg(long)]
    no_chart: bool,

    /// Prompt for currency and product count
    #[arg(long)]
    interactive: bool,

    /// List the supported currencies and exit
    #[arg(long)]
    list_currencies: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration
    fn apply_to(&self, config: &mut Config) {
        if let Some(currency) = &self.currency {
            config.target_currency = currency.clone();
        }
        if let Some(max) = self.max_products {
            config.max_products = max;
        }
        if let Some(url) = &self.url {
            config.source_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.no_files {
            config.write_files = false;
        }
        if self.no_chart {
            config.render_chart = false;
        }
    }
}

/// Shows a spinner while the wrapped source is fetching
struct SpinnerSource {
    inner: Box<dyn DocumentSource>,
}

impl DocumentSource for SpinnerSource {
    fn describe(&self) -> String {
        self.inner.describe()
    }

    fn fetch(&self) -> price_scraper::error::Result<String> {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        pb.set_message(format!("Connecting to {}...", self.inner.describe()));
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = self.inner.fetch();
        pb.finish_and_clear();
        result
    }
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref());
    cli.apply_to(&mut config);

    let table = config.rate_table().context("invalid rate table in configuration")?;

    if cli.list_currencies {
        print_currencies(&table);
        return Ok(());
    }

    println!("{}", "Price Scraper & Currency Converter".cyan().bold());
    println!("{}", "=".repeat(50).cyan());

    if cli.interactive {
        println!();
        println!("Available currencies: {}", table.codes().join(", "));
        prompt_run_settings(&mut config)?;
    }

    let source = make_source(&cli, &config)?;
    let extractor =
        RecordExtractor::with_config(&config.selectors).context("invalid selector configuration")?;
    let pipeline = Pipeline::new(
        Box::new(SpinnerSource { inner: source }),
        extractor,
        CurrencyConverter::new(table),
    );

    if cli.verbose {
        println!("  {} {}", "Source:".bold(), pipeline_source_label(&cli, &config));
        println!("  {} {}", "Products:".bold(), config.max_products);
        println!("  {} {}", "Currency:".bold(), config.target_currency);
        println!("  {} {}", "Output dir:".bold(), config.output_dir.display());
        println!();
    }

    let (mut sinks, files) = make_sinks(&config);
    let mut sink_refs: Vec<&mut dyn ExportSink> = sinks.iter_mut().map(|s| s.as_mut() as &mut dyn ExportSink).collect();
    let request = RunRequest::new(config.target_currency.clone(), config.max_products);
    let report = pipeline.run(&request, &mut sink_refs)?;

    print_summary(&report, &files);
    Ok(())
}

fn pipeline_source_label(cli: &Cli, config: &Config) -> String {
    match &cli.input {
        Some(path) => path.display().to_string(),
        None => config.source_url.clone(),
    }
}

fn make_source(cli: &Cli, config: &Config) -> anyhow::Result<Box<dyn DocumentSource>> {
    if let Some(path) = &cli.input {
        return Ok(Box::new(FileSource::new(path)));
    }

    #[cfg(feature = "http")]
    {
        let source = price_scraper::fetch::HttpSource::new(&config.source_url, config.timeout())
            .context("could not set up HTTP client")?;
        Ok(Box::new(source))
    }

    #[cfg(not(feature = "http"))]
    {
        anyhow::bail!(
            "built without the `http` feature; use --input to read {} from a file",
            config.source_url
        )
    }
}

/// Sinks for this run plus the files they will write, keyed by sink name
fn make_sinks(config: &Config) -> (Vec<Box<dyn ExportSink>>, Vec<(String, PathBuf)>) {
    let now = Utc::now();
    let mut sinks: Vec<Box<dyn ExportSink>> = vec![Box::new(TableSink::stdout())];
    let mut files = Vec::new();

    if config.write_files {
        let csv_path = timestamped_path(&config.output_dir, RECORDS_FILE_STEM, "csv", now);
        let json_path = timestamped_path(&config.output_dir, RECORDS_FILE_STEM, "json", now);
        let csv = CsvSink::new(&csv_path);
        let json = JsonSink::new(&json_path);
        files.push((csv.name().to_string(), csv_path));
        files.push((json.name().to_string(), json_path));
        sinks.push(Box::new(csv));
        sinks.push(Box::new(json));
    }

    if config.render_chart {
        let mut chart = ChartSink::stdout();
        if config.write_files {
            let chart_path = timestamped_path(&config.output_dir, CHART_FILE_STEM, "txt", now);
            chart = chart.save_to(&chart_path);
            files.push((chart.name().to_string(), chart_path));
        }
        sinks.push(Box::new(chart));
    }

    (sinks, files)
}

fn prompt_run_settings(config: &mut Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let currency = prompt(
        &mut input,
        &format!("Enter target currency (default: {}): ", config.target_currency),
    )?;
    if !currency.is_empty() {
        config.target_currency = currency.to_uppercase();
    }

    let count = prompt(
        &mut input,
        &format!(
            "Enter number of products to scrape (default: {}): ",
            config.max_products
        ),
    )?;
    if let Some(n) = parse_count(&count) {
        config.max_products = n;
    }
    println!();
    Ok(())
}

fn prompt(input: &mut impl BufRead, question: &str) -> anyhow::Result<String> {
    print!("{}", question);
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// A count typed at the prompt; anything but plain digits keeps the default
fn parse_count(text: &str) -> Option<usize> {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}

fn print_currencies(table: &RateTable) {
    println!("{}", "Supported currencies".cyan().bold());
    println!("{}", "====================".cyan());
    for code in table.codes() {
        let rate = table.rate(code).unwrap_or(1.0);
        println!("  {} {:>10.4} per {}", code.bright_green().bold(), rate, table.base());
    }
}

/// Planned files whose sink did not fail
fn saved_files<'a>(files: &'a [(String, PathBuf)], failed_sinks: &[String]) -> Vec<&'a PathBuf> {
    files
        .iter()
        .filter(|(sink, _)| !failed_sinks.contains(sink))
        .map(|(_, path)| path)
        .collect()
}

fn print_summary(report: &PipelineReport, files: &[(String, PathBuf)]) {
    println!();
    if report.currency_substituted() {
        println!(
            "{} Invalid currency '{}'. Used default: {}",
            "Warning:".yellow(),
            report.requested_currency,
            report.target_currency
        );
    }

    match report.outcome {
        Outcome::Completed => {
            if !report.failed_sinks.is_empty() {
                println!(
                    "{} Some exports failed: {}",
                    "Warning:".yellow(),
                    report.failed_sinks.join(", ")
                );
            }
            println!(
                "{} Scraped {} products, prices in {}",
                "✓".green().bold(),
                report.records.len(),
                report.target_currency.bright_green()
            );
            for file in saved_files(files, &report.failed_sinks) {
                println!("  {} {}", "Saved:".bold(), file.display());
            }
        }
        Outcome::NoProducts | Outcome::NoConversions => {
            println!("{} Nothing exported: {}", "✗".yellow().bold(), report.outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["price-scraper"]).unwrap();
        assert!(cli.currency.is_none());
        assert!(!cli.interactive);
    }

    #[test]
    fn test_run_flags() {
        let cli = Cli::try_parse_from([
            "price-scraper",
            "--currency",
            "eur",
            "-n",
            "5",
            "--input",
            "page.html",
            "--no-files",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.target_currency, "eur");
        assert_eq!(config.max_products, 5);
        assert!(!config.write_files);
        assert!(config.render_chart);
        assert_eq!(cli.input, Some(PathBuf::from("page.html")));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("25"), Some(25));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("-3"), None);
        assert_eq!(parse_count("ten"), None);
    }

    #[test]
    fn test_prompt_reads_line() {
        let mut input = io::Cursor::new("  gbp \n");
        assert_eq!(prompt(&mut input, "? ").unwrap(), "gbp");
    }

    #[test]
    fn test_sinks_without_files() {
        let config = Config {
            write_files: false,
            ..Config::default()
        };
        let (sinks, files) = make_sinks(&config);
        assert!(files.is_empty());
        let names: Vec<&str> = sinks.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["table", "chart"]);
    }

    #[test]
    fn test_sinks_with_files() {
        let config = Config {
            output_dir: PathBuf::from("out"),
            ..Config::default()
        };
        let (sinks, files) = make_sinks(&config);
        assert_eq!(sinks.len(), 4);
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|(_, f)| f.starts_with("out")));
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["csv", "json", "chart"]);
    }

    #[test]
    fn test_failed_sinks_not_listed_as_saved() {
        let files = vec![
            ("csv".to_string(), PathBuf::from("out/a.csv")),
            ("json".to_string(), PathBuf::from("out/a.json")),
        ];
        let saved = saved_files(&files, &["csv".to_string()]);
        assert_eq!(saved, vec![&PathBuf::from("out/a.json")]);
        assert_eq!(saved_files(&files, &[]).len(), 2);
    }
}
