//! splitbook CLI - split textbook PDFs into per-chapter files

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use splitbook::{
    choose_strategy, find_boundaries, find_boundaries_with_fallback, parse_range_entry,
    split_with_strategy, Boundary, Error, FallbackChoice, PageSource, PdfSource, SplitOptions,
    SplitReport, SplitStrategy, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS,
};

#[derive(Parser)]
#[command(name = "splitbook")]
#[command(version)]
#[command(about = "Split textbook PDFs into per-chapter files", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory (default: <stem>_split beside the input)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split by automatically detected chapter boundaries
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Comma-separated boundary keywords (default: Reading,Chapter,Lesson)
        #[arg(short, long, value_name = "LIST")]
        keywords: Option<String>,

        /// Output filename prefix
        #[arg(long, default_value = "Reading")]
        prefix: String,

        /// Fail instead of prompting when detection comes up short
        #[arg(long)]
        non_interactive: bool,
    },

    /// Split into fixed chunks of N pages
    Pages {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pages per output file
        #[arg(short, long, value_name = "N")]
        per: usize,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output filename prefix
        #[arg(long, default_value = "Reading")]
        prefix: String,
    },

    /// Split into N near-equal parts
    Parts {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of parts
        #[arg(short, long, value_name = "N")]
        count: usize,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output filename prefix
        #[arg(long, default_value = "Reading")]
        prefix: String,
    },

    /// Split by explicit page ranges (1-indexed, inclusive, e.g. 1-20 21-45)
    Ranges {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page ranges, e.g. "1-20" "21-45" "50"
        #[arg(value_name = "RANGE", required = true)]
        ranges: Vec<String>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Output filename prefix
        #[arg(long, default_value = "Reading")]
        prefix: String,
    },

    /// Scan for chapter boundaries without writing anything
    Scan {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Comma-separated boundary keywords
        #[arg(short, long, value_name = "LIST")]
        keywords: Option<String>,

        /// Print boundaries as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Split {
            input,
            output,
            keywords,
            prefix,
            non_interactive,
        }) => cmd_split(
            &input,
            output.as_deref(),
            keywords.as_deref(),
            &prefix,
            non_interactive,
        ),
        Some(Commands::Pages {
            input,
            per,
            output,
            prefix,
        }) => cmd_strategy(&input, SplitStrategy::FixedPages(per), output.as_deref(), &prefix),
        Some(Commands::Parts {
            input,
            count,
            output,
            prefix,
        }) => cmd_strategy(&input, SplitStrategy::FixedParts(count), output.as_deref(), &prefix),
        Some(Commands::Ranges {
            input,
            ranges,
            output,
            prefix,
        }) => cmd_ranges(&input, &ranges, output.as_deref(), &prefix),
        Some(Commands::Scan {
            input,
            keywords,
            json,
        }) => cmd_scan(&input, keywords.as_deref(), json),
        None => {
            // Default behavior: auto-split if input is provided
            if let Some(input) = cli.input {
                cmd_split(&input, cli.output.as_deref(), None, "Reading", false)
            } else {
                println!("{}", "Usage: splitbook <FILE> [-o DIR]".yellow());
                println!("       splitbook --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_keyword_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract every page's text with a progress bar.
fn scan_pages(source: &PdfSource) -> Vec<String> {
    let total = source.page_count();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} pages {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("scanning");

    let mut texts = Vec::with_capacity(total);
    for i in 0..total {
        texts.push(source.extract_text(i));
        pb.inc(1);
    }
    pb.finish_and_clear();
    texts
}

fn detect_boundaries(texts: &[String], keywords: Option<&str>) -> Vec<Boundary> {
    match keywords {
        Some(list) => {
            let custom = parse_keyword_list(list);
            let refs: Vec<&str> = custom.iter().map(String::as_str).collect();
            find_boundaries(texts, &refs)
        }
        None => find_boundaries_with_fallback(texts, PRIMARY_KEYWORDS, SECONDARY_KEYWORDS),
    }
}

fn cmd_split(
    input: &Path,
    output: Option<&Path>,
    keywords: Option<&str>,
    prefix: &str,
    non_interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    println!(
        "{} {} ({} pages)",
        "Input:".bold(),
        input.display(),
        source.page_count()
    );

    let texts = scan_pages(&source);
    let boundaries = detect_boundaries(&texts, keywords);

    for b in &boundaries {
        println!(
            "  {} {} {} at page {}{}",
            "found:".green(),
            b.label,
            b.number,
            b.page_index + 1,
            if b.title.is_empty() {
                String::new()
            } else {
                format!(" - {}", truncate(&b.title, 40))
            }
        );
    }

    let strategy = match choose_strategy(boundaries, None) {
        Ok(strategy) => strategy,
        Err(Error::DetectionInsufficient { found, .. }) => {
            println!();
            println!(
                "{} only {} boundaries detected",
                "Warning:".yellow().bold(),
                found
            );
            if non_interactive {
                return Err(Box::new(Error::DetectionInsufficient {
                    found,
                    min: splitbook::MIN_BOUNDARIES,
                }));
            }
            prompt_fallback_strategy(&source, &texts)?
        }
        Err(e) => return Err(Box::new(e)),
    };

    let options = split_options(output, prefix);
    let report = split_with_strategy(&source, &strategy, &options)?;
    print_report(&report);
    Ok(())
}

/// Interactive fallback menu when detection found too little.
fn prompt_fallback_strategy(
    source: &PdfSource,
    texts: &[String],
) -> Result<SplitStrategy, Box<dyn std::error::Error>> {
    println!();
    println!("Options:");
    println!("  1. Try different keywords");
    println!("  2. Split by fixed pages per reading");
    println!("  3. Manually specify page ranges");
    println!();

    let choice = prompt("Choose option [2]: ")?;
    match choice.as_str() {
        "1" => {
            let list = prompt("Enter keywords (comma-separated): ")?;
            let custom = parse_keyword_list(&list);
            let refs: Vec<&str> = custom.iter().map(String::as_str).collect();
            let boundaries = find_boundaries(texts, &refs);
            println!("  {} boundaries found", boundaries.len());
            match choose_strategy(boundaries, None) {
                Ok(strategy) => Ok(strategy),
                // Still short: drop back into the same menu.
                Err(Error::DetectionInsufficient { .. }) => prompt_fallback_strategy(source, texts),
                Err(e) => Err(Box::new(e)),
            }
        }
        "3" => {
            let pairs = prompt_manual_ranges(source.page_count())?;
            Ok(choose_strategy(vec![], Some(FallbackChoice::Manual(pairs)))?)
        }
        _ => {
            let per = prompt("Enter pages per reading: ")?;
            let per: usize = per
                .parse()
                .map_err(|_| Error::RangeParse(format!("invalid page count '{per}'")))?;
            Ok(choose_strategy(vec![], Some(FallbackChoice::FixedPages(per)))?)
        }
    }
}

/// Collect manual ranges, re-prompting on malformed entries.
fn prompt_manual_ranges(total_pages: usize) -> io::Result<Vec<(usize, usize)>> {
    println!();
    println!("PDF has {total_pages} pages");
    println!("Enter page ranges (1-indexed, format: start-end), 'q' when done");
    println!();

    let mut pairs = Vec::new();
    loop {
        let entry = prompt(&format!("Reading {} page range (or 'q'): ", pairs.len() + 1))?;
        if entry.eq_ignore_ascii_case("q") {
            break;
        }
        match parse_range_entry(&entry) {
            Ok(pair) => pairs.push(pair),
            Err(e) => {
                println!("  {} {}", "Error:".red(), e);
                println!("  Please try again");
            }
        }
    }
    Ok(pairs)
}

fn cmd_strategy(
    input: &Path,
    strategy: SplitStrategy,
    output: Option<&Path>,
    prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    println!(
        "{} {} ({} pages)",
        "Input:".bold(),
        input.display(),
        source.page_count()
    );

    let options = split_options(output, prefix);
    let report = split_with_strategy(&source, &strategy, &options)?;
    print_report(&report);
    Ok(())
}

fn cmd_ranges(
    input: &Path,
    ranges: &[String],
    output: Option<&Path>,
    prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pairs: Vec<(usize, usize)> = ranges
        .iter()
        .map(|r| parse_range_entry(r))
        .collect::<Result<_, _>>()?;
    cmd_strategy(input, SplitStrategy::Manual(pairs), output, prefix)
}

fn cmd_scan(
    input: &Path,
    keywords: Option<&str>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = PdfSource::open(input)?;
    let texts = scan_pages(&source);
    let boundaries = detect_boundaries(&texts, keywords);

    if json {
        println!("{}", serde_json::to_string_pretty(&boundaries)?);
        return Ok(());
    }

    if boundaries.is_empty() {
        println!("{}", "No boundaries found".yellow());
        return Ok(());
    }

    println!("{}", "Detected boundaries".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());
    for b in &boundaries {
        println!(
            "  {:<8} {:>3}  page {:>4}  {}",
            b.label,
            b.number,
            b.page_index + 1,
            truncate(&b.title, 40).dimmed()
        );
    }
    println!(
        "\n{} boundaries across {} pages",
        boundaries.len(),
        source.page_count()
    );
    Ok(())
}

fn split_options(output: Option<&Path>, prefix: &str) -> SplitOptions {
    let mut options = SplitOptions::new().with_prefix(prefix);
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }
    options
}

fn print_report(report: &SplitReport) {
    println!();
    println!("{}", "Output files:".green().bold());
    for file in &report.written {
        println!(
            "  {} {} ({} pages: {}-{})",
            "├─".dimmed(),
            file.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file.page_count,
            file.range.start + 1,
            file.range.end
        );
    }
    for failed in &report.failed {
        println!(
            "  {} {} {}",
            "├─".dimmed(),
            failed.filename,
            format!("skipped: {}", failed.reason).red()
        );
    }
    println!(
        "  {} {} file(s) in {}",
        "└─".dimmed(),
        report.written.len(),
        report.output_dir.display()
    );
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{cut}…")
    }
}
