/*!
 * Command-line interface for codemap
 */

use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use codemap::config::{Args, Config};
use codemap::report::{ReportFormat, Reporter};
use codemap::writer::ReportWriter;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codemap", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    let target = fs::canonicalize(&config.target_dir)?;
    println!("Starting mapping of: {}", target.display());

    let progress = ProgressBar::new(0);
    match ProgressStyle::default_bar().template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len}") {
        Ok(style) => progress.set_style(style),
        Err(e) => eprintln!("Warning: Failed to set progress style: {}", e),
    }
    progress.set_prefix("Dumping");

    let start_time = Instant::now();
    let writer = ReportWriter::new(config.clone(), Arc::new(progress.clone()));
    let stats = writer.write()?;
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    println!("Done! Codebase mapped to: {}", config.output_file.display());

    if config.stats {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        reporter.print_dump_report(&config.output_file.display().to_string(), duration, &stats);
    }

    Ok(())
}
