/*!
 * Command-line interface for recolor
 */

use std::io;
use std::time::Instant;

use clap::Parser;

use codemap::config::{RecolorArgs, RecolorConfig};
use codemap::error::CodemapError;
use codemap::report::{ReportFormat, Reporter};
use codemap::rewriter::TextRewriter;

fn main() -> io::Result<()> {
    let args = RecolorArgs::parse();

    let config = RecolorConfig::from_args(args);
    config.validate()?;

    let start_time = Instant::now();
    let rewriter = TextRewriter::from_config(&config);
    let summary = rewriter.run(&config.roots)?;

    if config.stats {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        reporter.print_rewrite_report(start_time.elapsed(), &summary.stats);
    }

    // Only reachable with --keep-going
    if summary.stats.failed > 0 {
        return Err(CodemapError::RewriteBatch(summary.stats.failed).into());
    }

    Ok(())
}
