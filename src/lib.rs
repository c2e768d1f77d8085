/*!
 * codemap - Map a project into a single text report, and bulk-rewrite
 * literal text in source files
 *
 * The `codemap` binary writes an indented tree of a directory followed by
 * the contents of every file that survives the ignore rules. The `recolor`
 * binary applies ordered literal substitutions to matching files in place.
 */

pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod rewriter;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, RecolorConfig};
pub use error::{CodemapError, Result};
pub use filter::{EntryFilter, IgnoreRules, PathFilter, SuffixFilter};
pub use report::{DumpStats, ReportFormat, Reporter, RewriteStats};
pub use rewriter::{ErrorPolicy, RewriteSummary, TextRewriter};
pub use scanner::Scanner;
pub use tree::TreeRenderer;
pub use types::{
    DirectoryNode, EntryKind, FileContent, FileEntry, FileOutcome, RewriteOutcome, ScanResult,
    SubstitutionRule, WalkEntry, WalkError,
};
pub use writer::ReportWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
