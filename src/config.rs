/*!
 * Configuration handling for codemap and recolor
 */

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::filter::IgnoreRules;
use crate::types::SubstitutionRule;
use crate::utils::{file_name_of, DEFAULT_OUTPUT_FILE, DEFAULT_REWRITE_SUFFIXES, DEFAULT_SUBSTITUTIONS};
use crate::{bail, ensure};

/// Command-line arguments for codemap
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codemap",
    version = env!("CARGO_PKG_VERSION"),
    about = "Write a project tree and the contents of every file into one text report",
    long_about = "Walks a directory, skips build output, dependencies, binaries and lock files, and writes an indented tree followed by the contents of every remaining file into a single text report."
)]
pub struct Args {
    /// Directory to map
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Report file name
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Comma-separated directory names to skip, on top of the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_dirs: Vec<String>,

    /// Comma-separated file extensions to skip, on top of the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_extensions: Vec<String>,

    /// Comma-separated file names to skip, on top of the defaults
    #[clap(long, value_delimiter = ',')]
    pub ignore_files: Vec<String>,

    /// Comma-separated glob patterns matched against file and directory names
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Also honor .gitignore files
    #[clap(long)]
    pub respect_gitignore: bool,

    /// Print a summary table when done
    #[clap(long)]
    pub stats: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration for codemap
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to map
    pub target_dir: PathBuf,

    /// Report file path
    pub output_file: PathBuf,

    /// Ignore sets; always contain the report's own file name
    pub rules: IgnoreRules,

    /// Extra glob patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Whether to honor .gitignore files
    pub respect_gitignore: bool,

    /// Whether to print a summary table
    pub stats: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let mut rules = IgnoreRules::default()
            .with_dirs(args.ignore_dirs)
            .with_extensions(args.ignore_extensions)
            .with_files(args.ignore_files);

        if let Some(exe) = std::env::current_exe().ok().map(|p| file_name_of(&p)) {
            rules.files.insert(exe);
        }

        Self::new(PathBuf::from(args.directory_path), PathBuf::from(args.output_file))
            .with_rules(rules)
            .with_ignore_patterns(args.ignore_patterns)
            .with_gitignore(args.respect_gitignore)
            .with_stats(args.stats)
    }

    /// Configuration with default rules for the given target and report
    pub fn new(target_dir: PathBuf, output_file: PathBuf) -> Self {
        Self {
            target_dir,
            output_file,
            rules: IgnoreRules::default(),
            ignore_patterns: Vec::new(),
            respect_gitignore: false,
            stats: false,
        }
        .exclude_output()
    }

    /// Replace the ignore rules; the report file stays excluded
    pub fn with_rules(mut self, rules: IgnoreRules) -> Self {
        self.rules = rules;
        self.exclude_output()
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn with_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn with_stats(mut self, stats: bool) -> Self {
        self.stats = stats;
        self
    }

    fn exclude_output(mut self) -> Self {
        let name = file_name_of(&self.output_file);
        if !name.is_empty() {
            self.rules.files.insert(name);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure_dir(&self.target_dir, "Target directory")?;

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            if !parent.exists() && parent != Path::new("") {
                bail!(
                    PathNotFound,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output file is a directory: {}",
            self.output_file.display()
        );

        Ok(())
    }
}

/// Command-line arguments for recolor
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "recolor",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replace literal text in source files in place",
    long_about = "Walks the given directories and, in every file whose name ends with one of the suffixes, replaces each search text with its replacement. Files are only written when their content changes."
)]
pub struct RecolorArgs {
    /// Directories to process
    #[clap(required = true)]
    pub roots: Vec<PathBuf>,

    /// Substitution as SEARCH=REPLACE, applied in order (repeatable)
    #[clap(long = "replace", value_name = "SEARCH=REPLACE", value_parser = parse_substitution)]
    pub replacements: Vec<SubstitutionRule>,

    /// File name suffix to process (repeatable)
    #[clap(long = "suffix")]
    pub suffixes: Vec<String>,

    /// Continue with the remaining files after a failure
    #[clap(long)]
    pub keep_going: bool,

    /// Report what would change without writing
    #[clap(long)]
    pub dry_run: bool,

    /// Print a summary table when done
    #[clap(long)]
    pub stats: bool,
}

/// Application configuration for recolor
#[derive(Clone, Debug)]
pub struct RecolorConfig {
    /// Directories to process
    pub roots: Vec<PathBuf>,

    /// Ordered substitutions
    pub rules: Vec<SubstitutionRule>,

    /// File name suffixes to process
    pub suffixes: Vec<String>,

    /// Continue after a failed file instead of halting
    pub keep_going: bool,

    /// Do not write anything
    pub dry_run: bool,

    /// Whether to print a summary table
    pub stats: bool,
}

impl RecolorConfig {
    /// Create configuration from command-line arguments
    pub fn from_args(args: RecolorArgs) -> Self {
        let mut config = Self::new(args.roots);
        if !args.replacements.is_empty() {
            config.rules = args.replacements;
        }
        if !args.suffixes.is_empty() {
            config.suffixes = args.suffixes;
        }
        config.keep_going = args.keep_going;
        config.dry_run = args.dry_run;
        config.stats = args.stats;
        config
    }

    /// Configuration with the default substitutions and suffixes
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            rules: DEFAULT_SUBSTITUTIONS.clone(),
            suffixes: DEFAULT_REWRITE_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            keep_going: false,
            dry_run: false,
            stats: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.roots.is_empty(), Config, "No root directories given");
        for root in &self.roots {
            ensure_dir(root, "Root directory")?;
        }

        ensure!(!self.suffixes.is_empty(), Config, "No file suffixes given");
        ensure!(
            self.suffixes.iter().all(|s| !s.is_empty()),
            Config,
            "File suffixes must not be empty"
        );
        ensure!(
            self.rules.iter().all(|r| !r.search.is_empty()),
            Config,
            "Search text must not be empty"
        );

        Ok(())
    }
}

fn ensure_dir(path: &Path, what: &str) -> Result<()> {
    if !path.exists() || !path.is_dir() {
        bail!(PathNotFound, "{} not found: {}", what, path.display());
    }
    Ok(())
}

/// Parse a `SEARCH=REPLACE` pair
pub fn parse_substitution(value: &str) -> std::result::Result<SubstitutionRule, String> {
    match value.split_once('=') {
        Some((search, _)) if search.is_empty() => {
            Err(format!("empty search text in '{}'", value))
        }
        Some((search, replace)) => Ok(SubstitutionRule::new(search, replace)),
        None => Err(format!("expected SEARCH=REPLACE, got '{}'", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_file_is_self_excluded() {
        let config = Config::new(PathBuf::from("."), PathBuf::from("out/report.txt"));
        assert!(config.rules.files.contains("report.txt"));

        // Custom rules cannot drop the report name
        let config = config.with_rules(IgnoreRules::empty());
        assert!(config.rules.files.contains("report.txt"));
        assert_eq!(config.rules.files.len(), 1);
    }

    #[test]
    fn test_args_extend_defaults() {
        let args = Args::parse_from([
            "codemap",
            "--ignore-dirs",
            "target,tmp",
            "--ignore-extensions",
            "LOG",
        ]);
        let config = Config::from_args(args);

        assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
        assert!(config.rules.dirs.contains("target"));
        assert!(config.rules.dirs.contains("node_modules"));
        assert!(config.rules.extensions.contains(".log"));
        assert!(config.rules.files.contains(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_validate_missing_target() {
        let config = Config::new(
            PathBuf::from("/definitely/not/here"),
            PathBuf::from("map.txt"),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_substitution() {
        assert_eq!(
            parse_substitution("indigo=cyan").unwrap(),
            SubstitutionRule::new("indigo", "cyan")
        );
        assert_eq!(
            parse_substitution("a==b").unwrap(),
            SubstitutionRule::new("a", "=b")
        );
        assert_eq!(
            parse_substitution("gray=").unwrap(),
            SubstitutionRule::new("gray", "")
        );
        assert!(parse_substitution("=x").is_err());
        assert!(parse_substitution("nothing").is_err());
    }

    #[test]
    fn test_recolor_args() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path().to_string_lossy().to_string();

        let args = RecolorArgs::parse_from(["recolor", root.as_str()]);
        let config = RecolorConfig::from_args(args);
        assert_eq!(config.rules, *DEFAULT_SUBSTITUTIONS);
        assert_eq!(config.suffixes, vec![".tsx", ".ts"]);
        assert!(!config.keep_going);
        assert!(config.validate().is_ok());

        let args = RecolorArgs::parse_from([
            "recolor",
            root.as_str(),
            "--replace",
            "red=blue",
            "--suffix",
            ".css",
            "--keep-going",
        ]);
        let config = RecolorConfig::from_args(args);
        assert_eq!(config.rules, vec![SubstitutionRule::new("red", "blue")]);
        assert_eq!(config.suffixes, vec![".css"]);
        assert!(config.keep_going);
    }

    #[test]
    fn test_recolor_requires_roots() {
        assert!(RecolorArgs::try_parse_from(["recolor"]).is_err());
    }
}
