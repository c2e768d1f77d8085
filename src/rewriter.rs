/*!
 * In-place literal substitution over source files
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::RecolorConfig;
use crate::error::{CodemapError, Result};
use crate::filter::SuffixFilter;
use crate::report::RewriteStats;
use crate::types::{
    EntryKind, FileOutcome, RewriteOutcome, SubstitutionRule, WalkEntry, WalkError,
};
use crate::walker::walk;

/// What to do after a file fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop at the first failure
    Halt,
    /// Record the failure and move on
    Continue,
}

/// Applies ordered literal substitutions to matching files
pub struct TextRewriter {
    rules: Vec<SubstitutionRule>,
    filter: Arc<SuffixFilter>,
    policy: ErrorPolicy,
    dry_run: bool,
}

/// Everything a run did
#[derive(Debug, Clone, Default)]
pub struct RewriteSummary {
    pub outcomes: Vec<FileOutcome>,
    pub stats: RewriteStats,
}

impl TextRewriter {
    pub fn new(rules: Vec<SubstitutionRule>, filter: SuffixFilter) -> Self {
        Self {
            rules,
            filter: Arc::new(filter),
            policy: ErrorPolicy::Halt,
            dry_run: false,
        }
    }

    /// Build a rewriter from recolor's configuration
    pub fn from_config(config: &RecolorConfig) -> Self {
        let policy = if config.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Halt
        };

        Self::new(config.rules.clone(), SuffixFilter::new(config.suffixes.clone()))
            .with_policy(policy)
            .with_dry_run(config.dry_run)
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Apply every rule in order, each replacing all non-overlapping occurrences
    pub fn apply(&self, content: &str) -> String {
        self.rules
            .iter()
            .fold(content.to_string(), |text, rule| {
                text.replace(&rule.search, &rule.replace)
            })
    }

    /// Rewrite one file if any rule changes it
    pub fn rewrite_file(&self, path: &Path) -> RewriteOutcome {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return RewriteOutcome::Failed(e.to_string()),
        };

        let new_content = self.apply(&content);
        if new_content == content {
            return RewriteOutcome::Unchanged;
        }

        if !self.dry_run {
            if let Err(e) = fs::write(path, new_content) {
                return RewriteOutcome::Failed(e.to_string());
            }
        }

        RewriteOutcome::Updated
    }

    /// Visit every matching file under each root, in order.
    ///
    /// Prints a notice per updated file. Entries the walk could not read are
    /// failures like any other. Under [`ErrorPolicy::Halt`] the first failure
    /// is returned as an error; files rewritten before it stay rewritten.
    pub fn run(&self, roots: &[PathBuf]) -> Result<RewriteSummary> {
        let mut summary = RewriteSummary::default();

        for root in roots {
            self.process(walk(root, self.filter.clone(), false), &mut summary)?;
        }

        Ok(summary)
    }

    /// Rewrite walked files in order, recording each outcome in `summary`
    pub fn process<I>(&self, entries: I, summary: &mut RewriteSummary) -> Result<()>
    where
        I: IntoIterator<Item = std::result::Result<WalkEntry, WalkError>>,
    {
        for entry in entries {
            let (path, outcome) = match entry {
                Ok(entry) => {
                    if entry.kind != EntryKind::File || entry.depth == 0 {
                        continue;
                    }
                    summary.stats.scanned += 1;
                    let outcome = self.rewrite_file(&entry.path);
                    (entry.path, outcome)
                }
                Err(e) => (e.path, RewriteOutcome::Failed(e.message)),
            };

            match &outcome {
                RewriteOutcome::Updated => {
                    summary.stats.updated += 1;
                    if self.dry_run {
                        println!("Would update {}", path.display());
                    } else {
                        println!("Updated {}", path.display());
                    }
                }
                RewriteOutcome::Unchanged => summary.stats.unchanged += 1,
                RewriteOutcome::Failed(reason) => {
                    summary.stats.failed += 1;
                    if self.policy == ErrorPolicy::Halt {
                        return Err(CodemapError::Rewrite {
                            path,
                            reason: reason.clone(),
                        });
                    }
                    eprintln!("Error processing {}: {}", path.display(), reason);
                }
            }

            summary.outcomes.push(FileOutcome { path, outcome });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    use tempfile::tempdir;

    use crate::utils::DEFAULT_SUBSTITUTIONS;

    fn default_rewriter() -> TextRewriter {
        TextRewriter::new(DEFAULT_SUBSTITUTIONS.clone(), SuffixFilter::default())
    }

    #[test]
    fn test_apply_default_rules() {
        let rewriter = default_rewriter();
        assert_eq!(
            rewriter.apply("bg-indigo-600 text-amber-500 border-indigo-200"),
            "bg-cyan-600 text-emerald-500 border-cyan-200"
        );
        // Case-sensitive
        assert_eq!(rewriter.apply("Indigo AMBER"), "Indigo AMBER");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let rewriter = TextRewriter::new(
            vec![
                SubstitutionRule::new("red", "blue"),
                SubstitutionRule::new("blue", "green"),
            ],
            SuffixFilter::default(),
        );
        assert_eq!(rewriter.apply("red blue"), "green green");
    }

    #[test]
    fn test_rewrite_is_stable() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("card.tsx");
        fs::write(&path, r#"<div className="bg-indigo-50 text-amber-500" />"#)?;

        let rewriter = default_rewriter();
        assert_eq!(rewriter.rewrite_file(&path), RewriteOutcome::Updated);
        let content = fs::read_to_string(&path)?;
        assert_eq!(content, r#"<div className="bg-cyan-50 text-emerald-500" />"#);
        assert!(!content.contains("indigo") && !content.contains("amber"));

        assert_eq!(rewriter.rewrite_file(&path), RewriteOutcome::Unchanged);

        Ok(())
    }

    #[test]
    fn test_dry_run_leaves_file() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let path = temp_dir.path().join("page.ts");
        fs::write(&path, "indigo")?;

        let rewriter = default_rewriter().with_dry_run(true);
        assert_eq!(rewriter.rewrite_file(&path), RewriteOutcome::Updated);
        assert_eq!(fs::read_to_string(&path)?, "indigo");

        Ok(())
    }

    #[test]
    fn test_run_skips_other_suffixes() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("nested/deeper"))?;
        fs::write(root.join("nested/deeper/a.ts"), "amber")?;
        fs::write(root.join("b.tsx.bak"), "amber")?;
        fs::write(root.join("c.css"), "amber")?;
        fs::write(root.join("d.tsx"), "plain")?;

        let summary = default_rewriter().run(&[root.to_path_buf()])?;

        assert_eq!(summary.stats.scanned, 2);
        assert_eq!(summary.stats.updated, 1);
        assert_eq!(summary.stats.unchanged, 1);
        assert_eq!(fs::read_to_string(root.join("nested/deeper/a.ts"))?, "emerald");
        assert_eq!(fs::read_to_string(root.join("b.tsx.bak"))?, "amber");
        assert_eq!(fs::read_to_string(root.join("c.css"))?, "amber");

        Ok(())
    }

    #[test]
    fn test_error_policies() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::write(root.join("a.ts"), [0xffu8, 0xfe, b'a'])?;
        fs::write(root.join("b.ts"), "indigo")?;

        let err = default_rewriter().run(&[root.to_path_buf()]).unwrap_err();
        assert!(matches!(err, CodemapError::Rewrite { ref path, .. } if path.ends_with("a.ts")));
        // Halted before reaching b.ts
        assert_eq!(fs::read_to_string(root.join("b.ts"))?, "indigo");

        let summary = default_rewriter()
            .with_policy(ErrorPolicy::Continue)
            .run(&[root.to_path_buf()])?;
        assert_eq!(summary.stats.failed, 1);
        assert_eq!(summary.stats.updated, 1);
        assert!(matches!(summary.outcomes[0].outcome, RewriteOutcome::Failed(_)));
        assert_eq!(fs::read_to_string(root.join("b.ts"))?, "cyan");

        Ok(())
    }

    #[test]
    fn test_walk_errors_follow_policy() -> io::Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::write(root.join("b.ts"), "amber")?;

        let entries = || {
            vec![
                Err(WalkError {
                    path: root.join("locked"),
                    message: "Permission denied (os error 13)".to_string(),
                }),
                Ok(WalkEntry {
                    path: root.join("b.ts"),
                    depth: 1,
                    kind: EntryKind::File,
                }),
            ]
        };

        let mut summary = RewriteSummary::default();
        let err = default_rewriter()
            .process(entries(), &mut summary)
            .unwrap_err();
        assert!(matches!(err, CodemapError::Rewrite { ref path, .. } if path.ends_with("locked")));
        assert_eq!(summary.stats.failed, 1);
        assert_eq!(fs::read_to_string(root.join("b.ts"))?, "amber");

        let mut summary = RewriteSummary::default();
        default_rewriter()
            .with_policy(ErrorPolicy::Continue)
            .process(entries(), &mut summary)
            .unwrap();
        assert_eq!(summary.stats.failed, 1);
        assert_eq!(summary.stats.updated, 1);
        assert_eq!(summary.outcomes[0].path, root.join("locked"));
        assert_eq!(
            summary.outcomes[0].outcome,
            RewriteOutcome::Failed("Permission denied (os error 13)".to_string())
        );
        assert_eq!(fs::read_to_string(root.join("b.ts"))?, "emerald");

        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_halts_run() -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        let locked = root.join("locked");
        fs::create_dir(&locked)?;
        fs::write(locked.join("x.ts"), "indigo")?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        // Privileged users can still list it
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
            return Ok(());
        }

        let result = default_rewriter().run(&[root.to_path_buf()]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        assert!(matches!(result, Err(CodemapError::Rewrite { ref path, .. }) if path.starts_with(&locked)));
        assert_eq!(fs::read_to_string(locked.join("x.ts"))?, "indigo");

        Ok(())
    }
}
