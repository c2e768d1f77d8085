/*!
 * Report writer: tree section followed by the contents of every file
 */

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::config::Config;
use crate::error::Result;
use crate::report::DumpStats;
use crate::scanner::Scanner;
use crate::tree::TreeRenderer;
use crate::types::{FileContent, FileEntry, ScanResult};
use crate::utils::BINARY_PLACEHOLDER;

/// Width of the rule under each file header
pub const FILE_RULE_WIDTH: usize = 20;

/// Writes the report for a configured target
pub struct ReportWriter {
    /// Writer configuration
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Write the tree section and the file contents to the output file,
    /// replacing anything already there.
    ///
    /// The tree and the contents come from two independent scans. Files that
    /// cannot be read are recorded as placeholders and never stop the run.
    pub fn write(&self) -> Result<DumpStats> {
        let scanner = Scanner::new(self.config.clone());
        let file = File::create(&self.config.output_file)?;
        let mut out = BufWriter::new(file);
        let mut stats = DumpStats::default();

        println!("Generating file tree...");
        let tree_scan = scanner.scan()?;
        let tree = TreeRenderer::render(&tree_scan);
        out.write_all(tree.as_bytes())?;
        stats.directories = tree_scan.directories.len();
        stats.bytes_written += tree.len() as u64;

        println!("Reading file contents...");
        let content_scan = scanner.scan()?;
        self.progress.set_length(content_scan.file_count() as u64);
        let written = self.dump_contents(&content_scan, &mut out, &mut stats)?;
        stats.bytes_written += written;

        out.flush()?;
        Ok(stats)
    }

    /// Append one section per retained file; returns the number of bytes written
    fn dump_contents<W: Write>(
        &self,
        scan: &ScanResult,
        out: &mut W,
        stats: &mut DumpStats,
    ) -> io::Result<u64> {
        let mut written = 0u64;

        for dir in &scan.directories {
            for name in &dir.files {
                self.progress
                    .set_message(format!("Current file: {}", name.to_string_lossy()));

                let entry = read_entry(&dir.path.join(name), dir.rel_path.join(name));
                match entry.content {
                    FileContent::Text(_) => stats.files += 1,
                    FileContent::Binary => stats.binary += 1,
                    FileContent::Unreadable(_) => stats.unreadable += 1,
                }

                let section = render_section(&entry);
                out.write_all(section.as_bytes())?;
                written += section.len() as u64;
                self.progress.inc(1);
            }
        }

        Ok(written)
    }
}

/// Read a file once, classifying what came back
pub fn read_entry(path: &Path, rel_path: PathBuf) -> FileEntry {
    let content = match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => FileContent::Text(text),
            Err(_) => FileContent::Binary,
        },
        Err(e) => FileContent::Unreadable(e.to_string()),
    };

    FileEntry { rel_path, content }
}

/// Format one file section of the report
pub fn render_section(entry: &FileEntry) -> String {
    let body = match &entry.content {
        FileContent::Text(text) => text.clone(),
        FileContent::Binary => BINARY_PLACEHOLDER.to_string(),
        FileContent::Unreadable(reason) => format!("[Error reading file: {}]", reason),
    };

    format!(
        "### FILE: {} ###\n{}\n{}\n\n",
        entry.rel_path.display(),
        "-".repeat(FILE_RULE_WIDTH),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_section() {
        let entry = FileEntry {
            rel_path: PathBuf::from("app/page.tsx"),
            content: FileContent::Text("export default 1;\n".to_string()),
        };
        assert_eq!(
            render_section(&entry),
            "### FILE: app/page.tsx ###\n--------------------\nexport default 1;\n\n\n"
        );
    }

    #[test]
    fn test_render_placeholders() {
        let binary = FileEntry {
            rel_path: PathBuf::from("data.dat"),
            content: FileContent::Binary,
        };
        assert!(render_section(&binary)
            .ends_with("[Binary or non-UTF-8 file content skipped]\n\n"));

        let unreadable = FileEntry {
            rel_path: PathBuf::from("secret.txt"),
            content: FileContent::Unreadable("Permission denied (os error 13)".to_string()),
        };
        assert!(render_section(&unreadable)
            .ends_with("[Error reading file: Permission denied (os error 13)]\n\n"));
    }

    #[test]
    fn test_read_entry_classifies_content() -> io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let root = temp_dir.path();
        fs::write(root.join("ok.txt"), "héllo")?;
        fs::write(root.join("blob.dat"), [0xffu8, 0xfe, 0x00])?;

        let ok = read_entry(&root.join("ok.txt"), PathBuf::from("ok.txt"));
        assert_eq!(ok.rel_path, PathBuf::from("ok.txt"));
        assert_eq!(ok.content, FileContent::Text("héllo".to_string()));

        let blob = read_entry(&root.join("blob.dat"), PathBuf::from("blob.dat"));
        assert_eq!(blob.content, FileContent::Binary);

        let missing = read_entry(&root.join("gone.txt"), PathBuf::from("gone.txt"));
        assert!(matches!(missing.content, FileContent::Unreadable(_)));

        Ok(())
    }
}
