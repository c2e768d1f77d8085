/*!
 * Indented tree view of a scan
 */

use crate::types::ScanResult;
use crate::utils::TREE_HEADER;

/// Width of the rule closing the tree section
pub const TREE_RULE_WIDTH: usize = 50;

/// Renders the tree section of the report
pub struct TreeRenderer;

impl TreeRenderer {
    /// Render the header, the root name and, for every visited directory in
    /// traversal order, its subdirectories then its files.
    ///
    /// Children of a directory at depth `d` are indented by `4 * (d + 1)`
    /// spaces, so every listing sits one level under its parent's line.
    pub fn render(scan: &ScanResult) -> String {
        let mut out = String::new();
        out.push_str(TREE_HEADER);
        out.push_str("\n\n");
        out.push_str(&format!("{}/\n", scan.root_name));

        for dir in &scan.directories {
            let indent = " ".repeat(4 * (dir.depth + 1));

            for name in &dir.dirs {
                out.push_str(&format!("{}{}/\n", indent, name.to_string_lossy()));
            }
            for name in &dir.files {
                out.push_str(&format!("{}{}\n", indent, name.to_string_lossy()));
            }
        }

        out.push('\n');
        out.push_str(&"=".repeat(TREE_RULE_WIDTH));
        out.push_str("\n\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::path::PathBuf;

    use crate::types::DirectoryNode;

    fn node(rel: &str, depth: usize, dirs: &[&str], files: &[&str]) -> DirectoryNode {
        DirectoryNode {
            path: PathBuf::from("/proj").join(rel),
            rel_path: PathBuf::from(rel),
            depth,
            dirs: dirs.iter().map(OsString::from).collect(),
            files: files.iter().map(OsString::from).collect(),
        }
    }

    #[test]
    fn test_render_layout() {
        let scan = ScanResult {
            root: PathBuf::from("/proj"),
            root_name: "proj".to_string(),
            directories: vec![
                node("", 0, &["app", "lib"], &["README.md"]),
                node("app", 1, &[], &["page.tsx"]),
                node("lib", 1, &["ui"], &[]),
                node("lib/ui", 2, &[], &["button.tsx"]),
            ],
        };

        let expected = format!(
            "### PROJECT STRUCTURE ###\n\n\
             proj/\n\
             \x20   app/\n\
             \x20   lib/\n\
             \x20   README.md\n\
             \x20       page.tsx\n\
             \x20       ui/\n\
             \x20           button.tsx\n\
             \n{}\n\n",
            "=".repeat(50)
        );

        assert_eq!(TreeRenderer::render(&scan), expected);
    }

    #[test]
    fn test_render_empty_root() {
        let scan = ScanResult {
            root: PathBuf::from("/empty"),
            root_name: "empty".to_string(),
            directories: vec![node("", 0, &[], &[])],
        };
        let rendered = TreeRenderer::render(&scan);
        assert!(rendered.starts_with("### PROJECT STRUCTURE ###\n\nempty/\n\n===="));
    }
}
