//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - Library code never sleeps on a thread; render loops wait on their stop signal
//! - Library code never prints; every byte goes through the injected writer
//!
//! The helpers here scan source trees line by line. Code after a
//! `#[cfg(test)]` marker and test functions are exempt.

use std::fs;
use std::path::{Path, PathBuf};

/// A forbidden pattern found in production code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// File containing the match
    pub path: PathBuf,
    /// 1-based line number
    pub line: usize,
    /// The offending line, trimmed
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Directory of a workspace crate's sources, relative to the workspace root
#[must_use]
pub fn workspace_dir(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(relative)
}

/// Scan every `.rs` file under `dir` for lines where `is_violation` holds.
///
/// Files named in `allowed_files` are skipped.
pub fn scan_directory(
    dir: &Path,
    allowed_files: &[&str],
    is_violation: impl Fn(&str) -> bool,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if allowed_files.contains(&file_name) {
            continue;
        }
        let Ok(content) = fs::read_to_string(path) else {
            continue;
        };
        violations.extend(
            scan_source(&content, &is_violation)
                .into_iter()
                .map(|(line, text)| Violation {
                    path: path.to_path_buf(),
                    line,
                    text,
                }),
        );
    }
    violations
}

/// Production lines of `content` matching `is_violation`, as (line, text)
pub fn scan_source(content: &str, is_violation: impl Fn(&str) -> bool) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let mut found = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.trim_start().starts_with("#[cfg(test)]") {
            break;
        }
        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);
        if is_in_test_function(&lines, idx) {
            continue;
        }
        if is_violation(code_part) {
            found.push((idx + 1, line.trim().to_string()));
        }
    }
    found
}

/// Check if line is inside a test function
#[must_use]
pub fn is_in_test_function(lines: &[&str], current_idx: usize) -> bool {
    let mut found_fn_idx = None;
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if line.starts_with("fn ") || line.contains(" fn ") {
            found_fn_idx = Some(i);
            break;
        }

        // Stop at module boundaries
        if line.starts_with("mod ") || (line.starts_with("impl ") && line.contains('{')) {
            return false;
        }
    }

    if let Some(fn_idx) = found_fn_idx {
        for i in (0..fn_idx).rev() {
            let line = lines[i].trim();

            if line.starts_with("#[test]") || line.starts_with("#[tokio::test") {
                return true;
            }

            if line.starts_with("fn ") || line.starts_with("mod ") || line.starts_with("impl ") {
                break;
            }
            if !line.starts_with("#[") && !line.starts_with("///") {
                break;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stops_at_test_module() {
        let source = "fn run() {\n    println!(\"x\");\n}\n#[cfg(test)]\nmod tests {\n    fn t() { println!(\"y\"); }\n}\n";
        let found = scan_source(source, |line| line.contains("println!"));
        assert_eq!(found, vec![(2, "println!(\"x\");".to_string())]);
    }

    #[test]
    fn test_comments_are_ignored() {
        let found = scan_source("// println!(\"x\")\n/// println!\n", |line| {
            line.contains("println!")
        });
        assert!(found.is_empty());
    }

    #[test]
    fn test_test_function_detection() {
        let test_code = vec![
            "#[test]",
            "fn test_something() {",
            "    std::thread::sleep(d);",
            "}",
        ];
        assert!(is_in_test_function(&test_code, 2));

        let prod_code = vec!["fn render() {", "    std::thread::sleep(d);", "}"];
        assert!(!is_in_test_function(&prod_code, 1));
    }

    #[test]
    fn test_workspace_dir_exists() {
        assert!(workspace_dir("termanim/core/src").exists());
    }
}
