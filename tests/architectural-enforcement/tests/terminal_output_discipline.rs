//! Integration Test: Terminal Output Discipline
//!
//! **Policy**: The core library MUST NOT print. Frames, erase frames and
//! annotations are written to the writer the caller injected, so tests can
//! record them and callers can redirect them. Diagnostics go through
//! `tracing`.
//!
//! **Exceptions**: `binding.rs` may open `stdout()` as the default writer.

use architectural_enforcement::{scan_directory, workspace_dir};

const PRINT_MACROS: [&str; 5] = ["print!(", "println!(", "eprint!(", "eprintln!(", "dbg!("];

/// Test that library code never prints directly
#[test]
fn test_no_print_macros_in_library_code() {
    let dir = workspace_dir("termanim/core/src");
    assert!(dir.exists(), "missing {}", dir.display());

    let violations = scan_directory(&dir, &[], |line| {
        PRINT_MACROS.iter().any(|m| line.contains(m))
    });

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Print macros found in library code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ REQUIRED:");
        eprintln!("  - write_all() + flush() on the injected writer");
        eprintln!("  - tracing::debug!/warn! for diagnostics");

        panic!(
            "\nFound {} print violation(s) in library code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Test that only the binding layer reaches for stdout
#[test]
fn test_stdout_only_as_default_writer() {
    let dir = workspace_dir("termanim/core/src");
    let violations = scan_directory(&dir, &["binding.rs"], |line| {
        line.contains("stdout()") || line.contains("stderr()")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ Direct terminal handles outside binding.rs:\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} direct terminal handle(s) in library code.",
            violations.len()
        );
    }
}
