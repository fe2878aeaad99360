//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Library code MUST NOT block a thread in `sleep`. A render thread
//! that sleeps cannot be stopped until the sleep ends, so the supervisor's
//! join would wait out a whole cadence and frames could land after the
//! work returned. Thread-backed loops wait on their `StopSignal` instead.
//!
//! **Exceptions**: the cooperative render loop's `tokio::time::sleep`, which
//! is raced against cancellation; test code.

use architectural_enforcement::{scan_directory, workspace_dir};

/// Test that library code never blocks a thread in sleep
#[test]
fn test_no_thread_sleep_in_library_code() {
    let dir = workspace_dir("termanim/core/src");
    assert!(dir.exists(), "missing {}", dir.display());

    let violations = scan_directory(&dir, &[], |line| {
        line.contains("thread::sleep") || line.contains("sleep_ms(")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ CRITICAL: Thread sleeps found in library code!\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        eprintln!("\n✅ REQUIRED:");
        eprintln!("  - StopSignal::tick() in thread-backed render loops");
        eprintln!("  - tokio::select! over sleep and cancel in cooperative loops");

        panic!(
            "\nFound {} sleep violation(s) in library code.\nFix these before merging!",
            violations.len()
        );
    }
}

/// Test that async sleeps only appear where they race cancellation
#[test]
fn test_async_sleep_only_in_render_loop() {
    let dir = workspace_dir("termanim/core/src");
    let violations = scan_directory(&dir, &["render.rs"], |line| {
        line.contains("time::sleep(")
    });

    if !violations.is_empty() {
        eprintln!("\n❌ Async sleeps outside the render loop:\n");
        for violation in &violations {
            eprintln!("  ❌ {violation}");
        }
        panic!(
            "\nFound {} async sleep(s) outside render.rs.",
            violations.len()
        );
    }
}
