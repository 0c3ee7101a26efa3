//! Golden-file test harness for neha.
//!
//! Discovers `.input.neha` files under `tests/fixtures/`, transforms them, and
//! compares the output against the sibling `.expected.tsx` file. Files under
//! `tests/fixtures/roundtrip/` are also parsed as TSX after transformation.
//!
//! Set `NH_UPDATE_FIXTURES=1` to overwrite expected files with actual output.

use std::path::{Path, PathBuf};

use anyhow::Result;
use nh_cli::check::parse_output;
use nh_syntax::TransformOptions;
use nh_transform::transform;

const INPUT_SUFFIX: &str = ".input.neha";
const EXPECTED_SUFFIX: &str = ".expected.tsx";

fn fixtures_dir() -> PathBuf {
    // CARGO_MANIFEST_DIR is crates/nh_test/, so go up two levels to workspace root.
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
}

fn collect_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(INPUT_SUFFIX))
        })
        .collect();
    files.sort();
    files
}

fn run_pipeline(source: &str, filename: &str) -> Result<String> {
    Ok(transform(source, &TransformOptions::with_filename(filename))?.code)
}

#[test]
fn golden_file_tests() {
    let fixtures = fixtures_dir();
    let input_files = collect_input_files(&fixtures);

    assert!(
        !input_files.is_empty(),
        "No test fixtures found in {}",
        fixtures.display()
    );

    let update_mode = std::env::var("NH_UPDATE_FIXTURES").is_ok();
    let mut failures = Vec::new();

    for input_path in &input_files {
        let expected_path = input_path
            .to_str()
            .unwrap()
            .replace(INPUT_SUFFIX, EXPECTED_SUFFIX);
        let expected_path = PathBuf::from(&expected_path);

        let test_name = input_path
            .strip_prefix(&fixtures)
            .unwrap()
            .display()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read input: {e}"));
                continue;
            }
        };

        let actual = match run_pipeline(&source, &test_name) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: transform failed: {e}"));
                continue;
            }
        };

        if update_mode {
            if let Err(e) = std::fs::write(&expected_path, &actual) {
                failures.push(format!("{test_name}: failed to write expected: {e}"));
            }
            continue;
        }

        if !expected_path.exists() {
            // Roundtrip fixtures are only required to parse.
            if !input_path.starts_with(fixtures.join("roundtrip")) {
                failures.push(format!(
                    "{test_name}: missing expected file: {}",
                    expected_path.display()
                ));
            }
            continue;
        }

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read expected: {e}"));
                continue;
            }
        };
        if actual.trim() != expected.trim() {
            failures.push(format!(
                "{test_name}: output mismatch\n--- expected ---\n{}\n--- actual ---\n{}",
                expected.trim(),
                actual.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} golden test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn roundtrip_tests() {
    let fixtures = fixtures_dir().join("roundtrip");
    let input_files = collect_input_files(&fixtures);

    assert!(
        !input_files.is_empty(),
        "No roundtrip fixtures found in {}",
        fixtures.display()
    );

    let mut failures = Vec::new();

    for input_path in &input_files {
        let test_name = input_path
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let source = match std::fs::read_to_string(input_path) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: failed to read: {e}"));
                continue;
            }
        };

        let output = match run_pipeline(&source, &test_name) {
            Ok(s) => s,
            Err(e) => {
                failures.push(format!("{test_name}: transform failed: {e}"));
                continue;
            }
        };

        if let Err(e) = parse_output(&output, &format!("{test_name}.tsx"), true) {
            failures.push(format!(
                "{test_name}: output is not valid TSX: {e}\n--- output ---\n{}",
                output.trim()
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "\n{} roundtrip test(s) failed:\n\n{}",
            failures.len(),
            failures.join("\n\n")
        );
    }
}

#[test]
fn golden_outputs_map_back_to_their_sources() {
    // Every byte of output outside a substitution maps to the same byte of input.
    for input_path in collect_input_files(&fixtures_dir()) {
        let source = std::fs::read_to_string(&input_path).unwrap();
        let out = transform(&source, &TransformOptions::default()).unwrap();
        for segment in out.positions.segments().iter().filter(|s| s.verbatim) {
            assert_eq!(
                &out.code[segment.output.clone()],
                &source[segment.original.clone()],
                "{}",
                input_path.display()
            );
        }
    }
}
