// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use fs_err as fs;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::process::{Command, Output};

static FAILED_TRX: &str = indoc! {r#"
    <?xml version="1.0" encoding="utf-8"?>
    <TestRun xmlns="http://microsoft.com/schemas/VisualStudio/TeamTest/2010">
      <Results>
        <UnitTestResult testName="TestA" outcome="Failed">
          <Output><ErrorInfo><Message>boom</Message></ErrorInfo></Output>
        </UnitTestResult>
        <UnitTestResult testName="TestB" outcome="Failed">
          <Output>
            <ErrorInfo>
              <Message>bad</Message>
              <StackTrace>at line 1</StackTrace>
            </ErrorInfo>
          </Output>
        </UnitTestResult>
      </Results>
      <ResultSummary outcome="Failed">
        <Counters total="5" passed="3" failed="2" />
      </ResultSummary>
    </TestRun>
"#};

static FAILED_REPORT: &str = indoc! {"
    ## Content Integrity Test Report

    - Status: FAILED
    - Total: 5
    - Passed: 3
    - Failed: 2

    ### `TestA`

    ```text
    boom
    ```

    ### `TestB`

    ```text
    bad

    Stack trace:
    at line 1
    ```
"};

fn run_in(dir: &Utf8Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trx-report"))
        .args(args)
        .current_dir(dir)
        .env("TRX_REPORT_COLOR", "never")
        .env_remove("TRX_REPORT_LOG")
        .output()
        .expect("trx-report ran")
}

#[test]
fn default_paths() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    fs::create_dir(dir.path().join("TestResults")).expect("created TestResults");
    fs::write(
        dir.path().join("TestResults/content-integrity.trx"),
        FAILED_TRX,
    )
    .expect("wrote TRX file");

    let output = run_in(dir.path(), &[]);
    assert!(output.status.success(), "failing tests still exit 0: {output:?}");

    let report =
        fs::read_to_string(dir.path().join("content-integrity-report.md")).expect("report exists");
    assert_eq!(report, FAILED_REPORT);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("info: wrote report to content-integrity-report.md (status: FAILED)"),
        "stderr: {stderr}"
    );
}

#[test]
fn explicit_paths_overwrite_existing_report() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    fs::write(dir.path().join("results.trx"), FAILED_TRX).expect("wrote TRX file");
    fs::write(dir.path().join("report.md"), "old report").expect("wrote old report");

    let output = run_in(dir.path(), &["results.trx", "report.md"]);
    assert!(output.status.success(), "{output:?}");

    let report = fs::read_to_string(dir.path().join("report.md")).expect("report exists");
    assert_eq!(report, FAILED_REPORT);
}

#[test]
fn missing_input_still_writes_report() {
    let dir = Utf8TempDir::new().expect("created temp dir");

    let output = run_in(dir.path(), &["nope.trx", "report.md"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let report = fs::read_to_string(dir.path().join("report.md")).expect("report exists");
    assert_eq!(
        report,
        indoc! {"
            ## Content Integrity Test Report

            - Status: FAILED
            - Details: Could not find TRX file at 'nope.trx'.
        "}
    );
}

#[test]
fn malformed_input_still_writes_report() {
    let dir = Utf8TempDir::new().expect("created temp dir");
    fs::write(dir.path().join("broken.trx"), "<TestRun><ResultSummary></TestRun>")
        .expect("wrote TRX file");

    let output = run_in(dir.path(), &["broken.trx", "report.md"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let report = fs::read_to_string(dir.path().join("report.md")).expect("report exists");
    assert!(
        report.contains("- Details: Could not parse TRX file at 'broken.trx': "),
        "report: {report}"
    );
    assert!(!report.contains("- Total:"), "report: {report}");
}

#[test]
fn unwritable_output_exits_with_error() {
    let dir = Utf8TempDir::new().expect("created temp dir");

    let output = run_in(dir.path(), &["nope.trx", "missing-dir/report.md"]);
    assert_eq!(output.status.code(), Some(1), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: failed to write report to `missing-dir/report.md`"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("Caused by:"), "stderr: {stderr}");
}
