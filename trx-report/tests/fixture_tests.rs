// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::Utf8Path;
use goldenfile::Mint;
use trx_report::{Report, RunStatus, TrxSummary};

static TRX_DIR: &str = "tests/fixtures/trx";

fn trx_path(name: &str) -> String {
    format!("{TRX_DIR}/{name}")
}

#[test]
fn fixtures() {
    let mut mint = Mint::new("tests/fixtures/reports");

    for (trx_name, report_name, status) in [
        ("failed.trx", "failed.md", RunStatus::Failed),
        ("passed.trx", "passed.md", RunStatus::Passed),
        ("missing.trx", "missing.md", RunStatus::Failed),
    ] {
        let report = Report::build(Utf8Path::new(&trx_path(trx_name)));
        assert_eq!(report.status(), status, "status for {trx_name}");

        let f = mint
            .new_goldenfile(report_name)
            .expect("creating new goldenfile succeeds");
        report
            .serialize(f)
            .unwrap_or_else(|err| panic!("serializing report for {trx_name} succeeds: {err}"));
    }
}

#[test]
fn malformed_file_reports_parse_error() {
    let path = trx_path("malformed.trx");
    let report = Report::build(Utf8Path::new(&path));

    assert_eq!(report.status(), RunStatus::Failed);
    assert_eq!(report.lines().len(), 5, "title, status, details and a blank line");
    assert_eq!(report.lines()[2], "- Status: FAILED");

    let prefix = format!("- Details: Could not parse TRX file at '{path}': ");
    let details = report.lines()[3]
        .strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("details line starts with {prefix:?}: {:?}", report.lines()));
    assert!(!details.is_empty(), "error description is not empty");
    assert!(
        !report.to_markdown().contains("- Total:"),
        "no counters are shown for unparsable files"
    );
}

#[test]
fn building_twice_is_byte_identical() {
    for name in ["failed.trx", "passed.trx", "malformed.trx", "missing.trx"] {
        let path = trx_path(name);
        let first = Report::build(Utf8Path::new(&path)).to_markdown();
        let second = Report::build(Utf8Path::new(&path)).to_markdown();
        assert_eq!(first, second, "report for {name} is deterministic");
    }
}

#[test]
fn load_fixture_summary() {
    let summary =
        TrxSummary::load(Utf8Path::new(&trx_path("failed.trx"))).expect("fixture loads");

    assert_eq!(summary.counters.total, 4);
    assert_eq!(summary.counters.passed, 1);
    assert_eq!(summary.counters.failed, 2);

    let names: Vec<_> = summary
        .failed_results
        .iter()
        .map(|result| result.test_name.as_str())
        .collect();
    assert_eq!(
        names,
        [
            "GameEventContentTests.AllOptionsReferenceKnownEvents(\"prologue\")",
            "MapNodeContentTests.AllNodesAreReachable",
        ]
    );
}
