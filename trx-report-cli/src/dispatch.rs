// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{ExpectedError, Result, TrxReportExitCode},
    output::{OutputContext, clap_styles},
};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::{debug, info};
use trx_report::Report;

/// The results file read when no path is given.
pub static DEFAULT_TRX_PATH: &str = "TestResults/content-integrity.trx";

/// The report file written when no path is given.
pub static DEFAULT_REPORT_PATH: &str = "content-integrity-report.md";

/// Summarize a TRX test results file as a Markdown report.
///
/// The report is always written, even if the results file is missing or can't be parsed. The
/// exit code reflects whether the report was written, not whether the tests passed.
///
/// Logging is controlled by TRX_REPORT_LOG, and colors by TRX_REPORT_COLOR (auto, always or
/// never).
#[derive(Debug, Parser)]
#[command(name = "trx-report", version, styles = clap_styles::style())]
#[doc(hidden)]
pub struct TrxReportApp {
    /// Path to the TRX results file
    #[arg(value_name = "TRX_PATH", default_value = DEFAULT_TRX_PATH)]
    trx_path: Utf8PathBuf,

    /// Path to write the Markdown report to (created or overwritten)
    #[arg(value_name = "REPORT_PATH", default_value = DEFAULT_REPORT_PATH)]
    report_path: Utf8PathBuf,
}

impl TrxReportApp {
    /// Initializes the logger and color support from the environment.
    pub fn init_output(&self) -> OutputContext {
        OutputContext::from_env()
    }

    /// Builds the report and writes it out, returning the process exit code.
    pub fn exec(self) -> Result<i32> {
        let Self {
            trx_path,
            report_path,
        } = self;

        debug!("building report for {trx_path}");
        let report = Report::build(&trx_path);
        report
            .write_to_path(&report_path)
            .map_err(|err| ExpectedError::WriteReport { err })?;

        info!(
            "wrote report to {report_path} (status: {})",
            report.status()
        );
        Ok(TrxReportExitCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_app() {
        TrxReportApp::command().debug_assert();
    }

    #[test]
    fn positional_defaults() {
        let app = TrxReportApp::try_parse_from(["trx-report"]).expect("no arguments is valid");
        assert_eq!(app.trx_path, DEFAULT_TRX_PATH);
        assert_eq!(app.report_path, DEFAULT_REPORT_PATH);

        let app = TrxReportApp::try_parse_from(["trx-report", "results.trx"])
            .expect("one argument is valid");
        assert_eq!(app.trx_path, "results.trx");
        assert_eq!(app.report_path, DEFAULT_REPORT_PATH);

        let app = TrxReportApp::try_parse_from(["trx-report", "results.trx", "out/report.md"])
            .expect("two arguments are valid");
        assert_eq!(app.trx_path, "results.trx");
        assert_eq!(app.report_path, "out/report.md");
    }

    #[test]
    fn extra_arguments_are_rejected() {
        TrxReportApp::try_parse_from(["trx-report", "a.trx", "b.md", "c"])
            .expect_err("at most two positional arguments");
        TrxReportApp::try_parse_from(["trx-report", "--format", "json"])
            .expect_err("there are no flags");
    }
}
