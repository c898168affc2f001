// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::StderrStyles;
use owo_colors::OwoColorize;
use std::error::Error;
use thiserror::Error;
use trx_report::errors::WriteReportError;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

/// Process exit codes returned by `trx-report`.
///
/// A missing, unreadable or failing TRX file is not an error: it is reported inside the
/// Markdown report and the process still exits with [`OK`](Self::OK).
#[doc(hidden)]
pub struct TrxReportExitCode;

impl TrxReportExitCode {
    /// The report was written.
    pub const OK: i32 = 0;

    /// The report could not be written to the output path.
    pub const REPORT_WRITE_FAILED: i32 = 1;
}

// Note that the #[error()] strings are placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that prevented the report from being produced.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    /// The report could not be written to the output path.
    #[error("failed to write report")]
    WriteReport {
        /// The underlying error.
        #[source]
        err: WriteReportError,
    },
}

impl ExpectedError {
    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::WriteReport { .. } => TrxReportExitCode::REPORT_WRITE_FAILED,
        }
    }

    /// Displays this error to stderr, followed by its chain of causes.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match self {
            Self::WriteReport { err } => {
                tracing::error!(
                    "failed to write report to `{}`",
                    err.path().style(styles.bold)
                );
                err.source()
            }
        };

        while let Some(err) = next_error {
            tracing::error!(target: "trx_report_cli::no_heading", "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
