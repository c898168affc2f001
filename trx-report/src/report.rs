// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    RunStatus, TrxSummary,
    errors::{DisplayErrorChain, TrxLoadError, WriteReportError},
};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::Utf8Path;
use std::io::{self, BufWriter, Write};

/// The heading every report starts with.
pub static REPORT_TITLE: &str = "## Content Integrity Test Report";

static STACK_TRACE_LABEL: &str = "Stack trace:";

/// A Markdown report summarizing a TRX file.
///
/// A report is an ordered list of lines. It is built once, with [`Report::build`] or
/// [`Report::from_summary`], and is not modified afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Report {
    status: RunStatus,
    lines: Vec<String>,
}

impl Report {
    /// Builds a report for the TRX file at `trx_path`.
    ///
    /// This never fails. If the file is missing or can't be parsed, the report says so with a
    /// `FAILED` status and the error details, and contains no counters.
    pub fn build(trx_path: &Utf8Path) -> Self {
        match TrxSummary::load(trx_path) {
            Ok(summary) => Self::from_summary(&summary),
            Err(error) => Self::from_load_error(&error),
        }
    }

    /// Builds a report from an already-loaded summary.
    ///
    /// Failure sections are only included if [`Counters::failed`](crate::Counters::failed) is
    /// greater than zero.
    pub fn from_summary(summary: &TrxSummary) -> Self {
        let counters = &summary.counters;
        let status = counters.status();

        let mut lines = title_lines();
        lines.extend([
            format!("- Status: {status}"),
            format!("- Total: {}", counters.total),
            format!("- Passed: {}", counters.passed),
            format!("- Failed: {}", counters.failed),
            String::new(),
        ]);

        if counters.failed > 0 {
            for result in &summary.failed_results {
                lines.push(format!("### `{}`", result.test_name));
                lines.push(String::new());
                lines.push("```text".to_owned());
                lines.push(result.message.clone());
                if !result.stack_trace.is_empty() {
                    lines.push(String::new());
                    lines.push(STACK_TRACE_LABEL.to_owned());
                    lines.push(result.stack_trace.clone());
                }
                lines.push("```".to_owned());
                lines.push(String::new());
            }
        }

        Self { status, lines }
    }

    fn from_load_error(error: &TrxLoadError) -> Self {
        let details = match error {
            TrxLoadError::NotFound { path } => {
                format!("Could not find TRX file at '{path}'.")
            }
            TrxLoadError::Read { path, err } => {
                format!(
                    "Could not parse TRX file at '{path}': {}",
                    DisplayErrorChain::new(err)
                )
            }
            TrxLoadError::Parse { path, err } => {
                format!(
                    "Could not parse TRX file at '{path}': {}",
                    DisplayErrorChain::new(err)
                )
            }
        };

        let mut lines = title_lines();
        lines.extend([
            format!("- Status: {}", RunStatus::Failed),
            format!("- Details: {details}"),
            String::new(),
        ]);

        Self {
            status: RunStatus::Failed,
            lines,
        }
    }

    /// The status shown in the report.
    ///
    /// This is [`RunStatus::Failed`] if the TRX file could not be loaded.
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The lines of the report, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the report as a Markdown string, with lines separated by `\n`.
    pub fn to_markdown(&self) -> String {
        self.lines.join("\n")
    }

    /// Writes the report as Markdown to `writer`, then flushes it.
    pub fn serialize(&self, mut writer: impl Write) -> io::Result<()> {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writer.write_all(b"\n")?;
            }
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()
    }

    /// Writes the report to `path`, replacing any existing file.
    ///
    /// The report is written to a temporary file next to `path` which is then renamed into
    /// place, so readers never observe a partially-written report.
    pub fn write_to_path(&self, path: &Utf8Path) -> Result<(), WriteReportError> {
        let tmpdir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file = AtomicFile::new_with_tmpdir(path, OverwriteBehavior::AllowOverwrite, tmpdir);
        file.write(|f| self.serialize(BufWriter::new(f)))
            .map_err(|err| match err {
                atomicwrites::Error::Internal(err) | atomicwrites::Error::User(err) => {
                    WriteReportError::new(path, err)
                }
            })
    }
}

fn title_lines() -> Vec<String> {
    vec![REPORT_TITLE.to_owned(), String::new()]
}
