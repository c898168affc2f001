// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::TrxLoadError,
    xml::{self, XmlElement},
};
use camino::Utf8Path;
use std::fmt;
use tracing::{debug, warn};

/// The XML namespace used by TRX files.
pub static TRX_NAMESPACE: &str = "http://microsoft.com/schemas/VisualStudio/TeamTest/2010";

static RESULT_SUMMARY_TAG: &str = "ResultSummary";
static COUNTERS_TAG: &str = "Counters";
static UNIT_TEST_RESULT_TAG: &str = "UnitTestResult";
static MESSAGE_PATH: &[&str] = &["Output", "ErrorInfo", "Message"];
static STACK_TRACE_PATH: &[&str] = &["Output", "ErrorInfo", "StackTrace"];

static FAILED_OUTCOME: &str = "Failed";
static UNKNOWN_TEST_NAME: &str = "(unknown test)";
static NO_ERROR_MESSAGE: &str = "(no error message)";

/// The overall outcome of a test run, as shown in a report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RunStatus {
    /// No tests failed.
    Passed,

    /// At least one test failed, or the results could not be read.
    Failed,
}

impl RunStatus {
    /// Returns true if this is [`RunStatus::Failed`].
    pub fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// Aggregate test counts from a TRX file's `ResultSummary/Counters` element.
///
/// Missing or non-integer values are read as 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counters {
    /// The total number of tests.
    pub total: i64,

    /// The number of tests that passed.
    pub passed: i64,

    /// The number of tests that failed.
    pub failed: i64,
}

impl Counters {
    /// Reads counters from a `Counters` element, or returns all zeroes if there is none.
    pub fn from_element(element: Option<&XmlElement>) -> Self {
        let Some(element) = element else {
            return Self::default();
        };

        Self {
            total: counter_value(element, "total"),
            passed: counter_value(element, "passed"),
            failed: counter_value(element, "failed"),
        }
    }

    /// The run status implied by these counters.
    pub fn status(&self) -> RunStatus {
        if self.failed > 0 {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }
}

fn counter_value(element: &XmlElement, name: &str) -> i64 {
    let Some(raw) = element.attribute(name) else {
        return 0;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("counter `{name}` has non-integer value {raw:?}, treating it as 0");
            0
        }
    }
}

/// A single failing test from a TRX file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedResult {
    /// The `testName` attribute, or `(unknown test)` if absent.
    pub test_name: String,

    /// The trimmed error message, or `(no error message)` if the result has no message element.
    pub message: String,

    /// The trimmed stack trace, or an empty string if absent.
    pub stack_trace: String,
}

impl FailedResult {
    /// Reads a failing result from a `UnitTestResult` element.
    pub fn from_element(element: &XmlElement) -> Self {
        let test_name = element
            .attribute("testName")
            .unwrap_or(UNKNOWN_TEST_NAME)
            .to_owned();
        let message = element
            .find_path(TRX_NAMESPACE, MESSAGE_PATH)
            .map_or(NO_ERROR_MESSAGE, |node| node.text().trim())
            .to_owned();
        let stack_trace = element
            .find_path(TRX_NAMESPACE, STACK_TRACE_PATH)
            .map_or("", |node| node.text().trim())
            .to_owned();

        Self {
            test_name,
            message,
            stack_trace,
        }
    }
}

/// The information extracted from one TRX file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TrxSummary {
    /// The run counters.
    pub counters: Counters,

    /// Every `UnitTestResult` with outcome `Failed`, in document order.
    ///
    /// These are collected independently of [`Counters::failed`].
    pub failed_results: Vec<FailedResult>,
}

impl TrxSummary {
    /// Reads and parses the TRX file at `path`.
    pub fn load(path: &Utf8Path) -> Result<Self, TrxLoadError> {
        if !path.exists() {
            return Err(TrxLoadError::NotFound {
                path: path.to_owned(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|err| TrxLoadError::Read {
            path: path.to_owned(),
            err,
        })?;
        let root = xml::parse_document(&contents).map_err(|err| TrxLoadError::Parse {
            path: path.to_owned(),
            err,
        })?;
        debug!("parsed TRX file at {path} ({} bytes)", contents.len());

        let summary = Self::from_document(&root);
        debug!(
            "{path}: total {}, passed {}, failed {} ({} failed results found)",
            summary.counters.total,
            summary.counters.passed,
            summary.counters.failed,
            summary.failed_results.len(),
        );
        Ok(summary)
    }

    /// Extracts a summary from the root element of a parsed TRX document.
    ///
    /// Elements outside [`TRX_NAMESPACE`] are ignored.
    pub fn from_document(root: &XmlElement) -> Self {
        let counters_element = root
            .descendants()
            .filter(|element| element.is(TRX_NAMESPACE, RESULT_SUMMARY_TAG))
            .find_map(|summary| {
                summary
                    .children()
                    .iter()
                    .find(|child| child.is(TRX_NAMESPACE, COUNTERS_TAG))
            });

        let failed_results = root
            .descendants()
            .filter(|element| {
                element.is(TRX_NAMESPACE, UNIT_TEST_RESULT_TAG)
                    && element.attribute("outcome") == Some(FAILED_OUTCOME)
            })
            .map(FailedResult::from_element)
            .collect();

        Self {
            counters: Counters::from_element(counters_element),
            failed_results,
        }
    }

    /// The run status implied by the counters.
    pub fn status(&self) -> RunStatus {
        self.counters.status()
    }
}
