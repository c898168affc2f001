// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line tool that turns a TRX test results file into a Markdown report.
//!
//! ```text
//! trx-report [TRX_PATH] [REPORT_PATH]
//! ```
//!
//! The report is written even if the results file is missing or malformed; in that case it
//! carries a `FAILED` status and the reason. The exit code only reflects whether the report was
//! written.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::{Color, OutputContext, StderrStyles};
