// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read TRX test result files and summarize them as Markdown reports.
//!
//! TRX is the XML format produced by .NET test runners (`dotnet test --logger trx`). This crate
//! extracts the run counters and the failing tests from a TRX file and renders them as a short
//! Markdown document, suitable for posting as a CI job summary.
//!
//! Building a report never fails: a missing or unreadable results file is reported inside the
//! document itself. See [`Report::build`].

pub mod errors;
mod report;
mod summary;
pub mod xml;

pub use report::*;
pub use summary::*;
