// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by this crate.

use camino::Utf8PathBuf;
use std::{error, fmt, io};
use thiserror::Error;

/// An error that occurred while parsing an XML document.
///
/// Returned by [`parse_document`](crate::xml::parse_document).
#[derive(Debug, Error)]
pub enum XmlParseError {
    /// The underlying XML reader rejected the input.
    #[error("{error} (at byte {position})")]
    Syntax {
        /// The byte offset at which the failing event started.
        position: usize,

        /// The error returned by the reader.
        error: quick_xml::Error,
    },

    /// An element or attribute used a namespace prefix that was never declared.
    #[error("unbound namespace prefix `{prefix}` (at byte {position})")]
    UnboundPrefix {
        /// The undeclared prefix.
        prefix: String,

        /// The byte offset of the element using the prefix.
        position: usize,
    },

    /// The document ended while elements were still open.
    #[error("unclosed element `{name}` at end of document")]
    UnclosedElement {
        /// The name of the innermost open element.
        name: String,
    },

    /// A closing tag was found with no matching open element.
    #[error("unexpected closing tag `{name}` (at byte {position})")]
    UnexpectedClosingTag {
        /// The name in the closing tag.
        name: String,

        /// The byte offset of the closing tag.
        position: usize,
    },

    /// Content other than whitespace, comments or processing instructions was found outside the
    /// root element.
    #[error("junk after document element (at byte {position})")]
    JunkOutsideRoot {
        /// The byte offset of the unexpected content.
        position: usize,
    },

    /// The document did not contain any elements.
    #[error("no element found")]
    NoRootElement,
}

/// An error that occurred while loading a TRX file from disk.
///
/// Returned by [`TrxSummary::load`](crate::TrxSummary::load).
#[derive(Debug, Error)]
pub enum TrxLoadError {
    /// No file exists at the path.
    #[error("could not find TRX file at `{path}`")]
    NotFound {
        /// The path that was looked up.
        path: Utf8PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text.
    #[error("error reading TRX file at `{path}`")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        err: io::Error,
    },

    /// The file was read but is not a well-formed XML document.
    #[error("error parsing TRX file at `{path}`")]
    Parse {
        /// The path that was parsed.
        path: Utf8PathBuf,

        /// The underlying error.
        #[source]
        err: XmlParseError,
    },
}

impl TrxLoadError {
    /// Returns the path this error is about.
    pub fn path(&self) -> &Utf8PathBuf {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// An error that occurred while writing a [`Report`](crate::Report) to disk.
#[derive(Debug, Error)]
#[error("error writing report to `{path}`")]
pub struct WriteReportError {
    path: Utf8PathBuf,
    #[source]
    err: io::Error,
}

impl WriteReportError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path the report was being written to.
    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }
}

/// Displays an error along with its chain of sources, separated by `: `.
///
/// Used to embed errors into a single line of report text.
pub struct DisplayErrorChain<E>(E);

impl<E: error::Error> DisplayErrorChain<E> {
    /// Creates a new `DisplayErrorChain`.
    pub fn new(error: E) -> Self {
        Self(error)
    }
}

impl<E: error::Error> fmt::Display for DisplayErrorChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_error_chain_joins_sources() {
        let err = TrxLoadError::Read {
            path: "results.trx".into(),
            err: io::Error::other("disk on fire"),
        };
        assert_eq!(
            DisplayErrorChain::new(&err).to_string(),
            "error reading TRX file at `results.trx`: disk on fire"
        );
    }
}
