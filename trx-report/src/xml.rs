// Copyright (c) The trx-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A small namespace-aware XML tree.
//!
//! TRX files are small enough to hold in memory, and the queries this crate runs on them
//! ("the first `Counters` under a `ResultSummary`", "every failed `UnitTestResult`") are much
//! easier to express over a tree than over a stream of events. The tree keeps only what those
//! queries need: resolved element names, attributes, and the character data that precedes an
//! element's first child.

use crate::errors::XmlParseError;
use quick_xml::{
    NsReader,
    events::{BytesStart, Event},
    name::{Namespace, ResolveResult},
};
use std::{borrow::Cow, slice};

/// An element in a parsed XML document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct XmlElement {
    namespace: Option<String>,
    local_name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// The namespace URI this element's name resolved to, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The local part of this element's name, without any prefix.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Returns true if this element has the given namespace URI and local name.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local_name == local_name
    }

    /// Looks up an attribute by its name as written in the document.
    ///
    /// Unprefixed attributes are not in any namespace, so `outcome="Failed"` is found with
    /// `attribute("outcome")`. Namespace declarations are not stored as attributes.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The unescaped character data that appears before this element's first child element.
    ///
    /// Text and CDATA sections are concatenated; comments and processing instructions are
    /// skipped without splitting the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The direct child elements, in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Iterates over all elements below this one in document order (pre-order), not including
    /// this element itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Follows a path of child element names within a single namespace, returning the first
    /// match in document order.
    ///
    /// An empty path returns this element.
    pub fn find_path(&self, namespace: &str, path: &[&str]) -> Option<&XmlElement> {
        let Some((first, rest)) = path.split_first() else {
            return Some(self);
        };
        self.children
            .iter()
            .filter(|child| child.is(namespace, first))
            .find_map(|child| child.find_path(namespace, rest))
    }
}

/// A pre-order iterator over the descendants of an [`XmlElement`].
///
/// Returned by [`XmlElement::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, XmlElement>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(element) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Parses a complete XML document, returning its root element.
///
/// The whole document must be well-formed: exactly one root element, matching tags, valid
/// attributes, known entities and declared namespace prefixes. A leading byte-order mark is
/// ignored, and line endings are normalized to `\n` before parsing.
pub fn parse_document(input: &str) -> Result<XmlElement, XmlParseError> {
    let input = normalize_line_endings(input.strip_prefix('\u{feff}').unwrap_or(input));
    let mut reader = NsReader::from_str(&input);

    // Open elements, innermost last.
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let position = reader.buffer_position();
        let (namespace, event) = match reader.read_resolved_event() {
            Ok((resolved, event)) => (resolve_namespace(resolved, position)?, event),
            Err(error) => return Err(XmlParseError::Syntax { position, error }),
        };
        let syntax = |error: quick_xml::Error| XmlParseError::Syntax { position, error };

        match event {
            Event::Start(start) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlParseError::JunkOutsideRoot { position });
                }
                stack.push(new_element(namespace, &start).map_err(syntax)?);
            }
            Event::Empty(start) => {
                let element = new_element(namespace, &start).map_err(syntax)?;
                attach(element, &mut stack, &mut root, position)?;
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| XmlParseError::UnexpectedClosingTag {
                    name: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                    position,
                })?;
                attach(element, &mut stack, &mut root, position)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(syntax)?;
                push_text(&text, &mut stack, position)?;
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                push_text(&String::from_utf8_lossy(&bytes), &mut stack, position)?;
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlParseError::UnclosedElement {
            name: open.local_name,
        });
    }
    root.ok_or(XmlParseError::NoRootElement)
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

fn resolve_namespace(
    resolved: ResolveResult<'_>,
    position: usize,
) -> Result<Option<String>, XmlParseError> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => {
            Ok(Some(String::from_utf8_lossy(uri).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlParseError::UnboundPrefix {
            prefix: String::from_utf8_lossy(&prefix).into_owned(),
            position,
        }),
    }
}

fn new_element(
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<XmlElement, quick_xml::Error> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        namespace,
        local_name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}

fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    position: usize,
) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(XmlParseError::JunkOutsideRoot { position }),
    }
    Ok(())
}

fn push_text(text: &str, stack: &mut [XmlElement], position: usize) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        // Text after the first child belongs to that child's tail, which nothing queries.
        Some(parent) if parent.children.is_empty() => parent.text.push_str(text),
        Some(_) => {}
        None if text.trim().is_empty() => {}
        None => return Err(XmlParseError::JunkOutsideRoot { position }),
    }
    Ok(())
}
