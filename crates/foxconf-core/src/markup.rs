//! Minimal element tree read from a markup document
//!
//! The parser and the document equivalence check both work on this tree
//! rather than on the raw event stream. Only what the subsystem schema needs
//! is kept: local names, the default namespace declaration, non-namespace
//! attributes, trimmed text and source positions.

use std::fmt;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{Position, Result, SubsystemError};

/// Markup attribute with its namespace prefix stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MarkupAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// Local name (prefix stripped)
    pub name: String,
    /// URI of an `xmlns="..."` declaration on this element
    pub namespace: Option<String>,
    pub attributes: Vec<MarkupAttribute>,
    pub children: Vec<Node>,
    /// Trimmed, concatenated character data directly inside this element
    pub text: String,
    pub text_position: Option<Position>,
    pub position: Position,
}

impl Node {
    /// Append one chunk of character data as read, untrimmed
    fn push_text(&mut self, text: &str, position: Position) {
        if self.text_position.is_none() && !text.trim().is_empty() {
            self.text_position = Some(position);
        }
        self.text.push_str(text);
    }

    /// Trim the concatenated character data once the element is closed
    fn close(mut self) -> Self {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
        self
    }
}

/// Read a whole document into a single root [`Node`]
///
/// # Errors
///
/// Returns `SubsystemError::Xml` when the input is not well-formed, has no
/// root element, or has more than one.
pub(crate) fn read_document(input: &str) -> Result<Node> {
    // chunks split by comments or CDATA are joined before trimming
    let mut reader = Reader::from_str(input);
    reader.trim_text(false);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let position = position_at(input, reader.buffer_position());
        let event = reader
            .read_event()
            .map_err(|err| xml_error(err, position_at(input, reader.buffer_position())))?;

        match event {
            Event::Start(start) => stack.push(open_node(&start, position)?),
            Event::Empty(start) => {
                let node = open_node(&start, position)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected closing tag", position))?;
                attach(&mut stack, &mut root, node.close())?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|err| xml_error(err, position))?;
                push_text(&mut stack, &text, position)?;
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                let text = std::str::from_utf8(&raw).map_err(|err| xml_error(err, position))?;
                push_text(&mut stack, text, position)?;
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(
            format!("element '{}' is never closed", open.name),
            position_at(input, input.len()),
        ));
    }
    root.ok_or_else(|| xml_error("document has no root element", position_at(input, 0)))
}

fn open_node(start: &BytesStart<'_>, position: Position) -> Result<Node> {
    let name = utf8(start.local_name().as_ref(), position)?;
    let mut namespace = None;
    let mut attributes = Vec::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| xml_error(err, position))?;
        let key = attribute.key;
        let value = attribute
            .unescape_value()
            .map_err(|err| xml_error(err, position))?
            .into_owned();

        if key.as_ref() == b"xmlns" {
            namespace = Some(value);
        } else if !key.as_ref().starts_with(b"xmlns:") {
            attributes.push(MarkupAttribute {
                name: utf8(key.local_name().as_ref(), position)?,
                value,
            });
        }
    }

    Ok(Node {
        name,
        namespace,
        attributes,
        children: Vec::new(),
        text: String::new(),
        text_position: None,
        position,
    })
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(xml_error("document has more than one root element", node.position));
    } else {
        *root = Some(node);
    }
    Ok(())
}

fn push_text(stack: &mut [Node], text: &str, position: Position) -> Result<()> {
    match stack.last_mut() {
        Some(node) => {
            node.push_text(text, position);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(xml_error("text outside the root element", position)),
    }
}

/// Position of the first non-whitespace byte at or after `offset`
fn position_at(input: &str, offset: usize) -> Position {
    let offset = offset.min(input.len());
    let skipped = input.as_bytes()[offset..]
        .iter()
        .take_while(|b| b.is_ascii_whitespace())
        .count();
    Position::from_offset(input, offset + skipped)
}

fn utf8(bytes: &[u8], position: Position) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| xml_error(err, position))
}

fn xml_error(message: impl fmt::Display, position: Position) -> SubsystemError {
    SubsystemError::Xml {
        message: message.to_string(),
        position,
    }
}
