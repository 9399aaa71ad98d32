//! XML to document tree.

use fcpx_model::{Document, ElementType, NodeId};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{DocumentError, Result};

/// Parse an FCPXML string into a document tree.
///
/// The element vocabulary is closed: any tag outside it fails the whole
/// parse, as do duplicate attributes and broken XML. Comments, processing
/// instructions, the XML declaration, and the doctype line are skipped.
/// Whitespace-only character data is treated as indentation and dropped;
/// anything else lands on the enclosing node.
pub fn read_document(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(text);
    let mut document: Option<Document> = None;
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let position = reader.buffer_position();
                let node = append_element(&mut document, &open, &start, position)?;
                open.push(node);
            }
            Ok(Event::Empty(start)) => {
                let position = reader.buffer_position();
                append_element(&mut document, &open, &start, position)?;
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Text(text)) => {
                let position = reader.buffer_position();
                let unescaped = text.decode().map_err(|source| DocumentError::Malformed {
                    position,
                    message: source.to_string(),
                })?;
                attach_text(&mut document, &open, &unescaped, false, position)?;
            }
            Ok(Event::CData(data)) => {
                let position = reader.buffer_position();
                let raw = String::from_utf8_lossy(&data.into_inner()).into_owned();
                attach_text(&mut document, &open, &raw, true, position)?;
            }
            Ok(Event::GeneralRef(reference)) => {
                let position = reader.buffer_position();
                let name = String::from_utf8_lossy(&reference).into_owned();
                let Some(resolved) = resolve_reference(&name) else {
                    return Err(DocumentError::Malformed {
                        position,
                        message: format!("unresolvable entity reference `&{name};`"),
                    });
                };
                attach_text(&mut document, &open, &resolved, true, position)?;
            }
            Ok(Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_)) => {}
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(DocumentError::Malformed {
                    position: reader.error_position(),
                    message: source.to_string(),
                });
            }
        }
    }

    if let (Some(doc), Some(&node)) = (document.as_ref(), open.last()) {
        return Err(DocumentError::Malformed {
            position: reader.buffer_position(),
            message: format!("input ended inside <{}>", doc.tag(node)),
        });
    }
    document.ok_or(DocumentError::MissingRoot)
}

fn append_element(
    document: &mut Option<Document>,
    open: &[NodeId],
    start: &BytesStart<'_>,
    position: u64,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let Some(tag) = ElementType::from_name(&name) else {
        return Err(DocumentError::UnknownElement { tag: name });
    };

    let Some(doc) = document.as_mut() else {
        let doc = document.insert(Document::new(tag));
        let root = doc.root();
        apply_attributes(doc, root, &name, start, position)?;
        return Ok(root);
    };
    let Some(&parent) = open.last() else {
        return Err(DocumentError::Malformed {
            position,
            message: format!("second root element <{name}>"),
        });
    };
    let node = doc.create_node(tag);
    doc.append_child(parent, node);
    apply_attributes(doc, node, &name, start, position)?;
    Ok(node)
}

fn apply_attributes(
    doc: &mut Document,
    node: NodeId,
    element_name: &str,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<()> {
    let mut attributes = start.attributes();
    attributes.with_checks(false);
    for attribute in attributes {
        let attribute = attribute.map_err(|source| DocumentError::Malformed {
            position,
            message: source.to_string(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        if doc.attribute(node, &key).is_some() {
            return Err(DocumentError::DuplicateAttribute {
                tag: element_name.to_string(),
                attribute: key,
            });
        }
        let value = attribute
            .unescape_value()
            .map_err(|source| DocumentError::Malformed {
                position,
                message: source.to_string(),
            })?;
        doc.set_attribute(node, &key, Some(&value));
    }
    Ok(())
}

/// Attach character data to the innermost open element. Consecutive runs
/// merge into one payload. Unless `explicit`, whitespace-only runs count as
/// indentation and are dropped.
fn attach_text(
    document: &mut Option<Document>,
    open: &[NodeId],
    text: &str,
    explicit: bool,
    position: u64,
) -> Result<()> {
    if !explicit && text.trim().is_empty() {
        return Ok(());
    }
    let (Some(doc), Some(&node)) = (document.as_mut(), open.last()) else {
        return Err(DocumentError::Malformed {
            position,
            message: "character data outside the root element".to_string(),
        });
    };
    let merged = match doc.text(node) {
        Some(existing) => format!("{existing}{text}"),
        None => text.to_string(),
    };
    doc.set_text(node, Some(merged));
    Ok(())
}

/// Predefined XML entities and numeric character references.
fn resolve_reference(name: &str) -> Option<String> {
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "apos" => '\'',
        "quot" => '"',
        _ => {
            let code = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()))?;
            char::from_u32(code)?
        }
    };
    Some(ch.to_string())
}
