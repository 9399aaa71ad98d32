//! Document tree to XML.

use std::io::{self, Write};

use fcpx_model::{Document, NodeId};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Render a document as FCPXML text.
///
/// Output starts with the XML declaration and the `<!DOCTYPE fcpxml>` line,
/// indents nested elements by four spaces, and uses the empty-element form
/// for nodes without children or text. Rendering the same tree twice gives
/// byte-identical output.
pub fn write_document(doc: &Document) -> String {
    let mut buffer = Vec::new();
    // The sink is in-memory, so the io plumbing cannot fail.
    write_document_to(doc, &mut buffer).expect("writing into a Vec cannot fail");
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Stream a document as FCPXML into any writer.
pub fn write_document_to<W: Write>(doc: &Document, sink: W) -> io::Result<()> {
    let mut xml = Writer::new_with_indent(sink, b' ', 4);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.write_event(Event::DocType(BytesText::new("fcpxml")))?;
    write_node(&mut xml, doc, doc.root())?;
    let sink = xml.get_mut();
    sink.write_all(b"\n")?;
    sink.flush()
}

fn write_node<W: Write>(xml: &mut Writer<W>, doc: &Document, node: NodeId) -> io::Result<()> {
    let name = doc.tag(node).name();
    let mut start = BytesStart::new(name);
    for (key, value) in doc.attributes(node) {
        start.push_attribute((key, value));
    }
    let children = doc.children(node);
    if children.is_empty() && doc.text(node).is_none() {
        return xml.write_event(Event::Empty(start));
    }
    xml.write_event(Event::Start(start))?;
    if let Some(text) = doc.text(node) {
        xml.write_event(Event::Text(BytesText::new(text)))?;
    }
    for &child in children {
        write_node(xml, doc, child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(name)))
}
