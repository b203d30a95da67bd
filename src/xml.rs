use std::io::Write;

use anyhow::Result;
use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use crate::{document::Node, string_safety::strip_invalid_xml_chars};

const INDENT_SIZE: usize = 2;

/// Writes `document` with an XML declaration, indented by two spaces.
/// Characters XML 1.0 forbids are dropped from text and attribute values.
pub fn write_document<W: Write>(document: &Node, writer: W) -> Result<()> {
    let mut writer = Writer::new_with_indent(writer, b' ', INDENT_SIZE);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_node(&mut writer, document)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

pub fn to_xml_string(document: &Node) -> Result<String> {
    let mut buf = Vec::new();
    write_document(document, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<()> {
    let tag = node.kind().tag();
    let values: Vec<(&str, String)> = node
        .attributes()
        .iter()
        .map(|(key, value)| (*key, strip_invalid_xml_chars(&value.to_string()).into_owned()))
        .collect();
    let mut start = BytesStart::new(tag);
    for (key, value) in values.iter() {
        start.push_attribute((*key, value.as_str()));
    }

    if node.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = node.text() {
        writer.write_event(Event::Text(BytesText::new(&strip_invalid_xml_chars(text))))?;
    }
    for child in node.children() {
        write_node(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
