use crate::config_xml::document::{ConfigDocument, NodeId, NodeKind};
use crate::config_xml::error::ConfigEditError;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

fn serialize_error(e: impl std::fmt::Display) -> ConfigEditError {
    ConfigEditError::Serialize(e.to_string())
}

/// # to xml string
///
/// Renders the reachable tree back to XML text.
///
/// The declaration is written as it was read (version, encoding, standalone),
/// siblings keep their order and every attribute is written in source order.
/// Elements without children collapse to `<name/>`.
pub fn to_xml_string(doc: &ConfigDocument) -> Result<String, ConfigEditError> {
    let mut writer = Writer::new(Vec::new());

    if let Some(decl) = doc.declaration() {
        writer
            .write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))
            .map_err(serialize_error)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped("\n")))
            .map_err(serialize_error)?;
    }

    for (i, top) in doc.children(doc.document_node()).iter().enumerate() {
        if i > 0 {
            writer
                .write_event(Event::Text(BytesText::from_escaped("\n")))
                .map_err(serialize_error)?;
        }
        write_node(&mut writer, doc, *top)?;
    }

    String::from_utf8(writer.into_inner()).map_err(serialize_error)
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    doc: &ConfigDocument,
    id: NodeId,
) -> Result<(), ConfigEditError> {
    let event = match doc.kind(id) {
        NodeKind::Document => return Ok(()),
        NodeKind::Element { name, attributes } => {
            let mut start = BytesStart::new(name.as_str());
            for (key, value) in attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if doc.children(id).is_empty() {
                Event::Empty(start)
            } else {
                writer
                    .write_event(Event::Start(start))
                    .map_err(serialize_error)?;
                for child in doc.children(id) {
                    write_node(writer, doc, *child)?;
                }
                Event::End(BytesEnd::new(name.as_str()))
            }
        }
        NodeKind::Text(text) => {
            Event::Text(BytesText::from_escaped(quick_xml::escape::partial_escape(text)))
        }
        NodeKind::CData(text) => Event::CData(BytesCData::new(text.as_str())),
        NodeKind::Comment(text) => Event::Comment(BytesText::from_escaped(text.as_str())),
        NodeKind::ProcessingInstruction(text) => Event::PI(BytesPI::new(text.as_str())),
        NodeKind::DocType(text) => Event::DocType(BytesText::from_escaped(text.as_str())),
    };

    writer.write_event(event).map_err(serialize_error)?;
    Ok(())
}
