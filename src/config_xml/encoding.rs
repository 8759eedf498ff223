use crate::config_xml::error::ConfigEditError;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;

/// Label from `<?xml ... encoding="..."?>` at the very start of `bytes`.
fn declared_label(bytes: &[u8]) -> Result<Option<String>, ConfigEditError> {
    if !bytes.starts_with(b"<?xml") {
        return Ok(None);
    }
    let end = match bytes.windows(2).position(|w| w == b"?>") {
        Some(pos) => pos + 2,
        None => return Err(ConfigEditError::Parse("unterminated xml declaration".to_string())),
    };

    let mut reader = Reader::from_reader(&bytes[..end]);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => match decl.encoding() {
            Some(Ok(label)) => Ok(Some(String::from_utf8_lossy(&label).into_owned())),
            Some(Err(e)) => Err(ConfigEditError::Parse(e.to_string())),
            None => Ok(None),
        },
        Ok(_) => Ok(None),
        Err(e) => Err(ConfigEditError::Parse(e.to_string())),
    }
}

/// Charset named by the declaration, UTF-8 when there is none.
pub fn declared_encoding(bytes: &[u8]) -> Result<&'static Encoding, ConfigEditError> {
    match declared_label(bytes)? {
        None => Ok(UTF_8),
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ConfigEditError::Parse(format!("unsupported encoding '{}'", label))),
    }
}

/// # decode xml
///
/// Turns a raw `config.xml` into text. A byte order mark wins over the
/// declaration; malformed input for the charset is an error, never replaced.
pub fn decode_xml(bytes: &[u8]) -> Result<String, ConfigEditError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| ConfigEditError::Parse(format!("content is not valid {}", encoding.name())))
}

/// # encode xml
///
/// Bytes of `xml` in the charset its own declaration names, so an upload
/// matches what the document claims to be.
pub fn encode_xml(xml: &str) -> Result<Vec<u8>, ConfigEditError> {
    let encoding = declared_encoding(xml.as_bytes())?;

    if encoding == UTF_8 {
        return Ok(xml.as_bytes().to_vec());
    }
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Ok(encode_utf16(xml, encoding == UTF_16LE));
    }

    let (bytes, _, unmappable) = encoding.encode(xml);
    if unmappable {
        return Err(ConfigEditError::Serialize(format!(
            "text cannot be represented in {}",
            encoding.name()
        )));
    }
    Ok(bytes.into_owned())
}

// encoding_rs only encodes to ascii-compatible charsets
fn encode_utf16(xml: &str, little_endian: bool) -> Vec<u8> {
    std::iter::once(0xFEFF_u16)
        .chain(xml.encode_utf16())
        .flat_map(|unit| {
            if little_endian {
                unit.to_le_bytes()
            } else {
                unit.to_be_bytes()
            }
        })
        .collect()
}
