//! Structural editors: one module per concern of a `config.xml`.
//!
//! Every editor follows the same shape: validate the caller's arguments and
//! the structural preconditions, then locate, then create or update. Nothing
//! is written to the document before all checks have passed.

use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{locate, ConfigPath};

pub mod downstream;
pub mod job_fields;
pub mod node_config;
pub mod node_restriction;
pub mod notification;
pub mod scm;
pub mod triggers;
pub mod view_config;

/// Sets the text of the first `path` element, appending it to the root when
/// the document has none.
pub(crate) fn upsert_text(doc: &mut ConfigDocument, path: ConfigPath, text: &str) -> NodeId {
    let id = match locate(doc, path) {
        Some(id) => id,
        None => {
            let root = doc.root();
            doc.append_element(root, path.tag())
        }
    };
    doc.set_text(id, text);
    id
}

/// Appends `<name>true|false</name>`.
pub(crate) fn append_bool(
    doc: &mut ConfigDocument,
    parent: NodeId,
    name: &str,
    val: bool,
) -> NodeId {
    doc.append_text_element(parent, name, if val { "true" } else { "false" })
}

pub(crate) fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigEditError> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|_| ConfigEditError::InvalidArgument {
            name,
            value: value.to_string(),
            expected: "true, false",
        })
}
