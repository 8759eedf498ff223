use crate::config_xml::document::ConfigDocument;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{locate, require, ConfigPath};

/// # restrict to node
///
/// Pins the job to `node_name` (a node name or label expression).
///
/// An existing `assignedNode` is overwritten. Otherwise one is inserted right
/// after `scm` and `canRoam` is forced to `false`, since a pinned job cannot
/// roam; `canRoam` is created after `assignedNode` when the job has none.
pub fn restrict_to_node(doc: &mut ConfigDocument, node_name: &str) -> Result<(), ConfigEditError> {
    if node_name.trim().is_empty() {
        return Err(ConfigEditError::InvalidArgument {
            name: "node name",
            value: node_name.to_string(),
            expected: "a node name or label expression",
        });
    }

    if let Some(assigned) = locate(doc, ConfigPath::AssignedNode) {
        doc.set_text(assigned, node_name);
        return Ok(());
    }

    let scm = require(doc, ConfigPath::Scm, "assignedNode is inserted after scm")?;
    let assigned = doc.insert_element_after(scm, ConfigPath::AssignedNode.tag())?;
    doc.set_text(assigned, node_name);

    let can_roam = match locate(doc, ConfigPath::CanRoam) {
        Some(id) => id,
        None => doc.insert_element_after(assigned, ConfigPath::CanRoam.tag())?,
    };
    doc.set_text(can_roam, "false");

    Ok(())
}
