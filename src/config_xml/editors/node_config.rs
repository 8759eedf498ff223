use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::upsert_text;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{require, ConfigPath};
use std::str::FromStr;

/// How the node picks up work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeMode {
    /// use this node as much as possible
    Normal,
    /// only jobs tied to this node
    Exclusive,
}

impl NodeMode {
    pub fn as_config(&self) -> &'static str {
        match self {
            NodeMode::Normal => "NORMAL",
            NodeMode::Exclusive => "EXCLUSIVE",
        }
    }
}

impl FromStr for NodeMode {
    type Err = ConfigEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(NodeMode::Normal),
            "exclusive" => Ok(NodeMode::Exclusive),
            _ => Err(ConfigEditError::InvalidArgument {
                name: "node mode",
                value: s.to_string(),
                expected: "normal, exclusive",
            }),
        }
    }
}

pub fn change_mode(doc: &mut ConfigDocument, mode: NodeMode) -> Result<(), ConfigEditError> {
    let node = require(doc, ConfigPath::Mode, "node configs always carry a mode")?;
    doc.set_text(node, mode.as_config());
    Ok(())
}

/// Replaces the node labels with `labels`, joined by spaces.
pub fn update_labels(doc: &mut ConfigDocument, labels: &[&str]) {
    let joined = labels
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    upsert_text(doc, ConfigPath::Label, &joined);
}

pub fn set_num_executors(doc: &mut ConfigDocument, count: u32) -> Result<(), ConfigEditError> {
    if count == 0 {
        return Err(ConfigEditError::InvalidArgument {
            name: "executor count",
            value: count.to_string(),
            expected: "a positive number",
        });
    }
    upsert_text(doc, ConfigPath::NumExecutors, &count.to_string());
    Ok(())
}
