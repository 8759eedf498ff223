use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::upsert_text;
use crate::config_xml::locator::{locate, ConfigPath};

/// Sets the job description, creating the element when missing.
pub fn set_description(doc: &mut ConfigDocument, description: &str) {
    upsert_text(doc, ConfigPath::Description, description);
}

pub fn description(doc: &ConfigDocument) -> Option<String> {
    locate(doc, ConfigPath::Description).map(|id| doc.text(id))
}
