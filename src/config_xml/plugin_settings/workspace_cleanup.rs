use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::{append_bool, parse_bool};
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{require, ConfigPath};
use crate::config_xml::plugin_settings::ConfigureDocument;
use std::collections::HashMap;

const PRE_BUILD_CLEANUP: &str = "hudson.plugins.ws__cleanup.PreBuildCleanup";

/// Workspace wipe before each build, written as a build wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceCleanupSetting {
    pub delete_dirs: Option<bool>,
    pub cleanup_parameter: Option<String>,
    pub external_delete: Option<String>,
}

impl WorkspaceCleanupSetting {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigEditError> {
        Ok(Self {
            delete_dirs: params
                .get("deleteDirs")
                .map(|v| parse_bool("deleteDirs", v))
                .transpose()?,
            cleanup_parameter: params.get("cleanupParameter").cloned(),
            external_delete: params.get("externalDelete").cloned(),
        })
    }
}

impl ConfigureDocument for WorkspaceCleanupSetting {
    fn configure(&self, doc: &mut ConfigDocument) -> Result<(), ConfigEditError> {
        let wrappers = require(
            doc,
            ConfigPath::BuildWrappers,
            "workspace cleanup is a build wrapper",
        )?;

        if let Some(existing) = doc.find_child(wrappers, PRE_BUILD_CLEANUP) {
            doc.remove(existing);
        }

        let cleanup = doc.append_element(wrappers, PRE_BUILD_CLEANUP);
        append_bool(doc, cleanup, "deleteDirs", self.delete_dirs.unwrap_or(false));
        doc.append_text_element(
            cleanup,
            "cleanupParameter",
            self.cleanup_parameter.as_deref().unwrap_or(""),
        );
        doc.append_text_element(
            cleanup,
            "externalDelete",
            self.external_delete.as_deref().unwrap_or(""),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::serializer::to_xml_string;

    #[test]
    fn test_defaults_are_complete() {
        let mut doc = ConfigDocument::parse("<project><buildWrappers/></project>").unwrap();

        WorkspaceCleanupSetting::from_params(&HashMap::new())
            .unwrap()
            .configure(&mut doc)
            .unwrap();

        assert_eq!(
            to_xml_string(&doc).unwrap(),
            "<project><buildWrappers><hudson.plugins.ws__cleanup.PreBuildCleanup><deleteDirs>false</deleteDirs><cleanupParameter/><externalDelete/></hudson.plugins.ws__cleanup.PreBuildCleanup></buildWrappers></project>"
        );
    }

    #[test]
    fn test_reconfigure_replaces_block() {
        let mut doc = ConfigDocument::parse("<project><buildWrappers/></project>").unwrap();
        WorkspaceCleanupSetting::default().configure(&mut doc).unwrap();

        let params = HashMap::from([("deleteDirs".to_string(), "true".to_string())]);
        WorkspaceCleanupSetting::from_params(&params)
            .unwrap()
            .configure(&mut doc)
            .unwrap();

        assert_eq!(doc.find_all(PRE_BUILD_CLEANUP).len(), 1);
        assert_eq!(doc.text(doc.find_first("deleteDirs").unwrap()), "true");
    }
}
