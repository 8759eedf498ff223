use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::{append_bool, parse_bool};
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{require, ConfigPath};
use crate::config_xml::plugin_settings::ConfigureDocument;
use std::collections::HashMap;

const HIPCHAT_PROPERTY: &str = "jenkins.plugins.hipchat.HipChatNotifier_-HipChatJobProperty";

/// HipChat room notification, written as a job property.
///
/// Unset fields fall back to the plugin's defaults when written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HipchatSetting {
    pub room: Option<String>,
    pub start_notification: Option<bool>,
    pub notify_success: Option<bool>,
    pub notify_aborted: Option<bool>,
    pub notify_not_built: Option<bool>,
    pub notify_unstable: Option<bool>,
    pub notify_failure: Option<bool>,
    pub notify_back_to_normal: Option<bool>,
}

impl HipchatSetting {
    /// Reads the camelCase keys the plugin uses (`room`, `notifySuccess`..).
    /// Unknown keys are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ConfigEditError> {
        let flag = |key: &'static str| -> Result<Option<bool>, ConfigEditError> {
            params.get(key).map(|v| parse_bool(key, v)).transpose()
        };

        Ok(Self {
            room: params.get("room").cloned(),
            start_notification: flag("startNotification")?,
            notify_success: flag("notifySuccess")?,
            notify_aborted: flag("notifyAborted")?,
            notify_not_built: flag("notifyNotBuilt")?,
            notify_unstable: flag("notifyUnstable")?,
            notify_failure: flag("notifyFailure")?,
            notify_back_to_normal: flag("notifyBackToNormal")?,
        })
    }
}

impl ConfigureDocument for HipchatSetting {
    fn configure(&self, doc: &mut ConfigDocument) -> Result<(), ConfigEditError> {
        let properties = require(doc, ConfigPath::Properties, "hipchat is a job property")?;

        if let Some(existing) = doc.find_child(properties, HIPCHAT_PROPERTY) {
            doc.remove(existing);
        }

        let property = doc.append_element(properties, HIPCHAT_PROPERTY);
        doc.append_text_element(property, "room", self.room.as_deref().unwrap_or(""));
        append_bool(
            doc,
            property,
            "startNotification",
            self.start_notification.unwrap_or(false),
        );
        append_bool(doc, property, "notifySuccess", self.notify_success.unwrap_or(true));
        append_bool(doc, property, "notifyAborted", self.notify_aborted.unwrap_or(true));
        append_bool(doc, property, "notifyNotBuilt", self.notify_not_built.unwrap_or(false));
        append_bool(doc, property, "notifyUnstable", self.notify_unstable.unwrap_or(true));
        append_bool(doc, property, "notifyFailure", self.notify_failure.unwrap_or(true));
        append_bool(
            doc,
            property,
            "notifyBackToNormal",
            self.notify_back_to_normal.unwrap_or(true),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::serializer::to_xml_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_params_write_every_default() {
        let setting = HipchatSetting::from_params(&HashMap::new()).unwrap();
        let mut doc = ConfigDocument::parse("<project><properties/></project>").unwrap();

        setting.configure(&mut doc).unwrap();

        assert_eq!(
            to_xml_string(&doc).unwrap(),
            "<project><properties><jenkins.plugins.hipchat.HipChatNotifier_-HipChatJobProperty>\
             <room/>\
             <startNotification>false</startNotification>\
             <notifySuccess>true</notifySuccess>\
             <notifyAborted>true</notifyAborted>\
             <notifyNotBuilt>false</notifyNotBuilt>\
             <notifyUnstable>true</notifyUnstable>\
             <notifyFailure>true</notifyFailure>\
             <notifyBackToNormal>true</notifyBackToNormal>\
             </jenkins.plugins.hipchat.HipChatNotifier_-HipChatJobProperty></properties></project>"
        );
    }

    #[test]
    fn test_params_override_defaults() {
        let params = HashMap::from([
            ("room".to_string(), "ops".to_string()),
            ("notifySuccess".to_string(), "false".to_string()),
        ]);
        let setting = HipchatSetting::from_params(&params).unwrap();
        let mut doc = ConfigDocument::parse("<project><properties/></project>").unwrap();

        setting.configure(&mut doc).unwrap();

        assert_eq!(doc.text(doc.find_first("room").unwrap()), "ops");
        assert_eq!(doc.text(doc.find_first("notifySuccess").unwrap()), "false");
        assert_eq!(doc.text(doc.find_first("notifyFailure").unwrap()), "true");
    }

    #[test]
    fn test_bad_flag_and_missing_properties() {
        let params = HashMap::from([("notifyFailure".to_string(), "maybe".to_string())]);
        assert!(HipchatSetting::from_params(&params).is_err());

        let mut doc = ConfigDocument::parse("<project/>").unwrap();
        assert!(matches!(
            HipchatSetting::default().configure(&mut doc),
            Err(ConfigEditError::MissingElement { .. })
        ));
    }
}
