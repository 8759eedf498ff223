//! Plugin settings: configuration fragments contributed by optional server
//! plugins, applied to a job document alongside the core fields.

use crate::config_xml::document::ConfigDocument;
use crate::config_xml::error::ConfigEditError;
use std::mem::discriminant;
use strum_macros::Display;
use tracing::debug;

mod hipchat;
mod workspace_cleanup;

pub use hipchat::HipchatSetting;
pub use workspace_cleanup::WorkspaceCleanupSetting;

/// The one capability every plugin setting provides.
pub trait ConfigureDocument {
    /// Mutates `doc` so it carries this setting. Applying twice gives the same
    /// document as applying once.
    fn configure(&self, doc: &mut ConfigDocument) -> Result<(), ConfigEditError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PluginSetting {
    /// Placeholder with no mutation of its own. Never accepted by a collection.
    Base,
    Hipchat(HipchatSetting),
    WorkspaceCleanup(WorkspaceCleanupSetting),
}

impl PluginSetting {
    fn same_kind(&self, other: &PluginSetting) -> bool {
        discriminant(self) == discriminant(other)
    }
}

impl ConfigureDocument for PluginSetting {
    fn configure(&self, doc: &mut ConfigDocument) -> Result<(), ConfigEditError> {
        match self {
            PluginSetting::Base => Err(ConfigEditError::NotImplemented("configure")),
            PluginSetting::Hipchat(setting) => setting.configure(doc),
            PluginSetting::WorkspaceCleanup(setting) => setting.configure(doc),
        }
    }
}

/// # Plugin settings collection
///
/// Insertion-ordered, at most one setting per plugin kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginSettingsCollection {
    settings: Vec<PluginSetting>,
}

impl PluginSettingsCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `setting` unless one of the same kind is already present.
    pub fn add(&mut self, setting: PluginSetting) -> Result<(), ConfigEditError> {
        if setting == PluginSetting::Base {
            return Err(ConfigEditError::InvalidType(setting.to_string()));
        }
        if self.settings.iter().any(|s| s.same_kind(&setting)) {
            debug!("plugin setting {} already present, ignored", setting);
            return Ok(());
        }
        self.settings.push(setting);
        Ok(())
    }

    /// Removes every setting of the same kind as `setting`.
    pub fn remove(&mut self, setting: &PluginSetting) {
        self.settings.retain(|s| !s.same_kind(setting));
    }

    pub fn size(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginSetting> {
        self.settings.iter()
    }

    /// Applies the members in insertion order.
    ///
    /// The edits run against a copy which replaces `doc` only when every
    /// member succeeded, so a failing member leaves `doc` as it was.
    pub fn configure(&self, doc: &mut ConfigDocument) -> Result<(), ConfigEditError> {
        if self.settings.is_empty() {
            return Ok(());
        }
        let mut staged = doc.clone();
        for setting in &self.settings {
            setting.configure(&mut staged)?;
        }
        *doc = staged;
        Ok(())
    }
}
