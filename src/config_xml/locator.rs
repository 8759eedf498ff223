use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::error::ConfigEditError;
use strum_macros::{AsRefStr, Display};

/// # Config path
///
/// The logical elements editors navigate to. Each maps to one tag name; a
/// lookup returns the first occurrence in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ConfigPath {
    #[strum(serialize = "description")]
    Description,
    #[strum(serialize = "assignedNode")]
    AssignedNode,
    #[strum(serialize = "canRoam")]
    CanRoam,
    #[strum(serialize = "childProjects")]
    ChildProjects,
    #[strum(serialize = "threshold")]
    Threshold,
    #[strum(serialize = "hudson.tasks.BuildTrigger")]
    BuildTrigger,
    #[strum(serialize = "scm")]
    Scm,
    #[strum(serialize = "triggers")]
    Triggers,
    #[strum(serialize = "publishers")]
    Publishers,
    #[strum(serialize = "buildWrappers")]
    BuildWrappers,
    #[strum(serialize = "properties")]
    Properties,
    #[strum(serialize = "builders")]
    Builders,
    #[strum(serialize = "hudson.tasks.Mailer")]
    Mailer,
    #[strum(serialize = "mode")]
    Mode,
    #[strum(serialize = "label")]
    Label,
    #[strum(serialize = "numExecutors")]
    NumExecutors,
    #[strum(serialize = "jobNames")]
    JobNames,
    #[strum(serialize = "includeRegex")]
    IncludeRegex,
    #[strum(serialize = "statusFilter")]
    StatusFilter,
    #[strum(serialize = "filterQueue")]
    FilterQueue,
    #[strum(serialize = "filterExecutors")]
    FilterExecutors,
}

impl ConfigPath {
    pub fn tag(&self) -> &str {
        self.as_ref()
    }
}

/// First element for `path` anywhere in the document, `None` when absent.
pub fn locate(doc: &ConfigDocument, path: ConfigPath) -> Option<NodeId> {
    doc.find_first(path.tag())
}

/// Like [`locate`] but limited to the subtree below `scope`.
pub fn locate_in(doc: &ConfigDocument, scope: NodeId, path: ConfigPath) -> Option<NodeId> {
    doc.find_first_in(scope, path.tag())
}

pub fn locate_all(doc: &ConfigDocument, path: ConfigPath) -> Vec<NodeId> {
    doc.find_all(path.tag())
}

/// Absence turned into a structural-precondition error.
pub fn require(
    doc: &ConfigDocument,
    path: ConfigPath,
    context: &'static str,
) -> Result<NodeId, ConfigEditError> {
    locate(doc, path).ok_or_else(|| ConfigEditError::missing(path.tag(), context))
}

/// Finds `path` directly below `parent`, appending an empty one when missing.
pub(crate) fn child_or_append(
    doc: &mut ConfigDocument,
    parent: NodeId,
    path: ConfigPath,
) -> NodeId {
    match doc.find_child(parent, path.tag()) {
        Some(id) => id,
        None => doc.append_element(parent, path.tag()),
    }
}
