use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::append_bool;
use crate::config_xml::editors::downstream::{append_threshold, Threshold};
use crate::config_xml::editors::notification::{append_mailer, EmailNotification};
use crate::config_xml::editors::scm::{append_scm, ScmSpec};
use crate::config_xml::editors::triggers::{append_triggers, TriggerSpec};
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::ConfigPath;
use crate::config_xml::plugin_settings::PluginSettingsCollection;

/// Everything a new freestyle job can be created with.
#[derive(Debug, Clone, Default)]
pub struct FreestyleJobParams {
    pub name: String,
    pub description: Option<String>,
    pub keep_dependencies: bool,
    pub block_build_when_downstream_building: bool,
    pub block_build_when_upstream_building: bool,
    pub concurrent_build: bool,
    pub disabled: bool,
    pub scm: Option<ScmSpec>,
    pub restricted_node: Option<String>,
    pub shell_command: Option<String>,
    pub triggers: TriggerSpec,
    /// comma separated job names
    pub child_projects: Option<String>,
    /// defaults to failure
    pub child_threshold: Option<Threshold>,
    pub notification_email: Option<EmailNotification>,
    pub plugins: PluginSettingsCollection,
}

/// # build freestyle config
///
/// Renders `params` as a `<project>` document, elements in the order the
/// server itself writes them, then applies the plugin settings.
pub fn build_freestyle_config(
    params: &FreestyleJobParams,
) -> Result<ConfigDocument, ConfigEditError> {
    if params.name.trim().is_empty() {
        return Err(ConfigEditError::InvalidArgument {
            name: "job name",
            value: params.name.clone(),
            expected: "a non-empty job name",
        });
    }

    let mut doc = ConfigDocument::new("project");
    let root = doc.root();

    doc.append_element(root, "actions");
    doc.append_text_element(
        root,
        ConfigPath::Description.tag(),
        params.description.as_deref().unwrap_or_default(),
    );
    append_bool(&mut doc, root, "keepDependencies", params.keep_dependencies);
    doc.append_element(root, ConfigPath::Properties.tag());
    append_scm(&mut doc, root, params.scm.as_ref());

    match params.restricted_node.as_deref().filter(|n| !n.trim().is_empty()) {
        Some(node) => {
            doc.append_text_element(root, ConfigPath::AssignedNode.tag(), node);
            append_bool(&mut doc, root, ConfigPath::CanRoam.tag(), false);
        }
        None => {
            append_bool(&mut doc, root, ConfigPath::CanRoam.tag(), true);
        }
    }

    append_bool(&mut doc, root, "disabled", params.disabled);
    append_bool(
        &mut doc,
        root,
        "blockBuildWhenDownstreamBuilding",
        params.block_build_when_downstream_building,
    );
    append_bool(
        &mut doc,
        root,
        "blockBuildWhenUpstreamBuilding",
        params.block_build_when_upstream_building,
    );

    let triggers = doc.append_element(root, ConfigPath::Triggers.tag());
    append_triggers(&mut doc, triggers, &params.triggers);

    append_bool(&mut doc, root, "concurrentBuild", params.concurrent_build);

    let builders = doc.append_element(root, ConfigPath::Builders.tag());
    if let Some(command) = &params.shell_command {
        let shell = doc.append_element(builders, "hudson.tasks.Shell");
        doc.append_text_element(shell, "command", command);
    }

    let publishers = doc.append_element(root, ConfigPath::Publishers.tag());
    if let Some(children) = params.child_projects.as_deref().filter(|c| !c.trim().is_empty()) {
        let trigger = doc.append_element(publishers, ConfigPath::BuildTrigger.tag());
        doc.append_text_element(trigger, ConfigPath::ChildProjects.tag(), children);
        append_threshold(
            &mut doc,
            trigger,
            params.child_threshold.unwrap_or(Threshold::Failure),
        );
    }
    if let Some(notification) = &params.notification_email {
        append_mailer(&mut doc, publishers, notification);
    }

    doc.append_element(root, ConfigPath::BuildWrappers.tag());

    params.plugins.configure(&mut doc)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::editors::node_restriction::restrict_to_node;
    use crate::config_xml::plugin_settings::{PluginSetting, WorkspaceCleanupSetting};
    use crate::config_xml::serializer::to_xml_string;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn element_order(doc: &ConfigDocument) -> Vec<String> {
        doc.child_elements(doc.root())
            .filter_map(|c| doc.name(c).map(|n| n.to_string()))
            .collect()
    }

    #[test]
    fn test_minimal_job() {
        let params = FreestyleJobParams {
            name: "api".to_string(),
            ..Default::default()
        };

        let doc = build_freestyle_config(&params).unwrap();

        let expected = indoc! {r#"
            <?xml version="1.1" encoding="UTF-8"?>
            <project><actions/><description/><keepDependencies>false</keepDependencies><properties/><scm class="hudson.scm.NullSCM"/><canRoam>true</canRoam><disabled>false</disabled><blockBuildWhenDownstreamBuilding>false</blockBuildWhenDownstreamBuilding><blockBuildWhenUpstreamBuilding>false</blockBuildWhenUpstreamBuilding><triggers/><concurrentBuild>false</concurrentBuild><builders/><publishers/><buildWrappers/></project>"#};
        assert_eq!(to_xml_string(&doc).unwrap(), expected);
    }

    #[test]
    fn test_full_job_order() {
        let mut plugins = PluginSettingsCollection::new();
        plugins
            .add(PluginSetting::WorkspaceCleanup(WorkspaceCleanupSetting::default()))
            .unwrap();
        let params = FreestyleJobParams {
            name: "api".to_string(),
            description: Some("builds the api".to_string()),
            scm: Some(ScmSpec::Subversion {
                url: "svn://repo/trunk".to_string(),
            }),
            restricted_node: Some("linux".to_string()),
            shell_command: Some("make test".to_string()),
            triggers: TriggerSpec {
                scm_poll: Some("H/5 * * * *".to_string()),
                ..Default::default()
            },
            child_projects: Some("deploy".to_string()),
            notification_email: Some(EmailNotification {
                recipients: "dev@example.com".to_string(),
                ..Default::default()
            }),
            plugins,
            ..Default::default()
        };

        let doc = build_freestyle_config(&params).unwrap();

        assert_eq!(
            element_order(&doc),
            vec![
                "actions",
                "description",
                "keepDependencies",
                "properties",
                "scm",
                "assignedNode",
                "canRoam",
                "disabled",
                "blockBuildWhenDownstreamBuilding",
                "blockBuildWhenUpstreamBuilding",
                "triggers",
                "concurrentBuild",
                "builders",
                "publishers",
                "buildWrappers",
            ]
        );
        assert_eq!(doc.text(doc.find_first("canRoam").unwrap()), "false");
        assert_eq!(doc.text(doc.find_first("ordinal").unwrap()), "2");
        assert!(doc.find_first("hudson.tasks.Mailer").is_some());
        assert!(doc.find_first("hudson.plugins.ws__cleanup.PreBuildCleanup").is_some());
    }

    #[test]
    fn test_built_job_accepts_later_edits() {
        let params = FreestyleJobParams {
            name: "api".to_string(),
            ..Default::default()
        };
        let mut doc = build_freestyle_config(&params).unwrap();

        restrict_to_node(&mut doc, "win").unwrap();

        assert_eq!(doc.find_all("assignedNode").len(), 1);
        assert_eq!(doc.find_all("canRoam").len(), 1);
        assert_eq!(doc.text(doc.find_first("canRoam").unwrap()), "false");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            build_freestyle_config(&FreestyleJobParams::default()),
            Err(ConfigEditError::InvalidArgument { .. })
        ));
    }
}
