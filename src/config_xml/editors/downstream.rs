use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{locate, locate_all, require, ConfigPath};
use std::fmt::Display;
use std::str::FromStr;

/// # Threshold
///
/// Build result a downstream trigger fires on (or above).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    Success,
    Unstable,
    Failure,
}

impl Threshold {
    pub fn name(&self) -> &'static str {
        match self {
            Threshold::Success => "SUCCESS",
            Threshold::Unstable => "UNSTABLE",
            Threshold::Failure => "FAILURE",
        }
    }

    pub fn ordinal(&self) -> u32 {
        match self {
            Threshold::Success => 0,
            Threshold::Unstable => 1,
            Threshold::Failure => 2,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Threshold::Success => "BLUE",
            Threshold::Unstable => "YELLOW",
            Threshold::Failure => "RED",
        }
    }
}

impl FromStr for Threshold {
    type Err = ConfigEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Threshold::Success),
            "unstable" => Ok(Threshold::Unstable),
            "failure" => Ok(Threshold::Failure),
            _ => Err(ConfigEditError::InvalidArgument {
                name: "threshold",
                value: s.to_string(),
                expected: "success, unstable, failure",
            }),
        }
    }
}

impl Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name().to_lowercase())
    }
}

/// # add downstream projects
///
/// Links `projects` (comma separated job names) as downstream of the job.
///
/// With an existing `childProjects` the names are appended as `, <projects>`
/// (or replace the list when `overwrite`); the threshold of that existing
/// trigger is left as is. Names are not deduplicated.
/// Without one, a `hudson.tasks.BuildTrigger` carrying `childProjects` and a
/// `threshold` is appended to `publishers`.
pub fn add_downstream_projects(
    doc: &mut ConfigDocument,
    projects: &str,
    threshold: Threshold,
    overwrite: bool,
) -> Result<(), ConfigEditError> {
    if projects.trim().is_empty() {
        return Err(ConfigEditError::InvalidArgument {
            name: "downstream projects",
            value: projects.to_string(),
            expected: "one or more job names",
        });
    }

    if let Some(child_projects) = locate(doc, ConfigPath::ChildProjects) {
        let current = doc.text(child_projects);
        let text = if overwrite || current.trim().is_empty() {
            projects.to_string()
        } else {
            format!("{}, {}", current, projects)
        };
        doc.set_text(child_projects, &text);
        return Ok(());
    }

    let publishers = require(
        doc,
        ConfigPath::Publishers,
        "downstream build triggers live under publishers",
    )?;
    let trigger = doc.append_element(publishers, ConfigPath::BuildTrigger.tag());
    doc.append_text_element(trigger, ConfigPath::ChildProjects.tag(), projects);
    append_threshold(doc, trigger, threshold);

    Ok(())
}

pub(crate) fn append_threshold(doc: &mut ConfigDocument, parent: NodeId, threshold: Threshold) {
    let node = doc.append_element(parent, ConfigPath::Threshold.tag());
    doc.append_text_element(node, "name", threshold.name());
    doc.append_text_element(node, "ordinal", &threshold.ordinal().to_string());
    doc.append_text_element(node, "color", threshold.color());
}

/// # remove downstream projects
///
/// Drops every `hudson.tasks.BuildTrigger` together with its `childProjects`
/// and `threshold` blocks, deepest nodes first. `publishers` is emptied when
/// nothing else is left in it.
///
/// Returns the number of build triggers removed.
pub fn remove_downstream_projects(doc: &mut ConfigDocument) -> usize {
    let triggers = locate_all(doc, ConfigPath::BuildTrigger);

    for trigger in &triggers {
        for child_projects in doc.find_all_in(*trigger, ConfigPath::ChildProjects.tag()) {
            for threshold in doc.find_all_in(child_projects, ConfigPath::Threshold.tag()) {
                remove_bottom_up(doc, threshold);
            }
            doc.remove(child_projects);
        }
        for threshold in doc.find_all_in(*trigger, ConfigPath::Threshold.tag()) {
            remove_bottom_up(doc, threshold);
        }
        doc.remove(*trigger);
    }

    if !triggers.is_empty() {
        if let Some(publishers) = locate(doc, ConfigPath::Publishers) {
            if !doc.has_element_children(publishers) {
                doc.clear_children(publishers);
            }
        }
    }

    triggers.len()
}

fn remove_bottom_up(doc: &mut ConfigDocument, id: NodeId) {
    for child in doc.children(id).to_vec() {
        doc.remove(child);
    }
    doc.remove(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::serializer::to_xml_string;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn threshold_of(doc: &ConfigDocument) -> (String, String, String) {
        let threshold = doc.find_first("threshold").unwrap();
        let field = |name: &str| doc.text(doc.find_child(threshold, name).unwrap());
        (field("name"), field("ordinal"), field("color"))
    }

    #[test]
    fn test_add_creates_build_trigger_under_publishers() {
        let mut doc = ConfigDocument::parse("<project><publishers/></project>").unwrap();

        add_downstream_projects(&mut doc, "downstream_job", Threshold::Failure, false).unwrap();

        let publishers = doc.find_first("publishers").unwrap();
        let trigger = doc.find_child(publishers, "hudson.tasks.BuildTrigger").unwrap();
        let child_projects = doc.find_child(trigger, "childProjects").unwrap();
        assert_eq!(doc.text(child_projects), "downstream_job");
        assert!(doc.find_child(trigger, "threshold").is_some());
        assert_eq!(
            threshold_of(&doc),
            ("FAILURE".to_string(), "2".to_string(), "RED".to_string())
        );
    }

    #[test]
    fn test_threshold_table() {
        let cases = [
            ("success", "SUCCESS", "0", "BLUE"),
            ("unstable", "UNSTABLE", "1", "YELLOW"),
            ("failure", "FAILURE", "2", "RED"),
        ];

        for (keyword, name, ordinal, color) in cases {
            let mut doc = ConfigDocument::parse("<project><publishers/></project>").unwrap();
            let threshold = keyword.parse::<Threshold>().unwrap();

            add_downstream_projects(&mut doc, "next", threshold, false).unwrap();

            assert_eq!(
                threshold_of(&doc),
                (name.to_string(), ordinal.to_string(), color.to_string())
            );
        }
    }

    #[test]
    fn test_unknown_threshold_is_rejected() {
        assert!(matches!(
            "aborted".parse::<Threshold>(),
            Err(ConfigEditError::InvalidArgument {
                name: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_add_appends_without_dedup() {
        let mut doc = ConfigDocument::parse(indoc! {r#"
            <project>
              <publishers>
                <hudson.tasks.BuildTrigger>
                  <childProjects>a</childProjects>
                  <threshold><name>SUCCESS</name><ordinal>0</ordinal><color>BLUE</color></threshold>
                </hudson.tasks.BuildTrigger>
              </publishers>
            </project>"#})
        .unwrap();

        add_downstream_projects(&mut doc, "b", Threshold::Failure, false).unwrap();
        add_downstream_projects(&mut doc, "b", Threshold::Failure, false).unwrap();

        let child_projects = doc.find_first("childProjects").unwrap();
        assert_eq!(doc.text(child_projects), "a, b, b");
        assert_eq!(doc.find_all("hudson.tasks.BuildTrigger").len(), 1);
        assert_eq!(threshold_of(&doc).0, "SUCCESS");
    }

    #[test]
    fn test_add_overwrite_replaces_list() {
        let mut doc = ConfigDocument::parse(
            "<project><publishers><hudson.tasks.BuildTrigger><childProjects>a, b</childProjects></hudson.tasks.BuildTrigger></publishers></project>",
        )
        .unwrap();

        add_downstream_projects(&mut doc, "c", Threshold::Success, true).unwrap();

        assert_eq!(doc.text(doc.find_first("childProjects").unwrap()), "c");
    }

    #[test]
    fn test_add_without_publishers_is_structural_error_and_leaves_doc() {
        let mut doc = ConfigDocument::parse("<project><builders/></project>").unwrap();
        let before = doc.clone();

        let result = add_downstream_projects(&mut doc, "x", Threshold::Success, false);

        assert!(matches!(
            result,
            Err(ConfigEditError::MissingElement { ref element, .. }) if element == "publishers"
        ));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_leaves_publishers_empty() {
        let mut doc = ConfigDocument::parse(indoc! {r#"
            <project>
              <publishers>
                <hudson.tasks.BuildTrigger>
                  <childProjects>a, b</childProjects>
                  <threshold>
                    <name>FAILURE</name>
                    <ordinal>2</ordinal>
                    <color>RED</color>
                  </threshold>
                </hudson.tasks.BuildTrigger>
              </publishers>
            </project>"#})
        .unwrap();
        let threshold_name = doc.find_first("name").unwrap();

        assert_eq!(remove_downstream_projects(&mut doc), 1);

        assert!(!doc.is_attached(threshold_name));
        assert!(doc.find_first("childProjects").is_none());
        assert!(doc.find_first("threshold").is_none());
        assert_eq!(
            to_xml_string(&doc).unwrap(),
            "<project>\n  <publishers/>\n</project>"
        );
    }

    #[test]
    fn test_remove_keeps_other_publishers() {
        let mut doc = ConfigDocument::parse(
            "<project><publishers><hudson.tasks.Mailer/><hudson.tasks.BuildTrigger><childProjects>a</childProjects></hudson.tasks.BuildTrigger></publishers></project>",
        )
        .unwrap();

        remove_downstream_projects(&mut doc);

        assert_eq!(
            to_xml_string(&doc).unwrap(),
            "<project><publishers><hudson.tasks.Mailer/></publishers></project>"
        );
    }

    #[test]
    fn test_remove_without_triggers_is_noop() {
        let mut doc =
            ConfigDocument::parse("<project><publishers>\n</publishers></project>").unwrap();
        let before = doc.clone();

        assert_eq!(remove_downstream_projects(&mut doc), 0);
        assert_eq!(doc, before);
    }
}
