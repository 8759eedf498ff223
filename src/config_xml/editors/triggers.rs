use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::editors::append_bool;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{require, ConfigPath};

const TIMER_TRIGGER: &str = "hudson.triggers.TimerTrigger";
const SCM_TRIGGER: &str = "hudson.triggers.SCMTrigger";

/// Cron specs for periodic builds and SCM polling. `None` leaves the
/// corresponding trigger untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerSpec {
    pub timer: Option<String>,
    pub scm_poll: Option<String>,
    pub ignore_post_commit_hooks: bool,
}

impl TriggerSpec {
    pub fn is_empty(&self) -> bool {
        self.timer.is_none() && self.scm_poll.is_none()
    }

    fn validate(&self) -> Result<(), ConfigEditError> {
        for spec in [&self.timer, &self.scm_poll].into_iter().flatten() {
            // five cron fields, or one of the @hourly style aliases
            let fields = spec.split_whitespace().count();
            if !(fields == 5 || (fields == 1 && spec.trim().starts_with('@'))) {
                return Err(ConfigEditError::InvalidArgument {
                    name: "cron spec",
                    value: spec.to_string(),
                    expected: "five cron fields or an @alias",
                });
            }
        }
        Ok(())
    }
}

/// # configure triggers
///
/// Creates or updates the timer and SCM polling triggers under `triggers`.
pub fn configure_triggers(
    doc: &mut ConfigDocument,
    spec: &TriggerSpec,
) -> Result<(), ConfigEditError> {
    spec.validate()?;
    if spec.is_empty() {
        return Ok(());
    }
    let triggers = require(doc, ConfigPath::Triggers, "build triggers live under triggers")?;

    if let Some(timer) = &spec.timer {
        let trigger = trigger_block(doc, triggers, TIMER_TRIGGER);
        set_child_text(doc, trigger, "spec", timer);
    }

    if let Some(poll) = &spec.scm_poll {
        let trigger = trigger_block(doc, triggers, SCM_TRIGGER);
        set_child_text(doc, trigger, "spec", poll);
        set_child_text(
            doc,
            trigger,
            "ignorePostCommitHooks",
            if spec.ignore_post_commit_hooks { "true" } else { "false" },
        );
    }

    Ok(())
}

/// Appends triggers to a freshly built `triggers` element.
pub(crate) fn append_triggers(doc: &mut ConfigDocument, triggers: NodeId, spec: &TriggerSpec) {
    if let Some(timer) = &spec.timer {
        let trigger = doc.append_element(triggers, TIMER_TRIGGER);
        doc.append_text_element(trigger, "spec", timer);
    }
    if let Some(poll) = &spec.scm_poll {
        let trigger = doc.append_element(triggers, SCM_TRIGGER);
        doc.append_text_element(trigger, "spec", poll);
        append_bool(doc, trigger, "ignorePostCommitHooks", spec.ignore_post_commit_hooks);
    }
}

fn trigger_block(doc: &mut ConfigDocument, triggers: NodeId, name: &str) -> NodeId {
    match doc.find_child(triggers, name) {
        Some(id) => id,
        None => doc.append_element(triggers, name),
    }
}

fn set_child_text(doc: &mut ConfigDocument, parent: NodeId, name: &str, text: &str) {
    let id = match doc.find_child(parent, name) {
        Some(id) => id,
        None => doc.append_element(parent, name),
    };
    doc.set_text(id, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::serializer::to_xml_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_creates_and_updates_triggers() {
        let mut doc = ConfigDocument::parse("<project><triggers/></project>").unwrap();
        let spec = TriggerSpec {
            timer: Some("H 2 * * *".to_string()),
            scm_poll: Some("H/5 * * * *".to_string()),
            ignore_post_commit_hooks: false,
        };

        configure_triggers(&mut doc, &spec).unwrap();
        assert_eq!(
            to_xml_string(&doc).unwrap(),
            "<project><triggers><hudson.triggers.TimerTrigger><spec>H 2 * * *</spec></hudson.triggers.TimerTrigger><hudson.triggers.SCMTrigger><spec>H/5 * * * *</spec><ignorePostCommitHooks>false</ignorePostCommitHooks></hudson.triggers.SCMTrigger></triggers></project>"
        );

        let update = TriggerSpec {
            timer: Some("@daily".to_string()),
            ..Default::default()
        };
        configure_triggers(&mut doc, &update).unwrap();
        assert_eq!(doc.find_all(TIMER_TRIGGER).len(), 1);
        let timer = doc.find_first(TIMER_TRIGGER).unwrap();
        assert_eq!(doc.text(doc.find_child(timer, "spec").unwrap()), "@daily");
        assert!(doc.find_first(SCM_TRIGGER).is_some());
    }

    #[test]
    fn test_invalid_cron_rejected_before_lookup() {
        let mut doc = ConfigDocument::parse("<project/>").unwrap();
        let spec = TriggerSpec {
            timer: Some("every day".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            configure_triggers(&mut doc, &spec),
            Err(ConfigEditError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_triggers_container() {
        let mut doc = ConfigDocument::parse("<project/>").unwrap();
        let spec = TriggerSpec {
            scm_poll: Some("H * * * *".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            configure_triggers(&mut doc, &spec),
            Err(ConfigEditError::MissingElement { .. })
        ));
    }
}
