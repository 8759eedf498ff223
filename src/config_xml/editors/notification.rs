use crate::config_xml::document::{ConfigDocument, NodeId};
use crate::config_xml::editors::append_bool;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{locate, require, ConfigPath};

/// `hudson.tasks.Mailer` publisher settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailNotification {
    /// whitespace separated addresses
    pub recipients: String,
    pub dont_notify_every_unstable_build: bool,
    pub send_to_individuals: bool,
}

/// # add email notification
///
/// Adds a mailer publisher unless the job already has one.
///
/// Returns `false` when a mailer was already configured (document untouched).
pub fn add_email_notification(
    doc: &mut ConfigDocument,
    notification: &EmailNotification,
) -> Result<bool, ConfigEditError> {
    if notification.recipients.trim().is_empty() {
        return Err(ConfigEditError::InvalidArgument {
            name: "notification email",
            value: notification.recipients.clone(),
            expected: "one or more email addresses",
        });
    }

    if locate(doc, ConfigPath::Mailer).is_some() {
        return Ok(false);
    }

    let publishers = require(doc, ConfigPath::Publishers, "the mailer is a publisher")?;
    append_mailer(doc, publishers, notification);
    Ok(true)
}

pub(crate) fn append_mailer(
    doc: &mut ConfigDocument,
    publishers: NodeId,
    notification: &EmailNotification,
) {
    let mailer = doc.append_element(publishers, ConfigPath::Mailer.tag());
    doc.append_text_element(mailer, "recipients", &notification.recipients);
    append_bool(
        doc,
        mailer,
        "dontNotifyEveryUnstableBuild",
        notification.dont_notify_every_unstable_build,
    );
    append_bool(doc, mailer, "sendToIndividuals", notification.send_to_individuals);
}
