use crate::config_xml::error::ConfigEditError;
use crate::constant::log::*;
use crate::constant::util::hide_sensitive;
use crate::jenkins::error::JenkinsApiError;
use crate::pretty_log::{colored_println, ThemeColor};
use formatx::formatx;
use inquire::InquireError;
use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug)]
pub enum JacError {
    Custom(String),
    InquireError(InquireError),
    MissingCredentials {
        field: CredentialField,
        source_path: PathBuf,
    },
    CredentialsUnreadable {
        source_path: PathBuf,
        reason: String,
    },
    JenkinsConnectError {
        url: String,
        username: String,
        secret: String,
        e: JenkinsApiError,
    },
    Jenkins(JenkinsApiError),
    InvalidArgument(ConfigEditError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ServerUrl,
    Username,
    Secret,
}

impl From<InquireError> for JacError {
    fn from(value: InquireError) -> Self {
        JacError::InquireError(value)
    }
}

impl From<JenkinsApiError> for JacError {
    fn from(value: JenkinsApiError) -> Self {
        match value {
            JenkinsApiError::Edit(e) => JacError::InvalidArgument(e),
            e => JacError::Jenkins(e),
        }
    }
}

impl From<ConfigEditError> for JacError {
    fn from(value: ConfigEditError) -> Self {
        JacError::InvalidArgument(value)
    }
}

impl Display for JacError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            JacError::Custom(msg) => msg.clone(),
            JacError::InquireError(err) => err.to_string(),
            JacError::MissingCredentials { field, source_path } => {
                let template = match field {
                    CredentialField::ServerUrl => ERR_NEED_A_JENKINS_URL,
                    CredentialField::Username => ERR_NEED_A_JENKINS_USERNAME,
                    CredentialField::Secret => ERR_NEED_A_JENKINS_SECRET,
                };
                formatx!(template, source_path.display()).unwrap_or_default()
            }
            JacError::CredentialsUnreadable {
                source_path,
                reason,
            } => formatx!(ERR_CREDENTIALS_UNREADABLE, source_path.display(), reason)
                .unwrap_or_default(),
            JacError::JenkinsConnectError {
                url,
                username,
                secret,
                e,
            } => formatx!(
                ERR_JENKINS_CLIENT_INVALID,
                url,
                username,
                hide_sensitive(secret, 4),
                e.to_string()
            )
            .unwrap_or_default(),
            JacError::Jenkins(e) => formatx!(ERR_REQUEST_FAILED, e.to_string()).unwrap_or_default(),
            JacError::InvalidArgument(e) => {
                formatx!(ERR_INVALID_ARGUMENT, e.to_string()).unwrap_or_default()
            }
        };

        write!(f, "{}", str)
    }
}

impl std::error::Error for JacError {}

impl JacError {
    pub fn colored_println<W: Write>(&self, stdout: &mut W) {
        colored_println(stdout, ThemeColor::Error, self.to_string().as_str());
    }
}
