use crate::config_xml::error::ConfigEditError;
use jenkins_sdk::JenkinsError;
use thiserror::Error;

/// Failure talking to the server, or of an edit made on its behalf.
#[derive(Error, Debug)]
pub enum JenkinsApiError {
    #[error("not authorized ({status}) for {endpoint}")]
    Unauthorized { endpoint: String, status: u16 },

    #[error("not found: {endpoint}")]
    NotFound { endpoint: String },

    #[error("server error ({status}) for {endpoint}: {body}")]
    ServerError {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response for {endpoint}: {message}")]
    Uncategorized { endpoint: String, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("cannot decode response of {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error(transparent)]
    Edit(#[from] ConfigEditError),

    #[error(transparent)]
    Sdk(#[from] JenkinsError),
}

impl JenkinsApiError {
    pub(crate) fn uncategorized(endpoint: &str, message: impl ToString) -> Self {
        JenkinsApiError::Uncategorized {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn decode(endpoint: &str, message: impl ToString) -> Self {
        JenkinsApiError::Decode {
            endpoint: endpoint.to_string(),
            message: message.to_string(),
        }
    }
}

/// # classify status
///
/// Maps a non-2xx response onto the error taxonomy. Only 2xx passes; a
/// redirect reqwest could not follow is as fatal as any other status.
pub fn classify_status(endpoint: &str, status: u16, body: &str) -> Result<(), JenkinsApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(JenkinsApiError::Unauthorized {
            endpoint: endpoint.to_string(),
            status,
        }),
        404 => Err(JenkinsApiError::NotFound {
            endpoint: endpoint.to_string(),
        }),
        500..=599 => Err(JenkinsApiError::ServerError {
            endpoint: endpoint.to_string(),
            status,
            body: body.to_string(),
        }),
        _ => Err(JenkinsApiError::uncategorized(
            endpoint,
            format!("status {}: {}", status, body),
        )),
    }
}
