use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::system::SystemAction;
use tracing::info;

/// Stops the server from starting new builds.
pub async fn quiet_down(client: &JacJenkinsClient) -> Result<u16, JenkinsApiError> {
    system_action(client, SystemAction::QuietDown).await
}

pub async fn cancel_quiet_down(client: &JacJenkinsClient) -> Result<u16, JenkinsApiError> {
    system_action(client, SystemAction::CancelQuietDown).await
}

/// Restarts now when `force`, otherwise once running builds are done.
pub async fn restart(client: &JacJenkinsClient, force: bool) -> Result<u16, JenkinsApiError> {
    let action = if force {
        SystemAction::Restart
    } else {
        SystemAction::SafeRestart
    };
    system_action(client, action).await
}

pub async fn reload(client: &JacJenkinsClient) -> Result<u16, JenkinsApiError> {
    system_action(client, SystemAction::Reload).await
}

pub async fn ping(client: &JacJenkinsClient) -> Result<(), JenkinsApiError> {
    client.ping().await
}

async fn system_action(
    client: &JacJenkinsClient,
    action: SystemAction,
) -> Result<u16, JenkinsApiError> {
    info!("requesting {} on {}", action, client.server_url());
    client.post(&action, None).await
}
