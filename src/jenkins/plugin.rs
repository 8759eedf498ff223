use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::plugin::InstalledPlugins;
use crate::jenkins::jenkins_model::plugin::{InstalledPlugin, PluginList};

pub async fn list_installed_plugins(
    client: &JacJenkinsClient,
) -> Result<Vec<InstalledPlugin>, JenkinsApiError> {
    let list: PluginList = client.query(&InstalledPlugins).await?;
    Ok(list.plugins)
}
