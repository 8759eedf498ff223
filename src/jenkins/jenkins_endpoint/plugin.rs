/// Endpoint listing installed plugins.
pub struct InstalledPlugins;

impl jenkins_sdk::Endpoint for InstalledPlugins {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "pluginManager/api/json?tree=plugins[shortName,longName,version,active,enabled,hasUpdate]"
            .to_string()
    }
}
