use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstalledPlugin {
    pub short_name: String,
    pub long_name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub has_update: bool,
}

#[derive(Deserialize, Debug, Default)]
pub struct PluginList {
    #[serde(default)]
    pub plugins: Vec<InstalledPlugin>,
}
