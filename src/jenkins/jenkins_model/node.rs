use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    pub display_name: String,
    #[serde(default)]
    pub num_executors: u32,
    #[serde(default)]
    pub idle: bool,
    #[serde(default)]
    pub offline: bool,
    #[serde(default)]
    pub temporarily_offline: bool,
    pub offline_cause_reason: Option<String>,
    #[serde(default)]
    pub jnlp_agent: bool,
    #[serde(default)]
    pub launch_supported: bool,
    #[serde(default)]
    pub manual_launch_allowed: bool,
    pub icon: Option<String>,
    #[serde(default)]
    pub monitor_data: Value,
}

#[derive(Deserialize, Debug, Default)]
pub struct ComputerSet {
    #[serde(default)]
    pub computer: Vec<Computer>,
}
