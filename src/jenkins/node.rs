use crate::config_xml::editors::node_config::{self, NodeMode};
use crate::config_xml::error::ConfigEditError;
use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::config_sync::edit_remote_config;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::node::{
    ComputerInfo, ComputerList, DeleteComputer, ToggleOffline,
};
use crate::jenkins::jenkins_model::node::{Computer, ComputerSet};
use crate::jenkins::util::computer_path;
use regex::Regex;
use serde_json::Value;
use std::str::FromStr;
use strum_macros::Display;
use tracing::info;

/// A node property readable through [`get_node_attribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeAttribute {
    #[strum(serialize = "num_executors")]
    NumExecutors,
    #[strum(serialize = "idle")]
    Idle,
    #[strum(serialize = "offline")]
    Offline,
    #[strum(serialize = "temporarily_offline")]
    TemporarilyOffline,
    #[strum(serialize = "offline_cause_reason")]
    OfflineCauseReason,
    #[strum(serialize = "display_name")]
    DisplayName,
    #[strum(serialize = "jnlp_agent")]
    JnlpAgent,
    #[strum(serialize = "launch_supported")]
    LaunchSupported,
    #[strum(serialize = "manual_launch_allowed")]
    ManualLaunchAllowed,
    #[strum(serialize = "icon")]
    Icon,
    #[strum(serialize = "monitor_data")]
    MonitorData,
}

impl NodeAttribute {
    pub const ALL: [NodeAttribute; 11] = [
        NodeAttribute::NumExecutors,
        NodeAttribute::Idle,
        NodeAttribute::Offline,
        NodeAttribute::TemporarilyOffline,
        NodeAttribute::OfflineCauseReason,
        NodeAttribute::DisplayName,
        NodeAttribute::JnlpAgent,
        NodeAttribute::LaunchSupported,
        NodeAttribute::ManualLaunchAllowed,
        NodeAttribute::Icon,
        NodeAttribute::MonitorData,
    ];

    pub fn read(&self, computer: &Computer) -> Value {
        match self {
            NodeAttribute::NumExecutors => Value::from(computer.num_executors),
            NodeAttribute::Idle => Value::from(computer.idle),
            NodeAttribute::Offline => Value::from(computer.offline),
            NodeAttribute::TemporarilyOffline => Value::from(computer.temporarily_offline),
            NodeAttribute::OfflineCauseReason => {
                Value::from(computer.offline_cause_reason.clone().unwrap_or_default())
            }
            NodeAttribute::DisplayName => Value::from(computer.display_name.clone()),
            NodeAttribute::JnlpAgent => Value::from(computer.jnlp_agent),
            NodeAttribute::LaunchSupported => Value::from(computer.launch_supported),
            NodeAttribute::ManualLaunchAllowed => Value::from(computer.manual_launch_allowed),
            NodeAttribute::Icon => Value::from(computer.icon.clone().unwrap_or_default()),
            NodeAttribute::MonitorData => computer.monitor_data.clone(),
        }
    }
}

impl FromStr for NodeAttribute {
    type Err = ConfigEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeAttribute::ALL
            .into_iter()
            .find(|a| a.to_string() == s)
            .ok_or_else(|| ConfigEditError::InvalidArgument {
                name: "node attribute",
                value: s.to_string(),
                expected: "num_executors, idle, offline, temporarily_offline, offline_cause_reason, \
                           display_name, jnlp_agent, launch_supported, manual_launch_allowed, icon, monitor_data",
            })
    }
}

pub async fn list_nodes(
    client: &JacJenkinsClient,
    filter: Option<&Regex>,
) -> Result<Vec<Computer>, JenkinsApiError> {
    let set: ComputerSet = client.query(&ComputerList).await?;
    Ok(set
        .computer
        .into_iter()
        .filter(|c| filter.map_or(true, |re| re.is_match(&c.display_name)))
        .collect())
}

pub async fn get_node(
    client: &JacJenkinsClient,
    node_name: &str,
) -> Result<Computer, JenkinsApiError> {
    client
        .query(&ComputerInfo {
            node_name: node_name.to_string(),
        })
        .await
}

pub async fn get_node_attribute(
    client: &JacJenkinsClient,
    node_name: &str,
    attribute: NodeAttribute,
) -> Result<Value, JenkinsApiError> {
    get_node(client, node_name).await.map(|c| attribute.read(&c))
}

/// Flips the temporarily-offline flag, with `reason` shown while offline.
pub async fn toggle_offline(
    client: &JacJenkinsClient,
    node_name: &str,
    reason: Option<&str>,
) -> Result<u16, JenkinsApiError> {
    info!("toggling offline state of {}", node_name);
    let endpoint = ToggleOffline {
        node_name: node_name.to_string(),
    };
    let form = [("offlineMessage", reason.unwrap_or_default())];
    client.post(&endpoint, Some(&form[..])).await
}

pub async fn delete_node(
    client: &JacJenkinsClient,
    node_name: &str,
) -> Result<u16, JenkinsApiError> {
    info!("deleting node {}", node_name);
    client
        .post(
            &DeleteComputer {
                node_name: node_name.to_string(),
            },
            None,
        )
        .await
}

pub async fn get_node_config(
    client: &JacJenkinsClient,
    node_name: &str,
) -> Result<String, JenkinsApiError> {
    client.fetch_config(&computer_path(node_name)).await
}

pub async fn post_node_config(
    client: &JacJenkinsClient,
    node_name: &str,
    xml: &str,
) -> Result<u16, JenkinsApiError> {
    client.push_config(&computer_path(node_name), xml).await
}

pub async fn change_mode(
    client: &JacJenkinsClient,
    node_name: &str,
    mode: NodeMode,
) -> Result<(), JenkinsApiError> {
    info!("changing mode of {} to {}", node_name, mode.as_config());
    edit_remote_config(client, &computer_path(node_name), |doc| {
        node_config::change_mode(doc, mode)
    })
    .await
}

pub async fn update_labels(
    client: &JacJenkinsClient,
    node_name: &str,
    labels: &[&str],
) -> Result<(), JenkinsApiError> {
    info!("updating labels of {}", node_name);
    edit_remote_config(client, &computer_path(node_name), |doc| {
        node_config::update_labels(doc, labels);
        Ok(())
    })
    .await
}

pub async fn set_num_executors(
    client: &JacJenkinsClient,
    node_name: &str,
    count: u32,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &computer_path(node_name), |doc| {
        node_config::set_num_executors(doc, count)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_keywords() {
        for attribute in NodeAttribute::ALL {
            assert_eq!(attribute.to_string().parse::<NodeAttribute>().unwrap(), attribute);
        }
        assert!(matches!(
            "numExecutors".parse::<NodeAttribute>(),
            Err(ConfigEditError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_read_attribute() {
        let computer: Computer = serde_json::from_str(
            r#"{"displayName":"agent-1","numExecutors":3,"idle":true,"offline":false,"offlineCauseReason":null,"monitorData":{"m":1}}"#,
        )
        .unwrap();

        assert_eq!(NodeAttribute::NumExecutors.read(&computer), Value::from(3));
        assert_eq!(NodeAttribute::Idle.read(&computer), Value::from(true));
        assert_eq!(NodeAttribute::OfflineCauseReason.read(&computer), Value::from(""));
        assert_eq!(NodeAttribute::MonitorData.read(&computer)["m"], 1);
    }
}
