use crate::jenkins::util::computer_path;

/// Endpoint listing every node.
pub struct ComputerList;

impl jenkins_sdk::Endpoint for ComputerList {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "computer/api/json?depth=1".to_string()
    }
}

/// Endpoint for the details of one node.
pub struct ComputerInfo {
    pub node_name: String,
}

impl jenkins_sdk::Endpoint for ComputerInfo {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        format!("{}/api/json?depth=1", computer_path(&self.node_name))
    }
}

/// Endpoint flipping the temporarily-offline flag of a node.
pub struct ToggleOffline {
    pub node_name: String,
}

impl jenkins_sdk::Endpoint for ToggleOffline {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/toggleOffline", computer_path(&self.node_name))
    }
}

pub struct DeleteComputer {
    pub node_name: String,
}

impl jenkins_sdk::Endpoint for DeleteComputer {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/doDelete", computer_path(&self.node_name))
    }
}
