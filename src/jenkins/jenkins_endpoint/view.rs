use crate::jenkins::util::view_path;

pub struct ViewList;

impl jenkins_sdk::Endpoint for ViewList {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "api/json?tree=views[name,url]".to_string()
    }
}

/// Endpoint for creating a view; name and mode travel in the form body.
pub struct CreateView;

impl jenkins_sdk::Endpoint for CreateView {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        "createView".to_string()
    }
}

pub struct DeleteView {
    pub view_name: String,
}

impl jenkins_sdk::Endpoint for DeleteView {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("{}/doDelete", view_path(&self.view_name))
    }
}
