use crate::config_xml::editors::view_config::{self, StatusFilter};
use crate::config_xml::error::ConfigEditError;
use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::config_sync::edit_remote_config;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::view::{CreateView, DeleteView, ViewList};
use crate::jenkins::jenkins_model::view::{ViewList as ViewListing, ViewSummary};
use crate::jenkins::util::view_path;
use regex::Regex;
use serde_json::json;
use std::str::FromStr;
use tracing::info;

/// Kind of view to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ListView,
    MyView,
    NestedView,
    CategorizedView,
    DashboardView,
    MultijobView,
}

impl ViewMode {
    pub fn class_name(&self) -> &'static str {
        match self {
            ViewMode::ListView => "hudson.model.ListView",
            ViewMode::MyView => "hudson.model.MyView",
            ViewMode::NestedView => "hudson.plugins.nested_view.NestedView",
            ViewMode::CategorizedView => {
                "org.jenkinsci.plugins.categorizedview.CategorizedJobsView"
            }
            ViewMode::DashboardView => "hudson.plugins.view.dashboard.Dashboard",
            ViewMode::MultijobView => "com.tikal.jenkins.plugins.multijob.views.MultiJobView",
        }
    }
}

impl FromStr for ViewMode {
    type Err = ConfigEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list_view" => Ok(ViewMode::ListView),
            "my_view" => Ok(ViewMode::MyView),
            "nested_view" => Ok(ViewMode::NestedView),
            "categorized_view" => Ok(ViewMode::CategorizedView),
            "dashboard_view" => Ok(ViewMode::DashboardView),
            "multijob_view" => Ok(ViewMode::MultijobView),
            _ => Err(ConfigEditError::InvalidArgument {
                name: "view mode",
                value: s.to_string(),
                expected: "list_view, my_view, nested_view, categorized_view, dashboard_view, multijob_view",
            }),
        }
    }
}

pub async fn list_views(
    client: &JacJenkinsClient,
    filter: Option<&Regex>,
) -> Result<Vec<ViewSummary>, JenkinsApiError> {
    let list: ViewListing = client.query(&ViewList).await?;
    Ok(list
        .views
        .into_iter()
        .filter(|v| filter.map_or(true, |re| re.is_match(&v.name)))
        .collect())
}

pub async fn create_view(
    client: &JacJenkinsClient,
    view_name: &str,
    mode: ViewMode,
) -> Result<u16, JenkinsApiError> {
    info!("creating view {} as {}", view_name, mode.class_name());
    let json = json!({ "name": view_name, "mode": mode.class_name() }).to_string();
    let form = [
        ("name", view_name),
        ("mode", mode.class_name()),
        ("json", json.as_str()),
    ];
    client.post(&CreateView, Some(&form[..])).await
}

pub async fn delete_view(
    client: &JacJenkinsClient,
    view_name: &str,
) -> Result<u16, JenkinsApiError> {
    info!("deleting view {}", view_name);
    client
        .post(
            &DeleteView {
                view_name: view_name.to_string(),
            },
            None,
        )
        .await
}

pub async fn get_view_config(
    client: &JacJenkinsClient,
    view_name: &str,
) -> Result<String, JenkinsApiError> {
    client.fetch_config(&view_path(view_name)).await
}

/// `false` when the job was already listed.
pub async fn add_job_to_view(
    client: &JacJenkinsClient,
    view_name: &str,
    job_name: &str,
) -> Result<bool, JenkinsApiError> {
    info!("adding {} to view {}", job_name, view_name);
    edit_remote_config(client, &view_path(view_name), |doc| {
        view_config::add_job(doc, job_name)
    })
    .await
}

/// `false` when the job was not listed.
pub async fn remove_job_from_view(
    client: &JacJenkinsClient,
    view_name: &str,
    job_name: &str,
) -> Result<bool, JenkinsApiError> {
    info!("removing {} from view {}", job_name, view_name);
    edit_remote_config(client, &view_path(view_name), |doc| {
        Ok(view_config::remove_job(doc, job_name))
    })
    .await
}

pub async fn set_status_filter(
    client: &JacJenkinsClient,
    view_name: &str,
    filter: StatusFilter,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &view_path(view_name), |doc| {
        view_config::set_status_filter(doc, filter);
        Ok(())
    })
    .await
}

/// `None` drops the include regex.
pub async fn set_include_regex(
    client: &JacJenkinsClient,
    view_name: &str,
    regex: Option<&str>,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &view_path(view_name), |doc| {
        view_config::set_include_regex(doc, regex)
    })
    .await
}

pub async fn set_filter_queue(
    client: &JacJenkinsClient,
    view_name: &str,
    enabled: bool,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &view_path(view_name), |doc| {
        view_config::set_filter_queue(doc, enabled);
        Ok(())
    })
    .await
}

pub async fn set_filter_executors(
    client: &JacJenkinsClient,
    view_name: &str,
    enabled: bool,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &view_path(view_name), |doc| {
        view_config::set_filter_executors(doc, enabled);
        Ok(())
    })
    .await
}
