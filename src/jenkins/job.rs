//! Job operations.
//!
//! The editing operations fetch the job's config.xml, edit it and post it
//! back. Two clients editing the same job at once race at the server and the
//! last upload wins; nothing here detects that.

use crate::config_xml::editors::downstream::{self, Threshold};
use crate::config_xml::editors::job_fields;
use crate::config_xml::editors::node_restriction;
use crate::config_xml::editors::notification::{self, EmailNotification};
use crate::config_xml::editors::scm::{self, ScmSpec};
use crate::config_xml::editors::triggers::{self, TriggerSpec};
use crate::config_xml::encoding::encode_xml;
use crate::config_xml::job_builder::{build_freestyle_config, FreestyleJobParams};
use crate::config_xml::serializer::to_xml_string;
use crate::jenkins::client::{JacJenkinsClient, RequestBody};
use crate::jenkins::config_sync::edit_remote_config;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::job::{
    ConsoleText, CreateItem, JobAction, JobActionRequest, JobInfo, JobList, LastBuild,
    TriggerBuild,
};
use crate::jenkins::jenkins_model::job::{BuildInfo, JobList as JobListing, JobStatus, JobSummary};
use crate::jenkins::jenkins_model::job_config::{JobDefinition, ParameterDefinition};
use crate::jenkins::util::job_path;
use jenkins_sdk::Endpoint;
use regex::Regex;
use reqwest::Method;
use tracing::info;

pub async fn list_jobs(
    client: &JacJenkinsClient,
    filter: Option<&Regex>,
) -> Result<Vec<JobSummary>, JenkinsApiError> {
    let list: JobListing = client.query(&JobList).await?;
    Ok(list
        .jobs
        .into_iter()
        .filter(|job| filter.map_or(true, |re| re.is_match(&job.name)))
        .collect())
}

pub async fn job_status(
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<JobStatus, JenkinsApiError> {
    let endpoint = JobInfo {
        job_name: job_name.to_string(),
    };
    let job: JobSummary = client.query(&endpoint).await?;
    let color = job.color.unwrap_or_default();

    JobStatus::from_color(&color).ok_or_else(|| {
        JenkinsApiError::uncategorized(
            &endpoint.endpoint(),
            format!("unknown job color '{}'", color),
        )
    })
}

/// Queues a build, with parameters when `params` is not empty.
pub async fn build(
    client: &JacJenkinsClient,
    job_name: &str,
    params: &[(String, String)],
) -> Result<u16, JenkinsApiError> {
    let endpoint = TriggerBuild {
        job_name: job_name.to_string(),
        with_params: !params.is_empty(),
    };
    let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    info!("queueing build of {} with {} parameters", job_name, form.len());
    client
        .post(&endpoint, (!form.is_empty()).then_some(form.as_slice()))
        .await
}

pub async fn delete(client: &JacJenkinsClient, job_name: &str) -> Result<u16, JenkinsApiError> {
    info!("deleting job {}", job_name);
    job_action(client, job_name, JobAction::Delete).await
}

pub async fn enable(client: &JacJenkinsClient, job_name: &str) -> Result<u16, JenkinsApiError> {
    job_action(client, job_name, JobAction::Enable).await
}

pub async fn disable(client: &JacJenkinsClient, job_name: &str) -> Result<u16, JenkinsApiError> {
    job_action(client, job_name, JobAction::Disable).await
}

async fn job_action(
    client: &JacJenkinsClient,
    job_name: &str,
    action: JobAction,
) -> Result<u16, JenkinsApiError> {
    let endpoint = JobActionRequest {
        job_name: job_name.to_string(),
        action,
    };
    client.post(&endpoint, None).await
}

/// Console log of `build_number`, or of the last build.
pub async fn console_output(
    client: &JacJenkinsClient,
    job_name: &str,
    build_number: Option<u32>,
) -> Result<String, JenkinsApiError> {
    client
        .raw_query(&ConsoleText {
            job_name: job_name.to_string(),
            build_number,
        })
        .await
}

pub async fn last_build_info(
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<BuildInfo, JenkinsApiError> {
    client
        .query(&LastBuild {
            job_name: job_name.to_string(),
        })
        .await
}

pub async fn get_config(
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<String, JenkinsApiError> {
    client.fetch_config(&job_path(job_name)).await
}

pub async fn post_config(
    client: &JacJenkinsClient,
    job_name: &str,
    xml: &str,
) -> Result<u16, JenkinsApiError> {
    info!("posting config of {}", job_name);
    client.push_config(&job_path(job_name), xml).await
}

pub async fn create_job(
    client: &JacJenkinsClient,
    job_name: &str,
    xml: &str,
) -> Result<u16, JenkinsApiError> {
    info!("creating job {}", job_name);
    let endpoint = CreateItem {
        job_name: job_name.to_string(),
    };
    let bytes = encode_xml(xml)?;
    client
        .send(Method::POST, &endpoint.endpoint(), RequestBody::Xml(&bytes))
        .await
        .map(|(status, _)| status)
}

pub async fn create_freestyle(
    client: &JacJenkinsClient,
    params: &FreestyleJobParams,
) -> Result<u16, JenkinsApiError> {
    let doc = build_freestyle_config(params)?;
    create_job(client, &params.name, &to_xml_string(&doc)?).await
}

/// Build parameters declared by the job, in declaration order.
pub async fn get_build_params(
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<Vec<ParameterDefinition>, JenkinsApiError> {
    let content = get_config(client, job_name).await?;

    quick_xml::de::from_str::<JobDefinition>(&content)
        .map(JobDefinition::into_parameters)
        .map_err(|e| JenkinsApiError::decode(&format!("{}/config.xml", job_path(job_name)), e))
}

pub async fn add_downstream_projects(
    client: &JacJenkinsClient,
    job_name: &str,
    downstream_projects: &str,
    threshold: Threshold,
    overwrite: bool,
) -> Result<(), JenkinsApiError> {
    info!(
        "adding {} as downstream of {} with threshold {}",
        downstream_projects, job_name, threshold
    );
    edit_remote_config(client, &job_path(job_name), |doc| {
        downstream::add_downstream_projects(doc, downstream_projects, threshold, overwrite)
    })
    .await
}

/// Returns the number of build triggers removed.
pub async fn remove_downstream_projects(
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<usize, JenkinsApiError> {
    info!("removing downstream projects of {}", job_name);
    edit_remote_config(client, &job_path(job_name), |doc| {
        Ok(downstream::remove_downstream_projects(doc))
    })
    .await
}

/// # chain
///
/// Links every job to the next one so they run one after another.
/// Existing downstream links of the jobs are dropped first.
///
/// Returns the job that starts the chain.
pub async fn chain<'a>(
    client: &JacJenkinsClient,
    job_names: &[&'a str],
    threshold: Threshold,
) -> Result<Option<&'a str>, JenkinsApiError> {
    unchain(client, job_names).await?;

    for pair in job_names.windows(2) {
        add_downstream_projects(client, pair[0], pair[1], threshold, true).await?;
    }

    Ok(job_names.first().copied())
}

pub async fn unchain(client: &JacJenkinsClient, job_names: &[&str]) -> Result<(), JenkinsApiError> {
    for job_name in job_names {
        remove_downstream_projects(client, job_name).await?;
    }
    Ok(())
}

pub async fn restrict_to_node(
    client: &JacJenkinsClient,
    job_name: &str,
    node_name: &str,
) -> Result<(), JenkinsApiError> {
    info!("restricting {} to node {}", job_name, node_name);
    edit_remote_config(client, &job_path(job_name), |doc| {
        node_restriction::restrict_to_node(doc, node_name)
    })
    .await
}

pub async fn set_description(
    client: &JacJenkinsClient,
    job_name: &str,
    description: &str,
) -> Result<(), JenkinsApiError> {
    edit_remote_config(client, &job_path(job_name), |doc| {
        job_fields::set_description(doc, description);
        Ok(())
    })
    .await
}

/// `false` when the job already had a mailer.
pub async fn add_email_notification(
    client: &JacJenkinsClient,
    job_name: &str,
    notification: &EmailNotification,
) -> Result<bool, JenkinsApiError> {
    info!("adding email notification to {}", job_name);
    edit_remote_config(client, &job_path(job_name), |doc| {
        notification::add_email_notification(doc, notification)
    })
    .await
}

pub async fn configure_triggers(
    client: &JacJenkinsClient,
    job_name: &str,
    spec: &TriggerSpec,
) -> Result<(), JenkinsApiError> {
    info!("configuring triggers of {}", job_name);
    edit_remote_config(client, &job_path(job_name), |doc| {
        triggers::configure_triggers(doc, spec)
    })
    .await
}

pub async fn set_scm(
    client: &JacJenkinsClient,
    job_name: &str,
    spec: &ScmSpec,
) -> Result<(), JenkinsApiError> {
    info!("replacing scm of {}", job_name);
    edit_remote_config(client, &job_path(job_name), |doc| scm::set_scm(doc, spec)).await
}
