use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use strum_macros::Display;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// absent for folders
    pub color: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

/// Current state of a job, derived from its ball color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum JobStatus {
    #[strum(serialize = "success")]
    Success,
    #[strum(serialize = "failure")]
    Failure,
    #[strum(serialize = "unstable")]
    Unstable,
    #[strum(serialize = "aborted")]
    Aborted,
    #[strum(serialize = "not_run")]
    NotRun,
    #[strum(serialize = "disabled")]
    Disabled,
    #[strum(serialize = "running")]
    Running,
}

impl JobStatus {
    /// `None` for colors the server does not use for jobs (folders have none).
    pub fn from_color(color: &str) -> Option<Self> {
        if color.ends_with("_anime") {
            return Some(JobStatus::Running);
        }
        match color {
            "blue" | "green" => Some(JobStatus::Success),
            "red" => Some(JobStatus::Failure),
            "yellow" => Some(JobStatus::Unstable),
            "aborted" => Some(JobStatus::Aborted),
            "notbuilt" | "nobuilt" | "grey" => Some(JobStatus::NotRun),
            "disabled" => Some(JobStatus::Disabled),
            _ => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub number: u32,
    /// `None` while building
    pub result: Option<String>,
    #[serde(default)]
    pub building: bool,
    /// milliseconds
    #[serde(default)]
    pub duration: u64,
    /// milliseconds since epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub url: String,
}

impl BuildInfo {
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_color() {
        assert_eq!(JobStatus::from_color("blue"), Some(JobStatus::Success));
        assert_eq!(JobStatus::from_color("red_anime"), Some(JobStatus::Running));
        assert_eq!(JobStatus::from_color("notbuilt"), Some(JobStatus::NotRun));
        assert_eq!(JobStatus::from_color("disabled"), Some(JobStatus::Disabled));
        assert_eq!(JobStatus::from_color("purple"), None);
        assert_eq!(JobStatus::NotRun.to_string(), "not_run");
    }

    #[test]
    fn test_parse_job_list() {
        let content = r#"{"_class":"hudson.model.Hudson","jobs":[
            {"_class":"hudson.model.FreeStyleProject","name":"api","url":"https://ci/job/api/","color":"blue"},
            {"_class":"com.cloudbees.hudson.plugins.folder.Folder","name":"team","url":"https://ci/job/team/"}]}"#;

        let list: JobList = serde_json::from_str(content).unwrap();
        assert_eq!(list.jobs.len(), 2);
        assert_eq!(list.jobs[0].color.as_deref(), Some("blue"));
        assert_eq!(list.jobs[1].color, None);
    }

    #[test]
    fn test_parse_build_info() {
        let content = r#"{"_class":"hudson.model.FreeStyleBuild","building":false,"duration":1200,"number":42,"result":"SUCCESS","timestamp":1700000000000,"url":"https://ci/job/api/42/"}"#;

        let build: BuildInfo = serde_json::from_str(content).unwrap();
        assert_eq!(build.number, 42);
        assert_eq!(build.result.as_deref(), Some("SUCCESS"));
        assert!(build.started_at().is_some());
    }
}
