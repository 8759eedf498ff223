use crate::jenkins::util::{encode_query, job_path};

/// Endpoint listing the top level jobs.
pub struct JobList;

impl jenkins_sdk::Endpoint for JobList {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "api/json?tree=jobs[name,url,color]".to_string()
    }
}

/// Endpoint for retrieving the status of one job.
pub struct JobInfo {
    /// Name of the Jenkins job, folders separated by `/`.
    pub job_name: String,
}

impl jenkins_sdk::Endpoint for JobInfo {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        format!("{}/api/json?tree=name,url,color", job_path(&self.job_name))
    }
}

/// Endpoint for the last build of a job.
pub struct LastBuild {
    pub job_name: String,
}

impl jenkins_sdk::Endpoint for LastBuild {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/lastBuild/api/json?tree=number,result,building,duration,timestamp,url",
            job_path(&self.job_name)
        )
    }
}

/// Endpoint for the plain console log of a build, the last one when `build_number` is `None`.
pub struct ConsoleText {
    pub job_name: String,
    pub build_number: Option<u32>,
}

impl jenkins_sdk::Endpoint for ConsoleText {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        let build = match self.build_number {
            Some(n) => n.to_string(),
            None => "lastBuild".to_string(),
        };
        format!("{}/{}/consoleText", job_path(&self.job_name), build)
    }
}

/// Endpoint for triggering a build.
pub struct TriggerBuild {
    pub job_name: String,
    pub with_params: bool,
}

impl jenkins_sdk::Endpoint for TriggerBuild {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        let action = if self.with_params {
            "buildWithParameters"
        } else {
            "build"
        };
        format!("{}/{}", job_path(&self.job_name), action)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    Enable,
    Disable,
    Delete,
}

/// Endpoint for the enable / disable / delete actions of a job.
pub struct JobActionRequest {
    pub job_name: String,
    pub action: JobAction,
}

impl jenkins_sdk::Endpoint for JobActionRequest {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        let action = match self.action {
            JobAction::Enable => "enable",
            JobAction::Disable => "disable",
            JobAction::Delete => "doDelete",
        };
        format!("{}/{}", job_path(&self.job_name), action)
    }
}

/// Endpoint for creating a job from a config.xml body.
///
/// A job inside a folder is created through the folder.
pub struct CreateItem {
    pub job_name: String,
}

impl jenkins_sdk::Endpoint for CreateItem {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        match self.job_name.trim_end_matches('/').rsplit_once('/') {
            Some((folder, name)) => format!(
                "{}/createItem?name={}",
                job_path(folder),
                encode_query(name)
            ),
            None => format!("createItem?name={}", encode_query(&self.job_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jenkins_sdk::Endpoint;

    #[test]
    fn test_job_endpoints() {
        assert_eq!(
            ConsoleText {
                job_name: "team/api".to_string(),
                build_number: Some(7),
            }
            .endpoint(),
            "job/team/job/api/7/consoleText"
        );
        assert_eq!(
            TriggerBuild {
                job_name: "api".to_string(),
                with_params: true,
            }
            .endpoint(),
            "job/api/buildWithParameters"
        );
        assert_eq!(
            JobActionRequest {
                job_name: "api".to_string(),
                action: JobAction::Delete,
            }
            .endpoint(),
            "job/api/doDelete"
        );
        assert_eq!(
            CreateItem {
                job_name: "new job".to_string()
            }
            .endpoint(),
            "createItem?name=new+job"
        );
        assert_eq!(
            CreateItem {
                job_name: "team/api".to_string()
            }
            .endpoint(),
            "job/team/createItem?name=api"
        );
    }
}
