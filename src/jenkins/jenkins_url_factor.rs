/// # Jenkins Url Factor
///
/// from jenkins url like:
///
/// - "https://example.jenkins.com/job/Some.Long-JOB_NAME/1234/"
/// - "https://example.jenkins.com/view/Some_View1/job/team/job/api/"
/// - "http://example.jenkins.com/computer/agent-1/"
#[derive(Debug, Default, PartialEq, Eq)]
pub struct JenkinsUrlFactor {
    /// folder path joined by `/`, like `team/api`
    pub job_name: Option<String>,
    pub build_number: Option<u32>,
    pub node_name: Option<String>,
}

impl JenkinsUrlFactor {
    pub fn from_url(jenkins_url: &str) -> Self {
        let mut factor = JenkinsUrlFactor::default();
        let mut jobs: Vec<String> = Vec::new();

        if let Ok(url) = url::Url::parse(jenkins_url) {
            if let Some(mut iter) = url.path_segments() {
                while let Some(segment) = iter.next() {
                    match segment {
                        // views only scope the page, the job path stays the same
                        "view" => {
                            iter.next();
                        }
                        "job" => {
                            if let Some(job) = iter.next() {
                                jobs.push(job.to_string());
                            }
                        }
                        "computer" => {
                            factor.node_name = iter.next().map(|s| s.to_string());
                        }
                        other if !jobs.is_empty() && factor.build_number.is_none() => {
                            factor.build_number = other.parse::<u32>().ok();
                        }
                        _ => {}
                    }
                }
            }
        }

        if !jobs.is_empty() {
            factor.job_name = Some(jobs.join("/"));
        }
        factor
    }
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Accepts either a job name or a job url and gives back the job name.
pub fn resolve_job_name(input: &str) -> String {
    resolve_job_and_build(input).0
}

/// Job name plus the build number a build url points at.
pub fn resolve_job_and_build(input: &str) -> (String, Option<u32>) {
    if is_url(input) {
        let factor = JenkinsUrlFactor::from_url(input);
        if let Some(name) = factor.job_name {
            return (name, factor.build_number);
        }
    }
    (input.to_string(), None)
}

/// Accepts either a node name or a `computer/<name>` url.
pub fn resolve_node_name(input: &str) -> String {
    if is_url(input) {
        if let Some(name) = JenkinsUrlFactor::from_url(input).node_name {
            return name;
        }
    }
    input.to_string()
}
