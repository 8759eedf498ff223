use url::form_urlencoded::byte_serialize;

/// Percent-encodes one path segment (space becomes `%20`, not `+`).
pub fn encode_segment(segment: &str) -> String {
    byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Percent-encodes one query value.
pub fn encode_query(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}

/// # job path
///
/// Resource path of a job, folders included: `a/b` -> `job/a/job/b`.
pub fn job_path(job_name: &str) -> String {
    job_name
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| format!("job/{}", encode_segment(s)))
        .collect::<Vec<_>>()
        .join("/")
}

pub fn view_path(view_name: &str) -> String {
    format!("view/{}", encode_segment(view_name))
}

/// Resource path of a node. The controller itself lives under `(built-in)`.
pub fn computer_path(node_name: &str) -> String {
    match node_name {
        "master" | "built-in" | "(master)" | "(built-in)" => "computer/(built-in)".to_string(),
        name => format!("computer/{}", encode_segment(name)),
    }
}

pub fn get_jenkins_job_url(jenkins_url: &str, job_name: &str) -> String {
    format!("{}/{}", jenkins_url.trim_end_matches('/'), job_path(job_name))
}
