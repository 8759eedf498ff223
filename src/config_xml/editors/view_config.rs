use crate::config_xml::document::ConfigDocument;
use crate::config_xml::editors::upsert_text;
use crate::config_xml::error::ConfigEditError;
use crate::config_xml::locator::{locate, ConfigPath};
use regex::Regex;
use std::str::FromStr;

/// Which of the selected jobs a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    EnabledOnly,
    DisabledOnly,
}

impl FromStr for StatusFilter {
    type Err = ConfigEditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" | "all_selected_jobs" => Ok(StatusFilter::All),
            "enabled" | "enabled_jobs_only" => Ok(StatusFilter::EnabledOnly),
            "disabled" | "disabled_jobs_only" => Ok(StatusFilter::DisabledOnly),
            _ => Err(ConfigEditError::InvalidArgument {
                name: "status filter",
                value: s.to_string(),
                expected: "all, enabled, disabled",
            }),
        }
    }
}

/// Adds `job` to the view's explicit job list. `false` when already listed.
pub fn add_job(doc: &mut ConfigDocument, job: &str) -> Result<bool, ConfigEditError> {
    if job.trim().is_empty() {
        return Err(ConfigEditError::InvalidArgument {
            name: "job name",
            value: job.to_string(),
            expected: "a job name",
        });
    }

    let job_names = match locate(doc, ConfigPath::JobNames) {
        Some(id) => id,
        None => {
            let root = doc.root();
            doc.append_element(root, ConfigPath::JobNames.tag())
        }
    };

    let listed = doc
        .child_elements(job_names)
        .any(|c| doc.name(c) == Some("string") && doc.text(c) == job);
    if listed {
        return Ok(false);
    }

    doc.append_text_element(job_names, "string", job);
    Ok(true)
}

/// Removes `job` from the explicit job list. `false` when it was not listed.
pub fn remove_job(doc: &mut ConfigDocument, job: &str) -> bool {
    let Some(job_names) = locate(doc, ConfigPath::JobNames) else {
        return false;
    };

    let entries: Vec<_> = doc
        .child_elements(job_names)
        .filter(|c| doc.name(*c) == Some("string") && doc.text(*c) == job)
        .collect();
    for entry in &entries {
        doc.remove(*entry);
    }

    !entries.is_empty()
}

pub fn set_status_filter(doc: &mut ConfigDocument, filter: StatusFilter) {
    match filter {
        StatusFilter::All => {
            if let Some(id) = locate(doc, ConfigPath::StatusFilter) {
                doc.remove(id);
            }
        }
        StatusFilter::EnabledOnly => {
            upsert_text(doc, ConfigPath::StatusFilter, "true");
        }
        StatusFilter::DisabledOnly => {
            upsert_text(doc, ConfigPath::StatusFilter, "false");
        }
    }
}

/// Sets the job name regex of the view, `None` drops it.
pub fn set_include_regex(
    doc: &mut ConfigDocument,
    regex: Option<&str>,
) -> Result<(), ConfigEditError> {
    match regex {
        Some(pattern) => {
            Regex::new(pattern).map_err(|_| ConfigEditError::InvalidArgument {
                name: "include regex",
                value: pattern.to_string(),
                expected: "a valid regular expression",
            })?;
            upsert_text(doc, ConfigPath::IncludeRegex, pattern);
        }
        None => {
            if let Some(id) = locate(doc, ConfigPath::IncludeRegex) {
                doc.remove(id);
            }
        }
    }
    Ok(())
}

pub fn set_filter_queue(doc: &mut ConfigDocument, enabled: bool) {
    upsert_text(doc, ConfigPath::FilterQueue, if enabled { "true" } else { "false" });
}

pub fn set_filter_executors(doc: &mut ConfigDocument, enabled: bool) {
    upsert_text(doc, ConfigPath::FilterExecutors, if enabled { "true" } else { "false" });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_xml::serializer::to_xml_string;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const LIST_VIEW: &str = indoc! {r#"
        <hudson.model.ListView>
          <name>backend</name>
          <filterExecutors>false</filterExecutors>
          <filterQueue>false</filterQueue>
          <properties class="hudson.model.View$PropertyList"/>
          <jobNames>
            <comparator class="hudson.util.CaseInsensitiveComparator"/>
            <string>api</string>
          </jobNames>
          <jobFilters/>
          <recurse>false</recurse>
        </hudson.model.ListView>"#};

    fn listed(doc: &ConfigDocument) -> Vec<String> {
        let job_names = doc.find_first("jobNames").unwrap();
        doc.child_elements(job_names)
            .filter(|c| doc.name(*c) == Some("string"))
            .map(|c| doc.text(c))
            .collect()
    }

    #[test]
    fn test_add_and_remove_jobs() {
        let mut doc = ConfigDocument::parse(LIST_VIEW).unwrap();

        assert!(add_job(&mut doc, "worker").unwrap());
        assert!(!add_job(&mut doc, "api").unwrap());
        assert_eq!(listed(&doc), vec!["api", "worker"]);

        assert!(remove_job(&mut doc, "api"));
        assert!(!remove_job(&mut doc, "api"));
        assert_eq!(listed(&doc), vec!["worker"]);
        assert!(doc.find_first("comparator").is_some());
    }

    #[test]
    fn test_filters() {
        let mut doc = ConfigDocument::parse(LIST_VIEW).unwrap();

        set_status_filter(&mut doc, "enabled".parse().unwrap());
        set_filter_queue(&mut doc, true);
        set_include_regex(&mut doc, Some("^api-.*")).unwrap();

        assert_eq!(doc.text(doc.find_first("statusFilter").unwrap()), "true");
        assert_eq!(doc.text(doc.find_first("filterQueue").unwrap()), "true");
        assert_eq!(doc.text(doc.find_first("includeRegex").unwrap()), "^api-.*");

        set_status_filter(&mut doc, StatusFilter::All);
        set_include_regex(&mut doc, None).unwrap();
        assert!(doc.find_first("statusFilter").is_none());
        assert!(doc.find_first("includeRegex").is_none());

        let out = to_xml_string(&doc).unwrap();
        assert!(out.contains("<filterQueue>true</filterQueue>"));
    }

    #[test]
    fn test_invalid_view_arguments() {
        let mut doc = ConfigDocument::parse(LIST_VIEW).unwrap();
        let before = doc.clone();

        assert!("some".parse::<StatusFilter>().is_err());
        assert!(set_include_regex(&mut doc, Some("(unclosed")).is_err());
        assert_eq!(doc, before);
    }
}
