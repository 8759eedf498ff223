use crate::constant::log::*;
use crate::credentials::{get_default_credentials_path, resolve_credentials, CredentialOverrides};
use crate::jac_error::JacError;
use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::jenkins_url_factor::{
    resolve_job_and_build, resolve_job_name, resolve_node_name,
};
use crate::jenkins::node::NodeAttribute;
use crate::jenkins::util::get_jenkins_job_url;
use crate::jenkins::{job, node, system};
use crate::pretty_log::{colored_println, ThemeColor};
use formatx::formatx;
use inquire::Confirm;
use regex::Regex;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Where the credentials come from, as given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConnectArgs {
    pub credentials: Option<PathBuf>,
    pub overrides: CredentialOverrides,
}

/// # cli connect
///
/// Resolves credentials and returns a client carrying a CSRF crumb when the
/// server hands one out.
pub async fn cli_connect(args: ConnectArgs) -> Result<JacJenkinsClient, JacError> {
    let path = args.credentials.unwrap_or_else(get_default_credentials_path);
    let credentials = resolve_credentials(&path, args.overrides)?;
    debug!(
        "connecting to {} as {}",
        credentials.server_url, credentials.username
    );

    let connect_error = |e| JacError::JenkinsConnectError {
        url: credentials.server_url.clone(),
        username: credentials.username.clone(),
        secret: credentials.secret.clone(),
        e,
    };

    let mut client = JacJenkinsClient::new(
        &credentials.server_url,
        &credentials.username,
        &credentials.secret,
    )
    .map_err(connect_error)?;
    client.attach_crumb().await.map_err(|e| {
        JacError::Custom(
            formatx!(ERR_JENKINS_CLIENT_GET_CRUMB_FAILED, e.to_string()).unwrap_or_default(),
        )
    })?;

    Ok(client)
}

fn parse_filter(filter: Option<&str>) -> Result<Option<Regex>, JacError> {
    filter
        .map(|f| {
            Regex::new(f).map_err(|e| {
                JacError::Custom(formatx!(ERR_INVALID_FILTER, f, e.to_string()).unwrap_or_default())
            })
        })
        .transpose()
}

/// Turns `[k1, v1, k2, v2, ..]` into pairs.
pub fn pair_params(params: &[String]) -> Result<Vec<(String, String)>, JacError> {
    if params.len() % 2 != 0 {
        return Err(JacError::Custom(ERR_NEED_EVEN_PARAM.to_string()));
    }
    Ok(params
        .chunks(2)
        .map(|chunk| (chunk[0].clone(), chunk[1].clone()))
        .collect())
}

pub async fn cli_do_job_list<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    filter: Option<&str>,
) -> Result<(), JacError> {
    let filter = parse_filter(filter)?;
    let jobs = job::list_jobs(client, filter.as_ref()).await?;

    if jobs.is_empty() {
        colored_println(stdout, ThemeColor::Warn, EMPTY_RESULT);
    }
    for j in jobs {
        colored_println(
            stdout,
            ThemeColor::Main,
            &format!("{:<40} {}", j.name, j.color.unwrap_or_default()),
        );
    }
    Ok(())
}

pub async fn cli_do_job_build<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    job_name: &str,
    params: &[String],
) -> Result<(), JacError> {
    let job_name = resolve_job_name(job_name);
    let pairs = pair_params(params)?;

    job::build(client, &job_name, &pairs).await?;
    colored_println(
        stdout,
        ThemeColor::Success,
        &formatx!(REQUEST_BUILD_SUCCESS, &job_name).unwrap_or_default(),
    );
    colored_println(
        stdout,
        ThemeColor::Second,
        &format!(
            "{} {}",
            URL_OUTPUT,
            get_jenkins_job_url(client.server_url(), &job_name)
        ),
    );
    Ok(())
}

pub async fn cli_do_job_status<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    job_name: &str,
) -> Result<(), JacError> {
    let job_name = resolve_job_name(job_name);
    let status = job::job_status(client, &job_name).await?;

    colored_println(
        stdout,
        ThemeColor::Main,
        &formatx!(JOB_STATUS, &job_name, status.to_string()).unwrap_or_default(),
    );
    Ok(())
}

pub async fn cli_do_job_delete<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    job_name: &str,
    yes: bool,
) -> Result<(), JacError> {
    let job_name = resolve_job_name(job_name);

    if !yes {
        let hint = formatx!(HINT_CONFIRM_DELETE_JOB, &job_name).unwrap_or_default();
        let confirmed = Confirm::new(&hint).with_default(false).prompt()?;
        if !confirmed {
            colored_println(stdout, ThemeColor::Warn, HINT_DELETE_CANCELLED);
            return Ok(());
        }
    }

    job::delete(client, &job_name).await?;
    colored_println(
        stdout,
        ThemeColor::Success,
        &formatx!(DELETE_JOB_SUCCESS, &job_name).unwrap_or_default(),
    );
    Ok(())
}

pub async fn cli_do_job_console<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    job_name: &str,
    build_number: Option<u32>,
) -> Result<(), JacError> {
    let (job_name, url_build) = resolve_job_and_build(job_name);
    let log = job::console_output(client, &job_name, build_number.or(url_build)).await?;

    colored_println(stdout, ThemeColor::Main, log.trim_end());
    Ok(())
}

pub async fn cli_do_job_restrict<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    job_name: &str,
    node_name: &str,
) -> Result<(), JacError> {
    let job_name = resolve_job_name(job_name);
    let node_name = resolve_node_name(node_name);
    job::restrict_to_node(client, &job_name, &node_name).await?;

    colored_println(
        stdout,
        ThemeColor::Success,
        &formatx!(RESTRICT_JOB_SUCCESS, &job_name, &node_name).unwrap_or_default(),
    );
    Ok(())
}

pub async fn cli_do_node_list<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    filter: Option<&str>,
) -> Result<(), JacError> {
    let filter = parse_filter(filter)?;
    let nodes = node::list_nodes(client, filter.as_ref()).await?;

    if nodes.is_empty() {
        colored_println(stdout, ThemeColor::Warn, EMPTY_RESULT);
    }
    for n in nodes {
        let (theme, state) = if n.offline {
            (ThemeColor::Warn, "offline")
        } else if n.idle {
            (ThemeColor::Main, "idle")
        } else {
            (ThemeColor::Success, "busy")
        };
        colored_println(
            stdout,
            theme,
            &format!("{:<30} executors: {} {}", n.display_name, n.num_executors, state),
        );
    }
    Ok(())
}

pub async fn cli_do_node_attr<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    node_name: &str,
    attribute: &str,
) -> Result<(), JacError> {
    let node_name = resolve_node_name(node_name);
    let attribute: NodeAttribute = attribute.parse()?;
    let value = node::get_node_attribute(client, &node_name, attribute).await?;

    colored_println(
        stdout,
        ThemeColor::Main,
        &formatx!(NODE_ATTRIBUTE, attribute.to_string(), node_name, value.to_string())
            .unwrap_or_default(),
    );
    Ok(())
}

pub async fn cli_do_quiet_down<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    cancel: bool,
) -> Result<(), JacError> {
    if cancel {
        system::cancel_quiet_down(client).await?;
        colored_println(stdout, ThemeColor::Success, CANCEL_QUIET_DOWN_SUCCESS);
    } else {
        system::quiet_down(client).await?;
        colored_println(stdout, ThemeColor::Success, QUIET_DOWN_SUCCESS);
    }
    Ok(())
}

pub async fn cli_do_restart<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
    force: bool,
) -> Result<(), JacError> {
    system::restart(client, force).await?;
    let msg = if force {
        RESTART_SUCCESS
    } else {
        SAFE_RESTART_SUCCESS
    };
    colored_println(stdout, ThemeColor::Success, msg);
    Ok(())
}

pub async fn cli_do_reload<W: Write>(
    stdout: &mut W,
    client: &JacJenkinsClient,
) -> Result<(), JacError> {
    system::reload(client).await?;
    colored_println(stdout, ThemeColor::Success, RELOAD_SUCCESS);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_params() {
        let params = vec![
            "Target".to_string(),
            "staging".to_string(),
            "Clean".to_string(),
            "true".to_string(),
        ];

        assert_eq!(
            pair_params(&params).unwrap(),
            vec![
                ("Target".to_string(), "staging".to_string()),
                ("Clean".to_string(), "true".to_string()),
            ]
        );
        assert!(pair_params(&params[..3]).is_err());
    }

    #[test]
    fn test_parse_filter() {
        assert!(parse_filter(None).unwrap().is_none());
        assert!(parse_filter(Some("^api-")).unwrap().unwrap().is_match("api-server"));
        assert!(parse_filter(Some("(")).is_err());
    }

    #[tokio::test]
    async fn test_connect_without_credentials_fails_before_network() {
        let args = ConnectArgs {
            credentials: Some(PathBuf::from("non_existent_credentials.toml")),
            overrides: CredentialOverrides {
                server_url: Some("https://ci.example.com".to_string()),
                ..Default::default()
            },
        };

        assert!(matches!(
            cli_connect(args).await,
            Err(JacError::MissingCredentials { .. })
        ));
    }
}
