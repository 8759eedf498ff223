use clap::{Args, Parser, Subcommand};
use jenkins_api_client::cli::{self, ConnectArgs};
use jenkins_api_client::credentials::CredentialOverrides;
use jenkins_api_client::jac_error::JacError;
use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::process::exit;
use strum_macros::Display;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name="jac",
  author,
  version,
  about(env!("CARGO_PKG_DESCRIPTION")),
  long_about=None,
  arg_required_else_help=true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Jenkins root URL.
    #[arg(long, global = true)]
    server_url: Option<String>,

    /// Username like "somebody@email.com"
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password of Jenkins.
    #[arg(long, global = true)]
    password: Option<String>,

    /// API token from Jenkins. Preferred over the password.
    /// See also: https://www.jenkins.io/doc/book/using/remote-access-api/
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// Credentials file.
    /// default: ~/.jac-credentials.toml
    #[arg(long, global = true, value_name = "PATH")]
    credentials: Option<PathBuf>,
}

#[derive(Subcommand, Display)]
enum Commands {
    /// Manage jobs.
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Inspect build nodes.
    Node {
        #[command(subcommand)]
        command: NodeCommands,
    },
    /// Server wide actions.
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List jobs.
    List {
        /// regex on the job name.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Request a build.
    Build {
        /// job name or job URL.
        name: String,

        /// build params.
        /// repeated input --param can accept multiple sets of parameters
        /// like: --param "Target" "staging"
        #[arg(long = "param",
            num_args = 2,
            value_names = ["PARAM_NAME", "PARAM_VALUE"],
            action = clap::ArgAction::Append
        )]
        params: Vec<String>,
    },
    /// Show the job status.
    Status {
        /// job name or job URL.
        name: String,
    },
    /// Delete a job.
    Delete {
        /// job name or job URL.
        name: String,

        /// do not ask for confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print the console output of a build.
    Console {
        /// job name or job URL.
        name: String,

        /// build number. default: last build.
        #[arg(short = '#', long)]
        build: Option<u32>,
    },
    /// Restrict a job to one node.
    Restrict {
        /// job name or job URL.
        name: String,

        /// node name.
        node: String,
    },
}

#[derive(Subcommand)]
enum NodeCommands {
    /// List nodes.
    List {
        /// regex on the node name.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show one attribute of a node.
    Attr {
        /// node name.
        name: String,

        /// attribute like "num_executors" or "offline".
        attribute: String,
    },
}

#[derive(Subcommand)]
enum SystemCommands {
    /// Stop accepting new builds.
    Quietdown {
        /// cancel a pending quiet down.
        #[arg(long)]
        cancel: bool,
    },
    /// Restart the server.
    Restart {
        /// restart right away instead of waiting for running builds.
        #[arg(long)]
        force: bool,
    },
    /// Reload the configuration from disk.
    Reload,
}

impl From<GlobalArgs> for ConnectArgs {
    fn from(value: GlobalArgs) -> Self {
        ConnectArgs {
            credentials: value.credentials,
            overrides: CredentialOverrides {
                server_url: value.server_url,
                username: value.username,
                password: value.password,
                api_token: value.api_token,
            },
        }
    }
}

fn init_tracing() {
    let layer = fmt::layer().compact().with_writer(stderr);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(layer).with(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Some(command) = cli.command {
        debug!("running {}", command);

        if let Err(err) = main_cli(cli.global.into(), command).await {
            err.colored_println(&mut stdout());
            exit(1);
        }
    }
}

async fn main_cli(connect: ConnectArgs, command: Commands) -> Result<(), JacError> {
    let mut stdout = stdout();
    let client = cli::cli_connect(connect).await?;

    match command {
        Commands::Job { command } => match command {
            JobCommands::List { filter } => {
                // jac job list
                cli::cli_do_job_list(&mut stdout, &client, filter.as_deref()).await?;
            }
            JobCommands::Build { name, params } => {
                // jac job build
                cli::cli_do_job_build(&mut stdout, &client, &name, &params).await?;
            }
            JobCommands::Status { name } => {
                cli::cli_do_job_status(&mut stdout, &client, &name).await?;
            }
            JobCommands::Delete { name, yes } => {
                cli::cli_do_job_delete(&mut stdout, &client, &name, yes).await?;
            }
            JobCommands::Console { name, build } => {
                cli::cli_do_job_console(&mut stdout, &client, &name, build).await?;
            }
            JobCommands::Restrict { name, node } => {
                cli::cli_do_job_restrict(&mut stdout, &client, &name, &node).await?;
            }
        },
        Commands::Node { command } => match command {
            NodeCommands::List { filter } => {
                // jac node list
                cli::cli_do_node_list(&mut stdout, &client, filter.as_deref()).await?;
            }
            NodeCommands::Attr { name, attribute } => {
                cli::cli_do_node_attr(&mut stdout, &client, &name, &attribute).await?;
            }
        },
        Commands::System { command } => match command {
            SystemCommands::Quietdown { cancel } => {
                // jac system quietdown
                cli::cli_do_quiet_down(&mut stdout, &client, cancel).await?;
            }
            SystemCommands::Restart { force } => {
                cli::cli_do_restart(&mut stdout, &client, force).await?;
            }
            SystemCommands::Reload => {
                cli::cli_do_reload(&mut stdout, &client).await?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_job_build_with_params() {
        let cli = Cli::parse_from([
            "jac",
            "--server-url",
            "https://ci.example.com",
            "job",
            "build",
            "api-server",
            "--param",
            "Target",
            "staging",
            "--param",
            "Clean",
            "true",
        ]);

        assert_eq!(cli.global.server_url.as_deref(), Some("https://ci.example.com"));
        match cli.command {
            Some(Commands::Job {
                command: JobCommands::Build { name, params },
            }) => {
                assert_eq!(name, "api-server");
                assert_eq!(params, vec!["Target", "staging", "Clean", "true"]);
            }
            _ => panic!("expected job build"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["jac", "system", "restart", "--force", "--api-token", "t0k"]);

        assert_eq!(cli.global.api_token.as_deref(), Some("t0k"));
        assert!(matches!(
            cli.command,
            Some(Commands::System {
                command: SystemCommands::Restart { force: true }
            })
        ));
    }
}
