//! Remote side: the HTTP client, one module per API area, and the endpoint
//! and model definitions they use.

pub mod client;
pub mod config_sync;
pub mod error;
pub mod jenkins_endpoint;
pub mod jenkins_model;
pub mod jenkins_url_factor;
pub mod job;
pub mod node;
pub mod plugin;
pub mod queue;
pub mod system;
pub mod user;
pub mod util;
pub mod view;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::JacJenkinsClient;
pub use error::JenkinsApiError;
