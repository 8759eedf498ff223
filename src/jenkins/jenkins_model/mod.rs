//! serde models of the server's JSON responses, plus build parameter
//! definitions read from a job's config.xml.

pub mod crumb;
pub mod job;
pub mod job_config;
pub mod node;
pub mod plugin;
pub mod queue;
pub mod user;
pub mod view;
