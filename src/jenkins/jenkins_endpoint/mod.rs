//! One `jenkins_sdk::Endpoint` per REST call.

pub mod get_crumb;
pub mod job;
pub mod node;
pub mod ping;
pub mod plugin;
pub mod queue;
pub mod system;
pub mod user;
pub mod view;
