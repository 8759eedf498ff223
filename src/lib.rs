pub mod cli;
pub mod config_xml;
pub mod constant;
pub mod credentials;
pub mod jac_error;
pub mod jenkins;
pub mod pretty_log;
