pub const ERR_NEED_A_JENKINS_URL: &str = "Need a jenkins url. Use --server-url or set server_url in {}.";
pub const ERR_NEED_A_JENKINS_USERNAME: &str = "Need your jenkins username. Use --username or set username in {}.";
pub const ERR_NEED_A_JENKINS_SECRET: &str =
    "Need your jenkins password or api token. Use --password / --api-token or set them in {}.";
pub const ERR_CREDENTIALS_UNREADABLE: &str = "Cannot read credentials file {}: {}";
pub const ERR_CREDENTIALS_INVALID_BASE64: &str = "password_base64 in {} is not valid base64.";
pub const ERR_JENKINS_CLIENT_INVALID: &str =
    "Url: {}\nUsername: {}\nSecret: {}\nCannot connect to jenkins.\nErr: {}";
pub const ERR_JENKINS_CLIENT_GET_CRUMB_FAILED: &str = "Failed to get crumb. {}";
pub const ERR_REQUEST_FAILED: &str = "Jenkins request failed. {}";
pub const ERR_INVALID_ARGUMENT: &str = "{}";
pub const ERR_INVALID_FILTER: &str = "Invalid filter '{}': {}";
pub const ERR_NEED_EVEN_PARAM: &str = "You must provide sufficient parameters.";

pub const HINT_CONFIRM_DELETE_JOB: &str = "Delete job {}?";
pub const HINT_DELETE_CANCELLED: &str = "Nothing deleted.";

pub const JOB_STATUS: &str = "{} is {}.";
pub const NODE_ATTRIBUTE: &str = "{} of {}: {}";
pub const REQUEST_BUILD_SUCCESS: &str = "Build of {} requested.";
pub const DELETE_JOB_SUCCESS: &str = "Job {} deleted.";
pub const RESTRICT_JOB_SUCCESS: &str = "Job {} restricted to {}.";
pub const QUIET_DOWN_SUCCESS: &str = "Jenkins is quieting down.";
pub const CANCEL_QUIET_DOWN_SUCCESS: &str = "Quiet down cancelled.";
pub const RESTART_SUCCESS: &str = "Restart requested.";
pub const SAFE_RESTART_SUCCESS: &str = "Restart requested, it waits for running builds.";
pub const RELOAD_SUCCESS: &str = "Configuration reload requested.";
pub const EMPTY_RESULT: &str = "Nothing found.";
pub const URL_OUTPUT: &str = "Url:";
