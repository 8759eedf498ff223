use crate::jenkins::util::encode_segment;

/// Endpoint listing every known user.
pub struct PeopleList;

impl jenkins_sdk::Endpoint for PeopleList {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "asynchPeople/api/json?depth=1".to_string()
    }
}

pub struct UserInfo {
    pub user_id: String,
}

impl jenkins_sdk::Endpoint for UserInfo {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        format!("user/{}/api/json", encode_segment(&self.user_id))
    }
}
