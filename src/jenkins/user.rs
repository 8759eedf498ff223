use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::user::{PeopleList, UserInfo};
use crate::jenkins::jenkins_model::user::{People, PersonEntry, User};

pub async fn list_users(client: &JacJenkinsClient) -> Result<Vec<PersonEntry>, JenkinsApiError> {
    let people: People = client.query(&PeopleList).await?;
    Ok(people.users)
}

pub async fn get_user(client: &JacJenkinsClient, user_id: &str) -> Result<User, JenkinsApiError> {
    client
        .query(&UserInfo {
            user_id: user_id.to_string(),
        })
        .await
}
