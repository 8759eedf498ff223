use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub full_name: String,
    #[serde(default)]
    pub absolute_url: String,
}

impl UserRef {
    /// The id is the last path segment of the user's url.
    pub fn id(&self) -> Option<&str> {
        self.absolute_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersonEntry {
    pub user: UserRef,
    /// milliseconds since epoch of the last commit seen
    pub last_change: Option<i64>,
}

#[derive(Deserialize, Debug, Default)]
pub struct People {
    #[serde(default)]
    pub users: Vec<PersonEntry>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub absolute_url: String,
}
