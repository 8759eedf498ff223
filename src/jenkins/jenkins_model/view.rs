use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ViewSummary {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ViewList {
    #[serde(default)]
    pub views: Vec<ViewSummary>,
}
