use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct QueueTask {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QueueItem {
    pub id: u64,
    pub task: QueueTask,
    /// why the item is still waiting
    pub why: Option<String>,
    #[serde(default)]
    pub stuck: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub in_queue_since: i64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Queue {
    #[serde(default)]
    pub items: Vec<QueueItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_queue() {
        let content = r#"{"_class":"hudson.model.Queue","items":[{"_class":"hudson.model.Queue$BlockedItem","blocked":true,"id":311,"inQueueSince":1700000000000,"stuck":false,"task":{"_class":"hudson.model.FreeStyleProject","name":"api","url":"https://ci/job/api/"},"why":"Build #12 is already in progress"}]}"#;

        let queue: Queue = serde_json::from_str(content).unwrap();

        assert_eq!(queue.items.len(), 1);
        assert_eq!(queue.items[0].id, 311);
        assert_eq!(queue.items[0].task.name, "api");
        assert!(queue.items[0].blocked);
    }
}
