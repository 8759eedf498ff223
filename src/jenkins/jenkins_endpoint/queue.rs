pub struct QueueList;

impl jenkins_sdk::Endpoint for QueueList {
    fn method(&self) -> &str {
        "GET"
    }

    fn endpoint(&self) -> String {
        "queue/api/json?tree=items[id,why,stuck,blocked,inQueueSince,task[name,url]]".to_string()
    }
}

pub struct CancelQueueItem {
    pub id: u64,
}

impl jenkins_sdk::Endpoint for CancelQueueItem {
    fn method(&self) -> &str {
        "POST"
    }

    fn endpoint(&self) -> String {
        format!("queue/cancelItem?id={}", self.id)
    }
}
