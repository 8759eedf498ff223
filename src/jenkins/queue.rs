use crate::jenkins::client::JacJenkinsClient;
use crate::jenkins::error::JenkinsApiError;
use crate::jenkins::jenkins_endpoint::queue::{CancelQueueItem, QueueList};
use crate::jenkins::jenkins_model::queue::{Queue, QueueItem};
use tracing::info;

pub async fn list_queue(client: &JacJenkinsClient) -> Result<Vec<QueueItem>, JenkinsApiError> {
    let queue: Queue = client.query(&QueueList).await?;
    Ok(queue.items)
}

pub async fn cancel_queue_item(client: &JacJenkinsClient, id: u64) -> Result<u16, JenkinsApiError> {
    info!("cancelling queue item {}", id);
    client.post(&CancelQueueItem { id }, None).await
}
