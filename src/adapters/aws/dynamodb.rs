use crate::domain::video::{partition_key, VideoRecord, VideoStatus, SORT_KEY_META};
use crate::error::AppError;
use crate::ports::repository::VideoRepository;
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

/// DynamoAdapter implements VideoRepository for AWS DynamoDB.
///
/// Table layout: partition key `pk`, sort key `sk`, plus a global secondary
/// index on the `userId` attribute for owner lookups.
#[derive(Clone)]
pub struct DynamoAdapter {
    client: Client,
    table_name: String,
    user_id_index: String,
}

impl DynamoAdapter {
    pub fn new(client: Client, table_name: String, user_id_index: String) -> Self {
        Self {
            client,
            table_name,
            user_id_index,
        }
    }
}

fn store_err<E: std::fmt::Display>(err: E) -> AppError {
    AppError::StoreUnavailable(err.to_string())
}

fn to_item(record: &VideoRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        "pk".to_string(),
        AttributeValue::S(partition_key(&record.video_id)),
    );
    item.insert("sk".to_string(), AttributeValue::S(SORT_KEY_META.to_string()));
    item.insert(
        "videoId".to_string(),
        AttributeValue::S(record.video_id.clone()),
    );
    item.insert(
        "userId".to_string(),
        AttributeValue::S(record.owner_id.clone()),
    );
    item.insert(
        "fileName".to_string(),
        AttributeValue::S(record.file_name.clone()),
    );
    item.insert("title".to_string(), AttributeValue::S(record.title.clone()));
    item.insert(
        "description".to_string(),
        AttributeValue::S(record.description.clone()),
    );
    item.insert(
        "objectKey".to_string(),
        AttributeValue::S(record.object_key.clone()),
    );
    item.insert(
        "status".to_string(),
        AttributeValue::S(record.status.as_str().to_string()),
    );
    if let Some(analysis) = &record.analysis {
        item.insert(
            "analysis".to_string(),
            AttributeValue::S(analysis.to_string()),
        );
    }
    item
}

fn from_item(item: &HashMap<String, AttributeValue>) -> VideoRecord {
    let get_s = |name: &str| {
        item.get(name)
            .and_then(|v| v.as_s().ok())
            .cloned()
            .unwrap_or_default()
    };

    VideoRecord {
        video_id: get_s("videoId"),
        owner_id: get_s("userId"),
        file_name: get_s("fileName"),
        title: get_s("title"),
        description: get_s("description"),
        object_key: get_s("objectKey"),
        status: item
            .get("status")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| VideoStatus::parse(s))
            .unwrap_or(VideoStatus::Pending),
        analysis: item
            .get("analysis")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| serde_json::from_str(s).ok()),
    }
}

/// Key condition for a partition query, optionally narrowed by a
/// lexicographic sort-key prefix.
fn key_condition(sk_prefix: Option<&str>) -> &'static str {
    match sk_prefix {
        Some(_) => "pk = :pk AND begins_with(sk, :sk)",
        None => "pk = :pk",
    }
}

#[async_trait]
impl VideoRepository for DynamoAdapter {
    async fn put_video(&self, record: &VideoRecord) -> Result<(), AppError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn get_video(
        &self,
        pk: &str,
        sk: Option<String>,
    ) -> Result<Option<VideoRecord>, AppError> {
        let mut request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("pk", AttributeValue::S(pk.to_string()));
        if let Some(sk) = sk {
            request = request.key("sk", AttributeValue::S(sk));
        }

        let resp = request.send().await.map_err(store_err)?;
        Ok(resp.item.as_ref().map(from_item))
    }

    async fn query_videos(
        &self,
        pk: &str,
        sk_prefix: Option<String>,
    ) -> Result<Vec<VideoRecord>, AppError> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(key_condition(sk_prefix.as_deref()))
            .expression_attribute_values(":pk", AttributeValue::S(pk.to_string()));
        if let Some(prefix) = sk_prefix {
            request = request.expression_attribute_values(":sk", AttributeValue::S(prefix));
        }

        let resp = request.send().await.map_err(store_err)?;
        Ok(resp.items().iter().map(from_item).collect())
    }

    async fn videos_by_owner(&self, owner_id: &str) -> Result<Vec<VideoRecord>, AppError> {
        let resp = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.user_id_index)
            .key_condition_expression("userId = :userId")
            .expression_attribute_values(":userId", AttributeValue::S(owner_id.to_string()))
            .send()
            .await
            .map_err(store_err)?;

        Ok(resp.items().iter().map(from_item).collect())
    }
}
