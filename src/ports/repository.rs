use crate::domain::video::VideoRecord;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert or overwrite a record by its primary key.
    async fn put_video(&self, record: &VideoRecord) -> Result<(), AppError>;

    /// Fetch a single record, or `None` when absent.
    async fn get_video(
        &self,
        pk: &str,
        sk: Option<String>,
    ) -> Result<Option<VideoRecord>, AppError>;

    /// All records sharing a partition key, optionally narrowed by a
    /// lexicographic sort-key prefix.
    async fn query_videos(
        &self,
        pk: &str,
        sk_prefix: Option<String>,
    ) -> Result<Vec<VideoRecord>, AppError>;

    /// All records for one owner, via the secondary index. The index only
    /// filters data already scoped by a verified identity; it never
    /// establishes authorization.
    async fn videos_by_owner(&self, owner_id: &str) -> Result<Vec<VideoRecord>, AppError>;
}
