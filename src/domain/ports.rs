use crate::domain::model::{RemoteAuthorization, ResourceState};
use crate::domain::schema::ResourceSchema;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote AWS Config operations needed by the aggregation authorization resource.
#[async_trait]
pub trait ConfigService: Send + Sync {
    async fn put_authorization(&self, account_id: &str, region: &str) -> Result<()>;

    /// Every authorization granted by the calling account.
    async fn list_authorizations(&self) -> Result<Vec<RemoteAuthorization>>;

    async fn delete_authorization(&self, account_id: &str, region: &str) -> Result<()>;
}

#[async_trait]
impl<T: ConfigService + ?Sized> ConfigService for Box<T> {
    async fn put_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        (**self).put_authorization(account_id, region).await
    }

    async fn list_authorizations(&self) -> Result<Vec<RemoteAuthorization>> {
        (**self).list_authorizations().await
    }

    async fn delete_authorization(&self, account_id: &str, region: &str) -> Result<()> {
        (**self).delete_authorization(account_id, region).await
    }
}

/// Lifecycle hooks an orchestrator drives for one resource type.
///
/// There is no update hook: every user-facing attribute forces replacement.
#[async_trait]
pub trait ResourceLifecycle: Send + Sync {
    fn schema(&self) -> &ResourceSchema;

    async fn create(&self, state: &mut ResourceState) -> Result<()>;

    async fn read(&self, state: &mut ResourceState) -> Result<()>;

    async fn delete(&self, state: &mut ResourceState) -> Result<()>;

    async fn import(&self, id: &str) -> Result<ResourceState>;
}
