pub mod resource;

pub use crate::domain::model::{
    AggregationAuthorization, AuthorizationId, RemoteAuthorization, ResourceState,
};
pub use crate::domain::ports::{ConfigService, ResourceLifecycle};
pub use crate::domain::schema::ResourceSchema;
pub use crate::utils::error::Result;
