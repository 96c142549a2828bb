pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "aws")]
pub use adapters::AwsConfigService;

pub use adapters::InMemoryConfigService;
pub use core::resource::AggregationAuthorizationResource;
pub use core::{
    AggregationAuthorization, AuthorizationId, ConfigService, RemoteAuthorization,
    ResourceLifecycle, ResourceSchema, ResourceState,
};
pub use utils::error::{AuthzError, Result};
