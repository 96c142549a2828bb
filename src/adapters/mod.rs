// Adapters layer: concrete ConfigService implementations.

#[cfg(feature = "aws")]
pub mod aws;
pub mod memory;

#[cfg(feature = "aws")]
pub use aws::AwsConfigService;
pub use memory::{InMemoryConfigService, RecordedCall, RemoteOperation};
