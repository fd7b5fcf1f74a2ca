// Repository module structure
pub mod errors;
mod in_memory;
mod practice;
mod provider;
mod storage;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use in_memory::InMemoryStorage;
pub use practice::{PracticeRepository, PracticeRepositoryTrait};
pub use provider::{ProviderRepository, ProviderRepositoryTrait};

// Mocks are available to this crate's tests and to dependents enabling the mock feature
#[cfg(any(test, feature = "mock"))]
pub use practice::MockPracticeRepositoryTrait;
#[cfg(any(test, feature = "mock"))]
pub use provider::MockProviderRepositoryTrait;
