// Domain entities and value objects
pub mod conversions;
pub mod practice;
pub mod provider;

// Re-export common types for easier imports
pub use practice::{Practice, PracticeDetails};
pub use provider::{Provider, ProviderDetails};
