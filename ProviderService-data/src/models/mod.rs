// Storage models
pub mod practice;
pub mod provider;

pub use practice::{NewPracticeRecord, PracticeRecord};
pub use provider::{NewProviderRecord, ProviderRecord};
