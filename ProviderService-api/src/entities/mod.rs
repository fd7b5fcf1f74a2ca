// Public entities for the provider service API
// These are the JSON shapes that cross the HTTP boundary

// Practice request and response bodies
pub mod practice;

// Provider request and response bodies
pub mod provider;

// Common entities for error handling
pub mod common;

pub use common::ErrorResponse;
pub use practice::{PracticeRequest, PracticeResponse};
pub use provider::{PracticeReference, ProviderRequest, ProviderResponse};
