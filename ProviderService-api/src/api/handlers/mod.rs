pub mod health;
pub mod practice;
pub mod provider;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use practice::{create_practice, delete_practice, get_practice, list_practices, update_practice};
pub use provider::{
    create_provider, delete_provider, get_provider, list_providers, search_providers,
    update_provider,
};
