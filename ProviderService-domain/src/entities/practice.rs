use serde::{Deserialize, Serialize};

/// A medical facility or organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practice {
    /// Storage-assigned identifier, never changed by updates
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

/// Writable fields of a practice, used for both create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
}
