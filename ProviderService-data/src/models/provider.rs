use serde::{Deserialize, Serialize};

/// Storage model for a provider row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRecord {
    /// Identifier assigned by storage on insert
    pub id: i64,

    /// Full name of the provider
    pub name: Option<String>,

    /// Medical specialty, matched by the specialty search
    pub specialty: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Contact phone number
    pub phone_number: Option<String>,

    /// Foreign key into the practices table
    pub practice_id: Option<i64>,
}

/// Column values for a provider that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProviderRecord {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub practice_id: Option<i64>,
}

impl NewProviderRecord {
    /// Attach a storage-assigned identifier
    pub fn with_id(self, id: i64) -> ProviderRecord {
        ProviderRecord {
            id,
            name: self.name,
            specialty: self.specialty,
            address: self.address,
            phone_number: self.phone_number,
            practice_id: self.practice_id,
        }
    }
}
