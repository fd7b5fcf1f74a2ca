use serde::{Deserialize, Serialize};

/// Storage model for a practice row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeRecord {
    /// Identifier assigned by storage on insert
    pub id: i64,

    /// Display name of the practice
    pub name: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Contact phone number
    pub phone_number: Option<String>,

    /// Public website URL
    pub website: Option<String>,
}

/// Column values for a practice that has not been stored yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPracticeRecord {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

impl NewPracticeRecord {
    /// Attach a storage-assigned identifier
    pub fn with_id(self, id: i64) -> PracticeRecord {
        PracticeRecord {
            id,
            name: self.name,
            address: self.address,
            phone_number: self.phone_number,
            website: self.website,
        }
    }
}
