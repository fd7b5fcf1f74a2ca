use serde::{Deserialize, Serialize};

use super::practice::Practice;

/// An individual practitioner, optionally affiliated with one practice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Storage-assigned identifier, never changed by updates
    pub id: i64,
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    /// The referenced practice, resolved at read time
    pub practice: Option<Practice>,
}

/// Writable fields of a provider.
///
/// The practice is carried by identifier only. On update the value replaces
/// the stored reference outright, so `None` detaches the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDetails {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub practice_id: Option<i64>,
}
