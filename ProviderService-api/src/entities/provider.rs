use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use provider_service_domain::entities::{Provider, ProviderDetails};
use super::practice::PracticeResponse;

/// Public representation of a provider, with its practice nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    /// Storage-assigned identifier
    pub id: i64,

    /// Full name of the provider
    pub name: Option<String>,

    /// Medical specialty
    pub specialty: Option<String>,

    /// Postal address
    pub address: Option<String>,

    /// Contact phone number
    pub phone_number: Option<String>,

    /// Affiliated practice, or null
    pub practice: Option<PracticeResponse>,
}

/// Reference to an existing practice by identifier.
///
/// Any other practice fields sent alongside `id` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PracticeReference {
    pub id: i64,
}

/// Request payload for creating or updating a provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRequest {
    pub name: Option<String>,
    pub specialty: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    /// Practice to affiliate with; null or absent clears the affiliation on update
    pub practice: Option<PracticeReference>,
}

impl From<Provider> for ProviderResponse {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            name: provider.name,
            specialty: provider.specialty,
            address: provider.address,
            phone_number: provider.phone_number,
            practice: provider.practice.map(PracticeResponse::from),
        }
    }
}

impl From<ProviderRequest> for ProviderDetails {
    fn from(request: ProviderRequest) -> Self {
        Self {
            name: request.name,
            specialty: request.specialty,
            address: request.address,
            phone_number: request.phone_number,
            practice_id: request.practice.map(|reference| reference.id),
        }
    }
}
