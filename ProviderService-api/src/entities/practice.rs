use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use provider_service_domain::entities::{Practice, PracticeDetails};

/// Public representation of a practice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeResponse {
    /// Storage-assigned identifier
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

/// Request payload for creating or updating a practice.
///
/// An `id` in the body is ignored; the path (or storage) decides it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

impl From<Practice> for PracticeResponse {
    fn from(practice: Practice) -> Self {
        Self {
            id: practice.id,
            name: practice.name,
            address: practice.address,
            phone_number: practice.phone_number,
            website: practice.website,
        }
    }
}

impl From<PracticeRequest> for PracticeDetails {
    fn from(request: PracticeRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            phone_number: request.phone_number,
            website: request.website,
        }
    }
}
