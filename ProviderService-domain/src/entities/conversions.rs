use provider_service_data::models::{
    NewPracticeRecord, NewProviderRecord, PracticeRecord, ProviderRecord,
};

use crate::entities::practice::{Practice, PracticeDetails};
use crate::entities::provider::{Provider, ProviderDetails};

// Conversion functions between domain entities and data models.
// Names follow convert_to_[target_layer]_[model_name].

/// Convert from data model to domain entity for a practice
pub fn convert_to_domain_practice(record: PracticeRecord) -> Practice {
    Practice {
        id: record.id,
        name: record.name,
        address: record.address,
        phone_number: record.phone_number,
        website: record.website,
    }
}

/// Convert practice details into the insert model
pub fn convert_to_data_new_practice(details: PracticeDetails) -> NewPracticeRecord {
    NewPracticeRecord {
        name: details.name,
        address: details.address,
        phone_number: details.phone_number,
        website: details.website,
    }
}

/// Overwrite every writable column of a stored practice with `details`
pub fn apply_practice_details(record: PracticeRecord, details: PracticeDetails) -> PracticeRecord {
    PracticeRecord {
        id: record.id,
        name: details.name,
        address: details.address,
        phone_number: details.phone_number,
        website: details.website,
    }
}

/// Convert from data model to domain entity for a provider.
///
/// `practice` is the already-resolved record behind `record.practice_id`.
pub fn convert_to_domain_provider(record: ProviderRecord, practice: Option<Practice>) -> Provider {
    Provider {
        id: record.id,
        name: record.name,
        specialty: record.specialty,
        address: record.address,
        phone_number: record.phone_number,
        practice,
    }
}

/// Convert provider details into the insert model
pub fn convert_to_data_new_provider(details: ProviderDetails) -> NewProviderRecord {
    NewProviderRecord {
        name: details.name,
        specialty: details.specialty,
        address: details.address,
        phone_number: details.phone_number,
        practice_id: details.practice_id,
    }
}

/// Overwrite every writable column of a stored provider, including the practice reference
pub fn apply_provider_details(record: ProviderRecord, details: ProviderDetails) -> ProviderRecord {
    ProviderRecord {
        id: record.id,
        name: details.name,
        specialty: details.specialty,
        address: details.address,
        phone_number: details.phone_number,
        practice_id: details.practice_id,
    }
}
