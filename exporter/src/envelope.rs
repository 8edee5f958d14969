//! Wraps a profile record into an export request.

use crate::proto::{ExportProfilesServiceRequest, Profile, ResourceProfiles, ScopeProfiles};

/// Build `request -> resource -> scope -> profile` around a single record.
///
/// Each level holds exactly one element; resource, scope and schema fields
/// stay at their defaults.
pub fn build_request(profile: Profile) -> ExportProfilesServiceRequest {
    let scope_profiles = ScopeProfiles {
        profiles: vec![profile],
        ..Default::default()
    };
    let resource_profiles = ResourceProfiles {
        scope_profiles: vec![scope_profiles],
        ..Default::default()
    };
    ExportProfilesServiceRequest {
        resource_profiles: vec![resource_profiles],
        ..Default::default()
    }
}
