//! OTLP profile types used by the exporter.
//!
//! Re-exports the generated protobuf messages and the tonic client for the
//! `opentelemetry.proto.collector.profiles.v1development` service, so the rest
//! of the crate (and its tests) import them from one place.

pub use opentelemetry_proto::tonic::collector::profiles::v1development::{
    profiles_service_client::ProfilesServiceClient, ExportProfilesPartialSuccess,
    ExportProfilesServiceRequest, ExportProfilesServiceResponse,
};
pub use opentelemetry_proto::tonic::profiles::v1development::{
    Profile, ResourceProfiles, ScopeProfiles,
};

/// Server side of the profiles service, used by the in-process collector in tests.
pub use opentelemetry_proto::tonic::collector::profiles::v1development::profiles_service_server;

/// Re-export of [`prost::Message`] for encoding/decoding profile records.
pub use prost::Message;
