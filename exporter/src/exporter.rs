//! Unary export of a profile envelope to the collector.

use crate::connection::ConnectionHandle;
use crate::proto::{
    ExportProfilesServiceRequest, ExportProfilesServiceResponse, ProfilesServiceClient,
};
use tonic::codec::CompressionEncoding;
use tonic::transport::Channel;
use tonic::Status;
use tracing::{info, warn};

/// Result of a single export call. Remote failures are an outcome, not an error.
#[derive(Debug)]
pub enum ExportOutcome {
    Accepted(ExportProfilesServiceResponse),
    Failed(Status),
}

impl ExportOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ExportOutcome::Accepted(_))
    }
}

/// Client for the profiles collector service.
pub struct ProfileExporter {
    client: ProfilesServiceClient<Channel>,
    connection: ConnectionHandle,
}

impl ProfileExporter {
    pub fn new(connection: &ConnectionHandle) -> Self {
        let client = ProfilesServiceClient::new(connection.channel())
            .accept_compressed(CompressionEncoding::Gzip);
        Self {
            client,
            connection: connection.clone(),
        }
    }

    /// Send `request` with one unary call and log the result.
    ///
    /// Never fails: a status error, a transport error or a shutdown during the
    /// call is logged as a warning and returned as [`ExportOutcome::Failed`].
    /// The record is not retried.
    pub async fn export(&mut self, request: ExportProfilesServiceRequest) -> ExportOutcome {
        let call = self.connection.track_call(self.client.export(request));
        let response = match call.await {
            Some(Ok(response)) => response.into_inner(),
            Some(Err(status)) => return failed(status),
            None => return failed(Status::cancelled("channel shut down during export")),
        };

        info!("Export succeeded: {:?}", response);
        if let Some(partial) = &response.partial_success {
            if partial.rejected_profiles > 0 || !partial.error_message.is_empty() {
                warn!(
                    "Collector rejected {} profile(s): {}",
                    partial.rejected_profiles, partial.error_message
                );
            }
        }
        ExportOutcome::Accepted(response)
    }
}

fn failed(status: Status) -> ExportOutcome {
    warn!("RPC failed: {:?}: {}", status.code(), status.message());
    ExportOutcome::Failed(status)
}
