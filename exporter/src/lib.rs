//! OTLP profile export client library
//!
//! Loads one binary-encoded OpenTelemetry profile from disk, wraps it in an
//! `ExportProfilesServiceRequest` and sends it to a profiles collector with a
//! single unary call over a plaintext gRPC channel.

pub mod config;
pub mod connection;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod proto;

pub use config::{Config, Target};
pub use connection::{Connection, Shutdown};
pub use error::{ExportError, Result};
pub use exporter::{ExportOutcome, ProfileExporter};

use tracing::{debug, info};

/// What a completed run did.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: ExportOutcome,
    pub shutdown: Shutdown,
}

/// Run the export pipeline: open channel, read, decode, wrap, export, close.
///
/// Read and decode failures are returned as errors after the channel has been
/// closed. Export failures are not errors; they show up in
/// [`RunReport::outcome`].
pub async fn run(config: Config) -> Result<RunReport> {
    config.validate()?;
    let target = Target::parse(&config.target)?;
    let connection = Connection::open(&target)?;

    info!(
        "Exporting profile {} to {}",
        config.path.display(),
        target
    );

    let path = config.path;
    let (result, shutdown) = connection
        .scoped(config.shutdown_grace, |handle| async move {
            let data = loader::read_profile_bytes(&path).await?;
            let profile = decode::decode_profile(&data)?;
            let request = envelope::build_request(profile);
            debug!(
                "Built export request with {} resource group(s)",
                request.resource_profiles.len()
            );

            let mut exporter = ProfileExporter::new(&handle);
            Ok::<_, ExportError>(exporter.export(request).await)
        })
        .await;

    Ok(RunReport {
        outcome: result?,
        shutdown,
    })
}
