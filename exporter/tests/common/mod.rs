//! In-process profiles collector and log capture shared by the integration tests.

#![allow(dead_code)]

use profile_export::proto::profiles_service_server::{ProfilesService, ProfilesServiceServer};
use profile_export::proto::{ExportProfilesServiceRequest, ExportProfilesServiceResponse};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tonic::transport::Server;
use tonic::{Code, Request, Response, Status};

/// How the mock collector answers `Export`.
#[derive(Clone, Debug)]
pub enum Reply {
    Ok(ExportProfilesServiceResponse),
    Status(Code, String),
}

/// Records every export request it receives and answers with a fixed reply.
#[derive(Clone)]
pub struct MockCollector {
    reply: Reply,
    received: Arc<Mutex<Vec<ExportProfilesServiceRequest>>>,
}

impl MockCollector {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn received(&self) -> Vec<ExportProfilesServiceRequest> {
        self.received.lock().unwrap().clone()
    }
}

#[tonic::async_trait]
impl ProfilesService for MockCollector {
    async fn export(
        &self,
        request: Request<ExportProfilesServiceRequest>,
    ) -> Result<Response<ExportProfilesServiceResponse>, Status> {
        self.received.lock().unwrap().push(request.into_inner());
        match &self.reply {
            Reply::Ok(response) => Ok(Response::new(response.clone())),
            Reply::Status(code, message) => Err(Status::new(*code, message.clone())),
        }
    }
}

/// A running mock collector; stops when dropped.
pub struct RunningCollector {
    pub addr: SocketAddr,
    pub collector: MockCollector,
    _stop: oneshot::Sender<()>,
}

impl RunningCollector {
    pub fn target(&self) -> String {
        self.addr.to_string()
    }
}

pub async fn start_collector(reply: Reply) -> RunningCollector {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let collector = MockCollector::new(reply);
    let (stop, stopped) = oneshot::channel::<()>();
    let service = ProfilesServiceServer::new(collector.clone());
    tokio::spawn(async move {
        Server::builder()
            .add_service(service)
            .serve_with_shutdown(addr, async {
                let _ = stopped.await;
            })
            .await
            .expect("mock collector");
    });

    for _ in 0..100 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    RunningCollector {
        addr,
        collector,
        _stop: stop,
    }
}

/// Collects formatted log output for the current thread.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route this thread's tracing events into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines at `level` (e.g. "INFO", "WARN") containing `needle`.
    pub fn lines(&self, level: &str, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level) && line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}
