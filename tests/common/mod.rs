//! Shared fixtures for integration tests: a mock HTTP backend and recording
//! fakes of every collaborator.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use dr_failover::capacity::{CapacityController, CapacityError, CapacitySnapshot, CapacityTarget};
use dr_failover::config::{FailbackSettings, FailoverSettings};
use dr_failover::dns::{DnsController, DnsCutover, DnsError};
use dr_failover::notify::{Notifier, NotifyError};
use dr_failover::probe::{HttpProber, ProbeError};

/// Ordered log of collaborator calls shared by all fakes of one test.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

/// Start a mock backend answering every request with `status`.
/// Returns its address and the raw requests it received.
pub async fn start_recording_backend(status: u16) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let seen = seen.clone();
                    tokio::spawn(async move {
                        let raw = read_request(&mut socket).await;
                        seen.lock().unwrap().push(raw);

                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let body = "ok";
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, requests)
}

/// Read one request: headers, then `Content-Length` bytes of body.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a backend that accepts connections, reads the request and never
/// answers. Sockets stay open until the test ends.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((mut socket, _)) = listener.accept().await {
            let _ = read_request(&mut socket).await;
            held.push(socket);
        }
    });

    addr
}

/// Address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Per-URL scripted health checks. Unscripted URLs, and scripts that have
/// run out, fail with a transport error.
#[derive(Default)]
pub struct ScriptedProber {
    scripts: Mutex<HashMap<String, VecDeque<u16>>>,
    always: Mutex<HashMap<String, u16>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `statuses`, one per attempt.
    pub fn script(self, url: &str, statuses: &[u16]) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(url.to_string(), statuses.iter().copied().collect());
        self
    }

    /// Answer every attempt on `url` with `status`.
    pub fn always(self, url: &str, status: u16) -> Self {
        self.always.lock().unwrap().insert(url.to_string(), status);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|u| *u == url).count()
    }
}

#[async_trait]
impl HttpProber for ScriptedProber {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<u16, ProbeError> {
        self.calls.lock().unwrap().push(url.to_string());

        if let Some(status) = self.always.lock().unwrap().get(url) {
            return Ok(*status);
        }
        self.scripts
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|script| script.pop_front())
            .ok_or_else(|| ProbeError::Transport(format!("{} unreachable", url)))
    }
}

/// In-memory compute groups keyed by group name.
pub struct RecordingCapacity {
    journal: Journal,
    capacities: Mutex<HashMap<String, i32>>,
    failing_groups: Mutex<HashSet<String>>,
    fail_writes: AtomicBool,
    pub writes: Mutex<Vec<CapacityTarget>>,
    pub reads: Mutex<Vec<(String, String)>>,
}

impl RecordingCapacity {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            capacities: Mutex::new(HashMap::new()),
            failing_groups: Mutex::new(HashSet::new()),
            fail_writes: AtomicBool::new(false),
            writes: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_capacity(self, group: &str, desired: i32) -> Self {
        self.capacities.lock().unwrap().insert(group.to_string(), desired);
        self
    }

    /// Every write fails.
    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Reads and writes on `group` fail.
    pub fn failing_group(self, group: &str) -> Self {
        self.failing_groups.lock().unwrap().insert(group.to_string());
        self
    }

    pub fn writes(&self) -> Vec<CapacityTarget> {
        self.writes.lock().unwrap().clone()
    }

    pub fn capacity(&self, group: &str) -> Option<i32> {
        self.capacities.lock().unwrap().get(group).copied()
    }

    fn fails(&self, group: &str) -> bool {
        self.failing_groups.lock().unwrap().contains(group)
    }
}

#[async_trait]
impl CapacityController for RecordingCapacity {
    async fn set_desired_capacity(&self, target: &CapacityTarget) -> Result<(), CapacityError> {
        self.journal.lock().unwrap().push(format!(
            "capacity:set {}={}",
            target.group_name, target.desired_capacity
        ));
        self.writes.lock().unwrap().push(target.clone());

        if self.fail_writes.load(Ordering::SeqCst) || self.fails(&target.group_name) {
            return Err(CapacityError::Api("Rate exceeded".into()));
        }
        self.capacities
            .lock()
            .unwrap()
            .insert(target.group_name.clone(), target.desired_capacity);
        Ok(())
    }

    async fn get_desired_capacity(
        &self,
        region: &str,
        group_name: &str,
    ) -> Result<CapacitySnapshot, CapacityError> {
        self.journal
            .lock()
            .unwrap()
            .push(format!("capacity:get {}", group_name));
        self.reads
            .lock()
            .unwrap()
            .push((region.to_string(), group_name.to_string()));

        if self.fails(group_name) {
            return Err(CapacityError::Api("Rate exceeded".into()));
        }
        self.capacity(group_name)
            .map(|desired_capacity| CapacitySnapshot {
                group_name: group_name.to_string(),
                desired_capacity,
            })
            .ok_or_else(|| CapacityError::GroupNotFound(group_name.to_string()))
    }
}

pub struct RecordingDns {
    journal: Journal,
    fail: bool,
    pub upserts: Mutex<Vec<DnsCutover>>,
}

impl RecordingDns {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail: false,
            upserts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn upserts(&self) -> Vec<DnsCutover> {
        self.upserts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsController for RecordingDns {
    async fn upsert_cname(&self, cutover: &DnsCutover) -> Result<(), DnsError> {
        self.journal.lock().unwrap().push(format!(
            "dns:upsert {}->{} ttl={}",
            cutover.record_name, cutover.target_host, cutover.ttl
        ));
        self.upserts.lock().unwrap().push(cutover.clone());

        if self.fail {
            return Err(DnsError::Api("PriorRequestNotComplete".into()));
        }
        Ok(())
    }
}

pub struct RecordingNotifier {
    journal: Journal,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.journal.lock().unwrap().push(format!("notify:{}", subject));
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

pub const PRIMARY_ENDPOINT: &str = "https://primary.rndevops.site";
pub const DR_ENDPOINT: &str = "https://dr.rndevops.site";
/// Never resolves; forces the corroboration probe to fail.
pub const BROKEN_CORROBORATION: &str = "https://dynamodbx.us-west-2.amazonaws.com";

pub fn failover_settings() -> FailoverSettings {
    FailoverSettings {
        primary_region: "us-west-2".into(),
        primary_endpoint: PRIMARY_ENDPOINT.into(),
        dr_endpoint: DR_ENDPOINT.into(),
        dr_region: Some("us-east-1".into()),
        dr_asg_name: "dr-asg".into(),
        hosted_zone_id: "Z123456789".into(),
        domain_name: "rndevops.site".into(),
        sns_topic_arn: "arn:aws:sns:us-east-1:123456789012:MyTopic".into(),
        slack_webhook_url: "https://hooks.slack.com/services/T00000000/B00000000/XXXX".into(),
        corroboration_endpoint: Some(BROKEN_CORROBORATION.into()),
    }
}

pub fn failback_settings() -> FailbackSettings {
    FailbackSettings {
        primary_region: "us-west-2".into(),
        dr_region: "us-east-1".into(),
        primary_asg_name: "primary-asg".into(),
        dr_asg_name: "dr-asg".into(),
        domain_name: "https://rndevops.site".into(),
        primary_domain_name: "https://primary.rndevops.site".into(),
        hosted_zone_id: "Z1234567890".into(),
    }
}
