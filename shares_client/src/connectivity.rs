//! Reachability tracking for the quotes API host.
//!
//! This module provides:
//!
//! - `ConnectivityTracker` — turns a stream of probe results into state
//!   transitions. The first observation is always reported; after that only
//!   changes are.
//! - `Probe` / `TcpProbe` — a reachability check; `TcpProbe` opens a TCP
//!   connection to the host and port of the API base URL.
//! - `ConnectivityMonitor` — a background thread that probes on an interval and
//!   posts `Event::Connectivity` for every transition.
//!
//! Design notes:
//! - The monitor owns no shared state; the coordinator keeps the authoritative
//!   `ConnectivityState` and reacts to the posted transitions.
//! - The thread stops when the shutdown flag is set or the event channel is closed.
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, info, warn};
use reqwest::Url;
use shares_common::SharesError;
use strum::Display;

use crate::coordinator::Event;

/// Reachability of the API host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectivityState {
    Reachable,
    Unreachable,
}

impl From<bool> for ConnectivityState {
    fn from(reachable: bool) -> Self {
        if reachable {
            ConnectivityState::Reachable
        } else {
            ConnectivityState::Unreachable
        }
    }
}

/// Emits a state only when it differs from the previous observation.
#[derive(Debug, Default)]
pub struct ConnectivityTracker {
    last: Option<ConnectivityState>,
}

impl ConnectivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a probe result; returns the new state on a transition.
    pub fn observe(&mut self, reachable: bool) -> Option<ConnectivityState> {
        let state = ConnectivityState::from(reachable);
        if self.last == Some(state) {
            return None;
        }
        self.last = Some(state);
        Some(state)
    }

    pub fn current(&self) -> Option<ConnectivityState> {
        self.last
    }
}

/// A reachability check.
pub trait Probe: Send {
    fn is_reachable(&mut self) -> bool;
}

/// Probes by opening a TCP connection to the API host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    host: String,
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    /// Probe the host and port of `base_url` (default port of the scheme if omitted).
    pub fn from_base_url(base_url: &str, timeout: Duration) -> Result<Self, SharesError> {
        let url = Url::parse(base_url)
            .map_err(|e| SharesError::Config(format!("invalid base URL '{}': {}", base_url, e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| SharesError::Config(format!("base URL '{}' has no host", base_url)))?
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_string();
        let port = url.port_or_known_default().ok_or_else(|| {
            SharesError::Config(format!("base URL '{}' has no port", base_url))
        })?;
        Ok(Self {
            host,
            port,
            timeout,
        })
    }

    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn resolve(&self) -> Vec<SocketAddr> {
        match (self.host.as_str(), self.port).to_socket_addrs() {
            Ok(addrs) => addrs.collect(),
            Err(e) => {
                debug!("Cannot resolve {}: {}", self.target(), e);
                Vec::new()
            }
        }
    }
}

impl Probe for TcpProbe {
    fn is_reachable(&mut self) -> bool {
        self.resolve()
            .iter()
            .any(|addr| TcpStream::connect_timeout(addr, self.timeout).is_ok())
    }
}

/// Background probing loop.
pub struct ConnectivityMonitor;

impl ConnectivityMonitor {
    /// Spawn the monitor thread. The first probe runs immediately.
    pub fn start<P: Probe + 'static>(
        mut probe: P,
        interval: Duration,
        events: Sender<Event>,
        shutdown: Arc<AtomicBool>,
    ) -> JoinHandle<()> {
        info!("Connectivity monitor started. Interval: {:?}", interval);
        thread::spawn(move || {
            let mut tracker = ConnectivityTracker::new();
            while !shutdown.load(Ordering::Relaxed) {
                if let Some(state) = tracker.observe(probe.is_reachable()) {
                    info!("Connectivity changed: {}", state);
                    if events.send(Event::Connectivity(state)).is_err() {
                        warn!("Event channel closed; connectivity monitor exiting");
                        break;
                    }
                }
                thread::sleep(interval);
            }
            info!("Connectivity monitor stopping...");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::collections::VecDeque;
    use std::net::TcpListener;

    /// Replays results, then repeats the last one.
    struct ScriptedProbe {
        results: VecDeque<bool>,
        last: bool,
    }

    impl ScriptedProbe {
        fn new(results: &[bool]) -> Self {
            Self {
                results: results.iter().copied().collect(),
                last: false,
            }
        }
    }

    impl Probe for ScriptedProbe {
        fn is_reachable(&mut self) -> bool {
            if let Some(next) = self.results.pop_front() {
                self.last = next;
            }
            self.last
        }
    }

    #[test]
    fn tracker_reports_first_observation_and_changes_only() {
        let mut tracker = ConnectivityTracker::new();
        assert_eq!(tracker.observe(false), Some(ConnectivityState::Unreachable));
        assert_eq!(tracker.observe(false), None);
        assert_eq!(tracker.observe(true), Some(ConnectivityState::Reachable));
        assert_eq!(tracker.observe(true), None);
        assert_eq!(tracker.current(), Some(ConnectivityState::Reachable));
    }

    #[test]
    fn monitor_posts_transitions() {
        let (tx, rx) = unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));
        let probe = ScriptedProbe::new(&[false, false, true, true, false]);
        let handle =
            ConnectivityMonitor::start(probe, Duration::from_millis(1), tx, shutdown.clone());

        let mut states = Vec::new();
        for _ in 0..3 {
            match rx.recv_timeout(Duration::from_secs(2)) {
                Ok(Event::Connectivity(state)) => states.push(state),
                other => panic!("unexpected event: {:?}", other),
            }
        }
        shutdown.store(true, Ordering::SeqCst);
        handle.join().expect("monitor thread");

        assert_eq!(
            states,
            [
                ConnectivityState::Unreachable,
                ConnectivityState::Reachable,
                ConnectivityState::Unreachable
            ]
        );
    }

    #[test]
    fn tcp_probe_derives_target_from_base_url() {
        let probe = TcpProbe::from_base_url("https://cloud.iexapis.com/stable", Duration::from_secs(1))
            .expect("probe");
        assert_eq!(probe.target(), "cloud.iexapis.com:443");

        let probe = TcpProbe::from_base_url("http://127.0.0.1:9000", Duration::from_secs(1))
            .expect("probe");
        assert_eq!(probe.target(), "127.0.0.1:9000");

        assert!(matches!(
            TcpProbe::from_base_url("not a url", Duration::from_secs(1)),
            Err(SharesError::Config(_))
        ));
    }

    #[test]
    fn tcp_probe_sees_a_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().expect("addr").port();
        let mut probe = TcpProbe::from_base_url(
            &format!("http://127.0.0.1:{port}"),
            Duration::from_millis(500),
        )
        .expect("probe");
        assert!(probe.is_reachable());

        drop(listener);
        assert!(!probe.is_reachable());
    }
}
