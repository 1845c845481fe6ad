//! Structure loading lifecycle.
//!
//! A [`ViewerSession`] owns the source reference, the load state machine
//! (Idle → Loading → Ready/Error), and the background retrieval step.
//! Retrieval runs on a detached worker thread and delivers
//! generation-tagged results over a channel; a result whose generation no
//! longer matches the session's is stale and is dropped, so a late
//! response can never overwrite newer data (last-writer-wins). Dropping
//! the session closes the channel, which cancels any in-flight delivery.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use glam::Vec3;

use crate::parser;

/// Where structure text comes from.
///
/// Compared by value: re-supplying an equal source is a no-op, so
/// geometry is only ever recomputed when the source actually changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// Structure text supplied directly.
    Inline(String),
    /// A file on disk.
    Path(PathBuf),
    /// An HTTP(S) URL to fetch.
    Url(String),
}

/// The loader state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No source supplied yet.
    Idle,
    /// Retrieval in flight.
    Loading,
    /// Retrieval and parse finished; holds the backbone points.
    ///
    /// A structure with fewer than 2 points still lands here — rendering
    /// nothing is a downstream policy, not a load failure.
    Ready(Vec<Vec3>),
    /// Retrieval failed (I/O or network). Retryable by supplying the
    /// source again.
    Error(String),
}

type FetchResult = (u64, Result<String, String>);

/// Process-local viewer session state.
pub struct ViewerSession {
    source: Option<StructureSource>,
    state: LoadState,
    generation: u64,
    /// Set on every state transition, consumed by [`Self::poll`].
    dirty: bool,
    tx: Sender<FetchResult>,
    rx: Receiver<FetchResult>,
}

impl ViewerSession {
    /// A session with no source.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: None,
            state: LoadState::Idle,
            generation: 0,
            dirty: false,
            tx,
            rx,
        }
    }

    /// Supply a source reference, starting retrieval if it differs from
    /// the current one. An equal source is a no-op.
    pub fn set_source(&mut self, source: StructureSource) {
        if self.source.as_ref() == Some(&source) {
            return;
        }

        self.generation += 1;
        self.source = Some(source.clone());
        self.state = LoadState::Loading;
        self.dirty = true;
        let generation = self.generation;

        match source {
            StructureSource::Inline(text) => {
                // No retrieval step; completes synchronously.
                let _ = self.apply(generation, Ok(text));
            }
            StructureSource::Path(path) => {
                let tx = self.tx.clone();
                let _ = std::thread::spawn(move || {
                    let result = std::fs::read_to_string(&path)
                        .map_err(|e| format!("{}: {e}", path.display()));
                    let _ = tx.send((generation, result));
                });
            }
            StructureSource::Url(url) => {
                let tx = self.tx.clone();
                let _ = std::thread::spawn(move || {
                    let result = fetch_url(&url);
                    let _ = tx.send((generation, result));
                });
            }
        }
    }

    /// Drain completed retrievals. Returns `true` if the state changed
    /// since the last poll (including synchronous inline completion).
    pub fn poll(&mut self) -> bool {
        while let Ok((generation, result)) = self.rx.try_recv() {
            let _ = self.apply(generation, result);
        }
        std::mem::take(&mut self.dirty)
    }

    /// Apply one retrieval result; stale generations are dropped.
    fn apply(
        &mut self,
        generation: u64,
        result: Result<String, String>,
    ) -> bool {
        if generation != self.generation {
            log::debug!(
                "dropping stale retrieval (generation {generation}, current {})",
                self.generation
            );
            return false;
        }

        match result {
            Ok(text) => {
                let points = parser::parse_backbone(&text);
                log::info!("structure loaded: {} backbone points", points.len());
                self.state = LoadState::Ready(points);
            }
            Err(msg) => {
                log::warn!("structure retrieval failed: {msg}");
                self.state = LoadState::Error(msg);
            }
        }
        self.dirty = true;
        true
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Current source reference, if any.
    #[must_use]
    pub fn source(&self) -> Option<&StructureSource> {
        self.source.as_ref()
    }

    /// Monotonic counter bumped on every source change. Callers key
    /// derived state (composed geometry) on this, never on render cadence.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The parsed backbone points, when ready.
    #[must_use]
    pub fn points(&self) -> Option<&[Vec3]> {
        match &self.state {
            LoadState::Ready(points) => Some(points),
            _ => None,
        }
    }
}

impl Default for ViewerSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetch structure text over HTTP(S).
fn fetch_url(url: &str) -> Result<String, String> {
    let mut response =
        ureq::get(url).call().map_err(|e| format!("{url}: {e}"))?;
    response
        .body_mut()
        .read_to_string()
        .map_err(|e| format!("{url}: {e}"))
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    const THREE_POINTS: &str = "\
ATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  CA  ALA A   2       1.000   0.000   0.000  1.00  0.00           C
ATOM      3  CA  ALA A   3       2.000   0.000   0.000  1.00  0.00           C";

    fn wait_settled(session: &mut ViewerSession) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while *session.state() == LoadState::Loading {
            let _ = session.poll();
            assert!(Instant::now() < deadline, "retrieval did not settle");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn starts_idle() {
        let session = ViewerSession::new();
        assert_eq!(*session.state(), LoadState::Idle);
        assert!(session.points().is_none());
    }

    #[test]
    fn inline_source_completes_synchronously() {
        let mut session = ViewerSession::new();
        session
            .set_source(StructureSource::Inline(THREE_POINTS.to_owned()));
        let points = session.points().expect("inline parse should be ready");
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn poll_reports_synchronous_inline_transition() {
        let mut session = ViewerSession::new();
        session
            .set_source(StructureSource::Inline(THREE_POINTS.to_owned()));
        assert!(session.poll());
        assert!(!session.poll());
    }

    #[test]
    fn unchanged_source_does_not_reload() {
        let mut session = ViewerSession::new();
        let src = StructureSource::Inline(THREE_POINTS.to_owned());
        session.set_source(src.clone());
        let generation = session.generation();
        session.set_source(src);
        assert_eq!(session.generation(), generation);
    }

    #[test]
    fn changed_source_bumps_generation() {
        let mut session = ViewerSession::new();
        session.set_source(StructureSource::Inline("".to_owned()));
        let first = session.generation();
        session
            .set_source(StructureSource::Inline(THREE_POINTS.to_owned()));
        assert_eq!(session.generation(), first + 1);
    }

    #[test]
    fn stale_result_never_overwrites_newer_state() {
        let mut session = ViewerSession::new();
        session.set_source(StructureSource::Inline("a".to_owned()));
        let stale_generation = session.generation();
        session
            .set_source(StructureSource::Inline(THREE_POINTS.to_owned()));
        let points_before = session.points().map(<[Vec3]>::to_vec);

        // Source A's retrieval "finishes" after B superseded it.
        let applied =
            session.apply(stale_generation, Ok(THREE_POINTS.to_owned()));
        assert!(!applied);
        assert_eq!(
            session.points().map(<[Vec3]>::to_vec),
            points_before
        );
    }

    #[test]
    fn missing_file_transitions_to_error() {
        let mut session = ViewerSession::new();
        session.set_source(StructureSource::Path(PathBuf::from(
            "/definitely/not/here.pdb",
        )));
        wait_settled(&mut session);
        assert!(matches!(session.state(), LoadState::Error(_)));
    }

    #[test]
    fn file_source_loads_in_background() {
        let dir = std::env::temp_dir();
        let path = dir.join("strandview-session-test.pdb");
        std::fs::write(&path, THREE_POINTS).unwrap();

        let mut session = ViewerSession::new();
        session.set_source(StructureSource::Path(path.clone()));
        wait_settled(&mut session);

        assert_eq!(session.points().map(<[Vec3]>::len), Some(3));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn empty_structure_is_ready_not_error() {
        let mut session = ViewerSession::new();
        session.set_source(StructureSource::Inline(
            "HEADER    EMPTY\n".to_owned(),
        ));
        assert_eq!(*session.state(), LoadState::Ready(Vec::new()));
    }
}
