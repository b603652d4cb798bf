//! Background license backfill
//!
//! Entries decoded from a manifest have a repository URL but no text. A
//! [`Backfill`] fetches their licenses on worker threads, one thread per
//! request, so a slow repository never holds up the others. Every result comes
//! back through a single channel and is handed out by [`Backfill::recv`] on the
//! thread that owns the `Backfill`. That thread is the only one that ever
//! touches the list.
//!
//! Cancelling through a [`FetchHandle`] guarantees the completion is never
//! delivered. A fetch cancelled before its worker starts never sends a request;
//! one already in progress runs to the end and its result is discarded.
//!
//! There is no retry and no deduplication: spawning twice for the same
//! repository issues two requests.

use crate::acknow::{Acknow, AcknowList};
use crate::github::{BackfillError, GitHubClient, LicenseSource, is_github_repository};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Outcome of one license fetch.
#[derive(Debug)]
pub struct Completion {
    /// Position of the entry in the list it was spawned from.
    pub index: usize,
    pub title: String,
    pub repository: String,
    pub result: Result<String, BackfillError>,
}

impl Completion {
    /// Swap the fetched text into `list`, leaving it untouched on failure or if
    /// the entry at `index` is no longer the one that was fetched.
    pub fn apply(&self, list: AcknowList) -> AcknowList {
        let Ok(text) = &self.result else {
            return list;
        };

        let replacement = match list.acknowledgements.get(self.index) {
            Some(current) if current.title == self.title => current.with_text(text.as_str()),
            _ => return list,
        };
        list.replacing(self.index, replacement)
    }
}

/// Cancels one outstanding fetch.
///
/// A request that has not started yet is skipped. One already sent is not
/// aborted, but its completion is dropped instead of delivered.
#[derive(Debug, Clone)]
pub struct FetchHandle {
    cancelled: Arc<AtomicBool>,
}

impl FetchHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct Envelope {
    index: usize,
    title: String,
    repository: String,
    /// `None` when the fetch was cancelled before it started.
    result: Option<Result<String, BackfillError>>,
    cancelled: Arc<AtomicBool>,
}

/// Body of one worker thread. A panicking source counts as an unknown failure.
fn run_fetch<S: LicenseSource>(
    source: &S,
    repository: &str,
    cancelled: &AtomicBool,
) -> Option<Result<String, BackfillError>> {
    if cancelled.load(Ordering::SeqCst) {
        return None;
    }
    Some(
        catch_unwind(AssertUnwindSafe(|| source.fetch_license(repository)))
            .unwrap_or(Err(BackfillError::Unknown)),
    )
}

pub struct Backfill<S: LicenseSource = GitHubClient> {
    source: Arc<S>,
    sender: Sender<Envelope>,
    receiver: Receiver<Envelope>,
    in_flight: usize,
}

impl Default for Backfill<GitHubClient> {
    fn default() -> Self {
        Self::new(GitHubClient::new())
    }
}

impl<S: LicenseSource> Backfill<S> {
    pub fn new(source: S) -> Self {
        let (sender, receiver) = channel();
        Self {
            source: Arc::new(source),
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Number of fetches whose completion has not been received yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start fetching the license for `acknow`, stored at `index` in its list.
    ///
    /// Returns `None` when there is nothing to fetch: the entry already has
    /// text, or it has no GitHub repository.
    pub fn spawn(&mut self, index: usize, acknow: &Acknow) -> Option<FetchHandle> {
        if acknow.text.is_some() {
            return None;
        }
        let repository = acknow
            .repository
            .as_deref()
            .filter(|repo| is_github_repository(repo))?
            .to_string();

        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = FetchHandle {
            cancelled: Arc::clone(&cancelled),
        };

        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let title = acknow.title.clone();
        tracing::debug!("Fetching license for {title} from {repository}");

        std::thread::spawn(move || {
            let result = run_fetch(&*source, &repository, &cancelled);
            let envelope = Envelope {
                index,
                title,
                repository,
                result,
                cancelled,
            };
            // The receiver lives as long as the Backfill; a send error means it was dropped.
            let _ = sender.send(envelope);
        });

        self.in_flight += 1;
        Some(handle)
    }

    /// Spawn a fetch for every entry of `list` that needs one.
    pub fn spawn_missing(&mut self, list: &AcknowList) -> Vec<FetchHandle> {
        list.acknowledgements
            .iter()
            .enumerate()
            .filter_map(|(index, acknow)| self.spawn(index, acknow))
            .collect()
    }

    /// Block until the next delivered completion.
    ///
    /// Cancelled fetches are skipped. Returns `None` once nothing is in flight.
    pub fn recv(&mut self) -> Option<Completion> {
        while self.in_flight > 0 {
            let envelope = self.receiver.recv().ok()?;
            if let Some(completion) = self.accept(envelope) {
                return Some(completion);
            }
        }
        None
    }

    /// Like [`Backfill::recv`], without blocking.
    pub fn try_recv(&mut self) -> Option<Completion> {
        while self.in_flight > 0 {
            let envelope = self.receiver.try_recv().ok()?;
            if let Some(completion) = self.accept(envelope) {
                return Some(completion);
            }
        }
        None
    }

    /// Wait for every outstanding fetch and apply the successful ones to `list`.
    ///
    /// Failures are logged and returned so the caller can pick a fallback.
    pub fn finish(&mut self, mut list: AcknowList) -> (AcknowList, Vec<Completion>) {
        let mut failures = Vec::new();
        while let Some(completion) = self.recv() {
            match &completion.result {
                Ok(_) => list = completion.apply(list),
                Err(err) => {
                    tracing::warn!("License fetch for {} failed: {err}", completion.title);
                    failures.push(completion);
                }
            }
        }
        (list, failures)
    }

    fn accept(&mut self, envelope: Envelope) -> Option<Completion> {
        self.in_flight -= 1;
        let Envelope {
            index,
            title,
            repository,
            result,
            cancelled,
        } = envelope;

        match result {
            Some(result) if !cancelled.load(Ordering::SeqCst) => Some(Completion {
                index,
                title,
                repository,
                result,
            }),
            _ => {
                tracing::debug!("Dropping cancelled license fetch for {title}");
                None
            }
        }
    }
}
