//! Periodic server sync.
//!
//! A [`SyncLoop`] is either Idle or Syncing. A timer tick or manual trigger
//! moves it to Syncing for one fetch+merge attempt, after which it always
//! returns to Idle, success or not. A trigger that arrives while Syncing is
//! dropped, so at most one fetch is ever in flight and merges never overlap.
//!
//! The fetch runs without holding the state lock; the merge takes the lock
//! and folds the batch into whatever the collection holds at that moment, so
//! a quote added mid-fetch is never lost.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use quotes_core::{QuoteView, Status};
use quotes_store::{KeyValueStore, Store};
use tokio::sync::{Mutex, mpsc};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::app::AppState;
use crate::remote::QuoteRemote;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Syncing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// N server quotes were new and have been merged and persisted.
    Synced(usize),
    /// Fetch worked but every quote was already present.
    UpToDate,
    /// Network or parse failure; nothing changed.
    Failed,
    /// Another sync was already in flight.
    Skipped,
    /// The loop was shut down before the response could be applied.
    Cancelled,
}

impl SyncOutcome {
    pub fn status(&self) -> Option<Status> {
        match self {
            SyncOutcome::Synced(n) => Some(Status::success(format!(
                "{n} new quotes synced from server."
            ))),
            SyncOutcome::UpToDate => Some(Status::success("Quotes are up to date.")),
            SyncOutcome::Failed => Some(Status::failure("Failed to sync with server.")),
            SyncOutcome::Skipped | SyncOutcome::Cancelled => None,
        }
    }
}

/// Manual inputs accepted by [`SyncLoop::run`] besides the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    SyncNow,
    NextQuote,
    Quit,
}

impl Trigger {
    /// Map one line of interactive input. Blank or `n` shows another quote.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" | "n" | "next" => Some(Trigger::NextQuote),
            "s" | "sync" => Some(Trigger::SyncNow),
            "q" | "quit" | "exit" => Some(Trigger::Quit),
            _ => None,
        }
    }
}

pub type SharedState<S = Store> = Arc<Mutex<AppState<S>>>;

pub struct SyncLoop<R, S: KeyValueStore = Store> {
    state: SharedState<S>,
    remote: R,
    syncing: AtomicBool,
    cancel: CancellationToken,
}

/// Flips the loop back to Idle however the attempt ends.
struct SyncingGuard<'a>(&'a AtomicBool);

impl Drop for SyncingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<R: QuoteRemote, S: KeyValueStore> SyncLoop<R, S> {
    pub fn new(state: SharedState<S>, remote: R, cancel: CancellationToken) -> Self {
        Self {
            state,
            remote,
            syncing: AtomicBool::new(false),
            cancel,
        }
    }

    pub fn state(&self) -> SyncState {
        if self.syncing.load(Ordering::Acquire) {
            SyncState::Syncing
        } else {
            SyncState::Idle
        }
    }

    #[cfg(test)]
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// One fetch+merge attempt. Reports its status through `view`.
    pub async fn sync_once<V: QuoteView + ?Sized>(&self, view: &mut V) -> SyncOutcome {
        if self
            .syncing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("sync already in flight, skipping");
            return SyncOutcome::Skipped;
        }
        let _guard = SyncingGuard(&self.syncing);

        let fetched = tokio::select! {
            _ = self.cancel.cancelled() => {
                tracing::debug!("sync cancelled during fetch");
                return SyncOutcome::Cancelled;
            }
            res = self.remote.fetch_quotes() => res,
        };

        let outcome = match fetched {
            Err(e) => {
                tracing::warn!("failed to sync with server: {e}");
                SyncOutcome::Failed
            }
            Ok(batch) => {
                let mut state = self.state.lock().await;
                if self.cancel.is_cancelled() {
                    tracing::debug!("dropping sync response after shutdown");
                    return SyncOutcome::Cancelled;
                }

                let fetched_count = batch.len();
                let added = state.merge_server_batch(batch);
                tracing::debug!("merged {added} of {fetched_count} server quotes");

                if added == 0 {
                    SyncOutcome::UpToDate
                } else {
                    if let Err(e) = state.save() {
                        tracing::error!("failed to persist synced quotes: {e}");
                    }
                    state.refresh(view);
                    SyncOutcome::Synced(added)
                }
            }
        };

        if let Some(status) = outcome.status() {
            view.show_status(&status);
        }
        outcome
    }

    /// Sync immediately, then every `period`, until cancelled or told to quit.
    /// Manual triggers arrive on `commands`; a closed channel just stops
    /// manual input, the timer keeps going.
    pub async fn run<V: QuoteView + ?Sized>(
        &self,
        view: &mut V,
        period: Duration,
        mut commands: mpsc::Receiver<Trigger>,
    ) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut commands_open = true;

        tracing::info!("sync loop started (every {}s)", period.as_secs());
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let outcome = self.sync_once(view).await;
                    tracing::debug!(?outcome, "scheduled sync finished");
                    self.drain_queued(view, &mut commands, &mut commands_open).await;
                }
                trigger = commands.recv(), if commands_open => match trigger {
                    Some(Trigger::SyncNow) => {
                        let outcome = self.sync_once(view).await;
                        tracing::debug!(?outcome, "manual sync finished");
                        self.drain_queued(view, &mut commands, &mut commands_open).await;
                    }
                    Some(Trigger::NextQuote) => {
                        self.state.lock().await.refresh(view);
                    }
                    Some(Trigger::Quit) => self.cancel.cancel(),
                    None => commands_open = false,
                },
            }
        }
        tracing::info!("sync loop stopped");
    }

    /// Handle input that queued up while a sync held the loop. Those `SyncNow`s
    /// fired while Syncing, so they are dropped like any re-entrant fire.
    async fn drain_queued<V: QuoteView + ?Sized>(
        &self,
        view: &mut V,
        commands: &mut mpsc::Receiver<Trigger>,
        commands_open: &mut bool,
    ) {
        while *commands_open {
            match commands.try_recv() {
                Ok(Trigger::SyncNow) => tracing::debug!("sync requested mid-sync, skipping"),
                Ok(Trigger::NextQuote) => {
                    self.state.lock().await.refresh(view);
                }
                Ok(Trigger::Quit) => {
                    self.cancel.cancel();
                    return;
                }
                Err(mpsc::error::TryRecvError::Empty) => return,
                Err(mpsc::error::TryRecvError::Disconnected) => *commands_open = false,
            }
        }
    }
}
