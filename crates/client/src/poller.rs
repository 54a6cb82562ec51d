//! Repeating status poll.
//!
//! [`poll_status`] queries status once immediately and then once per
//! interval, handing each successful payload to a callback. Every cycle's
//! request runs on its own task, so a slow host can have several requests
//! in flight at once and payloads arrive in completion order, not issue
//! order.
//!
//! The loop is owned by the returned [`PollHandle`]. Cancelling or dropping
//! the handle stops new cycles from starting; requests already in flight
//! still complete and may still deliver. [`PollHandle::detach`] leaves the
//! loop running for the rest of the process.

use std::sync::Arc;
use std::time::Duration;

use seal_core::Payload;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::ClientError;
use crate::source::StatusSource;

/// Capacity of the outcome channel returned by [`poll_status_results`].
const RESULT_CHANNEL_CAPACITY: usize = 64;

/// Outcome of a single poll cycle.
pub type PollResult = Result<Payload, ClientError>;

// ---------------------------------------------------------------------------
// PollHandle
// ---------------------------------------------------------------------------

/// Owned handle for a running status poll.
#[derive(Debug)]
#[must_use = "dropping a PollHandle stops the poll; call `detach` to keep it running"]
pub struct PollHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
    detached: bool,
}

impl PollHandle {
    /// Stop starting new poll cycles.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the loop task to exit.
    ///
    /// Only returns once the poll was cancelled or, for
    /// [`poll_status_results`], once the receiver was dropped.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Status poll task failed");
            }
        }
    }

    /// Let the poll run until the process exits.
    pub fn detach(mut self) {
        self.detached = true;
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if !self.detached {
            self.cancel.cancel();
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Poll status now and then every `interval`, passing each successful
/// payload to `on_complete`.
///
/// A failed cycle is logged and skipped; it does not invoke the callback
/// and does not stop the loop. Must be called from within a Tokio runtime.
pub fn poll_status<S, F>(
    source: Arc<S>,
    on_complete: F,
    interval: Duration,
) -> Result<PollHandle, ClientError>
where
    S: StatusSource + ?Sized + 'static,
    F: Fn(Payload) + Send + Sync + 'static,
{
    ensure_interval(interval)?;
    Ok(spawn_poll(
        source,
        interval,
        Delivery::Callback(Arc::new(on_complete)),
    ))
}

/// Poll status now and then every `interval`, sending every cycle's
/// outcome, success or failure, on the returned channel.
///
/// A cycle only starts once it holds a slot in the channel, so requests in
/// flight plus unread outcomes never exceed the channel capacity. Ticks that
/// find the channel full are skipped. The loop ends on its own when the
/// receiver is dropped.
pub fn poll_status_results<S>(
    source: Arc<S>,
    interval: Duration,
) -> Result<(PollHandle, mpsc::Receiver<PollResult>), ClientError>
where
    S: StatusSource + ?Sized + 'static,
{
    ensure_interval(interval)?;
    let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
    let handle = spawn_poll(source, interval, Delivery::<fn(Payload)>::Channel(tx));
    Ok((handle, rx))
}

fn ensure_interval(interval: Duration) -> Result<(), ClientError> {
    if interval.is_zero() {
        return Err(ClientError::InvalidInterval);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Where a cycle's outcome goes.
enum Delivery<F> {
    Callback(Arc<F>),
    Channel(mpsc::Sender<PollResult>),
}

/// A cycle's claim on its delivery target, taken before the request starts.
enum Slot<F> {
    Callback(Arc<F>),
    Channel(mpsc::OwnedPermit<PollResult>),
}

/// Why a tick did not start a cycle.
enum SlotError {
    Full,
    Closed,
}

impl<F> Delivery<F>
where
    F: Fn(Payload) + Send + Sync + 'static,
{
    /// Claim room for one more outcome.
    fn acquire(&self) -> Result<Slot<F>, SlotError> {
        match self {
            Delivery::Callback(on_complete) => Ok(Slot::Callback(Arc::clone(on_complete))),
            Delivery::Channel(tx) => match tx.clone().try_reserve_owned() {
                Ok(permit) => Ok(Slot::Channel(permit)),
                Err(mpsc::error::TrySendError::Full(_)) => Err(SlotError::Full),
                Err(mpsc::error::TrySendError::Closed(_)) => Err(SlotError::Closed),
            },
        }
    }

    /// Resolves once nobody can observe further outcomes.
    async fn closed(&self) {
        match self {
            Delivery::Callback(_) => std::future::pending::<()>().await,
            Delivery::Channel(tx) => tx.closed().await,
        }
    }
}

impl<F> Slot<F>
where
    F: Fn(Payload) + Send + Sync + 'static,
{
    fn deliver(self, cycle: u64, result: PollResult) {
        match self {
            Slot::Callback(on_complete) => match result {
                Ok(payload) => on_complete(payload),
                Err(e) => {
                    tracing::warn!(cycle, error = %e, "Status poll cycle failed");
                }
            },
            Slot::Channel(permit) => {
                permit.send(result);
            }
        }
    }
}

fn spawn_poll<S, F>(source: Arc<S>, interval: Duration, delivery: Delivery<F>) -> PollHandle
where
    S: StatusSource + ?Sized + 'static,
    F: Fn(Payload) + Send + Sync + 'static,
{
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run_poll_loop(source, interval, delivery, cancel.clone()));

    PollHandle {
        cancel,
        task: Some(task),
        detached: false,
    }
}

/// Tick loop: spawn one status request per tick until cancelled.
///
/// The first tick fires immediately. Ticks missed while the runtime was
/// busy are skipped rather than fired in a burst.
async fn run_poll_loop<S, F>(
    source: Arc<S>,
    interval: Duration,
    delivery: Delivery<F>,
    cancel: CancellationToken,
) where
    S: StatusSource + ?Sized + 'static,
    F: Fn(Payload) + Send + Sync + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut cycle: u64 = 0;

    tracing::info!(interval_ms = interval.as_millis() as u64, "Status poll started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(cycles = cycle, "Status poll cancelled");
                break;
            }
            _ = delivery.closed() => {
                tracing::info!(cycles = cycle, "Status poll receiver dropped");
                break;
            }
            _ = ticker.tick() => {
                cycle += 1;
                let slot = match delivery.acquire() {
                    Ok(slot) => slot,
                    Err(SlotError::Full) => {
                        tracing::debug!(cycle, "Status poll results unread, skipping cycle");
                        continue;
                    }
                    Err(SlotError::Closed) => {
                        tracing::info!(cycles = cycle, "Status poll receiver dropped");
                        break;
                    }
                };
                let source = Arc::clone(&source);
                tokio::spawn(async move {
                    let result = source.fetch_status().await;
                    slot.deliver(cycle, result);
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
