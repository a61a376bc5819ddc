//! The L1 deposit syncer.

use crate::{
    DecodeFailure, L1Source, Metrics, SyncConfig, SyncError, config::Confirmations,
    decode_deposit_logs,
};
use alloy_rpc_types_eth::Filter;
use morph_protocol::{DEPOSIT_EVENT_ABI_HASH, FIRST_QUEUE_INDEX, L1Message};
use morph_storage::{L1MessageStorage, StorageError};
use std::sync::Arc;
use tokio::{
    select,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

/// The result of one [`Syncer::sync_once`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// The L1 height the queue is synced up to after the cycle, if sync has started.
    pub synced_l1_height: Option<u64>,
    /// The queue indices appended during the cycle.
    pub appended: Vec<u64>,
    /// The logs that could not be decoded during the cycle.
    pub failed: Vec<DecodeFailure>,
}

/// Keeps the L1 message queue in sync with the deposits confirmed on L1.
///
/// The syncer is the only writer of its store. Readers share the store through
/// [`Syncer::store`].
#[derive(Debug)]
pub struct Syncer<L, S> {
    source: L,
    store: Arc<S>,
    config: SyncConfig,
}

impl<L, S> Syncer<L, S>
where
    L: L1Source,
    S: L1MessageStorage,
{
    /// Creates a syncer after validating its configuration.
    pub fn new(source: L, store: Arc<S>, config: SyncConfig) -> Result<Self, SyncError> {
        config.validate()?;
        Ok(Self { source, store, config })
    }

    /// Returns the store the syncer appends to.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the messages with queue indices in `from..=to` that are currently stored.
    pub fn read_l1_messages_in_range(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<L1Message>, StorageError> {
        self.store.read_l1_messages(from, to)
    }

    /// Runs sync cycles on the poll interval until cancelled.
    ///
    /// L1 RPC failures are retried on the next tick. A storage failure stops the syncer and is
    /// returned.
    pub async fn run(self, cancellation: CancellationToken) -> Result<(), SyncError> {
        let mut poll_ticker = interval(self.config.poll_interval);
        poll_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut progress_ticker = interval(self.config.log_progress_interval);
        progress_ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target: "morph::sync",
            deposit_contract = %self.config.deposit_contract,
            confirmations = %self.config.confirmations,
            start_height = self.config.start_height,
            "Starting L1 syncer",
        );

        loop {
            select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(target: "morph::sync", "Received shutdown signal. Exiting L1 syncer.");
                    return Ok(());
                }
                _ = poll_ticker.tick() => {
                    let result = select! {
                        _ = cancellation.cancelled() => {
                            info!(target: "morph::sync", "Received shutdown signal. Exiting L1 syncer.");
                            return Ok(());
                        }
                        result = self.sync_once() => result,
                    };

                    match result {
                        Ok(report) => {
                            if !report.appended.is_empty() {
                                debug!(
                                    target: "morph::sync",
                                    appended = report.appended.len(),
                                    synced_l1_height = ?report.synced_l1_height,
                                    "Completed sync cycle",
                                );
                            }
                        }
                        Err(err) if err.is_retryable() => {
                            metrics::counter!(Metrics::SYNC_RPC_ERRORS_TOTAL).increment(1);
                            warn!(target: "morph::sync", error = %err, "L1 sync cycle failed, retrying on next tick");
                        }
                        Err(err) => {
                            error!(target: "morph::sync", error = %err, "L1 sync stopped");
                            return Err(err);
                        }
                    }
                }
                _ = progress_ticker.tick() => self.log_progress(),
            }
        }
    }

    /// Runs a single sync cycle up to the current safe L1 height.
    ///
    /// Every fetch window is appended together with its checkpoint, so an error part way leaves
    /// the windows before it durably synced.
    pub async fn sync_once(&self) -> Result<SyncReport, SyncError> {
        let mut report =
            SyncReport { synced_l1_height: self.store.synced_l1_height()?, ..Default::default() };

        let Some(safe_height) = self.safe_height().await? else {
            trace!(target: "morph::sync", "No confirmed L1 block yet");
            return Ok(report);
        };

        let mut from = report.synced_l1_height.map_or(self.config.start_height, |height| height + 1);
        while from <= safe_height {
            let to = from.saturating_add(self.config.fetch_block_range - 1).min(safe_height);

            let filter = Filter::new()
                .address(self.config.deposit_contract)
                .event_signature(DEPOSIT_EVENT_ABI_HASH)
                .from_block(from)
                .to_block(to);
            let logs = self.source.logs(&filter).await?;

            let outcome = decode_deposit_logs(&logs);
            for failure in &outcome.failed {
                warn!(
                    target: "morph::sync",
                    l1_height = ?failure.l1_height,
                    l1_tx_hash = ?failure.l1_tx_hash,
                    log_index = ?failure.log_index,
                    reason = %failure.reason,
                    "Skipping undecodable deposit log",
                );
            }
            metrics::counter!(Metrics::SYNC_DECODE_FAILURES_TOTAL)
                .increment(outcome.failed.len() as u64);

            let messages = self.index_messages(outcome.decoded)?;
            self.store.append_l1_messages(&messages, to)?;

            metrics::counter!(Metrics::SYNC_APPENDED_MESSAGES_TOTAL)
                .increment(messages.len() as u64);
            metrics::gauge!(Metrics::SYNC_L1_SYNCED_HEIGHT).set(to as f64);
            if let Some(last) = messages.last() {
                metrics::gauge!(Metrics::SYNC_LATEST_QUEUE_INDEX).set(last.queue_index() as f64);
            }

            report.appended.extend(messages.iter().map(L1Message::queue_index));
            report.failed.extend(outcome.failed);
            report.synced_l1_height = Some(to);
            from = to + 1;
        }

        Ok(report)
    }

    /// Returns the highest L1 block the confirmation policy allows syncing.
    async fn safe_height(&self) -> Result<Option<u64>, SyncError> {
        match self.config.confirmations {
            Confirmations::Finalized => Ok(self.source.finalized_block_number().await?),
            Confirmations::Depth(depth) => {
                let head = self.source.latest_block_number().await?;
                Ok(head.checked_sub(depth))
            }
        }
    }

    /// Assigns queue indices after the latest stored message.
    ///
    /// Messages at or before the L1 position of the latest stored message are already queued and
    /// are dropped.
    fn index_messages(&self, decoded: Vec<L1Message>) -> Result<Vec<L1Message>, SyncError> {
        let latest = self.store.latest_l1_message()?;
        let mut next_index = latest.as_ref().map_or(FIRST_QUEUE_INDEX, |m| m.queue_index() + 1);
        let stored_position = latest.as_ref().map(L1Message::l1_position);

        let mut messages = Vec::with_capacity(decoded.len());
        for mut message in decoded {
            if stored_position.is_some_and(|position| message.l1_position() <= position) {
                debug!(
                    target: "morph::sync",
                    l1_height = message.l1_height,
                    log_index = message.log_index,
                    "Dropping already queued deposit",
                );
                continue;
            }
            message.tx.queue_index = next_index;
            next_index += 1;
            messages.push(message);
        }
        Ok(messages)
    }

    fn log_progress(&self) {
        let synced = self.store.synced_l1_height();
        let latest = self.store.latest_l1_message();
        match (synced, latest) {
            (Ok(synced_l1_height), Ok(latest)) => info!(
                target: "morph::sync",
                synced_l1_height = ?synced_l1_height,
                latest_queue_index = ?latest.map(|message| message.queue_index()),
                "L1 sync progress",
            ),
            (Err(err), _) | (_, Err(err)) => {
                warn!(target: "morph::sync", error = %err, "Failed to read L1 sync progress");
            }
        }
    }
}
