//! Reth's MDBX-backed access to the L1 message queue.
//!
//! Messages are stored in [`L1Messages`] keyed by queue index, so the natural key order of the
//! table is the queue order. The sync checkpoint is a single row in [`SyncCheckpoints`].

use crate::{
    error::StorageError,
    models::{L1Messages, SyncCheckpoint, SyncCheckpointKey, SyncCheckpoints},
};
use morph_protocol::L1Message;
use reth_db_api::{
    cursor::DbCursorRO,
    transaction::{DbTx, DbTxMut},
};
use tracing::{debug, error};

/// Table access to the L1 message queue over a borrowed transaction.
#[derive(Debug)]
pub(crate) struct L1MessageProvider<'tx, TX> {
    tx: &'tx TX,
}

impl<'tx, TX> L1MessageProvider<'tx, TX> {
    pub(crate) const fn new(tx: &'tx TX) -> Self {
        Self { tx }
    }
}

impl<TX> L1MessageProvider<'_, TX>
where
    TX: DbTx,
{
    pub(crate) fn get_l1_message(&self, queue_index: u64) -> Result<Option<L1Message>, StorageError> {
        let stored = self.tx.get::<L1Messages>(queue_index).inspect_err(|err| {
            error!(
                target: "morph::storage",
                queue_index,
                %err,
                "Failed to read L1 message",
            );
        })?;
        Ok(stored.map(Into::into))
    }

    pub(crate) fn latest_l1_message(&self) -> Result<Option<L1Message>, StorageError> {
        let mut cursor = self.tx.cursor_read::<L1Messages>().inspect_err(|err| {
            error!(target: "morph::storage", %err, "Failed to get cursor for L1 messages");
        })?;
        let latest = cursor.last().inspect_err(|err| {
            error!(target: "morph::storage", %err, "Failed to seek latest L1 message");
        })?;
        Ok(latest.map(|(_, stored)| stored.into()))
    }

    pub(crate) fn read_l1_messages(
        &self,
        from: u64,
        to: u64,
    ) -> Result<Vec<L1Message>, StorageError> {
        if from > to {
            return Ok(Vec::new());
        }

        let mut cursor = self.tx.cursor_read::<L1Messages>().inspect_err(|err| {
            error!(target: "morph::storage", %err, "Failed to get cursor for L1 messages");
        })?;
        let walker = cursor.walk_range(from..=to).inspect_err(|err| {
            error!(
                target: "morph::storage",
                from,
                to,
                %err,
                "Failed to walk L1 message range",
            );
        })?;

        let mut messages = Vec::new();
        let mut expected = from;
        for row in walker {
            let (queue_index, stored) = row?;
            // Stop at the first hole so callers only ever see a contiguous prefix.
            if queue_index != expected {
                break;
            }
            messages.push(stored.into());
            expected += 1;
        }
        Ok(messages)
    }

    pub(crate) fn synced_l1_height(&self) -> Result<Option<u64>, StorageError> {
        let checkpoint =
            self.tx.get::<SyncCheckpoints>(SyncCheckpointKey::L1SyncedHeight).inspect_err(|err| {
                error!(target: "morph::storage", %err, "Failed to read sync checkpoint");
            })?;
        Ok(checkpoint.map(|checkpoint| checkpoint.l1_height))
    }
}

impl<TX> L1MessageProvider<'_, TX>
where
    TX: DbTxMut + DbTx,
{
    /// Writes the messages and the checkpoint. Validation is the caller's responsibility.
    pub(crate) fn put_l1_messages(
        &self,
        messages: &[L1Message],
        synced_l1_height: u64,
    ) -> Result<(), StorageError> {
        for message in messages {
            let queue_index = message.queue_index();
            self.tx.put::<L1Messages>(queue_index, message.clone().into()).inspect_err(|err| {
                error!(
                    target: "morph::storage",
                    queue_index,
                    %err,
                    "Failed to insert L1 message",
                );
            })?;
        }

        self.tx
            .put::<SyncCheckpoints>(
                SyncCheckpointKey::L1SyncedHeight,
                SyncCheckpoint { l1_height: synced_l1_height },
            )
            .inspect_err(|err| {
                error!(
                    target: "morph::storage",
                    synced_l1_height,
                    %err,
                    "Failed to update sync checkpoint",
                );
            })?;

        debug!(
            target: "morph::storage",
            count = messages.len(),
            synced_l1_height,
            "Stored L1 messages",
        );
        Ok(())
    }
}
