//! Providers for the L1 message queue.
//!
//! Providers borrow an open MDBX transaction and implement the table level reads and writes
//! that [`crate::MessageDb`] composes into atomic operations.
mod message_provider;
pub(crate) use message_provider::L1MessageProvider;
