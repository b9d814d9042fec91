//! Unlock domain - durable premium-article unlock records.
//!
//! An unlock record is the durable fact that a user has paid for and may
//! access a premium article. Records are created by payment reconciliation
//! and never mutated or deleted by this system.

mod errors;
mod record;

pub use errors::UnlockError;
pub use record::UnlockRecord;
