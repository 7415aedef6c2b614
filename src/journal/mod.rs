//! Sync journal
//!
//! Remote-call failures never surface beyond a status line; the journal is
//! where they land so they are not lost entirely. Successful mutations are
//! recorded too, giving the file a usable history of what the client did.

pub mod entry;
pub mod logger;

pub use entry::{JournalEntry, Operation, Outcome};
pub use logger::Journal;
