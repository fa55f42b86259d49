//! Runtime primitives shared by seek workers.
//!
//! * [`mailbox`]: latest-wins mailbox with non-blocking producers
//! * [`GenerationClock`]: monotonic generations deciding which started operation is current
//! * [`spawn`]: named task spawning on the ambient or shared fallback runtime
//! * [`WorkerJoinSet`]: fire-and-forget task set that aborts on drop

#![warn(missing_docs)]

pub mod join_set;
pub mod mailbox;
pub mod spawn;
pub mod token;

pub use join_set::{WorkerJoinSet, panic_message};
pub use mailbox::{MailboxReceiver, MailboxSendError, MailboxSendOutcome, MailboxSender, mailbox};
pub use spawn::{spawn, spawn_blocking, spawn_watched};
pub use token::{GenerationClock, GenerationToken};
