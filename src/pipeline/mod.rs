//! Clip relay pipeline
//!
//! Three stages joined by unbounded in-memory queues:
//!
//! ```text
//! fetcher --(raw clips)--> dispatcher --(new clips)--> delivery
//! ```
//!
//! The fetcher emits everything it sees, the dispatcher keeps only what the
//! store has never recorded, and delivery uploads the rest. Stages run as
//! sibling tasks; queues carry owned [`Clip`](crate::types::Clip) values so
//! no stage blocks another.

pub mod delivery;
pub mod dispatch;

pub use delivery::DeliveryWorker;
pub use dispatch::Dispatcher;
