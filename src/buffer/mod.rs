//! Buffering module
//!
//! A generic, object-mode pull stream. It knows nothing about pages: a
//! [`Producer`] fills its [`Sink`] whenever the consumer pulls from an empty
//! queue, and the [`BufferedReadable`] hands items out in order, followed by
//! a single end or failure signal.

mod readable;

pub use readable::{BufferedReadable, Producer, Sink};
