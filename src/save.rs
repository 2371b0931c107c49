//! Snapshot/restore of the whole simulation as four line-oriented text
//! streams (ticks, aircraft, queues, terminals). Fields are colon-delimited
//! and sub-lists comma-delimited; decoding validates eagerly and a single
//! malformed field aborts the whole load.

pub mod reader;
pub mod writer;

pub use reader::{MalformedRecord, load_tower};
pub use writer::encode_tower;
