//! Message and entity data contract.
//!
//! These types mirror the JSON the message store returns. Only the fields the
//! annotator consumes are modeled; everything else in a payload is ignored.

mod entity;
mod message;
mod unit;

pub use entity::*;
pub use message::*;
pub use unit::*;
