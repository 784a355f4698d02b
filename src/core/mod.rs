// Core data model: the logical channel and the radio's fixed lookup tables

pub mod channel;
pub mod constants;

pub use channel::{parse_mhz, Channel, TAG_SIZE};
