pub mod error;
pub mod parse;
pub mod sample;
pub mod types;

pub use crate::error::{ParseError, SampleError};
pub use crate::parse::{PickRequest, parse_definition};
pub use crate::sample::{NO_REPEAT_CAP, sample};
pub use crate::types::Item;
