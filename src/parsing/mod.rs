pub mod common;
pub mod decode;
pub mod utils;

pub use common::{Handling, Marking, MarkingStructure, Status};
pub use decode::{ResponseDecoder, decode_into};
