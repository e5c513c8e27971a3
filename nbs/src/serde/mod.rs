//! Conversion between [`Song`](crate::song::Song)'s and the `.nbs` byte stream
//!
//! The note grid is stored sparsely: empty ticks and layers are skipped by writing the
//! distance (the "jump") from the previous populated tick or layer. A jump of zero ends
//! a list. After the grid follow the layer names and volumes, and a table of custom
//! instruments. Older files lack one or both of these trailing sections, which is why
//! running out of data there is not treated as an error.

mod decode;
mod encode;
pub(crate) mod utils;

pub use decode::{DecodeError, decode_song};
pub use encode::encode_song;
