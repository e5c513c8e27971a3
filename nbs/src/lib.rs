//! Reading, editing and writing [Note Block Studio](https://opennbs.org/) songs.
//!
//! A song is a grid of [`NoteBlock`]'s: [`Tick`]'s run along the time axis, and every
//! tick spans the same number of layers. Since most cells of that grid are empty, the
//! `.nbs` format stores it sparsely; see [`serde`] for the details.
//!
//! This crate does not handle playback or audio rendering of any kind.

pub mod block;
pub mod file;
pub mod header;
pub mod instrument;
pub mod serde;
pub mod song;
pub mod tick;

pub use block::NoteBlock;
pub use file::NbsFile;
pub use header::Header;
pub use instrument::{CustomInstrument, Instrument};
pub use song::{Song, SongError};
pub use tick::Tick;
