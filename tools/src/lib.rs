//! # NBS Tools
//!
//! [Note Block Studio](https://opennbs.org/) is an editor for composing songs out of
//! Minecraft note blocks. Songs are saved as `.nbs` files. This crate provides a
//! command-line utility for looking into and cleaning up such files.
//!
//! ## Inspect
//!
//! ```console
//! nbs-tools-inspect 0.1.0
//! Print the metadata of .nbs files, or entire directories of them
//!
//! USAGE:
//!     nbs-tools inspect [OPTIONS] [PATH]...
//!
//! ARGS:
//!     <PATH>...    The path(s) to inspect
//!
//! OPTIONS:
//!     -h, --help         Print help information
//!     -l, --layers       List the name and volume of every layer
//!     -r, --recursive    Search folders recursively
//! ```
//!
//! ### Example
//!
//! ```console
//! 4ntler@mbp > nbs-tools inspect -l bells.nbs
//! bells.nbs
//!   Name        | Bells
//!   Author      | Someone
//!   Ticks       | 21
//!   Layers      | 3
//!   Notes       | 1
//!   Tempo       | 10.00 t/s
//!   Length      | 2s
//!   Instrument0 | Gong
//!       0 | -                |  100%
//!       1 | -                |  100%
//!       2 | Chimes           |   30%
//! ```
//!
//! ## Rewrite
//!
//! ```console
//! nbs-tools-rewrite 0.1.0
//! Read a .nbs file and write it back out, with its header brought in line with the song
//!
//! USAGE:
//!     nbs-tools rewrite [OPTIONS] <PATH>
//!
//! ARGS:
//!     <PATH>    The path to the file to rewrite
//!
//! OPTIONS:
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    Where to write the result. Defaults to overwriting the input
//! ```

pub mod inspect;
pub mod rewrite;
pub(crate) mod utils;
