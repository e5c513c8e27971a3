//! The song grid: ticks, layers and everything stored alongside them

mod cursor;

pub use cursor::{ConcurrentModification, TickCursor};

use crate::{
    block::NoteBlock,
    header::Header,
    instrument::Instrument,
    serde::{DecodeError, decode_song, encode_song},
    tick::Tick,
};
use std::{
    io::{self, Read, Write},
    slice,
};
use thiserror::Error;

const CUSTOM_INSTRUMENT_SLOTS: usize = 9;

/// A sequence of [`Tick`]'s that share one layer count, along with per-layer metadata
/// and a table of custom instruments
///
/// Ticks are stored contiguously: inserting a tick past the end fills the gap with empty
/// ticks. All ticks always span exactly [`Song::layer_count()`] layers; whenever a
/// structural change would break that, either the tick or the whole song is resized.
///
/// ```
/// # use nbs::{NoteBlock, Song, Tick};
/// let mut song = Song::new(1)?;
///
/// // Inserting at index 4 creates four empty ticks before it
/// let mut tick = Tick::new(2);
/// tick.set_note(1, NoteBlock::new(0, 45));
/// song.add_tick(4, tick)?;
///
/// assert_eq!(song.tick_count(), 5);
/// assert_eq!(song.layer_count(), 2);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Song {
    ticks: Vec<Tick>,
    layer_count: u16,
    layer_names: Vec<Option<String>>,
    layer_volumes: Vec<u8>,
    custom_instruments: [Option<Instrument>; CUSTOM_INSTRUMENT_SLOTS],
    marker: usize,

    /// Bumped on every structural change, see [`TickCursor`]
    revision: usize,
}

impl Song {
    /// The maximal number of ticks a song can hold
    pub const MAX_TICKS: usize = i16::MAX as usize;

    /// The maximal number of layers a song can span
    pub const MAX_LAYERS: u16 = i16::MAX as u16;

    /// The number of custom instrument slots
    pub const CUSTOM_INSTRUMENT_SLOTS: usize = CUSTOM_INSTRUMENT_SLOTS;

    /// The highest allowed layer volume
    pub const MAX_VOLUME: u8 = 100;

    /// Construct an empty song spanning `layers` layers
    pub fn new(layers: u16) -> Result<Self, SongError> {
        Self::with_capacity(0, layers)
    }

    /// Construct an empty song spanning `layers` layers, with room for `ticks` ticks
    pub fn with_capacity(ticks: usize, layers: u16) -> Result<Self, SongError> {
        check_layer_count(layers)?;

        Ok(Self {
            ticks: Vec::with_capacity(ticks.min(Self::MAX_TICKS)),
            layer_count: layers,
            layer_names: vec![None; layers as usize],
            layer_volumes: vec![Self::MAX_VOLUME; layers as usize],
            custom_instruments: Default::default(),
            marker: 0,
            revision: 0,
        })
    }

    /// Decode a song from an arbitrary I/O reader
    ///
    /// The header only serves as a hint for the amount of ticks and layers. Without one
    /// the song starts out with a single layer, and the per-layer metadata and custom
    /// instruments following the grid are not read.
    pub fn from_reader<R>(reader: R, header: Option<&Header>) -> Result<Self, DecodeError>
    where
        R: Read,
    {
        decode_song(reader, header)
    }

    /// Encode the song to an arbitrary I/O writer
    pub fn to_writer<W>(&self, writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        encode_song(self, writer)
    }

    /// The number of ticks in the song
    pub fn tick_count(&self) -> usize {
        self.ticks.len()
    }

    /// The number of layers every tick spans
    pub fn layer_count(&self) -> u16 {
        self.layer_count
    }

    /// The playback duration in milliseconds at a tempo in hundredths of ticks per second
    ///
    /// The first tick does not count towards the duration.
    pub fn length_millis(&self, tempo: i16) -> i64 {
        let ticks_per_second = tempo as f64 / 100.0;
        let mut millis = self.ticks.len() as f64 / ticks_per_second;
        millis -= 1.0 / ticks_per_second;
        millis *= 1000.0;
        millis as i32 as i64
    }

    /// Access a tick by index
    pub fn tick(&self, index: usize) -> Option<&Tick> {
        self.ticks.get(index)
    }

    /// Access all ticks, in order
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Iterate over the ticks, in order
    pub fn iter(&self) -> slice::Iter<'_, Tick> {
        self.ticks.iter()
    }

    /// Start a detached iteration over the ticks
    ///
    /// Unlike [`Song::iter()`], the cursor doesn't borrow the song, so the song can be
    /// edited while the cursor is alive. Any structural change made in the meantime
    /// invalidates the cursor.
    pub fn cursor(&self) -> TickCursor {
        TickCursor::new(self.revision)
    }

    /// Insert a tick at `index`, shifting later ticks back
    ///
    /// If `index` lies beyond the last tick, the gap is filled with empty ticks. When the
    /// tick and the song disagree on their layer count, the larger one wins: either the
    /// tick or the entire song gets resized.
    pub fn add_tick(&mut self, index: usize, mut tick: Tick) -> Result<(), SongError> {
        if self.ticks.len() >= Self::MAX_TICKS {
            return Err(SongError::TooManyTicks);
        }

        if index >= Self::MAX_TICKS {
            return Err(SongError::TickIndexOutOfRange { index });
        }

        let layers = tick.layer_count();
        if layers > Self::MAX_LAYERS {
            return Err(SongError::TooManyLayers { layers });
        }

        if layers < self.layer_count {
            tick.resize(self.layer_count);
        } else if layers > self.layer_count {
            self.resize_layers(layers);
        }

        while self.ticks.len() < index {
            self.ticks.push(Tick::new(self.layer_count));
        }

        self.ticks.insert(index, tick);
        self.bump_revision();

        Ok(())
    }

    /// Append a tick to the end of the song
    pub fn push_tick(&mut self, tick: Tick) -> Result<(), SongError> {
        self.add_tick(self.ticks.len(), tick)
    }

    /// Remove the tick at `index`, shifting later ticks forward
    ///
    /// The marker is pulled back if it pointed past the new end.
    pub fn remove_tick(&mut self, index: usize) -> Result<Tick, SongError> {
        if index >= self.ticks.len() {
            return Err(SongError::NoSuchTick { index });
        }

        let tick = self.ticks.remove(index);
        self.marker = self.marker.min(self.ticks.len().saturating_sub(1));
        self.bump_revision();

        Ok(tick)
    }

    /// Change the number of layers
    ///
    /// Every tick is resized along with the layer names and volumes. Metadata for
    /// retained layers is kept; new layers start out unnamed at full volume.
    pub fn resize(&mut self, layers: u16) -> Result<(), SongError> {
        check_layer_count(layers)?;

        if layers != self.layer_count {
            self.resize_layers(layers);
        }

        Ok(())
    }

    fn resize_layers(&mut self, layers: u16) {
        for tick in &mut self.ticks {
            tick.resize(layers);
        }

        self.layer_names.resize(layers as usize, None);
        self.layer_volumes.resize(layers as usize, Self::MAX_VOLUME);
        self.layer_count = layers;
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Place a note in the grid, returning the note it replaces
    ///
    /// # Panics
    ///
    /// Panics if the tick doesn't exist, or `layer` is not smaller than the layer count.
    pub fn set_note(&mut self, tick: usize, layer: u16, block: NoteBlock) -> Option<NoteBlock> {
        self.ticks[tick].set_note(layer, block)
    }

    /// Remove a note from the grid, returning it
    ///
    /// # Panics
    ///
    /// Panics if the tick doesn't exist, or `layer` is not smaller than the layer count.
    pub fn clear_note(&mut self, tick: usize, layer: u16) -> Option<NoteBlock> {
        self.ticks[tick].clear_note(layer)
    }

    /// The total number of notes in the grid
    pub fn note_count(&self) -> usize {
        self.ticks.iter().map(|tick| tick.notes().count()).sum()
    }

    /// The tick index playback/editing is currently at
    pub fn marker(&self) -> usize {
        self.marker
    }

    /// Move the marker to another tick
    pub fn move_marker(&mut self, tick: usize) -> Result<(), SongError> {
        if tick >= self.ticks.len() {
            return Err(SongError::MarkerOutOfRange {
                tick,
                len: self.ticks.len(),
            });
        }

        self.marker = tick;
        Ok(())
    }

    /// The tick under the marker, or [`None`] for an empty song
    pub fn current_tick(&self) -> Option<&Tick> {
        self.ticks.get(self.marker)
    }

    /// The name of a layer, if it has one
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than the layer count.
    pub fn layer_name(&self, layer: u16) -> Option<&str> {
        self.layer_names[layer as usize].as_deref()
    }

    /// Name a layer
    ///
    /// An empty name is the same as no name at all.
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than the layer count.
    pub fn set_layer_name(&mut self, layer: u16, name: impl Into<String>) {
        let name = name.into();
        self.layer_names[layer as usize] = (!name.is_empty()).then_some(name);
    }

    /// Remove the name of a layer
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than the layer count.
    pub fn clear_layer_name(&mut self, layer: u16) {
        self.layer_names[layer as usize] = None;
    }

    /// The volume (0 - 100) of a layer
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than the layer count.
    pub fn layer_volume(&self, layer: u16) -> u8 {
        self.layer_volumes[layer as usize]
    }

    /// Set the volume of a layer, which should lie within 0 - 100
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than the layer count.
    pub fn set_layer_volume(&mut self, layer: u16, volume: u8) -> Result<(), SongError> {
        if volume > Self::MAX_VOLUME {
            return Err(SongError::VolumeOutOfRange { volume });
        }

        self.layer_volumes[layer as usize] = volume;
        Ok(())
    }

    /// The instrument in a custom instrument slot (0 - 8), if any
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not smaller than [`Song::CUSTOM_INSTRUMENT_SLOTS`].
    pub fn custom_instrument(&self, slot: usize) -> Option<&Instrument> {
        self.custom_instruments[slot].as_ref()
    }

    /// Place an instrument in a custom instrument slot, returning the one it replaces
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not smaller than [`Song::CUSTOM_INSTRUMENT_SLOTS`].
    pub fn set_custom_instrument(
        &mut self,
        slot: usize,
        instrument: impl Into<Instrument>,
    ) -> Option<Instrument> {
        self.custom_instruments[slot].replace(instrument.into())
    }

    /// Empty a custom instrument slot, returning its instrument
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not smaller than [`Song::CUSTOM_INSTRUMENT_SLOTS`].
    pub fn remove_custom_instrument(&mut self, slot: usize) -> Option<Instrument> {
        self.custom_instruments[slot].take()
    }

    /// All custom instrument slots, in order
    pub fn custom_instruments(&self) -> &[Option<Instrument>; CUSTOM_INSTRUMENT_SLOTS] {
        &self.custom_instruments
    }
}

impl Default for Song {
    fn default() -> Self {
        Self {
            ticks: Vec::new(),
            layer_count: 1,
            layer_names: vec![None],
            layer_volumes: vec![Self::MAX_VOLUME],
            custom_instruments: Default::default(),
            marker: 0,
            revision: 0,
        }
    }
}

/// Songs are equal when their content is; the marker and revision are left out
impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.layer_count == other.layer_count
            && self.ticks == other.ticks
            && self.layer_names == other.layer_names
            && self.layer_volumes == other.layer_volumes
            && self.custom_instruments == other.custom_instruments
    }
}

impl Eq for Song {}

impl<'a> IntoIterator for &'a Song {
    type Item = &'a Tick;
    type IntoIter = slice::Iter<'a, Tick>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_layer_count(layers: u16) -> Result<(), SongError> {
    match layers {
        0 => Err(SongError::NoLayers),
        layers if layers > Song::MAX_LAYERS => Err(SongError::TooManyLayers { layers }),
        _ => Ok(()),
    }
}

/// Errors that might be returned from mutating a [`Song`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SongError {
    /// The song already holds [`Song::MAX_TICKS`] ticks
    #[error("The song can't hold any more ticks")]
    TooManyTicks,

    /// Inserting at this index would grow the song past [`Song::MAX_TICKS`] ticks
    #[error("Tick index {index} is beyond the song's capacity")]
    TickIndexOutOfRange { index: usize },

    /// There is no tick at this index
    #[error("There is no tick at index {index}")]
    NoSuchTick { index: usize },

    /// A song spans at least one layer
    #[error("A song needs at least one layer")]
    NoLayers,

    /// A song spans at most [`Song::MAX_LAYERS`] layers
    #[error("{layers} layers exceeds the maximum layer count")]
    TooManyLayers { layers: u16 },

    /// Layer volumes lie within 0 - 100
    #[error("Volume {volume} is outside of the range 0-100")]
    VolumeOutOfRange { volume: u8 },

    /// The marker can only be placed on an existing tick
    #[error("Can't place the marker at tick {tick} in a song of {len} ticks")]
    MarkerOutOfRange { tick: usize, len: usize },
}
