use super::utils::{read_ascii, read_bool, read_i16, read_u8};
use crate::{
    block::NoteBlock,
    header::Header,
    instrument::CustomInstrument,
    song::{Song, SongError},
    tick::Tick,
};
use log::{debug, trace};
use std::io::{self, ErrorKind, Read};
use thiserror::Error;

/// Decode a [`Song`] from an arbitrary I/O reader
///
/// The header's tick and layer counts are used to size the song up front. The layer count
/// also determines how many entries of layer metadata are read after the grid. Without a
/// header (or a header without layers), decoding stops right after the grid.
///
/// Reaching the end of the reader inside the grid is an error, whereas reaching it in the
/// layer metadata or before the custom instruments simply ends decoding early. Once the
/// instrument count has been read, a truncated instrument entry is an error again.
pub fn decode_song<R>(mut reader: R, header: Option<&Header>) -> Result<Song, DecodeError>
where
    R: Read,
{
    let (ticks, layers) = header.map_or((0, 0), |header| (header.ticks, header.layers));

    let mut song = Song::with_capacity(
        usize::try_from(ticks).unwrap_or_default(),
        u16::try_from(layers).ok().filter(|layers| *layers > 0).unwrap_or(1),
    )?;

    decode_grid(&mut reader, &mut song)?;

    if layers <= 0 {
        return Ok(song);
    }

    if !decode_layers(&mut reader, &mut song, layers as u16)? {
        debug!("Layer metadata is incomplete, assuming an older file");
        return Ok(song);
    }

    let Some(count) = optional(read_u8(&mut reader))? else {
        debug!("No custom instruments section, assuming an older file");
        return Ok(song);
    };

    decode_custom_instruments(&mut reader, &mut song, count)?;

    Ok(song)
}

fn decode_grid<R>(mut reader: R, song: &mut Song) -> Result<(), DecodeError>
where
    R: Read,
{
    let mut tick: i32 = -1;

    loop {
        let jump = read_i16(&mut reader)?;
        if jump == 0 {
            return Ok(());
        }

        tick += jump as i32;
        let index = usize::try_from(tick)
            .ok()
            .filter(|index| *index < Song::MAX_TICKS)
            .ok_or(DecodeError::InvalidTick { tick })?;

        let row = decode_tick(&mut reader, song.layer_count())?;
        trace!("Decoded tick {index} with {} note(s)", row.notes().count());

        song.add_tick(index, row)?;
    }
}

fn decode_tick<R>(mut reader: R, layers: u16) -> Result<Tick, DecodeError>
where
    R: Read,
{
    let mut tick = Tick::new(layers);
    let mut layer: i32 = -1;

    loop {
        let jump = read_i16(&mut reader)?;
        if jump == 0 {
            return Ok(tick);
        }

        layer += jump as i32;
        let index = u16::try_from(layer)
            .ok()
            .filter(|index| *index < Song::MAX_LAYERS)
            .ok_or(DecodeError::InvalidLayer { layer })?;

        let instrument = read_u8(&mut reader)?;
        let key = read_u8(&mut reader)?;

        // Notes beyond the hinted layer count widen the tick, and thereby the song
        if index >= tick.layer_count() {
            tick.resize(index + 1);
        }

        tick.set_note(index, NoteBlock::new(instrument, key));
    }
}

/// Returns whether all layers were read before the stream ended
fn decode_layers<R>(mut reader: R, song: &mut Song, layers: u16) -> Result<bool, DecodeError>
where
    R: Read,
{
    for layer in 0..layers {
        let Some(name) = optional(read_ascii(&mut reader))? else {
            return Ok(false);
        };
        song.set_layer_name(layer, name);

        let Some(volume) = optional(read_u8(&mut reader))? else {
            return Ok(false);
        };
        song.set_layer_volume(layer, volume)?;
    }

    Ok(true)
}

fn decode_custom_instruments<R>(mut reader: R, song: &mut Song, count: u8) -> Result<(), DecodeError>
where
    R: Read,
{
    for slot in 0..count as usize {
        let instrument = CustomInstrument {
            name: read_ascii(&mut reader)?,
            sound_file: read_ascii(&mut reader)?,
            pitch: read_u8(&mut reader)?,
            plays_on_press: read_bool(&mut reader)?,
        };

        if slot < Song::CUSTOM_INSTRUMENT_SLOTS {
            song.set_custom_instrument(slot, instrument);
        } else {
            debug!("Dropping custom instrument {slot} ({})", instrument.name);
        }
    }

    Ok(())
}

/// Turn running out of data into [`None`], for sections that older files lack
fn optional<T>(result: io::Result<T>) -> Result<Option<T>, DecodeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(error) => Err(DecodeError::Io(error)),
    }
}

/// Errors that might be returned from [`decode_song()`]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The stream ended inside a section that can't be left out
    #[error("The stream ended unexpectedly")]
    UnexpectedEnd,

    /// A tick jump moved before the first tick, or beyond the maximal tick count
    #[error("Tick jump leads to invalid tick {tick}")]
    InvalidTick { tick: i32 },

    /// A layer jump moved before the first layer, or beyond the maximal layer count
    #[error("Layer jump leads to invalid layer {layer}")]
    InvalidLayer { layer: i32 },

    /// The decoded data was rejected by the song (e.g. a layer volume above 100)
    #[error("The decoded data does not form a valid song")]
    Song(#[from] SongError),

    /// Any other failure that has to do with I/O
    #[error("Something failed with I/O")]
    Io(#[source] io::Error),
}

impl From<io::Error> for DecodeError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            ErrorKind::UnexpectedEof => Self::UnexpectedEnd,
            _ => Self::Io(error),
        }
    }
}
