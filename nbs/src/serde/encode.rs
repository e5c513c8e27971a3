use super::utils::{write_ascii, write_bool, write_i16, write_u8};
use crate::{
    instrument::{CustomInstrument, Instrument},
    song::Song,
};
use std::io::{Result, Write};

/// Encode a [`Song`] to an arbitrary I/O writer
///
/// Empty ticks and layers are skipped entirely. Every layer gets its name and volume
/// written, and all occupied custom instrument slots are written in order, with
/// [`Instrument::Bare`] entries expanded to their defaults.
pub fn encode_song<W>(song: &Song, mut writer: W) -> Result<()>
where
    W: Write,
{
    encode_grid(song, &mut writer)?;

    for layer in 0..song.layer_count() {
        write_ascii(song.layer_name(layer).unwrap_or_default(), &mut writer)?;
        write_u8(song.layer_volume(layer), &mut writer)?;
    }

    let instruments: Vec<CustomInstrument> = song
        .custom_instruments()
        .iter()
        .flatten()
        .map(Instrument::to_custom)
        .collect();

    write_u8(instruments.len() as u8, &mut writer)?;
    for instrument in &instruments {
        write_ascii(&instrument.name, &mut writer)?;
        write_ascii(&instrument.sound_file, &mut writer)?;
        write_u8(instrument.pitch, &mut writer)?;
        write_bool(instrument.plays_on_press, &mut writer)?;
    }

    Ok(())
}

fn encode_grid<W>(song: &Song, mut writer: W) -> Result<()>
where
    W: Write,
{
    let mut last_tick: i32 = -1;

    for (index, tick) in song.iter().enumerate() {
        if tick.is_empty() {
            continue;
        }

        // Indices are bounded by Song::MAX_TICKS and Song::MAX_LAYERS, so jumps fit in 16 bits
        write_i16((index as i32 - last_tick) as i16, &mut writer)?;
        last_tick = index as i32;

        let mut last_layer: i32 = -1;
        for (layer, block) in tick.notes() {
            write_i16((layer as i32 - last_layer) as i16, &mut writer)?;
            write_u8(block.instrument, &mut writer)?;
            write_u8(block.key, &mut writer)?;
            last_layer = layer as i32;
        }

        write_i16(0, &mut writer)?;
    }

    write_i16(0, writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block::NoteBlock, header::Header, serde::decode_song, tick::Tick};
    use std::io::Cursor;

    fn encode(song: &Song) -> Vec<u8> {
        let mut bytes = Vec::new();
        encode_song(song, &mut bytes).unwrap();
        bytes
    }

    fn decode(bytes: &[u8], song: &Song) -> Song {
        let header = Header {
            ticks: song.tick_count() as i16,
            layers: song.layer_count() as i16,
            ..Default::default()
        };

        decode_song(Cursor::new(bytes), Some(&header)).unwrap()
    }

    /// A song with gaps in both directions, metadata on some layers and a mix of instruments
    fn sample_song() -> Song {
        let mut song = Song::new(4).unwrap();
        song.add_tick(2, Tick::new(4)).unwrap();
        song.add_tick(9, Tick::new(4)).unwrap();
        song.set_note(0, 3, NoteBlock::new(1, 33));
        song.set_note(2, 0, NoteBlock::new(0, 45));
        song.set_note(2, 1, NoteBlock::new(5, 60));
        song.set_note(9, 3, NoteBlock::new(10, 87));

        song.set_layer_name(0, "Piano");
        song.set_layer_name(3, "Bass");
        song.set_layer_volume(1, 0).unwrap();
        song.set_layer_volume(3, 65).unwrap();

        song.set_custom_instrument(
            0,
            CustomInstrument {
                name: "Kick".to_string(),
                sound_file: "drums/kick.ogg".to_string(),
                pitch: 40,
                plays_on_press: true,
            },
        );
        song.set_custom_instrument(
            1,
            Instrument::Bare {
                name: "Shaker".to_string(),
            },
        );

        song
    }

    #[test]
    fn single_note() {
        let mut song = Song::new(1).unwrap();
        song.add_tick(4, Tick::new(1)).unwrap();
        song.set_note(4, 0, NoteBlock::new(0, 45));
        song.set_layer_name(0, "Layer 1");
        song.set_layer_volume(0, 80).unwrap();

        #[rustfmt::skip]
        let expected = [
            5, 0,
            1, 0, 0, 45,
            0, 0,
            0, 0,
            7, 0, 0, 0, b'L', b'a', b'y', b'e', b'r', b' ', b'1', 80,
            0,
        ];

        let bytes = encode(&song);
        assert_eq!(bytes, expected);
        assert_eq!(encode(&decode(&bytes, &song)), expected);
    }

    #[test]
    fn empty_song() {
        let bytes = encode(&Song::default());
        assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 100, 0]);
    }

    #[test]
    fn bare_instruments_get_defaults() {
        let song = sample_song();
        let decoded = decode(&encode(&song), &song);

        assert_eq!(
            decoded.custom_instrument(1),
            Some(&Instrument::Custom(CustomInstrument {
                name: "Shaker".to_string(),
                sound_file: String::new(),
                pitch: 45,
                plays_on_press: false,
            }))
        );
    }

    #[test]
    fn round_trip() {
        let mut song = sample_song();
        let decoded = decode(&encode(&song), &song);

        // Bare instruments come back in their expanded form
        let expanded = song.custom_instrument(1).map(Instrument::to_custom);
        song.set_custom_instrument(1, expanded.unwrap());

        assert_eq!(decoded, song);
        assert_eq!(decoded.tick_count(), 10);
        assert_eq!(decoded.layer_name(1), None);
        assert_eq!(decoded.layer_volume(3), 65);
    }

    #[test]
    fn stable_reencoding() {
        let song = sample_song();
        let first = encode(&song);
        let second = encode(&decode(&first, &song));

        assert_eq!(first, second);
    }

    #[test]
    fn slots_are_compacted() {
        let mut song = Song::default();
        song.set_custom_instrument(4, CustomInstrument::new("Late"));

        let decoded = decode(&encode(&song), &song);
        assert_eq!(decoded.custom_instrument(0).map(Instrument::name), Some("Late"));
        assert_eq!(decoded.custom_instrument(4), None);
    }

    #[test]
    fn empty_ticks_are_skipped() {
        let mut song = Song::new(1).unwrap();
        song.add_tick(3, Tick::new(1)).unwrap();
        song.set_note(1, 0, NoteBlock::new(2, 2));

        let bytes = encode(&song);
        assert_eq!(&bytes[..8], &[2, 0, 1, 0, 2, 2, 0, 0]);

        // Trailing empty ticks aren't part of the stream
        assert_eq!(decode(&bytes, &song).tick_count(), 2);
    }
}
