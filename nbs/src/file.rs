//! The `.nbs` file format: a [`Header`] followed by an encoded [`Song`]

use crate::{header::Header, serde::DecodeError, song::Song};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};
use thiserror::Error;

/// A [`Header`] and the [`Song`] it describes
///
/// ```no_run
/// # use nbs::NbsFile;
/// // Load a song from a path on disk
/// let mut file = NbsFile::from_path("megalovania.nbs")?;
/// println!("{} lasts {}ms", file.header.name, file.length_millis());
///
/// // Edit it and write it back
/// file.song.resize(8)?;
/// file.to_path("megalovania.nbs")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NbsFile {
    /// Song-wide metadata
    pub header: Header,

    /// The note grid, layers and custom instruments
    pub song: Song,
}

impl NbsFile {
    /// Deserialize an [`NbsFile`] from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let header = Header::from_reader(&mut reader).map_err(FromReaderError::Header)?;
        let song = Song::from_reader(reader, Some(&header))?;

        Ok(Self { header, song })
    }

    /// Deserialize an [`NbsFile`] from a path on disk (.nbs)
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }

    /// Serialize the [`NbsFile`] to an arbitrary I/O writer
    ///
    /// The tick and layer counts written in the header are taken from the song, so that
    /// reading the file back yields all of its layer metadata.
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        self.synced_header().to_writer(&mut writer)?;
        self.song.to_writer(writer)
    }

    /// Serialize the [`NbsFile`] to a path on disk (.nbs)
    pub fn to_path<P>(&self, path: P) -> Result<(), io::Error>
    where
        P: AsRef<Path>,
    {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()
    }

    /// The playback duration in milliseconds at the header's tempo
    pub fn length_millis(&self) -> i64 {
        self.song.length_millis(self.header.tempo)
    }

    fn synced_header(&self) -> Header {
        Header {
            ticks: self.song.tick_count() as i16,
            layers: self.song.layer_count() as i16,
            ..self.header.clone()
        }
    }
}

/// Errors that might be returned from [`NbsFile::from_reader()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// Reading the header failed
    #[error("Reading the header failed")]
    Header(#[source] io::Error),

    /// Decoding the song following the header failed
    #[error("Decoding the song failed")]
    Song(#[from] DecodeError),
}

/// Errors that might be returned from [`NbsFile::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Could not open the file for reading
    #[error("Could not open the file for reading")]
    FileOpen(#[from] io::Error),

    /// Deserialization from the file failed
    #[error("Reading the NbsFile from file failed")]
    Read(#[from] FromReaderError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{block::NoteBlock, instrument::CustomInstrument, tick::Tick};
    use std::io::Cursor;

    fn sample() -> NbsFile {
        let mut song = Song::new(2).unwrap();
        song.add_tick(20, Tick::new(3)).unwrap();
        song.set_note(20, 2, NoteBlock::new(4, 52));
        song.set_layer_name(2, "Chimes");
        song.set_layer_volume(2, 30).unwrap();
        song.set_custom_instrument(0, CustomInstrument::new("Gong"));

        NbsFile {
            header: Header {
                name: "Bells".to_string(),
                author: "Someone".to_string(),
                tempo: 1000,
                ..Default::default()
            },
            song,
        }
    }

    #[test]
    fn round_trip() {
        let file = sample();

        let mut bytes = Vec::new();
        file.to_writer(&mut bytes).unwrap();

        let read = NbsFile::from_reader(Cursor::new(&bytes)).unwrap();
        assert_eq!(read.header.ticks, 21);
        assert_eq!(read.header.layers, 3);
        assert_eq!(read.header.name, "Bells");
        assert_eq!(read.song, file.song);
        assert_eq!(read.song.layer_name(2), Some("Chimes"));
        assert_eq!(read.length_millis(), 2000);

        let mut again = Vec::new();
        read.to_writer(&mut again).unwrap();
        assert_eq!(again, bytes);
    }

    #[test]
    fn missing_header() {
        let result = NbsFile::from_reader(Cursor::new([1, 0]));
        assert!(matches!(result, Err(FromReaderError::Header(_))));
    }

    #[test]
    fn truncated_song() {
        let mut bytes = Vec::new();
        sample().to_writer(&mut bytes).unwrap();

        let header_len = {
            let mut header = Vec::new();
            sample().synced_header().to_writer(&mut header).unwrap();
            header.len()
        };

        let result = NbsFile::from_reader(Cursor::new(&bytes[..header_len + 3]));
        assert!(matches!(
            result,
            Err(FromReaderError::Song(DecodeError::UnexpectedEnd))
        ));
    }
}
