//! The fixed record at the start of every `.nbs` file

use crate::serde::utils::{
    read_ascii, read_bool, read_i16, read_i32, read_u8, write_ascii, write_bool, write_i16,
    write_i32, write_u8,
};
use std::io::{self, Read, Write};

/// Song-wide metadata preceding the note grid
///
/// Apart from `ticks` and `layers`, which tell the decoder how many layers of metadata to
/// expect, none of these fields influence the [`Song`](crate::song::Song) itself. They are
/// carried along so a file can be written back without losing information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The length of the song, in ticks
    pub ticks: i16,

    /// The number of layers in the song
    pub layers: i16,

    pub name: String,
    pub author: String,
    pub original_author: String,
    pub description: String,

    /// The tempo, in hundredths of ticks per second
    pub tempo: i16,

    pub autosave: bool,

    /// Minutes between autosaves
    pub autosave_interval: u8,

    /// The number of ticks per bar
    pub time_signature: u8,

    pub minutes_spent: i32,
    pub left_clicks: i32,
    pub right_clicks: i32,
    pub blocks_added: i32,
    pub blocks_removed: i32,

    /// The name of the MIDI or schematic file the song was imported from
    pub import_name: String,
}

impl Header {
    /// Ten ticks per second
    pub const DEFAULT_TEMPO: i16 = 1000;

    /// Deserialize a [`Header`] from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, io::Error>
    where
        R: Read,
    {
        Ok(Self {
            ticks: read_i16(&mut reader)?,
            layers: read_i16(&mut reader)?,
            name: read_ascii(&mut reader)?,
            author: read_ascii(&mut reader)?,
            original_author: read_ascii(&mut reader)?,
            description: read_ascii(&mut reader)?,
            tempo: read_i16(&mut reader)?,
            autosave: read_bool(&mut reader)?,
            autosave_interval: read_u8(&mut reader)?,
            time_signature: read_u8(&mut reader)?,
            minutes_spent: read_i32(&mut reader)?,
            left_clicks: read_i32(&mut reader)?,
            right_clicks: read_i32(&mut reader)?,
            blocks_added: read_i32(&mut reader)?,
            blocks_removed: read_i32(&mut reader)?,
            import_name: read_ascii(&mut reader)?,
        })
    }

    /// Serialize the [`Header`] to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        write_i16(self.ticks, &mut writer)?;
        write_i16(self.layers, &mut writer)?;
        write_ascii(&self.name, &mut writer)?;
        write_ascii(&self.author, &mut writer)?;
        write_ascii(&self.original_author, &mut writer)?;
        write_ascii(&self.description, &mut writer)?;
        write_i16(self.tempo, &mut writer)?;
        write_bool(self.autosave, &mut writer)?;
        write_u8(self.autosave_interval, &mut writer)?;
        write_u8(self.time_signature, &mut writer)?;
        write_i32(self.minutes_spent, &mut writer)?;
        write_i32(self.left_clicks, &mut writer)?;
        write_i32(self.right_clicks, &mut writer)?;
        write_i32(self.blocks_added, &mut writer)?;
        write_i32(self.blocks_removed, &mut writer)?;
        write_ascii(&self.import_name, &mut writer)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            ticks: 0,
            layers: 0,
            name: String::new(),
            author: String::new(),
            original_author: String::new(),
            description: String::new(),
            tempo: Self::DEFAULT_TEMPO,
            autosave: false,
            autosave_interval: 1,
            time_signature: 4,
            minutes_spent: 0,
            left_clicks: 0,
            right_clicks: 0,
            blocks_added: 0,
            blocks_removed: 0,
            import_name: String::new(),
        }
    }
}
