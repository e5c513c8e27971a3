//! Single notes placed on the tick/layer grid

/// A single note: which instrument plays, and at what key
///
/// Keys follow the Note Block Studio convention of a piano keyboard, where `0` is
/// A0 and [`NoteBlock::DEFAULT_KEY`] (45) is F#4, the pitch a note block plays when
/// it hasn't been tuned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteBlock {
    /// The instrument id
    ///
    /// Ids below the built-in instrument count refer to the vanilla sounds, ids beyond
    /// those refer to the song's custom instrument slots.
    pub instrument: u8,

    /// The key (pitch) of the note
    pub key: u8,
}

impl NoteBlock {
    /// The key of an untuned note block
    pub const DEFAULT_KEY: u8 = 45;

    /// Construct a note block from its parts
    pub const fn new(instrument: u8, key: u8) -> Self {
        Self { instrument, key }
    }
}
