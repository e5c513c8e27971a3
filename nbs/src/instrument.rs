//! Custom instruments stored alongside a song

/// An instrument occupying one of a song's custom instrument slots
///
/// Songs that come from disk always carry [`Instrument::Custom`] entries. Editing tools
/// may only know an instrument by name, which is what [`Instrument::Bare`] is for; it
/// gets expanded to a full entry with default values once the song is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instrument {
    /// A fully described instrument, as stored in song files
    Custom(CustomInstrument),

    /// An instrument known only by its name
    Bare { name: String },
}

impl Instrument {
    /// The display name of the instrument
    pub fn name(&self) -> &str {
        match self {
            Self::Custom(custom) => &custom.name,
            Self::Bare { name } => name,
        }
    }

    /// Expand into the form that gets serialized
    ///
    /// Bare instruments receive an empty sound file, [`CustomInstrument::DEFAULT_PITCH`]
    /// and no press-playback.
    pub fn to_custom(&self) -> CustomInstrument {
        match self {
            Self::Custom(custom) => custom.clone(),
            Self::Bare { name } => CustomInstrument::new(name.clone()),
        }
    }
}

impl From<CustomInstrument> for Instrument {
    fn from(custom: CustomInstrument) -> Self {
        Self::Custom(custom)
    }
}

/// The serialized shape of a custom instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomInstrument {
    /// The display name
    pub name: String,

    /// The sound file, relative to the editor's sound folder
    pub sound_file: String,

    /// The key at which the sound file plays unaltered
    pub pitch: u8,

    /// Should the sound play when a note block is placed in the editor?
    pub plays_on_press: bool,
}

impl CustomInstrument {
    /// The pitch used when none was specified
    pub const DEFAULT_PITCH: u8 = 45;

    /// Construct an instrument without a sound file
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sound_file: String::new(),
            pitch: Self::DEFAULT_PITCH,
            plays_on_press: false,
        }
    }
}
