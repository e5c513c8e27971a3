use super::Song;
use crate::tick::Tick;
use thiserror::Error;

/// A position in a [`Song`] that doesn't borrow it
///
/// A cursor remembers the song's revision at creation. Advancing it after ticks were
/// added or removed, or after the song was resized, fails with [`ConcurrentModification`]
/// instead of yielding ticks from a grid that has shifted underneath it. Once failed, the
/// cursor stays failed.
///
/// ```
/// # use nbs::{Song, Tick};
/// let mut song = Song::new(1)?;
/// song.push_tick(Tick::new(1))?;
///
/// let mut cursor = song.cursor();
/// song.push_tick(Tick::new(1))?;
///
/// assert!(cursor.next(&song).is_err());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TickCursor {
    position: usize,
    expected_revision: usize,
    invalidated: bool,
}

impl TickCursor {
    pub(super) fn new(revision: usize) -> Self {
        Self {
            position: 0,
            expected_revision: revision,
            invalidated: false,
        }
    }

    /// The index of the tick the next call to [`TickCursor::next()`] yields
    pub fn position(&self) -> usize {
        self.position
    }

    /// Advance to the next tick
    ///
    /// Returns [`None`] once every tick has been visited.
    pub fn next<'a>(&mut self, song: &'a Song) -> Result<Option<&'a Tick>, ConcurrentModification> {
        if self.invalidated || song.revision != self.expected_revision {
            self.invalidated = true;
            return Err(ConcurrentModification);
        }

        let tick = song.ticks.get(self.position);
        if tick.is_some() {
            self.position += 1;
        }

        Ok(tick)
    }
}

/// The song was structurally changed while a [`TickCursor`] was iterating over it
#[derive(Debug, Error, PartialEq, Eq)]
#[error("The song was modified during iteration")]
pub struct ConcurrentModification;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::NoteBlock;

    #[test]
    fn visits_all_ticks() {
        let mut song = Song::new(1).unwrap();
        song.add_tick(2, Tick::new(1)).unwrap();
        song.set_note(1, 0, NoteBlock::new(0, 33));

        let mut cursor = song.cursor();
        let mut visited = Vec::new();
        while let Some(tick) = cursor.next(&song).unwrap() {
            visited.push(tick.clone());
        }

        assert_eq!(visited, song.ticks());
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.next(&song), Ok(None));
    }

    #[test]
    fn note_edits_are_not_structural() {
        let mut song = Song::new(1).unwrap();
        song.push_tick(Tick::new(1)).unwrap();

        let mut cursor = song.cursor();
        song.set_note(0, 0, NoteBlock::new(0, 33));
        song.set_layer_name(0, "Lead");

        assert_eq!(
            cursor.next(&song).unwrap().and_then(|tick| tick.note(0)),
            Some(NoteBlock::new(0, 33))
        );
    }

    #[test]
    fn fails_after_add() {
        let mut song = Song::new(1).unwrap();
        song.push_tick(Tick::new(1)).unwrap();
        song.push_tick(Tick::new(1)).unwrap();

        let mut cursor = song.cursor();
        assert!(cursor.next(&song).unwrap().is_some());

        song.add_tick(0, Tick::new(1)).unwrap();
        assert_eq!(cursor.next(&song), Err(ConcurrentModification));
    }

    #[test]
    fn fails_after_remove_and_resize() {
        let mut song = Song::new(1).unwrap();
        song.push_tick(Tick::new(1)).unwrap();

        let mut cursor = song.cursor();
        song.remove_tick(0).unwrap();
        assert_eq!(cursor.next(&song), Err(ConcurrentModification));

        let mut cursor = song.cursor();
        song.resize(2).unwrap();
        assert_eq!(cursor.next(&song), Err(ConcurrentModification));
    }

    #[test]
    fn stays_invalid() {
        let mut song = Song::new(1).unwrap();
        let mut cursor = song.cursor();
        song.push_tick(Tick::new(1)).unwrap();

        assert!(cursor.next(&song).is_err());

        // Even against a song at the original revision
        let fresh = Song::new(1).unwrap();
        assert!(cursor.next(&fresh).is_err());
    }
}
