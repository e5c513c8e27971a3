//! A single row of the song grid

use crate::block::NoteBlock;

/// One step in time, holding at most one [`NoteBlock`] per layer
///
/// Most layers of most ticks are empty, so a tick is stored as a sparse row of optional
/// notes. Once a tick is part of a [`Song`](crate::song::Song), its layer count is kept
/// in sync with the song's.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tick {
    notes: Vec<Option<NoteBlock>>,
}

impl Tick {
    /// Construct an empty tick spanning `layers` layers
    pub fn new(layers: u16) -> Self {
        Self {
            notes: vec![None; layers as usize],
        }
    }

    /// The number of layers this tick spans
    pub fn layer_count(&self) -> u16 {
        self.notes.len() as u16
    }

    /// Grow or shrink the tick to span `layers` layers
    ///
    /// New layers start out empty, and notes in layers beyond the new count are dropped.
    pub fn resize(&mut self, layers: u16) {
        self.notes.resize(layers as usize, None);
    }

    /// The note at a specific layer, if any
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than [`Tick::layer_count()`].
    pub fn note(&self, layer: u16) -> Option<NoteBlock> {
        self.notes[layer as usize]
    }

    /// Place a note at a specific layer, returning the note it replaces
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than [`Tick::layer_count()`].
    pub fn set_note(&mut self, layer: u16, block: NoteBlock) -> Option<NoteBlock> {
        self.notes[layer as usize].replace(block)
    }

    /// Remove the note at a specific layer, returning it
    ///
    /// # Panics
    ///
    /// Panics if `layer` is not smaller than [`Tick::layer_count()`].
    pub fn clear_note(&mut self, layer: u16) -> Option<NoteBlock> {
        self.notes[layer as usize].take()
    }

    /// Are all layers in this tick empty?
    pub fn is_empty(&self) -> bool {
        self.notes.iter().all(Option::is_none)
    }

    /// Iterate over the notes in this tick, in layer order, along with their layer
    pub fn notes(&self) -> impl Iterator<Item = (u16, NoteBlock)> + '_ {
        self.notes
            .iter()
            .enumerate()
            .filter_map(|(layer, block)| block.map(|block| (layer as u16, block)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse() {
        let mut tick = Tick::new(4);
        assert_eq!(tick.layer_count(), 4);
        assert!(tick.is_empty());

        assert_eq!(tick.set_note(2, NoteBlock::new(1, 45)), None);
        assert!(!tick.is_empty());
        assert_eq!(tick.note(2), Some(NoteBlock::new(1, 45)));
        assert_eq!(tick.note(1), None);

        assert_eq!(
            tick.set_note(2, NoteBlock::new(3, 50)),
            Some(NoteBlock::new(1, 45))
        );
        assert_eq!(tick.notes().collect::<Vec<_>>(), [(2, NoteBlock::new(3, 50))]);

        assert_eq!(tick.clear_note(2), Some(NoteBlock::new(3, 50)));
        assert!(tick.is_empty());
    }

    #[test]
    fn resize() {
        let mut tick = Tick::new(2);
        tick.set_note(0, NoteBlock::new(0, 10));
        tick.set_note(1, NoteBlock::new(0, 11));

        tick.resize(4);
        assert_eq!(tick.layer_count(), 4);
        assert_eq!(tick.note(1), Some(NoteBlock::new(0, 11)));
        assert_eq!(tick.note(3), None);

        tick.resize(1);
        assert_eq!(tick.layer_count(), 1);
        assert_eq!(tick.notes().collect::<Vec<_>>(), [(0, NoteBlock::new(0, 10))]);
    }

    #[test]
    #[should_panic]
    fn out_of_range() {
        Tick::new(1).note(1);
    }

    #[test]
    fn copies_are_independent() {
        let mut tick = Tick::new(1);
        let copy = tick.clone();
        tick.set_note(0, NoteBlock::new(0, 0));

        assert!(copy.is_empty());
        assert_ne!(tick, copy);
    }
}
