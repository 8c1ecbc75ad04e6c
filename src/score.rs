//! Immutable score tables.
//!
//! A [`Score`] is a validated, non-empty sequence of [`Note`]s living in
//! static memory. A [`ScoreBook`] pairs the two scores the sequencer switches
//! between.

use crate::types::{Note, ScoreError, Song};

/// An ordered, read-only sequence of notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    notes: &'static [Note],
}

impl Score {
    /// Creates a score from a static note table.
    ///
    /// # Panics
    /// Panics if the table is empty or any note has a zero half-period. In a
    /// `const` or `static` initializer this is a compile error.
    pub const fn new(notes: &'static [Note]) -> Self {
        match Self::check(notes) {
            Ok(()) => Self { notes },
            Err(ScoreError::EmptyScore) => panic!("score must have at least one note"),
            Err(ScoreError::ZeroHalfPeriod { .. }) => panic!("score has a zero half-period"),
        }
    }

    /// Creates a score, reporting invalid tables instead of panicking.
    ///
    /// # Errors
    /// * `EmptyScore` - No notes were provided
    /// * `ZeroHalfPeriod` - A note would program a zero compare interval
    pub const fn try_new(notes: &'static [Note]) -> Result<Self, ScoreError> {
        match Self::check(notes) {
            Ok(()) => Ok(Self { notes }),
            Err(err) => Err(err),
        }
    }

    const fn check(notes: &'static [Note]) -> Result<(), ScoreError> {
        if notes.is_empty() {
            return Err(ScoreError::EmptyScore);
        }

        let mut index = 0;
        while index < notes.len() {
            if notes[index].half_period == 0 {
                return Err(ScoreError::ZeroHalfPeriod { index });
            }
            index += 1;
        }

        Ok(())
    }

    /// Number of notes. Never zero.
    #[inline]
    pub const fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the note at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    /// Returns the note at `index`.
    ///
    /// Callers keep `index` below [`Score::len`]. An out-of-range index is a
    /// logic error; debug builds assert, release builds wrap it into range
    /// rather than read past the table.
    #[inline]
    pub fn note(&self, index: usize) -> Note {
        debug_assert!(index < self.notes.len(), "score index out of bounds");
        self.notes[index % self.notes.len()]
    }

    /// Half-period of the note at `index`. Same bounds contract as [`Score::note`].
    #[inline]
    pub fn half_period(&self, index: usize) -> u16 {
        self.note(index).half_period
    }

    /// Sum of all note durations, in duration units.
    pub fn total_duration(&self) -> u32 {
        self.notes.iter().map(|n| n.duration as u32).sum()
    }

    /// All notes in order.
    pub fn notes(&self) -> &'static [Note] {
        self.notes
    }
}

/// The two scores the sequencer can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBook {
    a: Score,
    b: Score,
}

impl ScoreBook {
    /// Pairs song A and song B.
    pub const fn new(a: Score, b: Score) -> Self {
        Self { a, b }
    }

    /// Returns the score for `song`.
    #[inline]
    pub fn score(&self, song: Song) -> &Score {
        match song {
            Song::A => &self.a,
            Song::B => &self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TWO_NOTES: [Note; 2] = [Note::new(100, 5), Note::new(200, 5)];
    static EMPTY: [Note; 0] = [];
    static SILENT: [Note; 2] = [Note::new(100, 5), Note::new(0, 5)];

    #[test]
    fn try_new_rejects_empty_table() {
        assert_eq!(Score::try_new(&EMPTY), Err(ScoreError::EmptyScore));
    }

    #[test]
    fn try_new_rejects_zero_half_period() {
        assert_eq!(
            Score::try_new(&SILENT),
            Err(ScoreError::ZeroHalfPeriod { index: 1 })
        );
    }

    #[test]
    fn accessors_follow_table_order() {
        let score = Score::new(&TWO_NOTES);
        assert_eq!(score.len(), 2);
        assert!(!score.is_empty());
        assert_eq!(score.half_period(1), 200);
        assert_eq!(score.get(2), None);
        assert_eq!(score.total_duration(), 10);
    }

    #[test]
    fn book_selects_by_song() {
        static OTHER: [Note; 1] = [Note::new(300, 1)];
        let book = ScoreBook::new(Score::new(&TWO_NOTES), Score::new(&OTHER));
        assert_eq!(book.score(Song::A).len(), 2);
        assert_eq!(book.score(Song::B).half_period(0), 300);
    }
}
