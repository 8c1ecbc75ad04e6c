//! Built-in scores: an equal-tempered pitch table and two songs.
//!
//! Half-periods assume a 1 MHz timer clock. Durations are in units of two
//! ticks at tempo scale 1.0.

use crate::score::{Score, ScoreBook};
use crate::types::Note;

/// Half-periods, in 1 MHz timer ticks, from C4 up to G5.
pub mod pitch {
    pub const C4: u16 = 1900;
    pub const CS4: u16 = 1793;
    pub const D4: u16 = 1693;
    pub const DS4: u16 = 1598;
    pub const E4: u16 = 1508;
    pub const F4: u16 = 1423;
    pub const FS4: u16 = 1344;
    pub const G4: u16 = 1268;
    pub const GS4: u16 = 1196;
    pub const A4: u16 = 1129;
    pub const AS4: u16 = 1066;
    pub const B4: u16 = 1006;
    pub const C5: u16 = 950;
    pub const D5: u16 = 846;
    pub const E5: u16 = 754;
    pub const F5: u16 = 710;
    pub const FS5: u16 = 672;
    pub const G5: u16 = 634;
}

use pitch::*;

/// "Joy to the World", the default song.
pub const JOY_TO_THE_WORLD_NOTES: [Note; 57] = [
    Note::new(C5, 44), Note::new(B4, 33), Note::new(A4, 11),
    Note::new(G4, 66), Note::new(F4, 22),
    Note::new(E4, 44), Note::new(D4, 44),
    Note::new(C4, 66), Note::new(G4, 22),
    Note::new(A4, 66), Note::new(A4, 22),
    Note::new(B4, 66), Note::new(B4, 22),
    Note::new(C5, 66), Note::new(C5, 22),
    Note::new(C5, 22), Note::new(B4, 22), Note::new(A4, 22), Note::new(G4, 22),
    Note::new(G4, 33), Note::new(F4, 11), Note::new(E4, 22), Note::new(C5, 22),
    Note::new(C5, 22), Note::new(B4, 22), Note::new(A4, 22), Note::new(G4, 22),
    Note::new(G4, 33), Note::new(F4, 11), Note::new(E4, 22), Note::new(E4, 22),
    Note::new(E4, 22), Note::new(E4, 22), Note::new(E4, 22), Note::new(E4, 11), Note::new(F4, 11),
    Note::new(G4, 66), Note::new(F4, 11), Note::new(E4, 11),
    Note::new(D4, 22), Note::new(D4, 22), Note::new(D4, 22), Note::new(D4, 11), Note::new(E4, 11),
    Note::new(F4, 66), Note::new(E4, 11), Note::new(D4, 11),
    Note::new(C4, 22), Note::new(C5, 44), Note::new(A4, 22),
    Note::new(G4, 33), Note::new(F4, 11), Note::new(E4, 22), Note::new(F4, 22),
    Note::new(E4, 44), Note::new(D4, 44),
    Note::new(C4, 88),
];

/// The Chocobo theme.
pub const CHOCOBO_THEME_NOTES: [Note; 98] = [
    Note::new(D5, 22), Note::new(B4, 11), Note::new(G4, 11), Note::new(E4, 11), Note::new(D5, 11), Note::new(B4, 11), Note::new(G4, 11),
    Note::new(B4, 22), Note::new(G4, 22), Note::new(B4, 33), Note::new(A4, 11),
    Note::new(G4, 11), Note::new(G4, 5), Note::new(A4, 6), Note::new(G4, 11), Note::new(F4, 11), Note::new(G4, 33), Note::new(F4, 11),
    Note::new(G4, 11), Note::new(G4, 5), Note::new(B4, 6), Note::new(D5, 11), Note::new(E5, 11), Note::new(F5, 44),
    Note::new(D5, 22), Note::new(B4, 11), Note::new(G4, 11), Note::new(E4, 11), Note::new(D5, 11), Note::new(B4, 11), Note::new(G4, 11),
    Note::new(B4, 22), Note::new(G4, 22), Note::new(B4, 33), Note::new(A4, 11),
    Note::new(G4, 11), Note::new(G4, 5), Note::new(A4, 6), Note::new(G4, 11), Note::new(F4, 11), Note::new(G4, 33), Note::new(F4, 11), Note::new(G4, 11), Note::new(G4, 5), Note::new(B4, 6), Note::new(D5, 11), Note::new(E5, 11), Note::new(F5, 44),
    Note::new(E5, 22), Note::new(C5, 11), Note::new(A4, 11), Note::new(FS4, 11), Note::new(A4, 11), Note::new(C5, 11), Note::new(E5, 11),
    Note::new(D5, 22), Note::new(G5, 22), Note::new(D5, 33), Note::new(B4, 11),
    Note::new(C5, 22), Note::new(A4, 11), Note::new(FS4, 11), Note::new(D4, 11), Note::new(FS4, 11), Note::new(A4, 11), Note::new(C5, 11),
    Note::new(B4, 11), Note::new(B4, 5), Note::new(C5, 6), Note::new(B4, 11), Note::new(A4, 11), Note::new(B4, 44),
    Note::new(E5, 22), Note::new(C5, 11), Note::new(A4, 11), Note::new(FS4, 11), Note::new(A4, 11), Note::new(C5, 11), Note::new(E5, 11),
    Note::new(D5, 22), Note::new(G5, 22), Note::new(D5, 33), Note::new(B4, 11),
    Note::new(A4, 11), Note::new(A4, 5), Note::new(B4, 6), Note::new(A4, 11), Note::new(G4, 11), Note::new(A4, 33), Note::new(G4, 11),
    Note::new(A4, 11), Note::new(A4, 5), Note::new(B4, 6), Note::new(C5, 11), Note::new(D5, 11), Note::new(E5, 22), Note::new(FS5, 22),
    Note::new(G5, 88),
];

/// "Joy to the World" as a validated score.
pub const JOY_TO_THE_WORLD: Score = Score::new(&JOY_TO_THE_WORLD_NOTES);

/// The Chocobo theme as a validated score.
pub const CHOCOBO_THEME: Score = Score::new(&CHOCOBO_THEME_NOTES);

impl ScoreBook {
    /// The built-in pair: "Joy to the World" as song A, the Chocobo theme as song B.
    pub const fn builtin() -> Self {
        ScoreBook::new(JOY_TO_THE_WORLD, CHOCOBO_THEME)
    }
}
