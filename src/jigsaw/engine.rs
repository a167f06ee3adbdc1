use rand::seq::SliceRandom;
use rand::Rng;

use crate::mission::PieceSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzlePiece {
    pub id: u8,
    pub correct_slot: u8,
    pub current_slot: u8,
    pub image_ref: String,
    pub display_number: u8,
}

impl PuzzlePiece {
    pub fn is_placed(&self) -> bool {
        self.current_slot == self.correct_slot
    }
}

/// Swap-to-place jigsaw. Every slot always holds exactly one piece.
#[derive(Debug, Clone)]
pub struct Jigsaw {
    pieces: Vec<PuzzlePiece>,
}

impl Jigsaw {
    pub fn new<R: Rng + ?Sized>(table: &[PieceSpec], rng: &mut R) -> Self {
        let pieces = table
            .iter()
            .enumerate()
            .map(|(i, spec)| PuzzlePiece {
                id: i as u8 + 1,
                correct_slot: spec.correct_slot,
                current_slot: spec.correct_slot,
                image_ref: spec.image.clone(),
                display_number: spec.display_number,
            })
            .collect();

        let mut jigsaw = Jigsaw { pieces };
        jigsaw.shuffle(rng);
        jigsaw
    }

    // Uniform; a piece may land on its own slot by chance
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut slots: Vec<u8> = self.pieces.iter().map(|p| p.correct_slot).collect();
        slots.shuffle(rng);
        for (piece, slot) in self.pieces.iter_mut().zip(slots) {
            piece.current_slot = slot;
        }
    }

    /// Exchanges whatever sits in `slot_a` and `slot_b`. Returns false and
    /// changes nothing when either slot is empty or both are the same.
    pub fn swap(&mut self, slot_a: u8, slot_b: u8) -> bool {
        if slot_a == slot_b {
            return false;
        }
        let a = self.index_at(slot_a);
        let b = self.index_at(slot_b);
        let (Some(a), Some(b)) = (a, b) else {
            return false;
        };

        self.pieces[a].current_slot = slot_b;
        self.pieces[b].current_slot = slot_a;
        true
    }

    pub fn is_solved(&self) -> bool {
        self.pieces.iter().all(PuzzlePiece::is_placed)
    }

    pub fn reset(&mut self) {
        for piece in &mut self.pieces {
            piece.current_slot = piece.correct_slot;
        }
    }

    pub fn piece_at(&self, slot: u8) -> Option<&PuzzlePiece> {
        self.index_at(slot).map(|i| &self.pieces[i])
    }

    pub fn pieces(&self) -> &[PuzzlePiece] {
        &self.pieces
    }

    pub fn arrangement(&self) -> Vec<&PuzzlePiece> {
        let mut ordered: Vec<&PuzzlePiece> = self.pieces.iter().collect();
        ordered.sort_by_key(|p| p.current_slot);
        ordered
    }

    pub fn misplaced(&self) -> usize {
        self.pieces.iter().filter(|p| !p.is_placed()).count()
    }

    fn index_at(&self, slot: u8) -> Option<usize> {
        self.pieces.iter().position(|p| p.current_slot == slot)
    }
}
