//! Board ordering, win detection, and the game session state machine.

use std::fmt;

use rand::Rng;

use crate::grid::{GridChoice, DEFAULT_GRID};
use crate::shuffle::scramble_order;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// Ordered board slots. `slots[pos]` is the correct index of the tile
/// currently occupying `pos`; the vector is always a permutation of
/// `0..total`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cols: u32,
    rows: u32,
    slots: Vec<usize>,
}

impl Board {
    pub fn solved(grid: GridChoice) -> Self {
        Self {
            cols: grid.cols,
            rows: grid.rows,
            slots: (0..grid.total()).collect(),
        }
    }

    pub fn from_order(grid: GridChoice, order: &[usize]) -> Result<Self, SessionError> {
        let mut board = Self::solved(grid);
        board.apply_order(order)?;
        Ok(board)
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn total(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn tile_at(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }

    /// Replace the full ordering. Rejects anything that is not a permutation
    /// of the board's indices, leaving the board untouched.
    pub fn apply_order(&mut self, order: &[usize]) -> Result<(), SessionError> {
        let total = self.slots.len();
        if order.len() != total {
            return Err(SessionError::OrderMismatch {
                expected: total,
                found: order.len(),
            });
        }
        let mut seen = vec![false; total];
        for &index in order {
            if index >= total || seen[index] {
                return Err(SessionError::OrderMismatch {
                    expected: total,
                    found: order.len(),
                });
            }
            seen[index] = true;
        }
        self.slots.clear();
        self.slots.extend_from_slice(order);
        Ok(())
    }

    /// Exchange the tiles at two slots. Both slots update together or the
    /// board is left untouched.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), SessionError> {
        let total = self.slots.len();
        let bad = if a >= total {
            Some(a)
        } else if b >= total {
            Some(b)
        } else {
            None
        };
        if let Some(slot) = bad {
            return Err(SessionError::InvalidSlot { slot, total });
        }
        self.slots.swap(a, b);
        Ok(())
    }

    /// Solved iff every slot holds the tile whose correct index matches it.
    pub fn is_solved(&self) -> bool {
        self.slots.iter().enumerate().all(|(slot, index)| *index == slot)
    }
}

/// Session state machine. Interaction is permitted only in `Active`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No image loaded.
    Idle,
    /// Image loaded, board rendered in solved order, not interactive.
    Ready,
    /// A shuffle is being applied.
    Shuffling,
    /// Shuffled and interactive.
    Active,
    /// Win detected, interaction disabled until the next shuffle or rebuild.
    Solved,
}

impl Phase {
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Active)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    pub swapped: bool,
    pub solved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    NoImage,
    InvalidSlot { slot: usize, total: usize },
    OrderMismatch { expected: usize, found: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoImage => write!(f, "upload an image first"),
            SessionError::InvalidSlot { slot, total } => {
                write!(f, "slot {slot} out of range for {total}-tile board")
            }
            SessionError::OrderMismatch { expected, found } => {
                write!(f, "order of {found} entries is not a permutation of 0..{expected}")
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Controller owning the current image, grid choice, board ordering, and
/// phase. All gameplay mutations go through here; the view layer only
/// projects `board().slots()` into the DOM.
#[derive(Clone, Debug)]
pub struct Session {
    image: Option<ImageInfo>,
    grid: GridChoice,
    board: Board,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self {
            image: None,
            grid: DEFAULT_GRID,
            board: Board::solved(DEFAULT_GRID),
            phase: Phase::Idle,
        }
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    pub fn grid(&self) -> GridChoice {
        self.grid
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn rebuild(&mut self) {
        self.board = Board::solved(self.grid);
        self.phase = if self.image.is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        };
    }

    /// Load a freshly uploaded image and show it in solved order.
    pub fn set_image(&mut self, image: ImageInfo) {
        self.image = Some(image);
        self.rebuild();
    }

    /// Swap in a rotated rendition of the current image.
    pub fn rotate_image(&mut self, image: ImageInfo) {
        self.set_image(image);
    }

    /// Change difficulty. Rebuilds the board when an image is loaded so the
    /// new grid is visible immediately, unshuffled.
    pub fn set_grid(&mut self, grid: GridChoice) {
        self.grid = grid;
        self.rebuild();
    }

    /// Shuffle into a guaranteed-unsolved ordering and start play.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.image.is_none() {
            return Err(SessionError::NoImage);
        }
        self.phase = Phase::Shuffling;
        let order = scramble_order(self.board.total(), rng);
        self.board.apply_order(&order)?;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Swap two board slots and run the win check. Ignored outside `Active`
    /// and for degenerate requests (same slot, out of range).
    pub fn swap_tiles(&mut self, a: usize, b: usize) -> SwapOutcome {
        if !self.phase.is_active() || a == b {
            return SwapOutcome::default();
        }
        if self.board.swap(a, b).is_err() {
            return SwapOutcome::default();
        }
        let solved = self.board.is_solved();
        if solved {
            self.phase = Phase::Solved;
        }
        SwapOutcome { swapped: true, solved }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GRID_CHOICES;

    fn grid_2x2() -> GridChoice {
        GRID_CHOICES[0]
    }

    #[test]
    fn swap_is_an_involution() {
        let mut board = Board::from_order(grid_2x2(), &[1, 0, 3, 2]).unwrap();
        let before = board.clone();
        board.swap(0, 3).unwrap();
        assert_ne!(board, before);
        board.swap(0, 3).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn swap_rejects_out_of_range_slots() {
        let mut board = Board::solved(grid_2x2());
        let before = board.clone();
        assert_eq!(
            board.swap(0, 4),
            Err(SessionError::InvalidSlot { slot: 4, total: 4 })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn win_check_is_identity_only() {
        assert!(Board::solved(grid_2x2()).is_solved());
        // Any single transposition away from identity is unsolved.
        for a in 0..4 {
            for b in (a + 1)..4 {
                let mut board = Board::solved(grid_2x2());
                board.swap(a, b).unwrap();
                assert!(!board.is_solved(), "transposition ({a},{b})");
            }
        }
    }

    #[test]
    fn apply_order_rejects_non_permutations() {
        let mut board = Board::solved(grid_2x2());
        assert!(board.apply_order(&[0, 1, 2]).is_err());
        assert!(board.apply_order(&[0, 0, 1, 2]).is_err());
        assert!(board.apply_order(&[0, 1, 2, 4]).is_err());
        assert!(board.apply_order(&[3, 2, 1, 0]).is_ok());
    }

    #[test]
    fn scenario_two_swaps_to_solve() {
        let mut board = Board::from_order(grid_2x2(), &[1, 0, 3, 2]).unwrap();
        board.swap(0, 1).unwrap();
        assert_eq!(board.slots(), &[0, 1, 3, 2]);
        assert!(!board.is_solved());
        board.swap(2, 3).unwrap();
        assert_eq!(board.slots(), &[0, 1, 2, 3]);
        assert!(board.is_solved());
    }
}
