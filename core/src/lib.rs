pub mod board;
pub mod grid;
pub mod shuffle;
pub mod slice;

pub use board::{Board, ImageInfo, Phase, Session, SessionError, SwapOutcome};
pub use grid::{
    fit_board, grid_choice_index, grid_choice_label, BoardFit, GridChoice, GridError,
    BOARD_MAX_VIEWPORT_FRAC, DEFAULT_GRID, GRID_CHOICES,
};
pub use shuffle::{fisher_yates, is_identity, scramble_order};
pub use slice::{tile_crop, tile_row_col, TileCrop};
