use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridChoice {
    pub cols: u32,
    pub rows: u32,
}

/// Grids below 2x2 are rejected: a single-dimension grid breaks the
/// background-position percentage math, and a 1-piece board can never leave
/// the solved state, so the shuffle rejection loop would not terminate.
pub const GRID_DIM_MIN: u32 = 2;

pub const GRID_CHOICES: [GridChoice; 4] = [
    GridChoice { cols: 2, rows: 2 },
    GridChoice { cols: 3, rows: 3 },
    GridChoice { cols: 4, rows: 4 },
    GridChoice { cols: 5, rows: 5 },
];
pub const DEFAULT_GRID: GridChoice = GRID_CHOICES[0];

/// Fraction of the viewport height the board may occupy.
pub const BOARD_MAX_VIEWPORT_FRAC: f32 = 0.7;

impl GridChoice {
    pub fn new(cols: u32, rows: u32) -> Result<Self, GridError> {
        if cols < GRID_DIM_MIN || rows < GRID_DIM_MIN {
            return Err(GridError::TooSmall { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    pub fn total(&self) -> usize {
        (self.cols * self.rows) as usize
    }
}

pub fn grid_choice_index(choices: &[GridChoice], cols: u32, rows: u32) -> Option<usize> {
    choices
        .iter()
        .position(|choice| choice.cols == cols && choice.rows == rows)
}

pub fn grid_choice_label(choice: &GridChoice) -> String {
    format!("{}x{}", choice.cols, choice.rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    TooSmall { cols: u32, rows: u32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::TooSmall { cols, rows } => {
                write!(f, "grid must be at least {GRID_DIM_MIN}x{GRID_DIM_MIN}, got {cols}x{rows}")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardFit {
    pub width: f32,
    pub height: f32,
}

/// Size the board to fill the available width at the image's aspect ratio,
/// shrinking to the height cap when the width-derived height exceeds it.
pub fn fit_board(ratio: f32, max_width: f32, max_height: f32) -> BoardFit {
    let safe_ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
    let mut width = max_width.max(1.0);
    let mut height = width / safe_ratio;
    let max_height = max_height.max(1.0);
    if height > max_height {
        height = max_height;
        width = height * safe_ratio;
    }
    BoardFit { width, height }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_grids() {
        assert!(GridChoice::new(1, 1).is_err());
        assert!(GridChoice::new(1, 4).is_err());
        assert!(GridChoice::new(4, 1).is_err());
        assert_eq!(GridChoice::new(4, 3), Ok(GridChoice { cols: 4, rows: 3 }));
    }

    #[test]
    fn presets_are_all_valid() {
        for choice in GRID_CHOICES {
            assert!(GridChoice::new(choice.cols, choice.rows).is_ok());
            assert!(choice.total() >= 4);
        }
    }

    #[test]
    fn choice_index_matches_presets() {
        assert_eq!(grid_choice_index(&GRID_CHOICES, 3, 3), Some(1));
        assert_eq!(grid_choice_index(&GRID_CHOICES, 7, 7), None);
    }

    #[test]
    fn fit_is_width_constrained_for_wide_viewports() {
        let fit = fit_board(2.0, 800.0, 700.0);
        assert_eq!(fit.width, 800.0);
        assert_eq!(fit.height, 400.0);
    }

    #[test]
    fn fit_is_height_capped_for_tall_images() {
        let fit = fit_board(0.5, 800.0, 600.0);
        assert_eq!(fit.height, 600.0);
        assert_eq!(fit.width, 300.0);
    }

    #[test]
    fn fit_survives_bad_ratio() {
        let fit = fit_board(0.0, 400.0, 400.0);
        assert!(fit.width > 0.0 && fit.height > 0.0);
    }
}
