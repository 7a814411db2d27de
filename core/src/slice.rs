//! Maps a tile's correct index to the crop of the source image it shows,
//! expressed as CSS background-position/background-size percentages.

pub fn tile_row_col(index: usize, cols: u32) -> (u32, u32) {
    let cols = cols.max(1);
    ((index as u32) / cols, (index as u32) % cols)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCrop {
    pub offset_x_pct: f32,
    pub offset_y_pct: f32,
    pub size_x_pct: f32,
    pub size_y_pct: f32,
}

impl TileCrop {
    pub fn background_position(&self) -> String {
        format!("{}% {}%", self.offset_x_pct, self.offset_y_pct)
    }

    pub fn background_size(&self) -> String {
        format!("{}% {}%", self.size_x_pct, self.size_y_pct)
    }
}

// Background-position percentages interpolate over (N-1) steps; a
// single-tile axis has no steps and pins to 0%.
fn axis_offset_pct(step: u32, count: u32) -> f32 {
    if count <= 1 {
        0.0
    } else {
        step as f32 * 100.0 / (count - 1) as f32
    }
}

pub fn tile_crop(index: usize, cols: u32, rows: u32) -> TileCrop {
    let (row, col) = tile_row_col(index, cols);
    TileCrop {
        offset_x_pct: axis_offset_pct(col, cols),
        offset_y_pct: axis_offset_pct(row, rows),
        size_x_pct: cols as f32 * 100.0,
        size_y_pct: rows as f32 * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn row_col_covers_grid_exactly_once() {
        let (cols, rows) = (4u32, 3u32);
        let mut seen = HashSet::new();
        for index in 0..(cols * rows) as usize {
            let (row, col) = tile_row_col(index, cols);
            assert!(row < rows && col < cols);
            assert!(seen.insert((row, col)));
        }
        assert_eq!(seen.len(), (cols * rows) as usize);
    }

    #[test]
    fn two_by_two_corners() {
        assert_eq!(tile_crop(0, 2, 2).background_position(), "0% 0%");
        assert_eq!(tile_crop(1, 2, 2).background_position(), "100% 0%");
        assert_eq!(tile_crop(2, 2, 2).background_position(), "0% 100%");
        assert_eq!(tile_crop(3, 2, 2).background_position(), "100% 100%");
        assert_eq!(tile_crop(0, 2, 2).background_size(), "200% 200%");
    }

    #[test]
    fn interior_offsets_interpolate() {
        let crop = tile_crop(4, 3, 3);
        assert_eq!(crop.offset_x_pct, 50.0);
        assert_eq!(crop.offset_y_pct, 50.0);
        assert_eq!(crop.size_x_pct, 300.0);
    }

    #[test]
    fn single_dimension_axis_pins_to_zero() {
        // Not reachable through the difficulty presets, but the formula must
        // not divide by zero.
        let crop = tile_crop(2, 1, 4);
        assert_eq!(crop.offset_x_pct, 0.0);
        assert!(crop.offset_y_pct > 0.0);
    }

    #[test]
    fn crops_are_distinct_across_the_grid() {
        let (cols, rows) = (5u32, 4u32);
        let mut seen = HashSet::new();
        for index in 0..(cols * rows) as usize {
            let crop = tile_crop(index, cols, rows);
            assert!(seen.insert((crop.background_position(), crop.background_size())));
        }
    }
}
