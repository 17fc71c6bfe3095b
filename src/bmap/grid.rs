use std::collections::HashMap;

use serde::ser::{Serialize, Serializer};

use super::MAP_SIZE;

/// One character per terrain id, indexed by tile id.
pub const TEXT_PALETTE: &str = "X~*O+%rGxB";

/// Sparse map of decoded tiles keyed by `(x, y)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileGrid {
    tiles: HashMap<(u8, u8), u8>,
}

#[derive(serde::Serialize)]
struct TileEntry {
    x: u8,
    y: u8,
    tile: u8,
}

impl TileGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, x: u8, y: u8, tile: u8) -> Option<u8> {
        self.tiles.insert((x, y), tile)
    }

    pub fn get(&self, x: u8, y: u8) -> Option<u8> {
        self.tiles.get(&(x, y)).copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Set tiles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = ((u8, u8), u8)> + '_ {
        self.tiles.iter().map(|(&pos, &tile)| (pos, tile))
    }

    /// Row-major `MAP_SIZE * MAP_SIZE` plane, `fill` where no tile is set.
    pub fn to_dense(&self, fill: u8) -> Vec<u8> {
        let mut plane = vec![fill; MAP_SIZE * MAP_SIZE];
        for (&(x, y), &tile) in &self.tiles {
            plane[y as usize * MAP_SIZE + x as usize] = tile;
        }
        plane
    }

    /// Render the grid as `MAP_SIZE` lines of [`TEXT_PALETTE`] characters.
    /// Unset cells are spaces; ids past the palette print as `?`.
    pub fn to_text(&self) -> String {
        let palette: Vec<char> = TEXT_PALETTE.chars().collect();
        let mut out = String::with_capacity((MAP_SIZE + 1) * MAP_SIZE);
        for y in 0..MAP_SIZE {
            for x in 0..MAP_SIZE {
                let c = match self.get(x as u8, y as u8) {
                    None => ' ',
                    Some(tile) => palette.get(tile as usize).copied().unwrap_or('?'),
                };
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl Serialize for TileGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<TileEntry> = self
            .iter()
            .map(|((x, y), tile)| TileEntry { x, y, tile })
            .collect();
        entries.sort_by_key(|e| (e.y, e.x));
        serializer.collect_seq(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(tiles: &[((u8, u8), u8)]) -> TileGrid {
        let mut grid = TileGrid::new();
        for &((x, y), tile) in tiles {
            grid.set(x, y, tile);
        }
        grid
    }

    #[test]
    fn test_last_write_wins() {
        let mut grid = grid(&[((1, 1), 4)]);
        assert_eq!(grid.set(1, 1, 6), Some(4));
        assert_eq!(grid.get(1, 1), Some(6));
        assert_eq!(grid.get(2, 1), None);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_to_dense() {
        let plane = grid(&[((0, 0), 1), ((255, 0), 2), ((3, 2), 7), ((255, 255), 9)]).to_dense(0);
        assert_eq!(plane.len(), 65536);
        assert_eq!(plane[0], 1);
        assert_eq!(plane[255], 2);
        assert_eq!(plane[2 * 256 + 3], 7);
        assert_eq!(plane[65535], 9);
        assert_eq!(plane.iter().filter(|&&t| t != 0).count(), 4);
    }

    #[test]
    fn test_to_text() {
        let text = grid(&[((0, 0), 0), ((1, 0), 7), ((2, 0), 14), ((1, 1), 1)]).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 256);
        assert!(lines.iter().all(|line| line.len() == 256));
        assert!(lines[0].starts_with("XG? "));
        assert!(lines[1].starts_with(" ~ "));
        assert!(lines[2].trim().is_empty());
    }

    #[test]
    fn test_serialize_sorted() {
        let json = serde_json::to_string(&grid(&[((5, 1), 2), ((9, 0), 3)])).unwrap();
        assert_eq!(
            json,
            r#"[{"x":9,"y":0,"tile":3},{"x":5,"y":1,"tile":2}]"#
        );
    }
}
