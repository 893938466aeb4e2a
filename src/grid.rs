//! Survey grid index built from resolved trace placements

use std::collections::{BTreeSet, HashMap};

use crate::error::{CubeError, Result};
use crate::trace::TraceLocation;

/// Sorted, deduplicated inline/crossline axes plus reverse lookups from
/// grid id to axis offset.
#[derive(Debug, Clone)]
pub struct GridIndex {
    inline_axis: Vec<i32>,
    crossline_axis: Vec<i32>,
    inline_lookup: HashMap<i32, usize>,
    crossline_lookup: HashMap<i32, usize>,
}

impl GridIndex {
    /// Build the grid index from a batch of resolved placements.
    ///
    /// Axis order is ascending regardless of input order, and every id
    /// appears once however many traces share it.
    pub fn from_locations(locations: &[TraceLocation]) -> Result<Self> {
        let mut inlines = BTreeSet::new();
        let mut crosslines = BTreeSet::new();
        for loc in locations {
            inlines.insert(loc.inline);
            crosslines.insert(loc.crossline);
        }
        if inlines.is_empty() || crosslines.is_empty() {
            return Err(CubeError::EmptyGrid(
                "no trace placements resolved".to_string(),
            ));
        }

        let inline_axis: Vec<i32> = inlines.into_iter().collect();
        let crossline_axis: Vec<i32> = crosslines.into_iter().collect();
        let inline_lookup = inline_axis.iter().enumerate().map(|(i, &v)| (v, i)).collect();
        let crossline_lookup = crossline_axis
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i))
            .collect();

        Ok(Self {
            inline_axis,
            crossline_axis,
            inline_lookup,
            crossline_lookup,
        })
    }

    /// Ascending unique inline ids.
    pub fn inline_axis(&self) -> &[i32] {
        &self.inline_axis
    }

    /// Ascending unique crossline ids.
    pub fn crossline_axis(&self) -> &[i32] {
        &self.crossline_axis
    }

    /// Axis offset of an inline id.
    pub fn inline_index_of(&self, inline: i32) -> Option<usize> {
        self.inline_lookup.get(&inline).copied()
    }

    /// Axis offset of a crossline id.
    pub fn crossline_index_of(&self, crossline: i32) -> Option<usize> {
        self.crossline_lookup.get(&crossline).copied()
    }

    /// (inline count, crossline count).
    pub fn grid_shape(&self) -> (usize, usize) {
        (self.inline_axis.len(), self.crossline_axis.len())
    }

    /// Consume the index, keeping only the axis vectors.
    pub(crate) fn into_axes(self) -> (Vec<i32>, Vec<i32>) {
        (self.inline_axis, self.crossline_axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(inline: i32, crossline: i32) -> TraceLocation {
        TraceLocation {
            inline,
            crossline,
            x: 0.0,
            y: 0.0,
            synthesized: false,
        }
    }

    #[test]
    fn test_axes_sorted_and_unique() {
        let locations = vec![loc(3, 20), loc(1, 30), loc(2, 10), loc(3, 10), loc(1, 20)];
        let grid = GridIndex::from_locations(&locations).unwrap();
        assert_eq!(grid.inline_axis(), &[1, 2, 3]);
        assert_eq!(grid.crossline_axis(), &[10, 20, 30]);
        assert_eq!(grid.grid_shape(), (3, 3));
    }

    #[test]
    fn test_lookup_round_trip() {
        let locations = vec![loc(5, 100), loc(9, 300), loc(7, 200)];
        let grid = GridIndex::from_locations(&locations).unwrap();
        for (idx, &il) in grid.inline_axis().iter().enumerate() {
            assert_eq!(grid.inline_index_of(il), Some(idx));
        }
        for (idx, &xl) in grid.crossline_axis().iter().enumerate() {
            assert_eq!(grid.crossline_index_of(xl), Some(idx));
        }
        assert_eq!(grid.inline_index_of(6), None);
        assert_eq!(grid.crossline_index_of(150), None);
    }

    #[test]
    fn test_empty_locations_rejected() {
        let err = GridIndex::from_locations(&[]).unwrap_err();
        assert!(matches!(err, CubeError::EmptyGrid(_)));
    }

    #[test]
    fn test_negative_ids_sort_before_positive() {
        let locations = vec![loc(-2, 1), loc(4, 1), loc(0, 1)];
        let grid = GridIndex::from_locations(&locations).unwrap();
        assert_eq!(grid.inline_axis(), &[-2, 0, 4]);
    }
}
