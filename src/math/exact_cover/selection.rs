use super::links::Links;

/// Policy deciding which uncovered column the search branches on next.
///
/// Both policies find the same solutions; they differ in how many search
/// nodes it takes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColumnSelection {
    /// The uncovered column with the fewest live nodes, ties going to the
    /// leftmost one (Knuth's "S heuristic").
    #[default]
    SmallestSize,
    /// Always the leftmost uncovered column.
    FirstUncovered,
}

impl ColumnSelection {
    /// Picks a column, or `None` when every column is covered.
    pub(super) fn select(self, links: &Links) -> Option<usize> {
        match self {
            ColumnSelection::FirstUncovered => links.uncovered().next(),
            ColumnSelection::SmallestSize => {
                let mut best: Option<(usize, usize)> = None;
                for col in links.uncovered() {
                    let size = links.size(col).unwrap_or(0);
                    if best.map_or(true, |(_, best_size)| size < best_size) {
                        best = Some((col, size));
                        if size == 0 {
                            // Nothing can beat an empty column.
                            break;
                        }
                    }
                }
                best.map(|(col, _)| col)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links_with(columns: usize, rows: usize, cells: &[(usize, usize)]) -> Links {
        let mut links = Links::new(columns, rows);
        for &(col, row) in cells {
            links.insert(col, row);
        }
        links
    }

    #[test]
    fn test_smallest_size_prefers_fewest_nodes() {
        let links = links_with(3, 3, &[(0, 0), (0, 1), (1, 0), (1, 1), (1, 2), (2, 2)]);
        assert_eq!(ColumnSelection::SmallestSize.select(&links), Some(2));
    }

    #[test]
    fn test_smallest_size_breaks_ties_leftmost() {
        let links = links_with(3, 2, &[(0, 0), (0, 1), (1, 0), (2, 1)]);
        assert_eq!(ColumnSelection::SmallestSize.select(&links), Some(1));
    }

    #[test]
    fn test_smallest_size_stops_at_empty_column() {
        let links = links_with(3, 1, &[(0, 0), (2, 0)]);
        assert_eq!(ColumnSelection::SmallestSize.select(&links), Some(1));
    }

    #[test]
    fn test_first_uncovered_skips_covered_columns() {
        let mut links = links_with(3, 1, &[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(ColumnSelection::FirstUncovered.select(&links), Some(0));
        links.cover(0);
        assert_eq!(ColumnSelection::FirstUncovered.select(&links), Some(1));
        links.uncover(0);
    }

    #[test]
    fn test_nothing_to_select() {
        let links = Links::new(0, 0);
        assert_eq!(ColumnSelection::SmallestSize.select(&links), None);
        assert_eq!(ColumnSelection::FirstUncovered.select(&links), None);
    }

    #[test]
    fn test_default_is_smallest_size() {
        assert_eq!(ColumnSelection::default(), ColumnSelection::SmallestSize);
    }
}
