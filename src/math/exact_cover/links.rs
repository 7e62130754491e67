//! The toroidal doubly-linked lists behind [`ExactCover`](super::ExactCover).
//!
//! Every node lives in one arena and refers to its neighbours by index.
//! Index `0` is the root, indices `1..=columns` are the column headers and
//! data nodes follow in creation order.

use std::collections::HashMap;

/// Arena index of the root node.
pub(super) const ROOT: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum NodeKind {
    Root,
    Header,
    Data,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Logical column this node belongs to (unused for the root).
    column: usize,
    /// Logical row this node occupies (unused for the root and headers).
    row: usize,
    kind: NodeKind,
    /// Whether a data node is currently linked into its row and column.
    live: bool,
}

impl Node {
    fn new(index: usize, column: usize, row: usize, kind: NodeKind) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
            row,
            kind,
            live: kind == NodeKind::Data,
        }
    }
}

/// Per-column bookkeeping kept beside the header nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Header {
    size: usize,
    name: i64,
}

/// Dancing-links arena: the root, one header per column and the data nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Links {
    nodes: Vec<Node>,
    headers: Vec<Header>,
    /// `(column, row)` to arena index, for every data node ever created.
    cells: HashMap<(usize, usize), usize>,
    /// Leftmost live node of each row.
    row_heads: Vec<Option<usize>>,
}

impl Links {
    /// Builds the root and `columns` headers, linked left to right.
    pub(super) fn new(columns: usize, rows: usize) -> Self {
        let mut nodes = Vec::with_capacity(1 + columns);
        nodes.push(Node::new(ROOT, 0, 0, NodeKind::Root));
        for col in 0..columns {
            let index = col + 1;
            let mut header = Node::new(index, col, 0, NodeKind::Header);
            header.left = index - 1;
            header.right = if col + 1 == columns { ROOT } else { index + 1 };
            nodes.push(header);
        }
        if columns > 0 {
            nodes[ROOT].left = columns;
            nodes[ROOT].right = 1;
        }

        Links {
            nodes,
            headers: (0..columns)
                .map(|col| Header {
                    size: 0,
                    name: col as i64,
                })
                .collect(),
            cells: HashMap::new(),
            row_heads: vec![None; rows],
        }
    }

    #[inline]
    pub(super) fn header(col: usize) -> usize {
        col + 1
    }

    #[inline]
    pub(super) fn left(&self, index: usize) -> usize {
        self.nodes[index].left
    }

    #[inline]
    pub(super) fn right(&self, index: usize) -> usize {
        self.nodes[index].right
    }

    #[inline]
    pub(super) fn down(&self, index: usize) -> usize {
        self.nodes[index].down
    }

    #[inline]
    pub(super) fn column_of(&self, index: usize) -> usize {
        self.nodes[index].column
    }

    #[inline]
    pub(super) fn row_of(&self, index: usize) -> usize {
        self.nodes[index].row
    }

    #[inline]
    pub(super) fn kind(&self, index: usize) -> NodeKind {
        self.nodes[index].kind
    }

    pub(super) fn size(&self, col: usize) -> Option<usize> {
        self.headers.get(col).map(|h| h.size)
    }

    pub(super) fn name(&self, col: usize) -> Option<i64> {
        self.headers.get(col).map(|h| h.name)
    }

    pub(super) fn set_name(&mut self, col: usize, name: i64) {
        if let Some(header) = self.headers.get_mut(col) {
            header.name = name;
        }
    }

    /// Leftmost live node of `row`, if the row has any.
    pub(super) fn row_head(&self, row: usize) -> Option<usize> {
        self.row_heads.get(row).copied().flatten()
    }

    pub(super) fn is_live(&self, col: usize, row: usize) -> bool {
        self.cells
            .get(&(col, row))
            .is_some_and(|&index| self.nodes[index].live)
    }

    /// True once every column has been covered.
    #[inline]
    pub(super) fn all_covered(&self) -> bool {
        self.nodes[ROOT].right == ROOT
    }

    /// Uncovered columns, in the root list's left-to-right order.
    pub(super) fn uncovered(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cursor = self.nodes[ROOT].right;
        std::iter::from_fn(move || {
            if cursor == ROOT {
                return None;
            }
            let col = self.nodes[cursor].column;
            cursor = self.nodes[cursor].right;
            Some(col)
        })
    }

    /// Links a `1` at `(col, row)`. Returns false when it was already set.
    ///
    /// The caller guarantees both indices are in range and that no column is
    /// covered.
    pub(super) fn insert(&mut self, col: usize, row: usize) -> bool {
        let index = match self.cells.get(&(col, row)) {
            Some(&index) if self.nodes[index].live => return false,
            Some(&index) => {
                self.nodes[index].live = true;
                index
            }
            None => {
                let index = self.nodes.len();
                self.nodes.push(Node::new(index, col, row, NodeKind::Data));
                self.cells.insert((col, row), index);
                index
            }
        };

        self.link_vertical(index);
        self.link_horizontal(index);
        self.headers[col].size += 1;
        true
    }

    /// Unlinks the `1` at `(col, row)`. Returns false when there was none.
    ///
    /// The node stays in the arena, dormant, so setting the cell again reuses
    /// it.
    pub(super) fn remove(&mut self, col: usize, row: usize) -> bool {
        let Some(&index) = self.cells.get(&(col, row)) else {
            return false;
        };
        if !self.nodes[index].live {
            return false;
        }

        let (up, down) = (self.nodes[index].up, self.nodes[index].down);
        self.nodes[up].down = down;
        self.nodes[down].up = up;

        let (left, right) = (self.nodes[index].left, self.nodes[index].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        if self.row_heads[row] == Some(index) {
            self.row_heads[row] = if right == index { None } else { Some(right) };
        }

        let node = &mut self.nodes[index];
        node.live = false;
        node.left = index;
        node.right = index;
        node.up = index;
        node.down = index;
        self.headers[col].size -= 1;
        true
    }

    /// Places `index` in its column, keeping the column in row order.
    fn link_vertical(&mut self, index: usize) {
        let header = Self::header(self.nodes[index].column);
        let row = self.nodes[index].row;

        let mut below = self.nodes[header].down;
        while below != header && self.nodes[below].row < row {
            below = self.nodes[below].down;
        }

        let above = self.nodes[below].up;
        self.nodes[index].up = above;
        self.nodes[index].down = below;
        self.nodes[above].down = index;
        self.nodes[below].up = index;
    }

    /// Places `index` in its row, keeping the row in column order.
    fn link_horizontal(&mut self, index: usize) {
        let row = self.nodes[index].row;
        let col = self.nodes[index].column;

        let Some(head) = self.row_heads[row] else {
            self.nodes[index].left = index;
            self.nodes[index].right = index;
            self.row_heads[row] = Some(index);
            return;
        };

        let mut after = head;
        loop {
            if self.nodes[after].column > col {
                break;
            }
            after = self.nodes[after].right;
            if after == head {
                break;
            }
        }

        let before = self.nodes[after].left;
        self.nodes[index].left = before;
        self.nodes[index].right = after;
        self.nodes[before].right = index;
        self.nodes[after].left = index;

        if col < self.nodes[head].column {
            self.row_heads[row] = Some(index);
        }
    }

    /// Removes column `col` from the header list and every row that meets it
    /// from the other columns. Returns the number of nodes unlinked.
    pub(super) fn cover(&mut self, col: usize) -> u64 {
        let header = Self::header(col);
        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut updates = 0;
        let mut i = self.nodes[header].down;
        while i != header {
            let mut j = self.nodes[i].right;
            while j != i {
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.headers[self.nodes[j].column].size -= 1;
                updates += 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
        updates
    }

    /// Exact inverse of [`Links::cover`]; must be applied in reverse order of
    /// the covers it undoes.
    pub(super) fn uncover(&mut self, col: usize) {
        let header = Self::header(col);

        let mut i = self.nodes[header].up;
        while i != header {
            let mut j = self.nodes[i].left;
            while j != i {
                self.headers[self.nodes[j].column].size += 1;
                let (up, down) = (self.nodes[j].up, self.nodes[j].down);
                self.nodes[up].down = j;
                self.nodes[down].up = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let (left, right) = (self.nodes[header].left, self.nodes[header].right);
        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_rows(links: &Links, col: usize) -> Vec<usize> {
        let header = Links::header(col);
        let mut rows = Vec::new();
        let mut node = links.down(header);
        while node != header {
            rows.push(links.row_of(node));
            node = links.down(node);
        }
        rows
    }

    fn row_columns(links: &Links, row: usize) -> Vec<usize> {
        let Some(head) = links.row_head(row) else {
            return vec![];
        };
        let mut cols = vec![links.column_of(head)];
        let mut node = links.right(head);
        while node != head {
            cols.push(links.column_of(node));
            node = links.right(node);
        }
        cols
    }

    #[test]
    fn test_headers_linked_in_order() {
        let links = Links::new(4, 2);
        assert_eq!(links.uncovered().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(links.left(ROOT), 4);
        assert_eq!(links.kind(ROOT), NodeKind::Root);
        assert_eq!(links.kind(Links::header(2)), NodeKind::Header);
        for col in 0..4 {
            assert_eq!(links.size(col), Some(0));
            assert_eq!(links.name(col), Some(col as i64));
        }
    }

    #[test]
    fn test_empty_links() {
        let links = Links::new(0, 0);
        assert!(links.all_covered());
        assert_eq!(links.uncovered().count(), 0);
        assert_eq!(links.size(0), None);
    }

    #[test]
    fn test_insert_keeps_row_order_in_columns() {
        let mut links = Links::new(2, 5);
        assert!(links.insert(0, 3));
        assert!(links.insert(0, 1));
        assert!(links.insert(0, 4));
        assert!(links.insert(0, 0));
        assert!(!links.insert(0, 3));
        assert_eq!(column_rows(&links, 0), vec![0, 1, 3, 4]);
        assert_eq!(links.size(0), Some(4));
    }

    #[test]
    fn test_insert_keeps_column_order_in_rows() {
        let mut links = Links::new(5, 1);
        links.insert(3, 0);
        links.insert(1, 0);
        links.insert(4, 0);
        links.insert(0, 0);
        assert_eq!(row_columns(&links, 0), vec![0, 1, 3, 4]);
        assert_eq!(links.kind(links.row_head(0).unwrap()), NodeKind::Data);
    }

    #[test]
    fn test_single_node_row_links_to_itself() {
        let mut links = Links::new(3, 1);
        links.insert(1, 0);
        let node = links.row_head(0).unwrap();
        assert_eq!(links.left(node), node);
        assert_eq!(links.right(node), node);
        assert_eq!(links.nodes[node].up, Links::header(1));
        assert_eq!(links.down(node), Links::header(1));
    }

    #[test]
    fn test_remove_and_reinsert() {
        let mut links = Links::new(3, 2);
        links.insert(0, 0);
        links.insert(2, 0);
        links.insert(2, 1);

        assert!(links.remove(0, 0));
        assert!(!links.remove(0, 0));
        assert!(!links.remove(1, 1));
        assert!(!links.is_live(0, 0));
        assert_eq!(links.size(0), Some(0));
        assert_eq!(row_columns(&links, 0), vec![2]);

        assert!(links.insert(0, 0));
        assert!(links.is_live(0, 0));
        assert_eq!(row_columns(&links, 0), vec![0, 2]);
        assert_eq!(column_rows(&links, 2), vec![0, 1]);
        assert_eq!(links.nodes.len(), 1 + 3 + 3);
    }

    #[test]
    fn test_remove_last_node_empties_row() {
        let mut links = Links::new(1, 1);
        links.insert(0, 0);
        links.remove(0, 0);
        assert_eq!(links.row_head(0), None);
        assert_eq!(column_rows(&links, 0), Vec::<usize>::new());
    }

    #[test]
    fn test_cover_uncover_restores_structure() {
        let mut links = Links::new(4, 4);
        for &(col, row) in &[(0, 0), (2, 0), (1, 1), (2, 1), (3, 2), (0, 3), (3, 3)] {
            links.insert(col, row);
        }
        let snapshot = links.clone();

        let updates = links.cover(2);
        assert_eq!(updates, 2);
        assert_eq!(links.uncovered().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(links.size(0), Some(1));
        assert_eq!(links.size(1), Some(0));

        links.cover(0);
        assert_eq!(links.size(3), Some(1));
        links.uncover(0);
        links.uncover(2);

        assert_eq!(links, snapshot);
    }

    #[test]
    fn test_cover_all_columns() {
        let mut links = Links::new(2, 1);
        links.insert(0, 0);
        links.insert(1, 0);
        links.cover(0);
        links.cover(1);
        assert!(links.all_covered());
        links.uncover(1);
        links.uncover(0);
        assert!(!links.all_covered());
    }
}
