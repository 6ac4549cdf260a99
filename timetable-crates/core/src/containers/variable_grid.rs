use crate::timetable_assert_simple;
use crate::variables::DomainId;

/// A row-major matrix of variables, addressed by `(row, column)`.
///
/// The timetable model keeps one grid per kind of entity (teams, instructors and rooms) with one
/// row per entity and one column per time slot. Constraints are posted over slices of a grid:
/// a whole row, a window of consecutive columns in a row, or a column across all rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableGrid {
    num_rows: usize,
    num_columns: usize,
    cells: Vec<DomainId>,
}

impl VariableGrid {
    /// Creates a grid by calling `create_cell(row, column)` for every cell in row-major order.
    pub fn new(
        num_rows: usize,
        num_columns: usize,
        mut create_cell: impl FnMut(usize, usize) -> DomainId,
    ) -> VariableGrid {
        let mut cells = Vec::with_capacity(num_rows * num_columns);
        for row in 0..num_rows {
            for column in 0..num_columns {
                cells.push(create_cell(row, column));
            }
        }

        VariableGrid {
            num_rows,
            num_columns,
            cells,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn get(&self, row: usize, column: usize) -> DomainId {
        timetable_assert_simple!(row < self.num_rows && column < self.num_columns);
        self.cells[row * self.num_columns + column]
    }

    pub fn row(&self, row: usize) -> &[DomainId] {
        self.window(row, 0, self.num_columns)
    }

    /// The `length` consecutive cells of `row` starting at column `start`.
    pub fn window(&self, row: usize, start: usize, length: usize) -> &[DomainId] {
        timetable_assert_simple!(row < self.num_rows);
        timetable_assert_simple!(start + length <= self.num_columns);

        let offset = row * self.num_columns + start;
        &self.cells[offset..offset + length]
    }

    pub fn column(&self, column: usize) -> Vec<DomainId> {
        (0..self.num_rows).map(|row| self.get(row, column)).collect()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[DomainId] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    fn grid() -> VariableGrid {
        VariableGrid::new(2, 3, |row, column| {
            DomainId::create_from_index(row * 10 + column)
        })
    }

    fn ids(domains: &[DomainId]) -> Vec<usize> {
        domains.iter().map(|domain| domain.index()).collect()
    }

    #[test]
    fn rows_and_windows_are_contiguous_slices() {
        let grid = grid();

        assert_eq!(vec![10, 11, 12], ids(grid.row(1)));
        assert_eq!(vec![1, 2], ids(grid.window(0, 1, 2)));
        assert_eq!(12, grid.get(1, 2).index());
    }

    #[test]
    fn columns_cross_all_rows() {
        let grid = grid();

        assert_eq!(vec![1, 11], ids(&grid.column(1)));
        assert_eq!(6, grid.cells().len());
    }
}
