use std::path::Path;

use super::InputError;

/// A semicolon-separated file: a header row followed by data rows.
///
/// Blank lines are skipped. Every data row must have as many cells as the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Table {
    pub(crate) file: String,
    /// The 1-based line number of the header row.
    pub(crate) header_line: usize,
    pub(crate) header: Vec<String>,
    pub(crate) rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    /// The 1-based line number in the file.
    pub(crate) line: usize,
    pub(crate) cells: Vec<String>,
}

impl Table {
    pub(crate) fn read(path: &Path) -> Result<Table, InputError> {
        let content = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            file: path.display().to_string(),
            source,
        })?;
        Table::parse(&path.display().to_string(), &content)
    }

    pub(crate) fn parse(file: &str, content: &str) -> Result<Table, InputError> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((header_line, header)) = lines.next() else {
            return Err(InputError::malformed(file, 1, "the file has no header row"));
        };
        let header = split_cells(header);

        let rows = lines
            .map(|(line, text)| {
                let cells = split_cells(text);
                if cells.len() != header.len() {
                    return Err(InputError::malformed(
                        file,
                        line,
                        format!(
                            "expected {} cells like the header, found {}",
                            header.len(),
                            cells.len()
                        ),
                    ));
                }
                Ok(Row { line, cells })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Table {
            file: file.to_owned(),
            header_line,
            header,
            rows,
        })
    }

    /// The number of cells after the first (name) column.
    pub(crate) fn num_value_columns(&self) -> usize {
        self.header.len().saturating_sub(1)
    }

    pub(crate) fn error(&self, row: &Row, reason: impl Into<String>) -> InputError {
        InputError::malformed(&self.file, row.line, reason)
    }

    pub(crate) fn header_error(&self, reason: impl Into<String>) -> InputError {
        InputError::malformed(&self.file, self.header_line, reason)
    }
}

impl Row {
    pub(crate) fn name(&self) -> &str {
        &self.cells[0]
    }

    /// The cells after the first (name) column.
    pub(crate) fn values(&self) -> &[String] {
        &self.cells[1..]
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(';').map(|cell| cell.trim().to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_keep_their_line_numbers() {
        let table = Table::parse("teams.csv", "team;d1;d2\n\nA;J;N\r\nB ; N ; J\n")
            .expect("well-formed table");

        assert_eq!(1, table.header_line);
        assert_eq!(vec!["team", "d1", "d2"], table.header);
        assert_eq!(2, table.num_value_columns());
        assert_eq!(3, table.rows[0].line);
        assert_eq!(4, table.rows[1].line);
        assert_eq!("B", table.rows[1].name());
        assert_eq!(vec!["N", "J"], table.rows[1].values());
    }

    #[test]
    fn short_rows_are_rejected_with_their_line() {
        let error = Table::parse("teams.csv", "team;d1;d2\nA;J\n").expect_err("row too short");

        assert!(matches!(
            error,
            InputError::MalformedInput { line: 2, .. }
        ));
        assert!(error.to_string().contains("teams.csv"));
    }

    #[test]
    fn empty_files_have_no_header() {
        assert!(matches!(
            Table::parse("empty.csv", "\n  \n"),
            Err(InputError::MalformedInput { line: 1, .. })
        ));
    }
}
