//! Plain-text table rendering for `graft list`.

use console::measure_text_width;

/// A table with a header row and box-drawing borders.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Table {
    /// Create a table with the given column headers.
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let widths = headers.iter().map(|h| measure_text_width(h)).collect();
        Self {
            headers,
            rows: Vec::new(),
            widths,
        }
    }

    /// Add a row. Extra cells beyond the header count are dropped; missing
    /// cells render empty.
    pub fn add_row(&mut self, cells: &[&str]) {
        let mut row: Vec<String> = cells
            .iter()
            .take(self.headers.len())
            .map(|c| c.to_string())
            .collect();
        row.resize(self.headers.len(), String::new());

        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }
        self.rows.push(row);
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);
        lines.push(self.border('┌', '┬', '┐'));
        lines.push(self.line(&self.headers));
        lines.push(self.border('├', '┼', '┤'));
        lines.extend(self.rows.iter().map(|row| self.line(row)));
        lines.push(self.border('└', '┴', '┘'));
        lines.join("\n")
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn line(&self, cells: &[String]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| {
                let pad = width - measure_text_width(cell);
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("│{}│", padded.join("│"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let mut table = Table::new(&["#", "Feature"]);
        table.add_row(&["1", "docker"]);

        let expected = "\
┌───┬─────────┐
│ # │ Feature │
├───┼─────────┤
│ 1 │ docker  │
└───┴─────────┘";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn columns_grow_to_widest_cell() {
        let mut table = Table::new(&["A"]);
        table.add_row(&["wide cell"]);
        assert!(table.render().contains("│ A         │"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(&["only"]);
        assert_eq!(table.row_count(), 1);
        assert!(table.render().contains("│ only │   │"));
    }

    #[test]
    fn empty_table() {
        let table = Table::new(&["A"]);
        assert!(table.is_empty());
    }
}
