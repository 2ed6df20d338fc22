//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&format!("{:<width$} ", col.header, width = col.width));
        }
        out.push('\n');

        for col in &self.columns {
            out.push_str(&format!("{} ", "-".repeat(col.width)));
        }
        out.push('\n');

        // Rows (missing cells render empty, padding ignores ANSI colors)
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(cell);
                out.push_str(&" ".repeat(col.width.saturating_sub(visible_len(cell)) + 1));
            }
            out.push('\n');
        }

        out
    }
}

/// Printable width of `s`, skipping `ESC[...m` sequences.
fn visible_len(s: &str) -> usize {
    let mut n = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => n += 1,
        }
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_pads_columns() {
        let mut t = Table::new(vec![Column::new("Name", 6), Column::new("Email", 5)]);
        t.add_row(vec!["Ravi".into(), "r@x".into()]);
        t.add_row(vec!["Meena".into()]);

        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name   Email ");
        assert_eq!(lines[1], "------ ----- ");
        assert_eq!(lines[2], "Ravi   r@x   ");
        assert_eq!(lines[3], "Meena        ");
    }

    #[test]
    fn test_colored_cells_keep_alignment() {
        let grey = crate::utils::colors::colorize_optional("");
        assert_eq!(visible_len(&grey), 2);

        let mut t = Table::new(vec![Column::new("A", 4), Column::new("B", 1)]);
        t.add_row(vec![grey, "x".into()]);
        let out = t.render();
        let row = out.lines().nth(2).unwrap();
        assert!(row.ends_with("   x "));
    }
}
