// 📋 Report Rendering - Plain-text grids for validation findings

/// Render findings as a bordered grid, one row per finding. Rows shorter
/// than the header are padded with empty cells.
pub fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let border = |fill: char| -> String {
        let mut line = String::from("+");
        for width in &widths {
            line.push_str(&fill.to_string().repeat(width + 2));
            line.push('+');
        }
        line
    };

    let format_row = |cells: &[String]| -> String {
        let mut line = String::from("|");
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = width - cell.chars().count();
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(padding + 1));
            line.push('|');
        }
        line
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut out = String::new();
    out.push_str(&border('-'));
    out.push('\n');
    out.push_str(&format_row(&header_cells));
    out.push('\n');
    out.push_str(&border('='));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row));
        out.push('\n');
        out.push_str(&border('-'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_pads_columns_to_widest_cell() {
        let rows = vec![
            vec!["orders".to_string(), "2".to_string()],
            vec!["order_items".to_string(), "13".to_string()],
        ];
        let grid = render_grid(&["table", "count"], &rows);

        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines[0], "+-------------+-------+");
        assert_eq!(lines[1], "| table       | count |");
        assert_eq!(lines[2], "+=============+=======+");
        assert_eq!(lines[3], "| orders      | 2     |");
        assert_eq!(lines[5], "| order_items | 13    |");

        // Every line is the same visible width.
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_grid_with_no_rows_is_just_the_header() {
        let grid = render_grid(&["check"], &[]);
        assert_eq!(grid.lines().count(), 3);
    }
}
