#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(String::len)
                .max()
                .unwrap_or(0)
                .max(header.len())
                .max(6)
        })
        .collect();

    fit_widths(&mut widths, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format!("{:<width$}", truncate_text(header, *width)))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(header_line.len());

    let row_lines = rows
        .iter()
        .map(|row| {
            widths
                .iter()
                .enumerate()
                .map(|(index, width)| {
                    let value = row.get(index).cloned().unwrap_or_else(|| "-".to_string());
                    format!("{:<width$}", truncate_text(&value, *width))
                })
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(2 + row_lines.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    if widths.is_empty() {
        return;
    }

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total: usize = widths.iter().sum::<usize>() + separators;

    // Shrink the widest column until the table fits or nothing can shrink.
    while total > max_width {
        let Some((index, width)) = widths
            .iter()
            .copied()
            .enumerate()
            .max_by_key(|(_, width)| *width)
        else {
            return;
        };
        if width <= 6 {
            return;
        }
        widths[index] = width - 1;
        total -= 1;
    }
}

fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 1 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::{TableOptions, render_entity_table};

    #[test]
    fn alignment_handles_mixed_widths() {
        let headers = ["code", "status", "title"];
        let rows = vec![
            vec!["1.1".to_string(), "done".to_string(), "short".to_string()],
            vec![
                "10.2".to_string(),
                "pending".to_string(),
                "a much longer title".to_string(),
            ],
        ];

        let table = render_entity_table(&headers, &rows, TableOptions { max_width: None });
        let lines: Vec<&str> = table.lines().collect();

        assert!(lines.len() >= 4);
        assert!(lines[0].contains("code"));
        assert!(lines[0].contains("status"));
        assert!(lines[1].chars().all(|c| c == '-'));
    }

    #[test]
    fn wide_tables_shrink_to_fit() {
        let headers = ["description"];
        let rows = vec![vec!["x".repeat(200)]];
        let table = render_entity_table(&headers, &rows, TableOptions { max_width: Some(40) });
        assert!(table.lines().all(|line| line.chars().count() <= 40));
    }
}
