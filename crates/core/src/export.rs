//! Plain-text rendering of a tally for the clipboard.

use crate::tally::Tally;

/// One `"<count> x <value>"` line.
pub fn count_line(value: &str, count: usize) -> String {
    format!("{} x {}", count, value)
}

/// Render `tally` as text blocks, one per column:
///
/// ```text
/// Size:
/// 2 x M
///
/// Color:
/// 2 x Red
/// 1 x Blue
/// ```
///
/// Blocks are separated by a single blank line with nothing trailing.
/// An empty tally renders as an empty string.
pub fn export(tally: &Tally) -> String {
    tally
        .iter()
        .map(|(column, values)| {
            let mut block = format!("{}:", column);
            for (value, count) in values {
                block.push('\n');
                block.push_str(&count_line(value, *count));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnSpec;
    use crate::tally::aggregate;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_export_blocks() {
        let rows = vec![row(&["m", "red"]), row(&["M", "RED"]), row(&["null", "blue"])];
        let columns = vec![ColumnSpec::new(0, "Size"), ColumnSpec::new(1, "Color")];
        let text = export(&aggregate(&rows, &columns));
        assert_eq!(text, "Size:\n2 x M\n\nColor:\n2 x Red\n1 x Blue");
    }

    #[test]
    fn test_export_single_column() {
        let mut tally = Tally::new();
        tally.record("Boots", "42".to_string());
        assert_eq!(export(&tally), "Boots:\n1 x 42");
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export(&Tally::new()), "");
    }
}
