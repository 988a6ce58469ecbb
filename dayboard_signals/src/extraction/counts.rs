//! Activity counting for signal files.

/// A table row made only of `-`/`:` cells, such as `|---|:--:|`.
fn is_separator_row(line: &str) -> bool {
    let inner = line.trim().trim_matches('|');
    !inner.trim().is_empty()
        && inner
            .split('|')
            .map(str::trim)
            .all(|cell| !cell.is_empty() && cell.chars().all(|c| c == '-' || c == ':'))
}

/// Heuristic activity count: the larger of table rows and bullet lines.
///
/// Header rows count as table rows. Only lines starting in column zero are
/// considered.
#[must_use]
pub fn count_signal_lines(text: &str) -> usize {
    let mut rows = 0;
    let mut bullets = 0;

    for line in text.lines() {
        if line.starts_with('|') && !is_separator_row(line) {
            rows += 1;
        } else if line.starts_with("- ") {
            bullets += 1;
        }
    }

    rows.max(bullets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_of_rows_and_bullets() {
        let text = "| Id | Title |\n|---|---|\n| 1 | a |\n| 2 | b |\n- note\n";
        assert_eq!(count_signal_lines(text), 3);

        let text = "- a\n- b\n- c\n- d\n| x |\n";
        assert_eq!(count_signal_lines(text), 4);
    }

    #[test]
    fn test_separator_rows_are_not_counted() {
        assert_eq!(count_signal_lines("|---|\n| :-- | --: |\n"), 0);
    }

    #[test]
    fn test_indented_lines_do_not_count() {
        assert_eq!(count_signal_lines("  - nested\n  | cell |\n-no space\n"), 0);
    }

    #[test]
    fn test_empty_text_counts_zero() {
        assert_eq!(count_signal_lines(""), 0);
    }
}
