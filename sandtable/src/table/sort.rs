use std::cmp::Ordering;

use super::{TableError, TableModel};

/// How cell text is classified as numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumericMode {
    /// The entire trimmed cell must parse as a finite number.
    Strict,
    /// The longest leading numeric prefix counts ("12kg" sorts as 12),
    /// parseFloat-style.
    #[default]
    LenientPrefix,
}

/// Extract the numeric value of a trimmed cell under the given mode.
/// Returns None when the cell is to be compared as text.
pub fn numeric_value(cell: &str, mode: NumericMode) -> Option<f64> {
    let value = match mode {
        NumericMode::Strict => cell.parse::<f64>().ok()?,
        NumericMode::LenientPrefix => {
            let prefix = numeric_prefix(cell)?;
            prefix.parse::<f64>().ok()?
        }
    };
    value.is_finite().then_some(value)
}

/// The longest leading substring that looks like a floating-point literal:
/// optional sign, digits, optional decimal point and fraction, optional
/// exponent. Returns None if no digits are present before anything else.
fn numeric_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let dot = i;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - dot - 1;
        if int_digits == 0 && frac_digits == 0 {
            // Lone "." or "-." is not a number
            return None;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Optional exponent; only consumed if complete
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    Some(&s[..i])
}

/// Compare two trimmed cell values.
///
/// Both numeric under `mode`: numeric order. Otherwise: case-folded
/// lexicographic order on the text, with the raw text as a tiebreak so
/// distinct strings never compare equal by accident.
pub fn compare_cells(a: &str, b: &str, mode: NumericMode) -> Ordering {
    if let (Some(na), Some(nb)) = (numeric_value(a, mode), numeric_value(b, mode)) {
        // Values are finite, so partial_cmp cannot fail
        return na.partial_cmp(&nb).unwrap_or(Ordering::Equal);
    }

    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Reorder the table's rows by the content of one column.
///
/// The sort is stable: rows with equal keys keep their original relative
/// order, in both directions (descending reverses the comparison, not the
/// sorted rows). Fails fast on an invalid column index or a ragged table;
/// the row order is untouched on error.
pub fn sort_by_column(
    table: &mut TableModel,
    column: usize,
    ascending: bool,
    mode: NumericMode,
) -> Result<(), TableError> {
    let count = table.column_count();
    if column >= count {
        return Err(TableError::ColumnOutOfBounds {
            index: column,
            count,
        });
    }
    table.check_rectangular()?;

    log::debug!(
        "[sort] column={column} ascending={ascending} mode={mode:?} rows={}",
        table.rows.len()
    );

    table.rows.sort_by(|a, b| {
        let ord = compare_cells(a[column].trim(), b[column].trim(), mode);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_prefix() {
        assert_eq!(numeric_prefix("12kg"), Some("12"));
        assert_eq!(numeric_prefix("-3.5e2x"), Some("-3.5e2"));
        assert_eq!(numeric_prefix("3e"), Some("3"));
        assert_eq!(numeric_prefix(".5mm"), Some(".5"));
        assert_eq!(numeric_prefix("kg12"), None);
        assert_eq!(numeric_prefix(""), None);
        assert_eq!(numeric_prefix("-"), None);
        assert_eq!(numeric_prefix("-."), None);
    }

    #[test]
    fn test_numeric_value_modes() {
        assert_eq!(numeric_value("12kg", NumericMode::LenientPrefix), Some(12.0));
        assert_eq!(numeric_value("12kg", NumericMode::Strict), None);
        assert_eq!(numeric_value("12", NumericMode::Strict), Some(12.0));
        assert_eq!(numeric_value("inf", NumericMode::Strict), None);
        assert_eq!(numeric_value("NaN", NumericMode::Strict), None);
    }
}
