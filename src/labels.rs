/// Seats per grid row.
pub const COLUMNS: usize = 4;

const COLUMN_LETTERS: [char; COLUMNS] = ['A', 'B', 'C', 'D'];

/// Label for a zero-based grid coordinate, e.g. row 1 column 2 is "C2".
pub fn seat_label(row: usize, col: usize) -> String {
    format!("{}{}", COLUMN_LETTERS[col % COLUMNS], row + 1)
}

/// Inverse of [`seat_label`]. Returns zero-based `(row, col)`.
pub fn parse_seat_label(label: &str) -> Option<(usize, usize)> {
    let mut chars = label.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let col = COLUMN_LETTERS.iter().position(|&c| c == letter)?;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col))
}
