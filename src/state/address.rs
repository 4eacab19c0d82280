/// Returns the column letters for a zero-based column index (`0 -> "A"`, `26 -> "AA"`).
pub fn column_label(column: usize) -> String {
    let mut label = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        n -= 1;
        label.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Encodes a zero-based `(row, column)` pair as a spreadsheet address like `"B12"`.
pub fn encode(row: usize, column: usize) -> String {
    format!("{}{}", column_label(column), row + 1)
}

/// Parses an address produced by [`encode`] back into a zero-based `(row, column)`.
pub fn decode(address: &str) -> Option<(usize, usize)> {
    let split = address
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_uppercase())
        .map(|(idx, _)| idx)?;
    let (letters, digits) = address.split_at(split);
    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut column = 0usize;
    for b in letters.bytes() {
        column = column.checked_mul(26)?.checked_add((b - b'A') as usize + 1)?;
    }
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, column - 1))
}
