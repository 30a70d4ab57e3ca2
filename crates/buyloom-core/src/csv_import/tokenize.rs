//! Single-line CSV tokenizer.
//!
//! Never fails: unbalanced quotes degrade into literal text and whatever is
//! accumulated at end of line becomes the last field.

/// Splits one line (no embedded newline) into trimmed fields.
///
/// A `"` toggles quoted mode; inside quotes, `""` is a literal quote. Commas
/// outside quotes end a field. The result always has one more entry than
/// there are unquoted commas.
#[must_use]
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    fields.push(current.trim().to_string());
    fields
}
