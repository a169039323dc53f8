//! Storage encoding for the list fields of a grading report.
//!
//! Grammar errors are joined with the U+0001 control character; suggestions
//! and vocabulary are joined with `;`. Neither scheme escapes its delimiter,
//! so an element that contains it comes back split in two.

/// Delimiter between stored grammar errors.
pub const GRAMMAR_DELIMITER: char = '\u{1}';

/// Delimiter between stored suggestions and vocabulary entries.
pub const LIST_DELIMITER: char = ';';

/// Join grammar errors for storage.
pub fn join_grammar_errors(items: &[String]) -> String {
    join_with(items, GRAMMAR_DELIMITER)
}

/// Split stored grammar errors back into a list.
pub fn split_grammar_errors(stored: &str) -> Vec<String> {
    split_with(stored, GRAMMAR_DELIMITER)
}

/// Join suggestions or vocabulary entries for storage.
pub fn join_list(items: &[String]) -> String {
    join_with(items, LIST_DELIMITER)
}

/// Split stored suggestions or vocabulary entries back into a list.
pub fn split_list(stored: &str) -> Vec<String> {
    split_with(stored, LIST_DELIMITER)
}

fn join_with(items: &[String], delimiter: char) -> String {
    let mut buf = [0u8; 4];
    items.join(delimiter.encode_utf8(&mut buf))
}

fn split_with(stored: &str, delimiter: char) -> Vec<String> {
    // An empty column means an empty list, not a list with one empty entry.
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(delimiter).map(str::to_string).collect()
}
