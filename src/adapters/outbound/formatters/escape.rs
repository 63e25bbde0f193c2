//! Escaping helpers for embedding package data in rendered reports

/// Escapes text for HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escapes pipe characters and newlines for safe Markdown table rendering
pub fn escape_markdown_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#x27;b&#x27;&lt;/b&gt;"
        );
        assert_eq!(escape_html("bash-5.2-1.fc42"), "bash-5.2-1.fc42");
    }

    #[test]
    fn test_escape_markdown_table_cell() {
        assert_eq!(escape_markdown_table_cell("a|b\nc"), "a\\|b c");
    }
}
