/// Quotes `text` as a string literal. JSON string syntax is valid in both
/// Elm and TypeScript for the identifiers that reach this point.
pub fn quote(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

/// Indents every line after the first by `n` spaces, so a multi-line
/// fragment can be spliced in at a position already indented by `n`.
pub fn indent(n: usize, text: &str) -> String {
    let padding = " ".repeat(n);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 || line.is_empty() {
                line.to_owned()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
