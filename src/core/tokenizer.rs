//! Quote- and escape-aware tokenizer.
//!
//! Splits a command line into tokens on unquoted whitespace. Single and
//! double quotes group text; a quote of the other kind inside a quoted
//! region is literal, and a backslash inside quotes escapes `"`, `'` or
//! `\`. Malformed quoting never fails: an unterminated quote runs to the
//! end of the line.

/// Tokenizes a command line.
///
/// # Examples
///
/// ```
/// use flagline::core::tokenize;
///
/// let tokens = tokenize(r#"--send "Hello world" --llm chatgpt"#);
/// assert_eq!(tokens, ["--send", "Hello world", "--llm", "chatgpt"]);
/// ```
#[must_use]
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' && quote.is_some() {
            if let Some(&next) = chars.peek()
                && matches!(next, '"' | '\'' | '\\')
            {
                current.push(next);
                chars.next();
                continue;
            }
            current.push(ch);
            continue;
        }

        if matches!(ch, '"' | '\'') {
            match quote {
                None => quote = Some(ch),
                // Closing quote always emits, so `""` yields an empty token.
                Some(open) if open == ch => {
                    quote = None;
                    tokens.push(std::mem::take(&mut current));
                }
                Some(_) => current.push(ch),
            }
            continue;
        }

        if ch.is_whitespace() && quote.is_none() {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            continue;
        }

        current.push(ch);
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
