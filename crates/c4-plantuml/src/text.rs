//! Text helpers shared by the element and relationship renderers.
//!
//! - [`alias`] turns a display name into a PlantUML identifier.
//! - [`escape`] makes free text safe inside a double-quoted macro argument.
//! - [`block_text`] soft-wraps long text at word boundaries.

/// Derives the PlantUML alias for an element name.
///
/// Characters outside `[A-Za-z0-9_]` are dropped. A result that is empty or
/// starts with a digit is prefixed with `_` so it stays a valid identifier.
///
/// # Examples
///
/// ```
/// use c4_plantuml::text::alias;
///
/// assert_eq!(alias("Internet Banking System"), "InternetBankingSystem");
/// assert_eq!(alias("E-mail (SMTP)"), "EmailSMTP");
/// assert_eq!(alias("3rd Party"), "_3rdParty");
/// ```
pub fn alias(name: &str) -> String {
    let mut alias: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if alias.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    alias
}

/// Escapes free text for use inside a double-quoted macro argument.
///
/// Backslashes and double quotes are backslash-escaped, line breaks become
/// the PlantUML `\n` sequence and carriage returns are dropped.
///
/// # Examples
///
/// ```
/// use c4_plantuml::text::escape;
///
/// assert_eq!(escape(r#"Sends "hello""#), r#"Sends \"hello\""#);
/// assert_eq!(escape("line one\r\nline two"), r"line one\nline two");
/// assert_eq!(escape(r"C:\data\"), r"C:\\data\\");
/// ```
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Inserts `separator` in place of the first space after each `width`
/// characters, so lines are at least `width` long and words stay whole.
///
/// # Examples
///
/// ```
/// use c4_plantuml::text::block_text;
///
/// assert_eq!(block_text("aaa bbb ccc", 3, "|"), "aaa|bbb|ccc");
/// assert_eq!(block_text("aa bb cc", 4, "|"), "aa bb|cc");
/// ```
pub fn block_text(text: &str, width: usize, separator: &str) -> String {
    let mut wrapped = String::with_capacity(text.len());
    let mut line_len = 0;
    for (idx, word) in text.split(' ').enumerate() {
        if idx > 0 {
            if line_len >= width {
                wrapped.push_str(separator);
                line_len = 0;
            } else {
                wrapped.push(' ');
                line_len += 1;
            }
        }
        wrapped.push_str(word);
        line_len += word.chars().count();
    }
    wrapped
}
