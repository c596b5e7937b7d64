use std::borrow::Cow;

/// Convert spaces to hyphens. Remove characters that aren't alphanumerics,
/// underscores, or hyphens. Convert to lowercase. Also strip leading and
/// trailing whitespace.
pub fn slugify(string: &str) -> String {
    let mut output = String::with_capacity(string.len());

    let mut need_dash = false;
    for ch in string.chars() {
        for b in deunicode::deunicode_char(ch).unwrap_or("-").bytes() {
            match b {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => {
                    if need_dash {
                        output.push('-');
                        need_dash = false;
                    }

                    output.push(b.to_ascii_lowercase() as char);
                }
                _ => {
                    // All sequences of characters not alphanumeric or `_`
                    // are converted into one `-`.
                    need_dash = !output.is_empty();
                }
            }
        }
    }

    output
}

/// Removes every `<...>` span with at least one character between the angle
/// brackets, as the pattern `<[^>]+>` would. Unbalanced brackets are kept.
///
/// ```rust
/// use ldgraph::util::strip_markup;
///
/// assert_eq!(strip_markup("<p>Engineer</p>"), "Engineer");
/// assert_eq!(strip_markup("a <b>bold</b> move"), "a bold move");
/// assert_eq!(strip_markup("1 < 2"), "1 < 2");
/// assert_eq!(strip_markup("a <> b"), "a <> b");
/// assert_eq!(strip_markup("plain"), "plain");
/// ```
pub fn strip_markup(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let mut output: Option<String> = None;
    let (mut copied, mut cursor) = (0, 0);

    while let Some(i) = memchr::memchr(b'<', &bytes[cursor..]).map(|i| cursor + i) {
        let Some(j) = memchr::memchr(b'>', &bytes[i + 1..]).map(|j| i + 1 + j) else {
            break;
        };

        // `<>` does not match; a later `<` might.
        if j == i + 1 {
            cursor = i + 1;
            continue;
        }

        let output = output.get_or_insert_with(|| String::with_capacity(input.len()));
        output.push_str(&input[copied..i]);
        copied = j + 1;
        cursor = j + 1;
    }

    match output {
        Some(mut output) => {
            output.push_str(&input[copied..]);
            Cow::Owned(output)
        }
        None => Cow::Borrowed(input),
    }
}
