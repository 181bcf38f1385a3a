use std::borrow::Cow;

/// Insert `insertion` right after the first occurrence of `needle`.
///
/// Borrowed result means `needle` was not found.
pub fn after_first<'a>(text: &'a str, needle: &str, insertion: &str) -> Cow<'a, str> {
    let Some(start) = text.find(needle) else {
        return Cow::Borrowed(text);
    };
    let split = start + needle.len();

    let mut out = String::with_capacity(text.len() + insertion.len());
    out.push_str(&text[..split]);
    out.push_str(insertion);
    out.push_str(&text[split..]);
    Cow::Owned(out)
}
