use std::borrow::Cow;

/// Strips credential material out of text that is about to be logged.
///
/// Covers the bearer token as it appears in request headers and the
/// `access_token` field as it appears in auth response bodies.
pub fn redact_secrets(input: &str) -> Cow<'_, str> {
    let mut redacted = input.to_string();

    for marker in ["Bearer ", "bearer "] {
        redacted = redact_value_after(&redacted, marker);
    }
    for marker in ["\"access_token\":\"", "access_token="] {
        redacted = redact_value_after(&redacted, marker);
    }

    if redacted == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(redacted)
    }
}

fn redact_value_after(text: &str, marker: &str) -> String {
    if !text.contains(marker) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        out.push_str(&rest[..idx + marker.len()]);
        rest = &rest[idx + marker.len()..];

        let mut consumed = 0;
        for ch in rest.chars() {
            if ch == '"' || ch == ';' || ch == '&' || ch.is_whitespace() {
                break;
            }
            consumed += ch.len_utf8();
        }
        out.push_str("REDACTED");
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}
