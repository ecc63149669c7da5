//! Placeholder substitution for property values.
//!
//! Resolves `${key}` and `${key:default}` references in strings. The
//! lookup is a plain function so the resolver stays a pure string
//! transformation. Unresolvable placeholders without a default are left
//! verbatim; substituted values are resolved again up to a fixed depth
//! to stop reference cycles.

const MAX_DEPTH: usize = 8;

/// Resolves all placeholders in `input` against `lookup`.
pub fn resolve<F>(input: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    resolve_at_depth(input, lookup, 0)
}

fn resolve_at_depth<F>(input: &str, lookup: &F, depth: usize) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if depth >= MAX_DEPTH || !input.contains("${") {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match find_closing_brace(after_open) {
            Some(end) => {
                let body = &after_open[..end];
                output.push_str(&substitute(body, lookup, depth));
                rest = &after_open[end + 1..];
            }
            None => {
                // Unterminated placeholder, keep the raw text.
                output.push_str(&rest[start..]);
                return output;
            }
        }
    }

    output.push_str(rest);
    output
}

fn substitute<F>(body: &str, lookup: &F, depth: usize) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let (key, default) = match body.split_once(':') {
        Some((key, default)) => (key, Some(default)),
        None => (body, None),
    };

    match lookup(key) {
        Some(value) => resolve_at_depth(&value, lookup, depth + 1),
        None => match default {
            Some(default) => resolve_at_depth(default, lookup, depth + 1),
            None => format!("${{{}}}", body),
        },
    }
}

fn find_closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return Some(index);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
