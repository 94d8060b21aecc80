//! Template substitution and wire encoding
//!
//! Templates use `{n}` for the n-th argument. `{{` and `}}` produce literal
//! braces; any other brace is copied through unchanged.

use crate::error::{MemcmdError, Result};

/// Substitute `args` into `template` positionally.
///
/// Arguments beyond the highest placeholder are ignored. A placeholder with
/// no matching argument is an error.
pub fn format_template<S: AsRef<str>>(template: &str, args: &[S]) -> Result<String> {
    let arg_len: usize = args.iter().map(|a| a.as_ref().len()).sum();
    let mut out = String::with_capacity(template.len() + arg_len);
    let mut chars = template.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                // Look for `{digits}`; otherwise the brace is literal
                let rest = &template[start + 1..];
                let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
                if digits > 0 && rest.as_bytes().get(digits) == Some(&b'}') {
                    let index: usize = rest[..digits].parse().map_err(|_| MemcmdError::Template {
                        template: template.to_string(),
                        placeholder: usize::MAX,
                        supplied: args.len(),
                    })?;
                    let arg = args.get(index).ok_or_else(|| MemcmdError::Template {
                        template: template.to_string(),
                        placeholder: index,
                        supplied: args.len(),
                    })?;
                    out.push_str(arg.as_ref());
                    // Skip the digits and the closing brace
                    for _ in 0..=digits {
                        chars.next();
                    }
                } else {
                    out.push('{');
                }
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// Encode text one byte per character; non-ASCII characters become `?`
pub fn encode_ascii(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| if ch.is_ascii() { ch as u8 } else { b'?' })
        .collect()
}
