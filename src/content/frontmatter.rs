//! Splitting of a raw content file into its fenced metadata block and body.

/// Markers controlling how a content file is cut apart: the fence line
/// around the TOML metadata block and the marker ending a post's excerpt.
#[derive(Debug, Clone)]
pub struct FrontmatterOptions {
    pub fence: String,
    pub excerpt_marker: String,
}

impl Default for FrontmatterOptions {
    fn default() -> Self {
        FrontmatterOptions {
            fence: "+++".to_string(),
            excerpt_marker: "<!-- more -->".to_string(),
        }
    }
}

pub struct RawDocument<'a> {
    pub metadata: &'a str,
    pub body: &'a str,
}

/// Cuts `input` into the fenced metadata block and the body after it.
/// The opening fence must be the very first line of the file and the
/// closing fence must start a line of its own. Returns `None` when the
/// fences are missing.
pub fn split_document<'a>(input: &'a str, fence: &str) -> Option<RawDocument<'a>> {
    let rest = input.strip_prefix(fence)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let close = format!("\n{}", fence);
    let idx = rest.find(&close)?;
    let metadata = &rest[..idx];

    let mut body = &rest[idx + close.len()..];
    body = body.strip_prefix('\r').unwrap_or(body);
    body = body.strip_prefix('\n').unwrap_or(body);

    Some(RawDocument { metadata, body })
}

/// Splits a post body at the first excerpt marker. Returns the text before
/// the marker and the full body with the marker removed. Without a marker
/// the excerpt is empty and the body passes through untouched.
pub fn split_excerpt(body: &str, marker: &str) -> (String, String) {
    match body.find(marker) {
        Some(idx) => {
            let excerpt = body[..idx].to_string();
            let content = body.replacen(marker, "", 1);
            (excerpt, content)
        }
        None => (String::new(), body.to_string()),
    }
}
