use std::io;
use std::io::ErrorKind;

use markdown::Options;

/// Renders a markdown body to HTML with GFM extensions.
pub fn to_html(md_text: &str) -> io::Result<String> {
    match markdown::to_html_with_options(md_text, &Options::gfm()) {
        Ok(x) => Ok(x),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}
