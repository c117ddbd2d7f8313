//! Rich-text allow-list
//!
//! Everything an author can put into a prompt, feedback or option text goes
//! through [`sanitize_rich_text`]. Disallowed tags are unwrapped (their text is
//! kept), `script` and `style` are dropped together with their content, and
//! attributes outside the allow-list (event handlers, `style`, `data-*`) are
//! removed.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;

/// Tags that survive sanitization
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "u", "s", "a", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5",
    "h6", "blockquote", "pre", "code", "sub", "sup", "span", "div", "img",
];

/// Attributes that survive sanitization, on any allowed tag
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "target", "rel", "src", "alt", "class"];

/// URL schemes accepted in `href` and `src`
pub const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .tag_attributes(HashMap::new())
        .generic_attributes(ALLOWED_ATTRIBUTES.iter().copied().collect())
        .url_schemes(ALLOWED_URL_SCHEMES.iter().copied().collect())
        // `rel` is author-controlled, so ammonia must not also inject one
        .link_rel(None)
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true)
        .attribute_filter(filter_image_source);
    builder
});

/// Drop `img src` values carrying a scheme outside the allow-list.
/// Relative references have no scheme and are kept.
fn filter_image_source<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if element != "img" || attribute != "src" {
        return Some(Cow::Borrowed(value));
    }

    match url::Url::parse(value.trim()) {
        Ok(parsed) if ALLOWED_URL_SCHEMES.contains(&parsed.scheme()) => Some(Cow::Borrowed(value)),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(Cow::Borrowed(value)),
        Err(_) => None,
    }
}

/// Neutralize untrusted rich text. The output is a fixed point:
/// `sanitize_rich_text(&sanitize_rich_text(x)) == sanitize_rich_text(x)`.
pub fn sanitize_rich_text(input: &str) -> String {
    SANITIZER.clean(input).to_string()
}
