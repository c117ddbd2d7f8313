use url::Url;

/// Accept only absolute `http`/`https` URLs with a host. Anything else,
/// including relative references and `javascript:`/`data:` URLs, becomes `None`.
///
/// Accepted URLs are returned in their serialized form, so the result is
/// stable when sanitized again.
pub fn sanitize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = Url::parse(raw).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Some(parsed.into()),
        _ => None,
    }
}
