//! Utility functions for URL and path handling

/// Extract the final non-empty path segment of a URL
///
/// Used to name each output file after its source URL. Returns `None` for
/// unparsable URLs or URLs without a path segment (cannot-be-a-base URLs,
/// bare hosts).
///
/// # Examples
///
/// ```
/// use corpus_dl::utils::file_name_from_url;
///
/// assert_eq!(
///     file_name_from_url("https://example.com/media/texts/pan-tadeusz.txt"),
///     Some("pan-tadeusz.txt".to_string())
/// );
/// assert_eq!(file_name_from_url("https://example.com/"), None);
/// ```
#[must_use]
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()
        .map(str::to_string)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_final_path_segment() {
        assert_eq!(
            file_name_from_url("https://example.com/a/b/c.txt"),
            Some("c.txt".to_string())
        );
    }

    #[test]
    fn ignores_trailing_slash() {
        assert_eq!(
            file_name_from_url("https://example.com/a/b/"),
            Some("b".to_string())
        );
    }

    #[test]
    fn ignores_query_and_fragment() {
        assert_eq!(
            file_name_from_url("https://example.com/file.txt?v=2#top"),
            Some("file.txt".to_string())
        );
    }

    #[test]
    fn none_for_bare_host() {
        assert_eq!(file_name_from_url("https://example.com"), None);
        assert_eq!(file_name_from_url("https://example.com/"), None);
    }

    #[test]
    fn none_for_unparsable_url() {
        assert_eq!(file_name_from_url("not a url"), None);
    }
}
