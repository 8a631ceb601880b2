use quiz_core::media::UrlComposer;

/// Raw-content URL of the public asset repository.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/FlowdyWorld/FlowdyFrenzyQuizAssets/master/";

/// Builds public URLs as `<base>/<seg>/<seg>/...`, percent-encoding each
/// segment on its own so group names with spaces or accents stay valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoUrlComposer {
    base: String,
}

impl Default for RepoUrlComposer {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RepoUrlComposer {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }
}

impl UrlComposer for RepoUrlComposer {
    fn compose(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        for segment in segments.iter().filter(|segment| !segment.is_empty()) {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&["fr", "picture", "a.webp"], "https://cdn.test/fr/picture/a.webp")]
    #[case(&["fr", "", "a.webp"], "https://cdn.test/fr/a.webp")]
    #[case(&["fr", "Oiseaux d'été", "x.webp"], "https://cdn.test/fr/Oiseaux%20d%27%C3%A9t%C3%A9/x.webp")]
    #[case(&["AC/DC"], "https://cdn.test/AC%2FDC")]
    fn composes_encoded_segments(#[case] segments: &[&str], #[case] expected: &str) {
        let composer = RepoUrlComposer::new("https://cdn.test/");
        assert_eq!(composer.compose(segments), expected);
    }

    #[test]
    fn default_base_has_no_trailing_slash() {
        let composer = RepoUrlComposer::default();
        assert!(!composer.base().ends_with('/'));
        assert!(composer.compose(&["fr"]).ends_with("/master/fr"));
    }
}
