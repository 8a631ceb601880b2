//! File-name code paths.
//!
//! `a_b_leaf.png` with delimiter `_` splits into the group tokens `a`, `b`
//! and the leaf `leaf`. Group tokens resolve through the descriptor table
//! (unknown codes pass through verbatim). The leaf is always taken as-is: it
//! becomes the answer text.

use std::path::Path;

use quiz_core::descriptors::DescriptorTable;

/// One resolved group token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeToken {
    /// Raw token as written in the file name.
    pub code: String,
    /// Descriptor name, or the code when no descriptor exists.
    pub name: String,
}

/// The ordered group tokens plus leaf name derived from one file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePath {
    groups: Vec<CodeToken>,
    leaf: String,
}

impl CodePath {
    /// Parse a file name (extension stripped first).
    ///
    /// Empty tokens from doubled or leading delimiters are skipped. A stem with
    /// no usable token falls back to the whole stem as leaf.
    #[must_use]
    pub fn parse(file_name: &str, delimiter: &str, descriptors: &DescriptorTable) -> Self {
        Self::parse_stem(strip_extension(file_name), delimiter, descriptors)
    }

    /// Parse a name that carries no extension, such as a text row id.
    #[must_use]
    pub fn parse_stem(stem: &str, delimiter: &str, descriptors: &DescriptorTable) -> Self {
        let mut tokens: Vec<&str> = if delimiter.is_empty() {
            vec![stem]
        } else {
            stem.split(delimiter).filter(|token| !token.is_empty()).collect()
        };

        let Some(leaf) = tokens.pop() else {
            return Self::flat(stem);
        };

        let groups = tokens
            .into_iter()
            .map(|code| CodeToken {
                code: code.to_string(),
                name: descriptors.resolve_name(code).to_string(),
            })
            .collect();

        Self {
            groups,
            leaf: leaf.to_string(),
        }
    }

    /// A path with no groups: the whole name is the leaf.
    #[must_use]
    pub fn flat(leaf: &str) -> Self {
        Self {
            groups: Vec::new(),
            leaf: leaf.to_string(),
        }
    }

    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.leaf
    }

    #[must_use]
    pub fn groups(&self) -> &[CodeToken] {
        &self.groups
    }

    /// Resolved group names, root first. These are the tree keys.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|token| token.name.clone()).collect()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.groups.len()
    }
}

fn strip_extension(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quiz_core::descriptors::AssetDescriptor;
    use rstest::rstest;

    use super::*;

    fn animals() -> DescriptorTable {
        [
            AssetDescriptor {
                code: "a".into(),
                name: "Animals".into(),
                question: None,
            },
            AssetDescriptor {
                code: "b".into(),
                name: "Birds".into(),
                question: None,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn resolves_groups_and_keeps_leaf_verbatim() {
        let path = CodePath::parse("a_b_leaf.png", "_", &animals());
        assert_eq!(path.group_names(), vec!["Animals", "Birds"]);
        assert_eq!(path.leaf(), "leaf");
        assert_eq!(path.groups()[0].code, "a");
    }

    #[test]
    fn leaf_is_never_resolved_through_descriptors() {
        let path = CodePath::parse("a_b.webp", "_", &animals());
        assert_eq!(path.group_names(), vec!["Animals"]);
        assert_eq!(path.leaf(), "b");
    }

    #[rstest]
    #[case("solo.png", &[], "solo")]
    #[case("x_y_z.mp3", &["x", "y"], "z")]
    #[case("a__leaf.webp", &["Animals"], "leaf")]
    #[case("_a_leaf.webp", &["Animals"], "leaf")]
    #[case("mr.smith.webp", &[], "mr.smith")]
    fn parse_cases(#[case] file: &str, #[case] groups: &[&str], #[case] leaf: &str) {
        let path = CodePath::parse(file, "_", &animals());
        assert_eq!(path.group_names(), groups);
        assert_eq!(path.leaf(), leaf);
    }

    #[test]
    fn only_delimiters_falls_back_to_stem() {
        let path = CodePath::parse("___.png", "_", &animals());
        assert_eq!(path.depth(), 0);
        assert_eq!(path.leaf(), "___");
    }

    #[test]
    fn stems_keep_dots() {
        let path = CodePath::parse_stem("a_St. Bernard", "_", &animals());
        assert_eq!(path.group_names(), vec!["Animals"]);
        assert_eq!(path.leaf(), "St. Bernard");
    }

    #[test]
    fn multi_char_delimiter() {
        let path = CodePath::parse("a--Sparrow.webp", "--", &animals());
        assert_eq!(path.group_names(), vec!["Animals"]);
        assert_eq!(path.leaf(), "Sparrow");
    }
}
