use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::Patch;

/// Page whose generated `<base>` climbs one directory too many.
pub const NG_CONTENT_AST_INDEX: &str = "angular.compiler/NgContentAst/index.html";

// `.` is a wildcard here, so any two-character segment pair matches.
static DOUBLE_PARENT_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(<base href="..)/..(">)"#).expect("base href pattern is valid")
});

/// Drops the second `/..` from the `<base href>` of
/// `angular.compiler/NgContentAst/index.html`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NgContentAstBasePatch;

impl Patch for NgContentAstBasePatch {
    fn name(&self) -> &'static str {
        "ng-content-ast-base"
    }

    fn applies_to(&self, rel_path: &Path) -> bool {
        rel_path == Path::new(NG_CONTENT_AST_INDEX)
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        DOUBLE_PARENT_BASE.replacen(text, 1, "${1}${2}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(r#"<base href="../..">"#, r#"<base href="..">"#)]
    #[case(
        r#"<head><base href="../.."><link href="x.css"></head>"#,
        r#"<head><base href=".."><link href="x.css"></head>"#
    )]
    #[case(r#"<base href="ab/cd">"#, r#"<base href="ab">"#)]
    fn collapses_double_parent(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(NgContentAstBasePatch.apply(input), expected);
    }

    #[rstest]
    #[case(r#"<base href="..">"#)]
    #[case(r#"<base href="../../..">"#)]
    #[case(r#"<BASE HREF="../..">"#)]
    fn leaves_other_bases_alone(#[case] input: &str) {
        assert!(matches!(NgContentAstBasePatch.apply(input), Cow::Borrowed(_)));
    }

    #[test]
    fn only_first_match_is_rewritten() {
        let html = r#"<base href="../.."><base href="../..">"#;
        assert_eq!(
            NgContentAstBasePatch.apply(html),
            r#"<base href=".."><base href="../..">"#
        );
    }

    #[test]
    fn applies_to_fixed_path_only() {
        assert!(NgContentAstBasePatch.applies_to(Path::new(NG_CONTENT_AST_INDEX)));
        assert!(!NgContentAstBasePatch.applies_to(Path::new("angular.compiler/index.html")));
        assert!(!NgContentAstBasePatch.applies_to(Path::new("index.html")));
    }
}
