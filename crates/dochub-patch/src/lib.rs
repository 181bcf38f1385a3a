//! # dochub-patch
//!
//! Text patches applied to generated API documentation while it is copied
//! into the unified tree. Each patch is a named, first-match substitution on
//! the raw HTML text; there is no HTML parsing.
//!
//! | name | file | effect |
//! |---|---|---|
//! | `base-href` | `index.html` | adds `<base href="/api/<package>/">` after `</title>` |
//! | `ng-content-ast-base` | `angular.compiler/NgContentAst/index.html` | `<base href="../..">` -> `<base href="..">` |
//! | `home-link` | every text file | adds a home icon link after `<header id="title">` |
//!
//! Binary files (anything that is not valid UTF-8) are never patched.

mod base_href;
mod content;
mod home_link;
mod insert;
mod ng_content_ast;

use std::borrow::Cow;
use std::path::Path;

pub use base_href::BaseHrefPatch;
pub use content::Content;
pub use home_link::{HOME_LINK, HomeLinkPatch};
pub use ng_content_ast::{NG_CONTENT_AST_INDEX, NgContentAstBasePatch};

/// A single named text transform.
pub trait Patch: Send + Sync {
    /// Stable identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether this patch should run on the file at `rel_path` (relative to
    /// the documentation root).
    fn applies_to(&self, rel_path: &Path) -> bool;

    /// Apply the patch. Returns [`Cow::Borrowed`] when nothing matched.
    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str>;
}

/// Result of running a [`PatchSet`] over one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub content: Content,
    /// Names of the patches that changed the text, in application order.
    pub applied: Vec<&'static str>,
}

/// Ordered collection of patches.
pub struct PatchSet {
    patches: Vec<Box<dyn Patch>>,
}

impl PatchSet {
    #[must_use]
    pub fn new(patches: Vec<Box<dyn Patch>>) -> Self {
        Self { patches }
    }

    /// The three patches every finalized project gets, in the order they
    /// must run.
    #[must_use]
    pub fn standard(package: &str) -> Self {
        Self::new(vec![
            Box::new(BaseHrefPatch::new(package)),
            Box::new(NgContentAstBasePatch),
            Box::new(HomeLinkPatch),
        ])
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.patches.iter().map(|p| p.name()).collect()
    }

    /// Run every applicable patch over `content`.
    #[must_use]
    pub fn apply(&self, rel_path: &Path, content: Content) -> Patched {
        let Content::Text(mut text) = content else {
            return Patched {
                content,
                applied: Vec::new(),
            };
        };

        let mut applied = Vec::new();
        for patch in self.patches.iter().filter(|p| p.applies_to(rel_path)) {
            if let Cow::Owned(changed) = patch.apply(&text) {
                text = changed;
                applied.push(patch.name());
            }
        }

        Patched {
            content: Content::Text(text),
            applied,
        }
    }
}

impl std::fmt::Debug for PatchSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const INDEX: &str = "<html><head><title>acx</title></head>\n<body>\n<header id=\"title\">\n</header></body></html>";

    #[test]
    fn standard_order_is_fixed() {
        assert_eq!(
            PatchSet::standard("acx").names(),
            ["base-href", "ng-content-ast-base", "home-link"]
        );
    }

    #[test]
    fn root_index_gets_base_and_home_link() {
        let set = PatchSet::standard("acx");
        let patched = set.apply(Path::new("index.html"), Content::Text(INDEX.into()));

        assert_eq!(patched.applied, ["base-href", "home-link"]);
        let Content::Text(text) = patched.content else {
            panic!("expected text");
        };
        assert!(text.contains("</title>\n  <base href=\"/api/acx/\">"));
        assert!(text.contains(&format!("<header id=\"title\">\n  {HOME_LINK}")));
    }

    #[test]
    fn nested_index_gets_home_link_only() {
        let set = PatchSet::standard("acx");
        let patched = set.apply(
            Path::new("acx.button/index.html"),
            Content::Text(INDEX.into()),
        );
        assert_eq!(patched.applied, ["home-link"]);
    }

    #[test]
    fn ng_content_ast_page_gets_base_fix() {
        let html = "<head><base href=\"../..\"></head><header id=\"title\">";
        let set = PatchSet::standard("angular");
        let patched = set.apply(Path::new(NG_CONTENT_AST_INDEX), Content::Text(html.into()));

        assert_eq!(patched.applied, ["ng-content-ast-base", "home-link"]);
        let Content::Text(text) = patched.content else {
            panic!("expected text");
        };
        assert!(text.starts_with("<head><base href=\"..\"></head>"));
    }

    #[test]
    fn untouched_text_reports_nothing() {
        let css = "body { margin: 0; }";
        let patched = PatchSet::standard("acx").apply(
            Path::new("static-assets/styles.css"),
            Content::Text(css.into()),
        );
        assert!(patched.applied.is_empty());
        assert_eq!(patched.content, Content::Text(css.into()));
    }

    #[test]
    fn binary_is_never_patched() {
        let mut bytes = b"<header id=\"title\">".to_vec();
        bytes.push(0xff);
        let content = Content::from_bytes(bytes.clone());

        let patched = PatchSet::standard("acx").apply(Path::new("index.html"), content);
        assert!(patched.applied.is_empty());
        assert_eq!(patched.content, Content::Binary(bytes));
    }
}
