use std::borrow::Cow;
use std::path::Path;

use crate::Patch;
use crate::insert::after_first;

const HEADER_TITLE: &str = r#"<header id="title">"#;

/// Anchor back to the API index, with an inline SVG house icon.
pub const HOME_LINK: &str = concat!(
    r#"<a href="/api" title="Webdev API reference home">"#,
    "\n      ",
    r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" version="1.0" x="0px" y="0px" viewBox="0 0 24 24" style="display: inline-block; width: 24px; margin-right: 4px;"><g id="surface1"><path style=" " d="M 20 20 L 20 12 L 22 12 L 12 3 L 2 12 L 4 12 L 4 20 C 4 20.601563 4.398438 21 5 21 L 10 21 L 10 14 L 14 14 L 14 21 L 19 21 C 19.601563 21 20 20.601563 20 20 Z "></path></g></svg>"#,
    "\n    </a>\n  ",
);

/// Puts a home link right after the page's `<header id="title">`.
///
/// Applies to every text file in the tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeLinkPatch;

impl Patch for HomeLinkPatch {
    fn name(&self) -> &'static str {
        "home-link"
    }

    fn applies_to(&self, _rel_path: &Path) -> bool {
        true
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        after_first(text, HEADER_TITLE, &format!("\n  {HOME_LINK}"))
    }
}
