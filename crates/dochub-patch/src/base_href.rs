use std::borrow::Cow;
use std::path::Path;

use crate::Patch;
use crate::insert::after_first;

/// Adds `<base href="/api/<package>/">` after the root `index.html` title so
/// relative links keep working once the page is served from the unified tree.
#[derive(Debug, Clone)]
pub struct BaseHrefPatch {
    insertion: String,
}

impl BaseHrefPatch {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self {
            insertion: format!("\n  <base href=\"/api/{package}/\">"),
        }
    }
}

impl Patch for BaseHrefPatch {
    fn name(&self) -> &'static str {
        "base-href"
    }

    fn applies_to(&self, rel_path: &Path) -> bool {
        rel_path == Path::new("index.html")
    }

    fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        after_first(text, "</title>", &self.insertion)
    }
}
