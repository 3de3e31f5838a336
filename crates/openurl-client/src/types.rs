//! Typed records for the resolver's JSON response

use serde::Deserialize;

/// One entry of the resolver's response array
///
/// Entries carry many fields; only `linkerurl` matters here and everything
/// else is ignored. The field may be absent, present but empty, or usable;
/// [`ResolverEntry::link`] collapses the first two into `None`.
#[derive(Debug, Deserialize)]
pub struct ResolverEntry {
    pub linkerurl: Option<String>,
}

impl ResolverEntry {
    /// The linker URL, if present and non-empty
    pub fn link(&self) -> Option<&str> {
        self.linkerurl.as_deref().filter(|url| !url.is_empty())
    }
}
