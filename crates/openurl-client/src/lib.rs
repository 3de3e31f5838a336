//! OpenURL link-resolution client
//!
//! Builds OpenURL requests for a link resolver service (such as the
//! WorldCat Knowledge Base OpenURL Resolve API) and queries it for direct
//! resource links. The `wskey` credential parameter is stripped from every
//! returned link so it never reaches a client browser, and redacted from
//! log output.
//!
//! # Example
//!
//! ```no_run
//! use openurl_client::{LinkResolver, OpenUrlBuilder};
//!
//! # async fn example() -> Result<(), openurl_client::ResolverError> {
//! let open_url = OpenUrlBuilder::new("https://worldcat.org/webservices/kb/openurl/resolve")
//!     .issn(Some("0028-0836"))
//!     .volume(Some(40))
//!     .issue(Some(2))
//!     .start_page(Some(64))
//!     .publication_date(Some("1988-01-24"))
//!     .custom_param("wskey", Some("..."))
//!     .build();
//!
//! let resolver = LinkResolver::new();
//! for link in resolver.resolve(Some(&open_url)).await? {
//!     println!("{link}");
//! }
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod resolver;
mod types;

pub use builder::OpenUrlBuilder;
pub use error::{ResolverError, Result};
pub use resolver::LinkResolver;
pub use types::ResolverEntry;
