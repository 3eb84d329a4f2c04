//! Shared error plumbing.
//!
//! Domain errors stay plain enums in the crate that raises them; this alias
//! is how they travel once wrapped in a rootcause [`Report`].

use rootcause::Report;

/// Result carrying a [`Report`] over the context type `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
