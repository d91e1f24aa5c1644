//! # Domain Records
//!
//! Records read from the profile and snippet stores. Nothing in Sharuco
//! writes them; they are created and edited elsewhere and only observed here.

mod profile;
mod snippet;

pub use profile::UserProfile;
pub use snippet::{CodeSnippet, SnippetSet};
