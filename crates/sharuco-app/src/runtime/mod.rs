//! View runtime

mod profile_view;
mod scope;

pub use profile_view::ProfileView;
