//! UI-local state.
//!
//! Plain state types behind the presentational views: the create-post form,
//! navigation chrome, clipboard feedback, and the profile sample data. No
//! rendering happens here.

pub mod clipboard;
pub mod draft;
pub mod profile;
pub mod shell;

pub use clipboard::CopyFeedback;
pub use draft::{MediaFile, MediaList, PostDraft, PostType, TagList};
pub use shell::{shorten_address, ConnectAffordance, MenuState, NavLink};
