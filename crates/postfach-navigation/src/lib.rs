//! Postfach Navigation
//!
//! Reads the portal's markup:
//! - Archive index → folders (`a.evt-gotoFolder`, first one is the parent link)
//! - Listing page → new-style attachments (`a.evt-getMailboxAttachment`),
//!   old-style messages (`a.evt-showMessage`) and the next-page marker
//!   (`span.pager-navigator-next`)
//! - Pager → bounded pagination over listing pages

mod error;
mod folder;
mod listing;
mod markup;
mod pager;

pub use error::NavigationError;
pub use folder::{parse_folders, FolderRef};
pub use listing::{AttachmentLink, LinkRef, ListingPage};
pub use pager::Pager;

pub type Result<T> = std::result::Result<T, NavigationError>;
