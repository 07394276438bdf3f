//! Media handling for mediabin: upload storage, metadata, and listing.

pub mod metadata;
pub mod service;

pub use metadata::{MediaRecord, MediaStore};
pub use service::{MediaListing, MediaService};
