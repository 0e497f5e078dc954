//! Local filesystem side of a release: finding artifacts and packing them.

pub mod archive;
pub mod find;
pub mod lister;

pub use archive::{remove_archive, sibling_zip_path, zip_single};
pub use find::{FindOptions, FindResult, PathFinder, find_down};
pub use lister::{DirEntry, DirLister, EntryKind, LocalFs};
