//! Resource providers for quote assets.
//!
//! - [`FilesystemResourceProvider`]: loads logos and watermarks from an assets directory
//! - [`InMemoryResourceProvider`]: re-exported from `quotedoc-traits`

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use quotedoc_traits::InMemoryResourceProvider;
