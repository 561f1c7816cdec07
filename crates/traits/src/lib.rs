//! Platform abstractions used by the quote renderers.
//!
//! Renderers never touch the filesystem directly; images such as the header logo and
//! the watermark are looked up through a [`ResourceProvider`].

pub mod resource;

pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
