//! Lexis Service - Document Management and Text Analysis
//!
//! The service layer ties the document store, the principal registry, the
//! metric functions, and the metric cache together behind one typed facade.
//! Every operation runs on behalf of a requesting user: ownership is
//! resolved in [`guard`] before any document content is read or written,
//! and analysis results are memoized through the cache-aside coordinator
//! in `lexis-storage`.

pub mod guard;
pub mod service;

// Re-export the facade at the crate root.
pub use guard::resolve_owned;
pub use service::DocumentService;
