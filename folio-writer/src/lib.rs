//! # folio-writer
//!
//! Hash-gated atomic writer for rendered documentation, plus the
//! load -> render -> write pipeline.
//!
//! Call [`pipeline::run`] to build a whole site, or [`write_output`] to
//! write files a renderer already produced.

pub mod error;
pub mod hash_store;
pub mod pipeline;
pub mod writer;

pub use error::WriteError;
pub use pipeline::{run, RenderOptions, RenderSummary};
pub use writer::{write_output, WriteResult};
