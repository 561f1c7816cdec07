//! Turns a quote request into a spreadsheet and a printable PDF.
//!
//! The [`QuoteAssembler`] validates a [`QuoteRequest`], computes every line total
//! and the grand total once, and hands the resulting [`ComputedQuote`] to an XLSX
//! renderer and a PDF renderer. Both documents therefore always agree on every number.
//!
//! ```no_run
//! use quotedoc::{LineItemInput, QuoteAssembler, QuoteRequest};
//!
//! let assembler = QuoteAssembler::builder().with_assets_dir(".").build()?;
//! let request = QuoteRequest {
//!     client_name: "ACME SRL".into(),
//!     client_tax_id: "20-12345678-9".into(),
//!     issue_date: "18/10/2026".into(),
//!     payment_terms: "Contado".into(),
//!     items: vec![LineItemInput::new(2, "Bomba centrífuga", 10.005)],
//! };
//! let artifacts = assembler.assemble(&request)?;
//! artifacts.write_to_dir("out".as_ref(), "presupuesto")?;
//! # Ok::<(), quotedoc::QuoteError>(())
//! ```

pub mod artifacts;
pub mod assembler;
pub mod calculator;
pub mod config;
pub mod error;

pub use artifacts::{QuoteArtifacts, QuoteEnvelope};
pub use assembler::{QuoteAssembler, QuoteAssemblerBuilder};
pub use config::AssemblerConfig;
pub use error::{InvalidItemError, ItemField, QuoteError};

pub use quotedoc_render_core::{QuoteRenderer, RenderError};
pub use quotedoc_types::{
    ComputedQuote, IssuerProfile, LineItemComputed, LineItemInput, NumberFormat, NumericInput,
    QuoteRequest,
};
