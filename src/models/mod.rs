//! Data model types shared across the pipeline.

mod document;
mod extraction;
mod invoice;

pub use document::{NormalizedImage, UploadedDocument};
pub use extraction::ExtractionResult;
pub use invoice::{InvoiceData, InvoiceExtraction, InvoiceLineItem, InvoiceParty, InvoiceTotals};
