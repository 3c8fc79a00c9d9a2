//! Typed invoice schema for structured extraction.
//!
//! The OCR endpoint returns free text; when the model was prompted for
//! strict invoice JSON, `InvoiceExtraction::from_text` parses it into these
//! types. Every field is lenient: a partially-populated model response
//! still parses, with warnings carried alongside.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Vendor or customer metadata as printed on the invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceParty {
    pub name: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Single line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceLineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: Option<f64>,
}

/// Summary amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceTotals {
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub discounts: Option<f64>,
    pub total: Option<f64>,
    pub currency: Option<String>,
}

impl Default for InvoiceTotals {
    fn default() -> Self {
        Self {
            subtotal: None,
            tax: None,
            discounts: None,
            total: None,
            currency: Some("USD".to_string()),
        }
    }
}

/// The structured payload extracted from one invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceData {
    pub vendor: InvoiceParty,
    pub customer: InvoiceParty,
    pub invoice_number: Option<String>,
    pub purchase_order: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub terms: Option<String>,
    pub notes: Option<String>,
    pub line_items: Vec<InvoiceLineItem>,
    pub totals: InvoiceTotals,
}

/// Envelope around the structured invoice payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceExtraction {
    pub schema_version: String,
    pub status: String,
    pub model: Option<String>,
    pub data: InvoiceData,
    pub warnings: Vec<String>,
    pub raw_text: Option<String>,
}

impl Default for InvoiceExtraction {
    fn default() -> Self {
        Self {
            schema_version: "invoice_v1".to_string(),
            status: "success".to_string(),
            model: None,
            data: InvoiceData::default(),
            warnings: Vec::new(),
            raw_text: None,
        }
    }
}

impl InvoiceExtraction {
    /// Parse the endpoint's extracted text as strict invoice JSON.
    ///
    /// Keeps the original text in `raw_text` so the reviewer can still see
    /// what the model actually said when fields came back empty.
    pub fn from_text(text: &str) -> Result<Self, serde_json::Error> {
        let mut extraction: InvoiceExtraction = serde_json::from_str(text)?;
        if extraction.raw_text.is_none() {
            extraction.raw_text = Some(text.to_string());
        }
        Ok(extraction)
    }
}
