//! # Invoice PDF
//!
//! Renders an [`InvoiceData`] snapshot into the tax-invoice layout:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              {company name}                 │
//! │               TAX INVOICE                   │
//! │  ─────────────────────────────────────────  │
//! │  Bill No: INV-1001           Date: {date}   │
//! │                                             │
//! │  Bill To:                                   │
//! │  {client name}                              │
//! │  Phone: {phone}                             │
//! │  Address: {address}                         │
//! │                                             │
//! │  ┌ Product ─ Quantity ─ Unit Price ─ Amt ┐  │
//! │  │ Rice      5 kg       INR 15.00   75.00│  │
//! │  └───────────────────────────────────────┘  │
//! │                       Total Amount: INR …   │
//! │                       ____________________  │
//! │                       Authorized Signatory  │
//! │   Computer generated invoice. No signature  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! [`PdfInvoiceWriter`] plugs the renderer into the store's post-commit
//! dispatch notification.

use std::fs;
use std::path::{Path, PathBuf};

use genpdf::{elements, style, Alignment, Element};
use tracing::{error, info};

use billstock_core::{DispatchListener, InvoiceData};

use crate::error::{ExportError, ExportResult};

/// Font family name expected inside the fonts directory.
const FONT_FAMILY: &str = "Roboto";

// =============================================================================
// Rendering
// =============================================================================

/// Renders one invoice to PDF bytes.
///
/// `fonts_dir` must contain the Roboto family files; genpdf embeds the
/// font into the document.
pub fn render_invoice(invoice: &InvoiceData, fonts_dir: &Path) -> ExportResult<Vec<u8>> {
    let font_family = genpdf::fonts::from_files(fonts_dir, FONT_FAMILY, None)
        .map_err(|e| ExportError::FontNotFound(e.to_string()))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Invoice {}", invoice.bill_number));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    // Header
    let mut company = elements::Paragraph::new(invoice.company_name.clone());
    company.set_alignment(Alignment::Center);
    doc.push(company.styled(style::Style::new().bold().with_font_size(22)));

    let mut subtitle = elements::Paragraph::new("TAX INVOICE");
    subtitle.set_alignment(Alignment::Center);
    doc.push(subtitle.styled(style::Style::new().with_font_size(10)));

    doc.push(elements::Break::new(1.5));

    // Bill info
    doc.push(elements::Paragraph::new(format!(
        "Bill No: {}",
        invoice.bill_number
    )));
    let mut date = elements::Paragraph::new(format!("Date: {}", invoice.date));
    date.set_alignment(Alignment::Right);
    doc.push(date);

    doc.push(elements::Break::new(1.5));

    // Client details
    doc.push(elements::Paragraph::new("Bill To:").styled(style::Style::new().bold()));
    doc.push(elements::Paragraph::new(invoice.client.name.clone()));
    doc.push(elements::Paragraph::new(format!(
        "Phone: {}",
        invoice.client.phone
    )));
    doc.push(elements::Paragraph::new(format!(
        "Address: {}",
        invoice.client.address
    )));

    doc.push(elements::Break::new(2));

    // Item table: Product (4), Quantity (2), Unit Price (2), Amount (2)
    let mut table = elements::TableLayout::new(vec![4, 2, 2, 2]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    let style_bold = style::Style::new().bold();
    table
        .row()
        .element(elements::Paragraph::new("Product Description").styled(style_bold))
        .element(elements::Paragraph::new("Quantity").styled(style_bold))
        .element(elements::Paragraph::new("Unit Price").styled(style_bold))
        .element(elements::Paragraph::new("Amount").styled(style_bold))
        .push()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let line = &invoice.product;
    table
        .row()
        .element(elements::Paragraph::new(line.name.clone()))
        .element(elements::Paragraph::new(format!(
            "{} {}",
            line.quantity, line.unit
        )))
        .element(elements::Paragraph::new(format!("INR {:.2}", line.rate)))
        .element(elements::Paragraph::new(format!("INR {:.2}", line.total)))
        .push()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    doc.push(table);
    doc.push(elements::Break::new(2));

    // Summary
    let mut total = elements::Paragraph::new(format!("Total Amount: INR {:.2}", line.total));
    total.set_alignment(Alignment::Right);
    doc.push(total.styled(style::Style::new().bold().with_font_size(12)));

    doc.push(elements::Break::new(3));

    // Signature
    let mut signatory = elements::Paragraph::new("Authorized Signatory");
    signatory.set_alignment(Alignment::Right);
    doc.push(signatory.styled(style::Style::new().with_font_size(10)));

    doc.push(elements::Break::new(2));

    // Footer
    let mut footer =
        elements::Paragraph::new("Computer generated invoice. No signature required.");
    footer.set_alignment(Alignment::Center);
    doc.push(footer.styled(style::Style::new().with_font_size(8)));

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    Ok(buffer)
}

/// Document name: `{bill number}_{client name, spaces → underscores}.pdf`.
pub fn invoice_file_name(invoice: &InvoiceData) -> String {
    let client: String = invoice
        .client
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}.pdf", invoice.bill_number, client)
}

// =============================================================================
// Dispatch Listener
// =============================================================================

/// Writes an invoice PDF for every committed dispatch.
///
/// Registered on the store's state handle. True to the fire-and-forget
/// contract, a rendering or write failure is logged and swallowed —
/// the dispatch it documents is already committed.
pub struct PdfInvoiceWriter {
    out_dir: PathBuf,
    fonts_dir: PathBuf,
}

impl PdfInvoiceWriter {
    pub fn new(out_dir: impl Into<PathBuf>, fonts_dir: impl Into<PathBuf>) -> Self {
        PdfInvoiceWriter {
            out_dir: out_dir.into(),
            fonts_dir: fonts_dir.into(),
        }
    }

    /// Renders and writes one invoice, returning the document path.
    pub fn write(&self, invoice: &InvoiceData) -> ExportResult<PathBuf> {
        let bytes = render_invoice(invoice, &self.fonts_dir)?;

        fs::create_dir_all(&self.out_dir).map_err(|e| ExportError::io(&self.out_dir, e))?;
        let path = self.out_dir.join(invoice_file_name(invoice));
        fs::write(&path, bytes).map_err(|e| ExportError::io(&path, e))?;

        info!(path = %path.display(), bill = %invoice.bill_number, "Invoice PDF written");
        Ok(path)
    }
}

impl DispatchListener for PdfInvoiceWriter {
    fn on_dispatch(&self, invoice: &InvoiceData) {
        if let Err(e) = self.write(invoice) {
            error!(bill = %invoice.bill_number, error = %e, "Invoice PDF generation failed");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
