//! CSV report generation
//!
//! One row per recorded page, in normalized-key order. Link and image lists are
//! flattened into a single `;`-joined field each.

use crate::output::OutputResult;
use crate::state::PageRecord;
use crate::url::NormalizedUrl;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Header row of the report
pub const REPORT_HEADERS: [&str; 5] = [
    "page_url",
    "h1",
    "first_paragraph",
    "outgoing_link_urls",
    "image_urls",
];

const LIST_SEPARATOR: &str = ";";

/// Writes the report for `pages` to `output_path`, replacing any existing file
///
/// # Arguments
///
/// * `pages` - Recorded pages keyed by normalized URL
/// * `output_path` - Path where the CSV file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_csv_report(
    pages: &BTreeMap<NormalizedUrl, PageRecord>,
    output_path: &Path,
) -> OutputResult<()> {
    let file = File::create(output_path)?;
    write_report(pages, file)?;

    tracing::info!(
        "Wrote report with {} pages to {}",
        pages.len(),
        output_path.display()
    );
    Ok(())
}

/// Writes the report to any writer
pub fn write_report<W: Write>(
    pages: &BTreeMap<NormalizedUrl, PageRecord>,
    writer: W,
) -> OutputResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADERS)?;
    for page in pages.values() {
        let outgoing_links = page.outgoing_links.join(LIST_SEPARATOR);
        let image_urls = page.image_urls.join(LIST_SEPARATOR);
        csv_writer.write_record([
            page.url.as_str(),
            page.h1.as_str(),
            page.first_paragraph.as_str(),
            outgoing_links.as_str(),
            image_urls.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Formats the report as a string
pub fn format_csv_report(pages: &BTreeMap<NormalizedUrl, PageRecord>) -> OutputResult<String> {
    let mut buffer = Vec::new();
    write_report(pages, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
