//! Fetch step: download a target's page and parse its release table

use super::PageSource;
use crate::domain::{TableFormat, Target};
use crate::error::FetchError;
use crate::parser::{get_parser, ParsedTable};
use tracing::{error, info};

/// Download `target`'s page and extract its release entries.
///
/// Transport failures (unreachable host, timeout, unreadable body) are returned
/// as errors. A page answered with an error status, or one without a release
/// table, is not an error: it is logged and yields an empty table flagged as
/// missing, so the worksheet is still reconciled.
pub async fn fetch_table(
    source: &dyn PageSource,
    target: &Target,
    format: TableFormat,
) -> Result<ParsedTable, FetchError> {
    let html = match source.fetch_page(&target.url).await {
        Ok(html) => html,
        Err(FetchError::HttpStatus { url, status }) => {
            error!(target_name = %target.name, %url, status, "release page unavailable");
            return Ok(ParsedTable::missing());
        }
        Err(e) => return Err(e),
    };

    match get_parser(format).parse(&html, target) {
        Ok(parsed) => {
            info!(
                target_name = %target.name,
                entries = parsed.entries.len(),
                skipped = parsed.skipped.len(),
                "parsed release table"
            );
            Ok(parsed)
        }
        Err(e) => {
            error!(target_name = %target.name, url = %target.url, error = %e, "release table missing");
            Ok(ParsedTable::missing())
        }
    }
}
