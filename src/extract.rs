//! Reads the web instance table of the Server Manager "Disable Logins" page.
//!
//! The page lists one row per web server (cluster members get a row each). The instance name is the text of the
//! first link in the row and the online user count sits in the third cell from the right. Columns are addressed by
//! position only, so a change to the console layout shows up here as wrong counts or parse errors.

use crate::snapshot::Snapshot;
use scraper::{
    ElementRef,
    Html,
    Selector,
};

/// `id` of the element that holds the web instance table.
pub const INSTANCE_TABLE_ID: &str = "webInstances";

/// Position of the "Online User Count" column, counted from the right.
const USER_COUNT_COLUMN_FROM_RIGHT: usize = 3;

lazy_static::lazy_static! {
    static ref INSTANCE_TABLE: Selector = selector(&format!("#{INSTANCE_TABLE_ID}"));
    static ref ROW_GROUP: Selector = selector("tbody");
    static ref ROW: Selector = selector("tr");
    static ref CELL: Selector = selector("td");
    static ref LINK: Selector = selector("a");
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selectors are valid")
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("online user count '{text}' of instance '{instance}' is not a non-negative integer")]
    InvalidCount { instance: String, text: String },
    #[error("row of instance '{instance}' has {cells} cells, too few for an online user count column")]
    MissingCountColumn { instance: String, cells: usize },
}

/// Parses the page and sums the online users of every instance.
///
/// A page without the instance table, or a table without rows, gives an empty snapshot. Rows without an instance
/// link are skipped.
pub fn extract_snapshot(html: &str) -> Result<Snapshot, ExtractError> {
    let document = Html::parse_document(html);

    let Some(row_group) = find_row_group(&document) else {
        debug!(table = INSTANCE_TABLE_ID, "instance table not found on page");
        return Ok(Snapshot::default());
    };

    row_group
        .select(&ROW)
        .enumerate()
        .filter_map(|(index, row)| {
            let entry = read_row(row).transpose();
            if entry.is_none() {
                debug!(row = index, "skipping row without instance link");
            }
            entry
        })
        .collect()
}

fn find_row_group(document: &Html) -> Option<ElementRef<'_>> {
    let table = document.select(&INSTANCE_TABLE).next()?;
    if table.value().name() == "tbody" {
        return Some(table);
    }
    table.select(&ROW_GROUP).next()
}

/// Returns the instance name and online user count of a row, or `None` for rows without an instance link.
fn read_row(row: ElementRef<'_>) -> Result<Option<(String, u64)>, ExtractError> {
    let Some(link) = row.select(&LINK).next() else {
        return Ok(None);
    };
    let instance = text_of(link);

    let cells = row.select(&CELL).collect::<Vec<_>>();
    let Some(index) = cells.len().checked_sub(USER_COUNT_COLUMN_FROM_RIGHT) else {
        return Err(ExtractError::MissingCountColumn {
            instance,
            cells: cells.len(),
        });
    };

    let text = text_of(cells[index]);
    match text.parse::<u64>() {
        Ok(count) => {
            trace!(%instance, count, "instance row");
            Ok(Some((instance, count)))
        }
        Err(_) => Err(ExtractError::InvalidCount { instance, text }),
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
