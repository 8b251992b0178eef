//! PDF → dish names → catalog.
//!
//! Every page and line is scanned in document order. Header lines are
//! skipped, the remaining lines are split into "count name" pairs, and each
//! name is cleaned and checked against the keyword tables. Survivors are
//! deduplicated and inserted into the catalog in one transaction.

use rusqlite::Connection;
use tracing::{debug, info, trace};

use crate::error::Result;
use crate::extract::{clean_name, dedupe, extract_pairs, is_header_line, split_lines};
use crate::keywords::{deny_category, is_non_dish};
use crate::pdf::PageSource;
use crate::store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub candidates: usize,
    pub inserted: usize,
    pub skipped: usize,
}

impl IngestReport {
    pub fn new(candidates: usize, inserted: usize) -> Self {
        IngestReport {
            candidates,
            inserted,
            skipped: candidates - inserted,
        }
    }

    pub fn print(&self) {
        println!(
            "Total candidates: {} / inserted: {} / skipped: {}",
            self.candidates, self.inserted, self.skipped
        );
    }
}

/// Dish names from one line, in order, before deduplication.
pub fn names_from_line(line: &str) -> Vec<String> {
    if is_header_line(line) {
        return Vec::new();
    }

    let mut names = Vec::new();
    for raw in extract_pairs(line) {
        let name = clean_name(raw);
        if name.is_empty() {
            trace!("Dropped span {:?}", raw);
            continue;
        }
        if is_non_dish(&name) {
            trace!(
                "Dropped {:?} ({})",
                name,
                deny_category(&name).unwrap_or("deny")
            );
            continue;
        }
        names.push(name);
    }
    names
}

/// All unique dish names in the document, first-seen order.
pub fn extract_names<P: PageSource + ?Sized>(source: &P) -> Vec<String> {
    let mut names = Vec::new();
    for (i, page) in source.pages().into_iter().enumerate() {
        let Some(text) = page else {
            debug!("Page {} has no text", i + 1);
            continue;
        };
        for line in split_lines(text) {
            names.extend(names_from_line(line));
        }
    }

    let unique = dedupe(&names);
    debug!("{} names, {} unique", names.len(), unique.len());
    unique
}

/// Insert `names` into the catalog, counting new rows against repeats.
pub fn store_names(conn: &Connection, names: &[String]) -> Result<IngestReport> {
    let inserted = store::insert_names(conn, names)?;
    let report = IngestReport::new(names.len(), inserted);
    info!(
        "Stored {} names ({} new, {} already present)",
        report.candidates, report.inserted, report.skipped
    );
    Ok(report)
}

/// Extract and store. An empty extraction leaves the store untouched.
pub fn run<P: PageSource + ?Sized>(source: &P, conn: &Connection) -> Result<IngestReport> {
    let names = extract_names(source);
    if names.is_empty() {
        return Ok(IngestReport::default());
    }
    store_names(conn, &names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_line_yields_nothing() {
        assert!(names_from_line("No 음식명 No 음식명").is_empty());
        assert!(names_from_line("밥류").is_empty());
    }

    #[test]
    fn line_filters_non_dishes() {
        let names = names_from_line("1 김치찌개 2 오렌지주스 3 망고 비빔밥 4 42");
        assert_eq!(names, vec!["김치찌개", "망고 비빔밥"]);
    }

    #[test]
    fn pages_in_order_and_deduped() {
        let pages: &[&str] = &[
            "음식명\n1 Beef Stew 2 Rice\n",
            "",
            "3 beef  stew 4 Bean Soup",
        ];
        assert_eq!(extract_names(pages), vec!["Beef Stew", "Rice", "Bean Soup"]);
    }

    #[test]
    fn carriage_return_and_form_feed_end_lines() {
        let pages: &[&str] = &["음식명\r1 Beef Stew\r2 Rice\x0c3 Bean Soup\u{2029}밥류"];
        assert_eq!(extract_names(pages), vec!["Beef Stew", "Rice", "Bean Soup"]);
    }

    #[test]
    fn empty_run_does_not_touch_store() {
        let conn = Connection::open_in_memory().unwrap();
        let pages: &[&str] = &["", "밥류"];
        let report = run(pages, &conn).unwrap();
        assert_eq!(report, IngestReport::default());
        // No table was created.
        let tables: usize = conn
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |r| r.get(0))
            .unwrap();
        assert_eq!(tables, 0);
    }

    #[test]
    fn report_counts_skips() {
        let r = IngestReport::new(5, 3);
        assert_eq!(r.skipped, 2);
    }
}
