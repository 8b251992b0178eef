use dish_catalog::ingest::{self, IngestReport};
use dish_catalog::store;
use pretty_assertions::assert_eq;

const PAGE_ONE: &str = "No 음식명 No 음식명
1 김치찌개 2 오렌지주스 3 Beef Stew
4 망고 비빔밥 5 초코쿠키 6 Bean Soup
";

const PAGE_TWO: &str = "밥류
7 beef   STEW 8 된장찌개
";

fn pages() -> Vec<String> {
    vec![PAGE_ONE.to_string(), PAGE_TWO.to_string()]
}

#[test]
fn two_page_document_extracts_unique_dishes() {
    let names = ingest::extract_names(&pages());
    assert_eq!(
        names,
        vec!["김치찌개", "Beef Stew", "망고 비빔밥", "Bean Soup", "된장찌개"]
    );
}

#[test]
fn fresh_store_then_repeat_run() {
    let conn = store::connect(":memory:").unwrap();

    let first = ingest::run(&pages(), &conn).unwrap();
    assert_eq!(
        first,
        IngestReport {
            candidates: 5,
            inserted: 5,
            skipped: 0
        }
    );

    let second = ingest::run(&pages(), &conn).unwrap();
    assert_eq!(second.candidates, 5);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 5);
    assert_eq!(store::count_dishes(&conn).unwrap(), 5);
}

#[test]
fn existing_names_are_skipped_case_insensitively() {
    let conn = store::connect(":memory:").unwrap();
    store::init_schema(&conn).unwrap();
    store::create_dish(&conn, "BEAN SOUP", None).unwrap();

    let report = ingest::run(&pages(), &conn).unwrap();
    assert_eq!(report.inserted, 4);
    assert_eq!(report.skipped, 1);
}

#[test]
fn on_disk_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("dishes.sqlite").display());

    {
        let conn = store::connect(&url).unwrap();
        assert_eq!(ingest::run(&pages(), &conn).unwrap().inserted, 5);
    }

    let conn = store::connect(&url).unwrap();
    assert_eq!(ingest::run(&pages(), &conn).unwrap().inserted, 0);
    let stews = store::search_dishes(&conn, "찌개", 50).unwrap();
    assert_eq!(stews.len(), 2);
}
