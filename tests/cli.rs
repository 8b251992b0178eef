use std::process::Command;

fn ingest() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ingest-dishes"));
    cmd.env_remove("DATABASE_URL");
    cmd
}

#[test]
fn missing_input_exits_1() {
    let status = ingest().status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn missing_database_url_exits_2() {
    let status = ingest().arg("menu.pdf").status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn unreadable_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("menu.pdf");
    std::fs::write(&pdf, b"not a pdf").unwrap();

    let output = ingest()
        .arg(&pdf)
        .env("DATABASE_URL", dir.path().join("dishes.sqlite"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("dishes.sqlite").exists());
}

const DISHES_PDF: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dishes.pdf");
const NOTES_PDF: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/notes.pdf");

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn first_run_prints_summary_and_repeat_inserts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("dishes.sqlite");

    let first = ingest().arg(DISHES_PDF).env("DATABASE_URL", &db).output().unwrap();
    assert_eq!(first.status.code(), Some(0));
    // Logs go to stderr; stdout carries only the summary.
    assert_eq!(
        stdout(&first).trim(),
        "Total candidates: 5 / inserted: 5 / skipped: 0"
    );

    let url = format!("sqlite://{}", db.display());
    let second = ingest().arg(DISHES_PDF).env("DATABASE_URL", url).output().unwrap();
    assert_eq!(second.status.code(), Some(0));
    assert_eq!(
        stdout(&second).trim(),
        "Total candidates: 5 / inserted: 0 / skipped: 5"
    );
}

#[test]
fn database_url_flag_overrides_env() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("flag.sqlite");

    let output = ingest()
        .arg(DISHES_PDF)
        .arg("--database-url")
        .arg(&db)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("inserted: 5"));
    assert!(db.exists());
}

#[test]
fn pdf_without_pairs_leaves_store_alone() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("dishes.sqlite");

    let output = ingest().arg(NOTES_PDF).env("DATABASE_URL", &db).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).trim(),
        "No dish names extracted; nothing to insert."
    );
    assert!(!db.exists());
}
