use std::fs;
use std::io::Write;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const HEADER: &str = r#""PO #","External ID","Title","ASIN","Model #","Freight Term","Qty","Unit Cost","Amount""#;

const FIRST_INVOICE: &[&str] = &[
    r#""PO1","EXT1","Widget","B000123ABC","M1","Prepaid","5","10.00","50.00""#,
    r#""PO2","EXT2","Widget, Deluxe Edition B000456DEF","M2","Collect","2","20.00","40.00""#,
    r#""PO3","EXT3","No identifier here","none","M3","Prepaid","1","1.00","1.00""#,
];

const SECOND_INVOICE: &[&str] = &[
    r#""PO4","EXT4","Lamp","B000789GHI","M4","Prepaid","1,000","$5.50","$5,500.00""#,
];

fn invoice_text(lines: &[&str]) -> String {
    let mut text = format!("Invoice Details\n\n{HEADER}\n");
    for line in lines {
        text.push_str(line);
        text.push('\n');
    }
    text
}

fn incomb(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("incomb").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("100001_invoice_details.csv"),
        invoice_text(FIRST_INVOICE),
    )
    .unwrap();
    fs::write(
        dir.path().join("100002_invoice_details.csv"),
        invoice_text(SECOND_INVOICE),
    )
    .unwrap();
    dir
}

#[test]
fn combine_directory_writes_csv() {
    let data = data_dir();
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--format", "csv", "--data-dir"])
        .arg(data.path())
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined 3 rows from 2 files"));

    let csv = fs::read_to_string(out.path().join("master_invoice_combined_cleaned.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "InvoiceNumber,PO,ExternalID,Title,ASIN,Model,FreightTerm,Qty,UnitCost,Amount",
            "100001,PO1,EXT1,Widget,B000123ABC,M1,Prepaid,5,10.00,50.00",
            "100001,PO2,EXT2,\"Widget, Deluxe Edition\",B000456DEF,M2,Collect,2,20.00,40.00",
            "100002,PO4,EXT4,Lamp,B000789GHI,M4,Prepaid,1000,5.50,5500.00",
        ]
    );
    assert!(!out.path().join("master_invoice_combined_cleaned.xlsx").exists());
}

#[test]
fn combine_default_formats_write_csv_and_xlsx() {
    let data = data_dir();
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--data-dir"])
        .arg(data.path())
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .success();

    assert!(out.path().join("master_invoice_combined_cleaned.csv").exists());
    assert!(out.path().join("master_invoice_combined_cleaned.xlsx").exists());
}

#[test]
fn combine_zip_archive() {
    let data = tempfile::tempdir().unwrap();
    let zip_path = data.path().join("invoices.zip");
    {
        let file = fs::File::create(&zip_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options: zip::write::FileOptions<'_, ()> = zip::write::FileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("batch/100001_invoice_details.csv", options).unwrap();
        zip.write_all(invoice_text(FIRST_INVOICE).as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--format", "json", "--zip"])
        .arg(&zip_path)
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .success();

    let json = fs::read_to_string(out.path().join("master_invoice_combined_cleaned.json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(rows[1]["Title"], "Widget, Deluxe Edition");
}

#[test]
fn combine_missing_directory_fails_without_output() {
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--data-dir"])
        .arg(out.path().join("does-not-exist"))
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory not found"));

    assert!(!out.path().join("master_invoice_combined_cleaned.csv").exists());
}

#[test]
fn combine_empty_directory_fails() {
    let data = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--data-dir"])
        .arg(data.path())
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files matching"));

    assert!(!out.path().join("master_invoice_combined_cleaned.csv").exists());
}

#[test]
fn combine_headerless_file_warns_on_stderr() {
    let data = data_dir();
    fs::write(
        data.path().join("100003_invoice_details.csv"),
        "just some notes\nno table here\n",
    )
    .unwrap();
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--format", "csv", "--data-dir"])
        .arg(data.path())
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined 3 rows from 3 files"))
        .stdout(predicate::str::contains("no header found").not())
        .stderr(predicate::str::contains("no header found"));
}

#[test]
fn combine_bad_archive_fails() {
    let data = tempfile::tempdir().unwrap();
    let zip_path = data.path().join("broken.zip");
    fs::write(&zip_path, "not a zip").unwrap();
    let out = tempfile::tempdir().unwrap();

    incomb(out.path())
        .args(["combine", "--zip"])
        .arg(&zip_path)
        .arg("--outdir")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot extract archive"));
}

#[test]
fn inspect_reports_strategies() {
    let data = data_dir();

    incomb(data.path())
        .arg("inspect")
        .arg(data.path().join("100001_invoice_details.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice number: 100001"))
        .stdout(predicate::str::contains("anchored-title"))
        .stdout(predicate::str::contains("3 data lines, 2 parsed, 1 skipped"));
}

#[test]
fn config_init_and_get() {
    let home = tempfile::tempdir().unwrap();

    incomb(home.path())
        .args(["config", "init"])
        .assert()
        .success();

    assert!(home.path().join("incomb").join("config.json").exists());

    incomb(home.path())
        .args(["config", "get", "discovery.pattern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*invoice_details.csv"));
}

#[test]
fn config_commands_follow_explicit_path() {
    let home = tempfile::tempdir().unwrap();
    let custom = home.path().join("project").join("incomb.json");

    incomb(home.path())
        .arg("-c")
        .arg(&custom)
        .args(["config", "init"])
        .assert()
        .success();

    assert!(custom.exists());
    assert!(!home.path().join("incomb").join("config.json").exists());

    incomb(home.path())
        .arg("-c")
        .arg(&custom)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    incomb(home.path())
        .arg("-c")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("incomb.json"))
        .stderr(predicate::str::contains("given with -c, loaded"));

    incomb(home.path())
        .arg("-c")
        .arg(&custom)
        .args(["config", "get", "parsing.invoice_number_digits"])
        .assert()
        .success()
        .stdout(predicate::str::contains("6"));
}

#[test]
fn config_show_with_missing_explicit_file_fails() {
    let home = tempfile::tempdir().unwrap();

    incomb(home.path())
        .arg("-c")
        .arg(home.path().join("absent.json"))
        .args(["config", "show"])
        .assert()
        .failure();
}
