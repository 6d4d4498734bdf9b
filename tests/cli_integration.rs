use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn apodlog(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("apodlog").unwrap();
    cmd.env("APODLOG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("APODLOG_LOG");
    cmd
}

/// Same field order the logger writes, so rewritten files compare equal.
fn jsonl_line(date: &str, title: &str) -> String {
    format!(
        "{{\"date\":\"{date}\",\"title\":\"{title}\",\"url\":\"https://apod.nasa.gov/apod/image/{date}.jpg\",\
         \"explanation\":\"First sentence. Second sentence.\",\"logged_at\":\"Day: 01-02-2024 | Time: 10:00:00\"}}\n"
    )
}

fn csv_row(date: &str, title: &str) -> String {
    format!(
        "{},{},https://apod.nasa.gov/apod/image/{}.jpg,First sentence. Second sentence.,Day: 01-02-2024 | Time: 10:00:00\n",
        date, title, date
    )
}

/// Writes both logs with the same entries, in the given order.
fn seed(home: &Path, entries: &[(&str, &str)]) {
    let mut jsonl = String::new();
    let mut csv = String::from("date,title,url,explanation,logged_at\n");
    for (date, title) in entries {
        jsonl.push_str(&jsonl_line(date, title));
        csv.push_str(&csv_row(date, title));
    }
    fs::write(home.join("output.jsonl"), jsonl).unwrap();
    fs::write(home.join("output.csv"), csv).unwrap();
}

#[test]
fn test_init_creates_then_finds() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path().join("data");

    apodlog(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    assert!(home.join("output.jsonl").is_file());
    assert_eq!(
        fs::read_to_string(home.join("output.csv")).unwrap().trim_end(),
        "date,title,url,explanation,logged_at"
    );
    assert_eq!(
        fs::read_to_string(home.join("user_settings.jsonl"))
            .unwrap()
            .lines()
            .count(),
        4
    );

    apodlog(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files present."));
}

#[test]
fn test_list_missing_store_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    apodlog(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("apodlog init"));
}

#[test]
fn test_list_first_last_and_clamp() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(
        temp_dir.path(),
        &[
            ("2001-01-01", "Alpha"),
            ("2002-02-02", "Beta"),
            ("2003-03-03", "Gamma"),
        ],
    );

    apodlog(temp_dir.path())
        .args(["list", "--last", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry #1 (Gamma):"))
        .stdout(predicate::str::contains("Alpha").not());

    apodlog(temp_dir.path())
        .args(["list", "--first", "2", "--store", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry #2 (Beta):"))
        .stdout(predicate::str::contains("Gamma").not());

    apodlog(temp_dir.path())
        .args(["list", "--first", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Only 3 entries exist. Displaying all entries instead.",
        ))
        .stdout(predicate::str::contains("Entry #3 (Gamma):"));

    apodlog(temp_dir.path())
        .args(["list", "--last", "0"])
        .assert()
        .failure();
}

#[test]
fn test_newest_oldest_and_count() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed(
        temp_dir.path(),
        &[
            ("2010-10-10", "Middle"),
            ("1999-09-09", "Old"),
            ("2020-02-20", "New"),
        ],
    );

    apodlog(temp_dir.path())
        .arg("newest")
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: 2020-02-20"));

    apodlog(temp_dir.path())
        .args(["oldest", "--store", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date: 1999-09-09"));

    apodlog(temp_dir.path())
        .args(["count", "--store", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.csv: 3 entries"));
}

#[test]
fn test_delete_present_and_absent() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(
        home,
        &[
            ("2001-01-01", "Alpha"),
            ("2002-02-02", "Beta"),
            ("2003-03-03", "Gamma"),
        ],
    );

    apodlog(home)
        .args(["delete", "2002-02-02"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entry 2002-02-02 was successfully deleted from output.jsonl.",
        ));

    let jsonl = fs::read_to_string(home.join("output.jsonl")).unwrap();
    assert_eq!(
        jsonl,
        format!(
            "{}{}",
            jsonl_line("2001-01-01", "Alpha"),
            jsonl_line("2003-03-03", "Gamma")
        )
    );
    let csv = fs::read_to_string(home.join("output.csv")).unwrap();
    assert!(!csv.contains("2002-02-02"));
    assert!(csv.contains("Gamma"));

    let before_jsonl = fs::read(home.join("output.jsonl")).unwrap();
    let before_csv = fs::read(home.join("output.csv")).unwrap();
    apodlog(home)
        .args(["delete", "2005", "05", "05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Entry not found: 2005-05-05"));
    assert_eq!(fs::read(home.join("output.jsonl")).unwrap(), before_jsonl);
    assert_eq!(fs::read(home.join("output.csv")).unwrap(), before_csv);
}

#[test]
fn test_attach_extends_csv_header() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha")]);

    apodlog(home)
        .args(["attach", "2001-01-01", "/pics/alpha.jpg"])
        .assert()
        .success();

    let csv = fs::read_to_string(home.join("output.csv")).unwrap();
    assert!(csv.starts_with("date,title,url,explanation,logged_at,local_file_path"));
    assert!(fs::read_to_string(home.join("output.jsonl"))
        .unwrap()
        .contains("\"local_file_path\":\"/pics/alpha.jpg\""));

    apodlog(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local_File: /pics/alpha.jpg"));
}

#[test]
fn test_clear_requires_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha")]);

    apodlog(home)
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled."));
    assert!(fs::read_to_string(home.join("output.jsonl"))
        .unwrap()
        .contains("Alpha"));

    apodlog(home).args(["clear", "--yes"]).assert().success();
    assert_eq!(fs::read_to_string(home.join("output.jsonl")).unwrap(), "");
    assert_eq!(
        fs::read_to_string(home.join("output.csv")).unwrap().trim_end(),
        "date,title,url,explanation,logged_at"
    );
}

#[test]
fn test_doctor_resyncs_stores() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha")]);
    let mut jsonl = fs::read_to_string(home.join("output.jsonl")).unwrap();
    jsonl.push_str(&jsonl_line("2002-02-02", "Beta"));
    fs::write(home.join("output.jsonl"), jsonl).unwrap();

    apodlog(home)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 entry(ies) from output.jsonl into output.csv."));
    assert!(fs::read_to_string(home.join("output.csv"))
        .unwrap()
        .contains("Beta"));

    apodlog(home)
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found."));
}

#[test]
fn test_settings_toggle_and_set() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    apodlog(home)
        .args(["settings", "auto-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auto-save APOD files is now ON."));

    apodlog(home)
        .args(["settings", "automatically_redirect", "no"])
        .assert()
        .success();

    let raw = fs::read_to_string(home.join("user_settings.jsonl")).unwrap();
    assert!(raw.contains(r#"{"automatically_redirect":"no"}"#));
    assert!(raw.contains(r#"{"automatically_save_apod_files":"yes"}"#));

    apodlog(home)
        .args(["settings", "launch_count", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting"));
}

#[test]
fn test_fetch_rejects_dates_outside_archive() {
    let temp_dir = tempfile::tempdir().unwrap();

    apodlog(temp_dir.path())
        .args(["fetch", "date", "1995-06-15"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("APOD is available starting 1995-06-16."));

    apodlog(temp_dir.path())
        .args(["fetch", "random", "21"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 20"));
}

#[test]
fn test_shell_runs_commands_until_quit() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha"), ("2002-02-02", "Beta")]);

    apodlog(home)
        .write_stdin("count\n/auto_wallpaper\nlist --last 5\ndelete 1990-01-01\nq\ncount\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("output.jsonl: 2 entries"))
        .stdout(predicate::str::contains("Auto-set-wallpaper is now ON."))
        .stdout(predicate::str::contains("Only 2 entries exist."))
        .stderr(predicate::str::contains("Entry not found: 1990-01-01"));

    let raw = fs::read_to_string(home.join("user_settings.jsonl")).unwrap();
    assert!(raw.contains(r#"{"launch_count":"1"}"#));
    assert!(raw.contains(r#"{"automatically_set_wallpaper":"yes"}"#));
}

#[test]
fn test_shell_clear_reads_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha")]);

    apodlog(home)
        .write_stdin("clear\nY\ncount\nq\n")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared output.jsonl (1 entries removed)."))
        .stdout(predicate::str::contains("output.jsonl: 0 entries"));
    assert_eq!(fs::read_to_string(home.join("output.jsonl")).unwrap(), "");
}

#[test]
fn test_shell_survives_garbage_settings_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha")]);
    fs::write(
        home.join("user_settings.jsonl"),
        "{\"automatically_redirect\": \"no\"}\n{oops\n",
    )
    .unwrap();

    apodlog(home)
        .write_stdin("count\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("output.jsonl: 1 entries"));

    let raw = fs::read_to_string(home.join("user_settings.jsonl")).unwrap();
    assert!(!raw.contains("oops"));
    assert!(raw.contains(r#"{"automatically_redirect":"no"}"#));
    assert!(raw.contains(r#"{"launch_count":"1"}"#));
}

#[test]
fn test_delete_record_dated_ahead_of_local_clock() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed(home, &[("2001-01-01", "Alpha"), ("2999-01-01", "Future")]);

    apodlog(home)
        .args(["delete", "2999-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entry 2999-01-01 was successfully deleted from output.csv.",
        ));
    assert!(!fs::read_to_string(home.join("output.jsonl"))
        .unwrap()
        .contains("Future"));
}
