use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

const BINARY: &str = "genes-detective";
type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn file_doesnt_exist() -> TestResult {
    let dir = tempdir()?;
    let mut cmd = Command::cargo_bin(BINARY)?;

    cmd.current_dir(dir.path())
        .arg("filter")
        .arg("file_which_does_not_exist.fastq")
        .args(["-o", "out.fastq"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot read input"));

    Ok(())
}

#[test]
fn filter_writes_into_default_directory() -> TestResult {
    let dir = tempdir()?;
    std::fs::write(
        dir.path().join("in.fastq"),
        "@a\nGGGG\n+\nIIII\n@b\nATAT\n+\nIIII\n@c\nGCAT\n+\n####\n",
    )?;

    Command::cargo_bin(BINARY)?
        .current_dir(dir.path())
        .args(["filter", "in.fastq", "-o", "kept.fastq", "--gc", "50", "-q", "10"])
        .assert()
        .success();

    let out = std::fs::read_to_string(dir.path().join("filtered").join("kept.fastq"))?;
    assert_eq!(out, "@b\nATAT\n+\nIIII\n");
    Ok(())
}

#[test]
fn rejects_three_part_bounds() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["filter", "in.fastq", "-o", "x.fastq", "--gc", "10,20,30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse bounds"));
    Ok(())
}

#[test]
fn tools_reverse_complement() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["tools", "reverse_complement", "ATGC", "AAUG"])
        .assert()
        .success()
        .stdout("GCAT\nCAUU\n");
    Ok(())
}

#[test]
fn tools_reports_the_offending_base() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["tools", "transcribe", "ATG", "AUG"])
        .assert()
        .success()
        .stdout("AUG\nAUG: invalid character 'U' at position 1\n");
    Ok(())
}

#[test]
fn motif_positions() -> TestResult {
    Command::cargo_bin(BINARY)?
        .args(["motif", "MKKKLW", "KK"])
        .assert()
        .success()
        .stdout("2 3\n");
    Ok(())
}
