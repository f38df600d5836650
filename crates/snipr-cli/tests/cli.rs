use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn temp_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("snipr-cli-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_input(dir: &PathBuf, contents: &str) -> PathBuf {
    let path = dir.join("target.txt");
    fs::write(&path, contents).expect("write input");
    path
}

fn snipr(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snipr"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run snipr")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const PROFILE: &str = "first_name: John\nlast_name: Smith\nbirth_year: 1990\n";

#[test]
fn simple_run_writes_wordlist_and_progress() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");

    let text = stdout(&output);
    assert!(text.contains("[+] Reading input from"));
    assert!(text.contains("[+] Generating wordlist..."));
    assert!(text.contains("[+] Wordlist saved to"));
    assert!(text.contains("Execution time:"));

    let words = fs::read_to_string(&out).expect("read wordlist");
    let words: Vec<&str> = words.lines().collect();
    for expected in ["john_smith", "smith_john", "John_Smith", "john1990", "j0hn", "john123"] {
        assert!(words.contains(&expected), "missing {expected}");
    }
    let mut sorted = words.clone();
    sorted.sort();
    assert_eq!(words, sorted);
}

#[test]
fn quiet_level_prints_no_progress() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("[+]"));
}

#[test]
fn dry_run_skips_writing() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--dry-run",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("[+] Dry run enabled. Would generate"));
    assert!(!out.exists());
}

#[test]
fn stats_for_empty_input_only_report_total() {
    let dir = temp_dir();
    let input = write_input(&dir, "# nothing here\n\n");
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "-S",
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("=== Statistics ===\nTotal passwords generated: 0\n"));
    assert!(!text.contains("Min length"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "");
}

#[test]
fn num_truncates_and_length_bounds_apply() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--min-length",
        "6",
        "--max-length",
        "9",
        "-n",
        "5",
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    let words = fs::read_to_string(&out).expect("read");
    let words: Vec<&str> = words.lines().collect();
    assert_eq!(words.len(), 5);
    assert!(
        words
            .iter()
            .all(|word| (6..=9).contains(&word.chars().count()))
    );
}

#[test]
fn append_mode_extends_existing_file() {
    let dir = temp_dir();
    let input = write_input(&dir, "pet: rex\n");
    let target = dir.join("existing.txt");
    fs::write(&target, "keepme\n").expect("seed file");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-a",
        target.to_str().unwrap(),
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    let contents = fs::read_to_string(&target).expect("read");
    assert!(contents.starts_with("keepme\n"));
    assert!(contents.lines().any(|line| line == "rex123"));
}

#[test]
fn json_export_writes_array() {
    let dir = temp_dir();
    let input = write_input(&dir, "pet: rex\n");
    let json_path = dir.join("words.json");
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--export-json",
        json_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("[+] Exported wordlist to JSON file"));
    assert!(!out.exists());

    let words: Vec<String> =
        serde_json::from_slice(&fs::read(&json_path).expect("read json")).expect("parse json");
    assert!(words.contains(&"Rex".to_string()));
    assert!(words.contains(&"rex!".to_string()));
}

#[test]
fn randomized_runs_are_reproducible_with_seed() {
    let dir = temp_dir();
    let input = write_input(&dir, "first_name: anna\npet: rex\nnumbers: 7\n");
    let first = dir.join("first.txt");
    let second = dir.join("second.txt");

    for out in [&first, &second] {
        let output = snipr(&[
            "-i",
            input.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--strategy",
            "randomized",
            "--max-candidates",
            "40",
            "--seed",
            "42",
            "--shuffle",
            "-V",
            "0",
        ]);
        assert!(output.status.success());
    }

    let first = fs::read_to_string(&first).expect("read");
    let second = fs::read_to_string(&second).expect("read");
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn exhaustive_without_bounds_fails() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--strategy",
        "exhaustive",
    ]);
    assert!(!output.status.success());
    assert!(!out.exists());
}

#[test]
fn num_bounds_exhaustive_strategy() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--strategy",
        "exhaustive",
        "-n",
        "30",
        "-V",
        "0",
    ]);
    assert!(output.status.success(), "{output:?}");
    let words = fs::read_to_string(&out).expect("read");
    assert_eq!(words.lines().count(), 30);
}

#[test]
fn missing_input_fails() {
    let dir = temp_dir();
    let output = snipr(&["-i", dir.join("absent.txt").to_str().unwrap(), "-V", "0"]);
    assert!(!output.status.success());
}

#[test]
fn config_file_values_are_overridden_by_flags() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let config = dir.join("snipr.toml");
    fs::write(
        &config,
        "[generation]\nstrategy = \"randomized\"\nmax_candidates = 20\nseparators = [\".\"]\n",
    )
    .expect("write config");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--max-candidates",
        "50",
        "--print-config",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("strategy = \"randomized\""));
    assert!(text.contains("max_candidates = 50"));
    assert!(text.contains("\".\""));
    assert!(!text.contains("Execution time"));
}

#[test]
fn report_and_log_file_are_written() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);
    let out = dir.join("wordlist.txt");
    let report = dir.join("report.json");
    let log = dir.join("run.ndjson");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--seed",
        "3",
        "--report",
        report.to_str().unwrap(),
        "--log-file",
        log.to_str().unwrap(),
        "-V",
        "0",
    ]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&fs::read(&report).expect("read report")).expect("parse report");
    assert_eq!(report["strategy"], "simple");
    assert_eq!(report["effective_seed"], 3);
    let written = fs::read_to_string(&out).expect("read").lines().count();
    assert_eq!(report["final_count"], written);

    let log = fs::read_to_string(&log).expect("read log");
    let first: serde_json::Value =
        serde_json::from_str(log.lines().next().expect("log line")).expect("json line");
    assert!(first.get("timestamp").is_some());
    assert!(log.contains("generation completed"));
}

#[test]
fn seed_outside_signed_range_is_refused() {
    let dir = temp_dir();
    let input = write_input(&dir, PROFILE);

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "--seed",
        "18446744073709551615",
        "--print-config",
    ]);
    assert!(!output.status.success());

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "--seed",
        "9223372036854775807",
        "--print-config",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("seed = 9223372036854775807"));
}

#[test]
fn simple_run_combines_pairs_unless_disabled() {
    let dir = temp_dir();
    let input = write_input(&dir, "pet: rex\n");
    let combined = dir.join("combined.txt");
    let plain = dir.join("plain.txt");

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        combined.to_str().unwrap(),
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    let words = fs::read_to_string(&combined).expect("read");
    assert!(words.lines().any(|line| line == "Rex_rex"));
    assert!(words.lines().any(|line| line == "rexRex"));

    let output = snipr(&[
        "-i",
        input.to_str().unwrap(),
        "-o",
        plain.to_str().unwrap(),
        "--no-combine-passwords",
        "-V",
        "0",
    ]);
    assert!(output.status.success());
    let words = fs::read_to_string(&plain).expect("read");
    assert!(!words.lines().any(|line| line == "Rex_rex"));
    assert_eq!(words.lines().count(), 9);
}
