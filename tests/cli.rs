use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use mazegen::analysis::check_perfect;
use mazegen::PassageGrid;

fn mazegen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mazegen"))
        .args(args)
        .output()
        .expect("failed to run mazegen")
}

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("mazegen-cli-{}-{}", std::process::id(), name))
}

#[test]
fn writes_a_perfect_maze() {
    let path = scratch("perfect.txt");
    let out = mazegen(&["7", "5", "-o", path.to_str().unwrap(), "--seed", "3", "--check"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let text = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    let grid: PassageGrid = text.parse().unwrap();
    assert_eq!((grid.width(), grid.height()), (7, 5));
    assert!(check_perfect(&grid).is_ok());
}

#[test]
fn single_cell_output() {
    let path = scratch("single.txt");
    let out = mazegen(&["1", "1", "-o", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "00 \n");
    fs::remove_file(&path).unwrap();
}

#[test]
fn two_by_one_output() {
    let path = scratch("pair.txt");
    let out = mazegen(&["2", "1", "-o", path.to_str().unwrap()]);
    assert!(out.status.success());
    assert_eq!(fs::read_to_string(&path).unwrap(), "04 01 \n");
    fs::remove_file(&path).unwrap();
}

#[test]
fn every_algorithm_is_selectable() {
    for algorithm in [
        "path-merge",
        "recursive-backtracker",
        "hunt-and-kill",
        "aldous-broder",
        "frontier",
    ] {
        let path = scratch(algorithm);
        let out = mazegen(&[
            "6",
            "6",
            "-o",
            path.to_str().unwrap(),
            "-a",
            algorithm,
            "--check",
        ]);
        assert!(out.status.success(), "{} failed", algorithm);
        fs::remove_file(&path).unwrap();
    }
}

#[test]
fn seed_makes_runs_reproducible() {
    let first = scratch("seed-a.txt");
    let second = scratch("seed-b.txt");
    for path in [&first, &second] {
        let out = mazegen(&["15", "8", "-o", path.to_str().unwrap(), "-s", "2718"]);
        assert!(out.status.success());
    }
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
    fs::remove_file(&first).unwrap();
    fs::remove_file(&second).unwrap();
}

#[test]
fn invalid_dimensions_leave_output_untouched() {
    let path = scratch("invalid.txt");
    fs::write(&path, "keep me\n").unwrap();
    for argv in [["0", "4"], ["4", "-2"]] {
        let out = mazegen(&[argv[0], argv[1], "-o", path.to_str().unwrap()]);
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("invalid width or height"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me\n");
    }
    fs::remove_file(&path).unwrap();
}

#[test]
fn wrong_argument_count_fails() {
    assert!(!mazegen(&[]).status.success());
    assert!(!mazegen(&["3"]).status.success());
    assert!(!mazegen(&["3", "3", "3"]).status.success());
}

#[test]
fn unopenable_output_fails() {
    let path = scratch("no-such-dir").join("maze.txt");
    let out = mazegen(&["3", "3", "-o", path.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("could not open"));
}
