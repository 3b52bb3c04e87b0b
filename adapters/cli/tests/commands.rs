use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn sculptor(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_maze-sculptor"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run maze-sculptor")
}

fn layout_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "maze-sculptor-{}-{name}.txt",
        std::process::id()
    ));
    fs::write(&path, contents).expect("temp dir is writable");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn report_on_default_layout_connects_every_corner() {
    let output = sculptor(&["report", "--size", "5"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("connected spawns: 4/4"), "{text}");
    assert!(text.contains("max distance: 4"), "{text}");
}

#[test]
fn check_flags_the_only_corridor_cell() {
    let path = layout_file("corridor", "S.N\n###\n...\n");
    let path = path.to_str().expect("utf-8 temp path");

    let blocking = sculptor(&["check", "--layout", path, "1", "0"]);
    let harmless = sculptor(&["check", "--layout", path, "0", "2"]);

    assert!(stdout(&blocking).contains("would block all paths"));
    assert!(stdout(&harmless).contains("keeps a path open"));
}

#[test]
fn malformed_layout_fails_with_a_reason() {
    let path = layout_file("ragged", "S..\n.N\n...\n");

    let output = sculptor(&["report", "--layout", path.to_str().expect("utf-8 temp path")]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("layout must be square"), "{stderr}");
}

#[test]
fn optimize_prints_the_final_score() {
    let path = layout_file("open", "S.....\n......\n......\n......\n......\n.....N\n");

    let output = sculptor(&[
        "optimize",
        "--layout",
        path.to_str().expect("utf-8 temp path"),
        "--iterations",
        "300",
        "--seed",
        "11",
    ]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("(initial 10)"));
}

#[test]
fn unbuildable_cells_survive_optimisation_and_refuse_walls() {
    let path = layout_file("marked", "S.....\nXXXXX.\n......\n.XXXXX\n......\n.....N\n");
    let path = path.to_str().expect("utf-8 temp path");

    let check = sculptor(&["check", "--layout", path, "2", "1"]);
    assert!(stdout(&check).contains("walls cannot be built there"));

    let output = sculptor(&["optimize", "--layout", path, "--iterations", "400", "--seed", "3"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let rows: Vec<Vec<char>> = text.lines().take(6).map(|row| row.chars().collect()).collect();
    for x in 0..5 {
        assert_ne!(rows[1][x], '#', "({x}, 1) was walled:\n{text}");
        assert_ne!(rows[3][x + 1], '#', "({}, 3) was walled:\n{text}", x + 1);
    }
}

#[test]
fn evolve_prints_the_final_score() {
    let path = layout_file("evolve", "S.....\n......\n......\n......\n......\n.....N\n");

    let output = sculptor(&[
        "evolve",
        "--layout",
        path.to_str().expect("utf-8 temp path"),
        "--generations",
        "5",
        "--seed",
        "11",
    ]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("(initial 10)"), "{text}");
    assert!(text.contains("walls added:"), "{text}");
}
