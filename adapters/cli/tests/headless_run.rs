use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_frontier-defence"))
        .args(args)
        .output()
        .expect("failed to invoke frontier-defence binary")
}

#[test]
fn headless_run_prints_summaries() {
    let output = run(&[
        "--frames",
        "240",
        "--summary-every",
        "120",
        "--seed",
        "3",
        "--auto-build",
    ]);
    assert!(output.status.success(), "frontier-defence should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("frame ").count(), 3, "{stdout}");
    assert!(stdout.contains("kills "), "{stdout}");
    assert!(stdout.contains("towers  1") || stdout.contains("towers  2"), "{stdout}");
}

#[test]
fn unknown_tower_in_loadout_fails() {
    let output = run(&["--frames", "1", "--loadout", "scout,catapult,farm,medic,sniper"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("catapult"), "{stderr}");
}

#[test]
fn auto_built_turrets_accept_a_targeting_mode() {
    let output = run(&["--frames", "60", "--auto-build", "--targeting", "strongest"]);
    assert!(output.status.success(), "frontier-defence should succeed");

    let rejected = run(&["--frames", "1", "--targeting", "furthest"]);
    assert!(!rejected.status.success());
    let stderr = String::from_utf8_lossy(&rejected.stderr);
    assert!(stderr.contains("furthest"), "{stderr}");
}
