use assert_cmd::Command;
use eyre::Result;
use predicates::prelude::*;

fn fibkit() -> Result<Command> {
    let mut cmd = Command::cargo_bin("fibkit")?;
    cmd.env("NO_COLOR", "1");
    Ok(cmd)
}

#[test]
fn compute_default_algorithm() -> Result<()> {
    fibkit()?.args(["compute", "10"]).assert().success().stdout(predicate::str::contains("F(10) = 55"));
    Ok(())
}

#[test]
fn compute_each_algorithm() -> Result<()> {
    for algorithm in ["iterative", "recursive", "recursive_memo"] {
        fibkit()?
            .args(["compute", "20", "--algorithm", algorithm])
            .assert()
            .success()
            .stdout(predicate::str::contains("F(20) = 6765").and(predicate::str::contains(algorithm)));
    }
    Ok(())
}

#[test]
fn compute_json() -> Result<()> {
    let output = fibkit()?.args(["compute", "50", "--json", "-a", "recursive_memo"]).output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["result"], 12586269025i64);
    assert_eq!(json["algorithm"], "recursive_memo");
    Ok(())
}

#[test]
fn rejects_negative_index() -> Result<()> {
    fibkit()?.args(["compute", "-1"]).assert().failure().stderr(predicate::str::contains("n must be non-negative"));
    Ok(())
}

#[test]
fn rejects_large_recursive_index() -> Result<()> {
    fibkit()?
        .args(["compute", "50", "-a", "recursive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("n must be <= 40"));
    Ok(())
}

#[test]
fn rejects_unknown_algorithm() -> Result<()> {
    fibkit()?
        .args(["compute", "5", "-a", "fast"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm"));
    Ok(())
}

#[test]
fn overflow_fails_unless_wrapping() -> Result<()> {
    fibkit()?.args(["compute", "93"]).assert().failure().stderr(predicate::str::contains("integer overflow"));
    fibkit()?.args(["compute", "93", "--wrap"]).assert().success().stdout(predicate::str::contains("F(93) = -"));
    Ok(())
}

#[test]
fn limit_overrides() -> Result<()> {
    fibkit()?.args(["--max-index", "30", "compute", "31"]).assert().failure();
    fibkit()?.args(["compute", "11", "-a", "recursive", "--max-recursive-index", "10"]).assert().failure();
    fibkit()?.args(["compute", "10", "-a", "recursive", "--max-recursive-index", "10"]).assert().success();
    Ok(())
}

#[test]
fn bench_report() -> Result<()> {
    fibkit()?
        .args(["bench", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recursive_memo").and(predicate::str::contains("all algorithms agree")));

    let output = fibkit()?.args(["bench", "40", "--json"]).output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["n"], 40);
    assert_eq!(json["results"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[test]
fn completions() -> Result<()> {
    fibkit()?.args(["completions", "bash"]).assert().success().stdout(predicate::str::contains("fibkit"));
    Ok(())
}

#[test]
fn trace_logs_memo_activity() -> Result<()> {
    fibkit()?
        .args(["-l", "trace", "compute", "10", "-a", "recursive_memo"])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("memo miss for F(10)").and(predicate::str::contains("memo insert F(10) = 55")),
        );
    Ok(())
}

#[test]
fn compute_has_no_memo_reuse_flag() -> Result<()> {
    fibkit()?.args(["compute", "10", "--reuse-memo"]).assert().failure();
    Ok(())
}
