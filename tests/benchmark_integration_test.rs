#![cfg(unix)]

use anyhow::Result;
use planner_bench::core::report::{self, group_by_domain};
use planner_bench::domain::model::{RunStatus, SolverKind};
use planner_bench::{
    BenchConfig, BenchEngine, BenchError, BenchmarkDriver, LocalStorage, ProcessInvoker,
    SolverSpec,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLAN_3: &str = "(define (problem p))\n0: (pick-up a)\n0: (stack a b)\n0: (pick-up c)\n";
const PLAN_1: &str = "(define (problem p))\n0: (move rooma roomb)\n";

fn write_domain(root: &Path, domain: &str, problems: &[(&str, &str)]) {
    let dir = root.join(domain);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("domain.pddl"), "(define (domain d))").unwrap();
    for (name, content) in problems {
        fs::write(dir.join(name), content).unwrap();
    }
}

/// SAT 直接輸出題目檔內容；HSP 先印日誌再輸出第一個步驟
fn config_for(root: &Path, domains: &[&str], sample_size: usize) -> BenchConfig {
    let toml_content = format!(
        r#"
benchmarks_dir = "{benchmarks}"
domains = [{domains}]
sample_size = {sample_size}
output_path = "{output}"

[solvers.SAT]
program = "sh"
args = ["-c", "cat \"$2\"", "sat-planner"]

[solvers.HSP]
program = "sh"
args = ["-c", "echo 'parsing {{problem}}'; grep '0:' \"$2\" | head -n 1; exit 1", "hsp-planner", "{{domain}}", "{{problem}}"]
"#,
        benchmarks = root.join("benchmarks").display(),
        domains = domains
            .iter()
            .map(|d| format!("\"{}\"", d))
            .collect::<Vec<_>>()
            .join(", "),
        sample_size = sample_size,
        output = root.join("out").join("comparison_results.csv").display(),
    );
    BenchConfig::from_toml_str(&toml_content).unwrap()
}

fn engine(config: BenchConfig) -> BenchEngine<ProcessInvoker, LocalStorage> {
    let invoker = ProcessInvoker::from_config(&config);
    BenchEngine::new(BenchmarkDriver::new(config, invoker), LocalStorage::current_dir())
}

#[tokio::test]
async fn test_full_pass_writes_comparison_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(
        &benchmarks,
        "gripper",
        &[
            ("p02.pddl", PLAN_1),
            ("p01.pddl", PLAN_3),
            ("p03.pddl", PLAN_3),
            ("readme.pddl", PLAN_3),
        ],
    );
    write_domain(&benchmarks, "blocksworld", &[("p01.pddl", PLAN_1)]);

    let config = config_for(temp_dir.path(), &["gripper", "blocksworld"], 2);
    let output = config.output_path.clone();
    let pass = engine(config).run().await?;

    // gripper 取前兩題，blocksworld 一題
    assert_eq!(pass.table.len(), 3);
    assert_eq!(pass.summary.runs, 6);
    assert_eq!(pass.summary.failed_runs, 0);

    let rows = pass.table.rows();
    assert_eq!(rows[0].domain, "gripper");
    assert_eq!(rows[0].problem, "p01.pddl");
    assert_eq!(rows[0].sat.makespan, 3);
    assert_eq!(rows[0].hsp.makespan, 1);
    assert_eq!(rows[0].hsp.status, RunStatus::Completed);
    assert_eq!(rows[1].problem, "p02.pddl");
    assert_eq!(rows[1].sat.makespan, 1);
    assert_eq!(rows[2].domain, "blocksworld");

    let text = fs::read_to_string(&output)?;
    assert!(text.starts_with("domain,problem,sat_makespan,sat_time,hsp_makespan,hsp_time\n"));
    assert_eq!(text.lines().count(), 4);
    assert!(!text.contains("readme.pddl"));

    Ok(())
}

#[tokio::test]
async fn test_written_table_reads_back() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(&benchmarks, "depots", &[("p01.pddl", PLAN_3), ("p02.pddl", "")]);
    write_domain(&benchmarks, "logistics", &[("p01.pddl", PLAN_1)]);

    let config = config_for(temp_dir.path(), &["depots", "logistics"], 5);
    let output = config.output_path.clone();
    let pass = engine(config).run().await?;

    let records = report::read_results_from(&LocalStorage::current_dir(), &output).await?;
    assert_eq!(records.len(), pass.table.len());

    for (row, record) in pass.table.rows().iter().zip(&records) {
        assert_eq!(record.domain, row.domain);
        assert_eq!(record.problem, row.problem);
        assert_eq!(record.sat_makespan, row.sat.makespan);
        assert_eq!(record.hsp_makespan, row.hsp.makespan);
        assert!((record.sat_time - row.sat.elapsed.as_secs_f64()).abs() <= 0.001);
        assert!((record.hsp_time - row.hsp.elapsed.as_secs_f64()).abs() <= 0.001);
    }

    let groups = group_by_domain(records);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].domain, "depots");
    assert_eq!(groups[0].records[1].sat_makespan, 0);

    Ok(())
}

#[tokio::test]
async fn test_silent_solver_yields_zero_makespan() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(&benchmarks, "gripper", &[("p01.pddl", PLAN_3)]);

    let config = config_for(temp_dir.path(), &["gripper"], 5)
        .with_solver(SolverKind::Hsp, SolverSpec::new("true"));
    let pass = engine(config).run().await?;

    let row = &pass.table.rows()[0];
    assert_eq!(row.sat.makespan, 3);
    assert_eq!(row.hsp.makespan, 0);
    assert_eq!(row.hsp.status, RunStatus::Completed);
    assert!(row.hsp.elapsed.as_nanos() > 0);

    Ok(())
}

#[tokio::test]
async fn test_unlaunchable_solver_does_not_abort_pass() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(&benchmarks, "gripper", &[("p01.pddl", PLAN_3), ("p02.pddl", PLAN_1)]);

    let config = config_for(temp_dir.path(), &["gripper"], 5).with_solver(
        SolverKind::Sat,
        SolverSpec::new(temp_dir.path().join("missing-sat").display().to_string()),
    );
    let output = config.output_path.clone();
    let pass = engine(config).run().await?;

    assert_eq!(pass.table.len(), 2);
    assert_eq!(pass.summary.failed_runs, 2);
    for row in pass.table.rows() {
        assert_eq!(row.sat.makespan, 0);
        assert_eq!(row.sat.status, RunStatus::Failed);
    }

    let text = fs::read_to_string(&output)?;
    assert!(text.contains("gripper,p01.pddl,0,"));

    Ok(())
}

#[tokio::test]
async fn test_missing_domain_aborts_without_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(&benchmarks, "gripper", &[("p01.pddl", PLAN_3)]);

    let config = config_for(temp_dir.path(), &["gripper", "depots"], 5);
    let output = config.output_path.clone();

    let err = engine(config).run().await.unwrap_err();
    assert!(matches!(err, BenchError::DomainNotFound { .. }));
    assert!(err.is_configuration_error());
    assert!(!output.exists());

    Ok(())
}

#[tokio::test]
async fn test_rerun_overwrites_previous_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(&benchmarks, "gripper", &[("p01.pddl", PLAN_3), ("p02.pddl", PLAN_1)]);

    let config = config_for(temp_dir.path(), &["gripper"], 5);
    let output = config.output_path.clone();
    engine(config.clone()).run().await?;

    let mut smaller = config;
    smaller.sample_size = 1;
    engine(smaller).run().await?;

    let records = report::read_results_from(&LocalStorage::current_dir(), &output).await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].problem, "p01.pddl");

    Ok(())
}

#[test]
fn test_dry_run_plan_lists_selected_problems() {
    let temp_dir = TempDir::new().unwrap();
    let benchmarks = temp_dir.path().join("benchmarks");
    write_domain(
        &benchmarks,
        "gripper",
        &[("p01.pddl", PLAN_3), ("p02.pddl", PLAN_1), ("p03.pddl", PLAN_1)],
    );

    let config = config_for(temp_dir.path(), &["gripper"], 2);
    let output = config.output_path.clone();
    let corpora = engine(config).plan().unwrap();

    assert_eq!(corpora.len(), 1);
    assert_eq!(corpora[0].problems.len(), 2);
    assert!(!output.exists());
}
