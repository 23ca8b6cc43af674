use ai_grading::models::{FailureKind, Provenance};
use ai_grading::{App, Config};
use std::fs;
use std::path::PathBuf;

/// 准备一个临时工作目录：评分任务 + 两份提交（其中一份为空）
fn setup_workspace(name: &str) -> (PathBuf, Config) {
    let root = std::env::temp_dir().join(format!("ai_grading_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&root);
    let submissions = root.join("submissions");
    fs::create_dir_all(&submissions).unwrap();

    fs::write(
        root.join("job.toml"),
        r#"
total_marks = 20
additional_instructions = "Be strict."

[criteria]
"Correct answer" = 10
"#,
    )
    .unwrap();
    fs::write(submissions.join("alice.txt"), "The derivative of x^2 is 2x.").unwrap();
    fs::write(submissions.join("bob.txt"), "   ").unwrap();
    fs::write(submissions.join("notes.md"), "ignored").unwrap();

    let config = Config {
        submissions_folder: submissions.display().to_string(),
        results_folder: root.join("results").display().to_string(),
        job_file: root.join("job.toml").display().to_string(),
        output_log_file: root.join("logs").join("grading.log").display().to_string(),
        llm_api_key: String::new(),
        llm_timeout_secs: 1,
        ..Default::default()
    };

    (root, config)
}

#[tokio::test]
async fn test_offline_run_writes_report() {
    let (root, config) = setup_workspace("offline_run");

    let mut app = App::initialize(config).await.unwrap();
    let path = app.run().await.unwrap().expect("应该写出报告");

    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let rows = report["rows"]["submissions"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["filename"], "alice.txt");
    assert_eq!(rows[0]["provenance"], "failed:service_unavailable");
    assert_eq!(rows[1]["filename"], "bob.txt");
    assert_eq!(rows[1]["provenance"], "failed:empty_submission");

    let summary = app.analytics().class_summary();
    assert_eq!(summary.total_submissions, 2);
    assert_eq!(summary.average_percentage, 0.0);
    assert_eq!(summary.degraded_records, 2);

    let dataset = app.analytics().snapshot();
    assert!(dataset
        .rows()
        .iter()
        .all(|row| row.awarded_marks == 0.0 && row.total_marks == 20));

    assert!(root.join("logs").join("grading.log").exists());
    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_empty_folder_writes_nothing() {
    let (root, config) = setup_workspace("empty_folder");
    for entry in fs::read_dir(&config.submissions_folder).unwrap() {
        fs::remove_file(entry.unwrap().path()).unwrap();
    }

    let mut app = App::initialize(config).await.unwrap();
    assert!(app.run().await.unwrap().is_none());
    assert_eq!(app.analytics().class_summary().total_submissions, 0);

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_invalid_job_fails_initialization() {
    let (root, config) = setup_workspace("invalid_job");
    fs::write(&config.job_file, "total_marks = 5\n[criteria]\nA = 10\n").unwrap();

    assert!(App::initialize(config).await.is_err());

    let _ = fs::remove_dir_all(root);
}

#[tokio::test]
async fn test_flow_failure_kinds() {
    use ai_grading::models::{GradingJob, Submission};
    use ai_grading::{GradingFlow, SubmissionCtx};

    let flow = GradingFlow::new(&Config::default(), GradingJob::default());
    let record = flow
        .run(
            &Submission::new("x.txt", "answer"),
            &SubmissionCtx::new("x.txt", 1, 1),
        )
        .await;
    assert_eq!(
        record.provenance,
        Provenance::Failed(FailureKind::ServiceUnavailable)
    );
    assert!(record.feedback.contains("API"));
}
