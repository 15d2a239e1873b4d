//! Session + feedback log integration tests

mod common;

use common::{binary_model, test_config};
use email_triage::{
    ClassifierAdapter, FeedbackLog, Pipeline, Session, SubmitOutcome, TriageConfig, Verdict,
};
use tempfile::TempDir;

fn setup() -> (TempDir, TriageConfig, ClassifierAdapter) {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir, binary_model(&dir));
    let adapter = ClassifierAdapter::load(&config.model).unwrap();
    (dir, config, adapter)
}

#[test]
fn test_log_created_on_first_feedback() {
    let (_dir, config, adapter) = setup();
    let pipeline = Pipeline::new(config.gate, &adapter);
    let log = FeedbackLog::new(&config.feedback.log_path);
    assert!(!log.exists());

    let mut session = Session::new();
    session
        .submit(&pipeline, "Please see the Dist Notice attached")
        .unwrap();
    // Classification alone writes nothing
    assert!(!log.exists());

    session
        .last()
        .unwrap()
        .record(&log, Verdict::Approved)
        .unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("timestamp,email_text,prediction,feedback"));
    assert!(lines
        .next()
        .unwrap()
        .ends_with(",Please see the Dist Notice attached,ontopic,approved"));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_each_click_appends_one_row() {
    let (_dir, config, adapter) = setup();
    let pipeline = Pipeline::new(config.gate, &adapter);
    let log = FeedbackLog::new(&config.feedback.log_path);

    let mut session = Session::new();
    let emails = [
        "SOA for Q3 attached",
        "Let's grab lunch tomorrow",
        "Drawdown notice for fund II",
    ];
    for email in emails {
        session.submit(&pipeline, email).unwrap();
        let submission = session.last().unwrap();
        submission.record(&log, Verdict::Approved).unwrap();
        submission.record(&log, Verdict::Approved).unwrap();
    }

    let records = log.records().unwrap();
    assert_eq!(records.len(), 6);
    assert_eq!(records[2].email_text, "Let's grab lunch tomorrow");
    assert_eq!(records[2].prediction, "offtopic");

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(
        contents
            .lines()
            .filter(|l| *l == "timestamp,email_text,prediction,feedback")
            .count(),
        1
    );
}

#[test]
fn test_empty_submission_records_nothing() {
    let (_dir, config, adapter) = setup();
    let pipeline = Pipeline::new(config.gate, &adapter);

    let mut session = Session::new();
    assert_eq!(
        session.submit(&pipeline, "   \n  ").unwrap(),
        SubmitOutcome::EmptyInput
    );
    assert!(session.last().is_none());
    assert!(!config.feedback.log_path.exists());
}

#[test]
fn test_existing_log_is_appended_not_rewritten() {
    let (_dir, config, adapter) = setup();
    let log = FeedbackLog::new(&config.feedback.log_path);
    std::fs::write(
        log.path(),
        "timestamp,email_text,prediction,feedback\n2024-01-02 03:04:05,old email,ontopic,disapproved\n",
    )
    .unwrap();

    let pipeline = Pipeline::new(config.gate, &adapter);
    let mut session = Session::new();
    session.submit(&pipeline, "Statement of Account").unwrap();
    session
        .last()
        .unwrap()
        .record(&log, Verdict::Approved)
        .unwrap();

    let records = log.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].timestamp, "2024-01-02 03:04:05");
    assert_eq!(records[0].email_text, "old email");
    assert_eq!(records[1].feedback, Verdict::Approved);

    let summary = log.summary().unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.by_label["ontopic"].approved, 1);
    assert_eq!(summary.by_label["ontopic"].disapproved, 1);
}
