use quizterm::config::{QuestionBank, QuizConfig};
use quizterm::error::{is_defect, user_friendly_message};
use quizterm::models::Question;
use quizterm::QuizError;
use std::fs;

#[test]
fn test_user_friendly_messages() {
    let msg = user_friendly_message(&QuizError::BankError("question 3: no options".into()));
    assert!(msg.contains("question bank is invalid"));
    assert!(msg.contains("question 3"));

    let msg = user_friendly_message(&QuizError::TuiError("not a tty".into()));
    assert!(msg.contains("terminal"));

    let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "bank.toml");
    assert!(user_friendly_message(&QuizError::IoError(missing)).contains("File not found"));
}

#[test]
fn test_defects_are_told_apart_from_bad_input() {
    assert!(is_defect(&QuizError::AlreadyResolved(0)));
    assert!(is_defect(&QuizError::Unresolved(2)));
    assert!(is_defect(&QuizError::QuizFinished));
    assert!(!is_defect(&QuizError::ConfigError("bad".into())));
    assert!(!is_defect(&QuizError::BankError("bad".into())));
}

#[test]
fn test_bank_with_missing_correct_answer_is_rejected() {
    let err = QuestionBank::new(vec![
        Question::new("Ok?", ["yes", "no"], "yes"),
        Question::new("Broken?", ["a", "b"], "c"),
    ])
    .unwrap_err();

    match err {
        QuizError::BankError(msg) => assert!(msg.contains("question 2")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreadable_bank_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    assert!(matches!(QuestionBank::load(&missing), Err(QuizError::BankError(_))));

    let garbled = dir.path().join("bank.json");
    fs::write(&garbled, "{ not json").unwrap();
    assert!(matches!(QuestionBank::load(&garbled), Err(QuizError::BankError(_))));

    let wrong_kind = dir.path().join("bank.csv");
    fs::write(&wrong_kind, "prompt,options").unwrap();
    assert!(matches!(QuestionBank::load(&wrong_kind), Err(QuizError::BankError(_))));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizterm.toml");
    fs::write(&path, "negative_mark = 1.5\n").unwrap();

    assert!(matches!(QuizConfig::load_from(&path), Err(QuizError::ConfigError(_))));
}

#[test]
fn test_config_round_trip_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("quizterm.toml");
    let config = QuizConfig::default().with_negative_mark(0.5).with_shuffle_options(false);

    config.save_to(&path).unwrap();
    assert_eq!(QuizConfig::load_from(&path).unwrap(), config);
}
