use std::sync::Arc;

use super::common::{now, synthetic_catalog};
use crate::catalog::QuestionId;
use crate::survey::memory::MemoryAnswerRepository;
use crate::survey::repository::AnswerRepository;
use crate::survey::{
    AnswerReconciler, AnswerSubmission, AnswerValue, GroupId, ReconcileError, SaveOutcome, UserId,
};

fn reconciler() -> (AnswerReconciler<MemoryAnswerRepository>, Arc<MemoryAnswerRepository>) {
    let answers = Arc::new(MemoryAnswerRepository::default());
    let reconciler = AnswerReconciler::new(Arc::new(synthetic_catalog()), answers.clone());
    (reconciler, answers)
}

fn submission(question: &str, value: AnswerValue) -> AnswerSubmission {
    AnswerSubmission {
        year: 2025,
        group_id: GroupId(10),
        user_id: Some(UserId(1)),
        event_id: None,
        question_id: QuestionId::from(question),
        value,
        select: None,
    }
}

fn stored(answers: &MemoryAnswerRepository, question: &str) -> Option<String> {
    answers
        .fetch_for_respondent(GroupId(10), 2025, Some(UserId(1)))
        .expect("fetch")
        .into_iter()
        .find(|row| row.question_id.as_str() == question)
        .map(|row| row.answer)
}

#[test]
fn saving_twice_keeps_one_row_with_the_second_value() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(submission("CC", AnswerValue::Number(4.0)), now())
        .expect("first save");
    reconciler
        .save_answer(submission("CC", AnswerValue::Number(7.0)), now())
        .expect("second save");

    let rows = answers
        .fetch_for_respondent(GroupId(10), 2025, Some(UserId(1)))
        .expect("fetch");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].answer, "7");
}

#[test]
fn respondents_do_not_collide_on_the_same_question() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(submission("CC", AnswerValue::Number(4.0)), now())
        .expect("user answer");

    let mut group_level = submission("CC", AnswerValue::Number(8.0));
    group_level.user_id = None;
    reconciler
        .save_answer(group_level, now())
        .expect("group answer");

    let all = answers
        .fetch_by_group_year(GroupId(10), 2025)
        .expect("fetch");
    assert_eq!(all.len(), 2);
}

#[test]
fn update_rules_force_write_the_literal_value() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(submission("BB", AnswerValue::Number(3.0)), now())
        .expect("save");

    assert_eq!(stored(&answers, "BB").as_deref(), Some("3"));
    assert_eq!(stored(&answers, "CC").as_deref(), Some("9"));
}

#[test]
fn matching_radio_choice_clears_dependents() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(submission("BB", AnswerValue::Number(12.0)), now())
        .expect("answer the follow-up first");
    reconciler
        .save_answer(submission("AA", AnswerValue::Number(0.0)), now())
        .expect("pick the clearing choice");

    assert_eq!(stored(&answers, "BB").as_deref(), Some("0"));
}

#[test]
fn clear_propagation_is_single_level() {
    let (reconciler, answers) = reconciler();

    // AA's "No" clears BB; BB's own update rule (CC = 9) must not fire
    // off the side-effect write.
    reconciler
        .save_answer(submission("AA", AnswerValue::Number(0.0)), now())
        .expect("save");

    assert_eq!(stored(&answers, "BB").as_deref(), Some("0"));
    assert_eq!(stored(&answers, "CC"), None);
}

#[test]
fn non_matching_radio_value_clears_nothing() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(submission("BB", AnswerValue::Number(12.0)), now())
        .expect("answer the follow-up");
    reconciler
        .save_answer(submission("AA", AnswerValue::Number(1.0)), now())
        .expect("pick the non-clearing choice");

    assert_eq!(stored(&answers, "BB").as_deref(), Some("12"));
}

#[test]
fn blank_values_come_back_as_a_reprompt() {
    let (reconciler, answers) = reconciler();

    let outcome = reconciler
        .save_answer(submission("CC", AnswerValue::Text("   ".to_string())), now())
        .expect("blank is not an error");

    assert!(matches!(outcome, SaveOutcome::Invalid { message } if message.contains("enter a value")));
    assert!(answers
        .fetch_by_group_year(GroupId(10), 2025)
        .expect("fetch")
        .is_empty());
}

#[test]
fn unknown_questions_are_rejected() {
    let (reconciler, _) = reconciler();

    let result = reconciler.save_answer(submission("ZZ", AnswerValue::Number(1.0)), now());
    assert!(matches!(
        result,
        Err(ReconcileError::UnknownQuestion(id)) if id.as_str() == "ZZ"
    ));
}

#[test]
fn array_answers_store_as_json_for_checkbox_questions() {
    let (reconciler, answers) = reconciler();

    reconciler
        .save_answer(
            submission("EE", AnswerValue::Items(vec![200.0, 150.0])),
            now(),
        )
        .expect("save");

    assert_eq!(stored(&answers, "EE").as_deref(), Some("[200.0,150.0]"));
}

#[test]
fn array_answers_are_rejected_for_scalar_questions() {
    let (reconciler, _) = reconciler();

    let outcome = reconciler
        .save_answer(submission("CC", AnswerValue::Items(vec![1.0])), now())
        .expect("mismatch is a reprompt");

    assert!(matches!(outcome, SaveOutcome::Invalid { .. }));
}
