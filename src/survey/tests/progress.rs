use std::sync::Arc;

use super::common::{home_group, member, now, office_group, synthetic_catalog};
use crate::catalog::{Catalog, GroupKind, QuestionId, SurveyMode};
use crate::survey::{AnswerRecord, ProgressEngine, TaskKind, UserId};

fn engine(catalog: Catalog) -> ProgressEngine {
    ProgressEngine::new(Arc::new(catalog))
}

fn answer(question: &str) -> AnswerRecord {
    AnswerRecord {
        year: 2025,
        group_id: office_group().id,
        question_id: QuestionId::from(question),
        user_id: Some(UserId(1)),
        event_id: None,
        answer: "1".to_string(),
        select: None,
        created_on: now(),
    }
}

#[test]
fn overview_points_at_the_first_unanswered_question() {
    let engine = engine(synthetic_catalog());

    let overview = engine.overview(SurveyMode::User, GroupKind::Office, &[answer("AA")]);

    assert_eq!(overview.goto, Some(QuestionId::from("BB")));
    assert_eq!(overview.start_id, Some(QuestionId::from("AA")));
    assert_eq!(overview.answer_count, 1);
    assert!(!overview.complete);
}

#[test]
fn progress_grows_with_answers_and_caps_at_one_hundred() {
    let engine = engine(synthetic_catalog());

    let empty = engine.overview(SurveyMode::User, GroupKind::Office, &[]);
    assert_eq!(empty.progress_percent, 0);

    let partial = engine.overview(
        SurveyMode::User,
        GroupKind::Office,
        &[answer("AA"), answer("BB")],
    );
    assert_eq!(partial.progress_percent, 40);
    assert!(partial.progress_percent >= empty.progress_percent);

    // Stale rows from a retired catalog still count toward the total,
    // but the percentage never passes 100.
    let stale = vec![
        answer("AA"),
        answer("BB"),
        answer("CC"),
        answer("DD"),
        answer("EE"),
        answer("XX"),
        answer("YY"),
    ];
    let oversubscribed = engine.overview(SurveyMode::User, GroupKind::Office, &stale);
    assert_eq!(oversubscribed.progress_percent, 100);
    assert!(oversubscribed.complete);
}

#[test]
fn category_counts_track_answered_questions() {
    let engine = engine(synthetic_catalog());

    let overview = engine.overview(SurveyMode::User, GroupKind::Office, &[answer("AA")]);
    let transportation = overview
        .groups
        .iter()
        .find(|group| group.name == "Transportation")
        .expect("category present");

    assert_eq!(transportation.total, 5);
    assert_eq!(transportation.answered, 1);
}

#[test]
fn goto_resolution_walks_past_skipped_questions() {
    let engine = engine(synthetic_catalog());

    // CC points at DD, which group mode skips; DD's own goto lands on EE.
    let resolved = engine.resolve_goto(
        Some(&QuestionId::from("DD")),
        SurveyMode::Group,
        GroupKind::Office,
    );
    assert_eq!(resolved, Some(QuestionId::from("EE")));

    // In user mode DD applies and resolves to itself.
    let direct = engine.resolve_goto(
        Some(&QuestionId::from("DD")),
        SurveyMode::User,
        GroupKind::Office,
    );
    assert_eq!(direct, Some(QuestionId::from("DD")));
}

#[test]
fn standard_catalog_goto_chain_spans_home_group_skips() {
    let engine = engine(Catalog::standard());

    // EP points at OA; home groups skip both OA and WS, landing on WA.
    let resolved = engine.resolve_goto(
        Some(&QuestionId::from("OA")),
        SurveyMode::Group,
        GroupKind::Home,
    );
    assert_eq!(resolved, Some(QuestionId::from("WA")));
}

#[test]
fn build_question_resolves_choice_gotos_and_selection() {
    let engine = engine(synthetic_catalog());

    let view = engine
        .build_question(
            &QuestionId::from("AA"),
            SurveyMode::User,
            GroupKind::Office,
            &[answer("AA")],
        )
        .expect("question exists");

    assert_eq!(view.value, "1");
    assert_eq!(view.index, 1);
    assert_eq!(view.total, 5);
    let yes = view
        .choices
        .iter()
        .find(|choice| choice.label == "Yes")
        .expect("choice present");
    assert!(yes.selected);
    assert_eq!(yes.goto, Some(QuestionId::from("BB")));
}

#[test]
fn group_noun_expands_in_group_mode() {
    let mut catalog_questions = vec![super::common::question("AA")];
    catalog_questions[0].label = "How many miles do you %GROUP% drive?".to_string();
    let engine = engine(Catalog::new(catalog_questions).expect("valid catalog"));

    let office = engine
        .build_question(
            &QuestionId::from("AA"),
            SurveyMode::Group,
            GroupKind::Office,
            &[],
        )
        .expect("question exists");
    assert_eq!(office.label, "How many miles do you or your employees drive?");

    let home = engine
        .build_question(
            &QuestionId::from("AA"),
            SurveyMode::Group,
            GroupKind::Home,
            &[],
        )
        .expect("question exists");
    assert_eq!(
        home.label,
        "How many miles do you or your family members drive?"
    );
}

#[test]
fn admin_task_precedence_runs_through_the_checklist() {
    let engine = engine(Catalog::standard());
    let group = office_group();
    let admin = member(1, &group, true);

    let alone = engine.next_task(&admin, 1, false);
    assert_eq!(alone.key, TaskKind::AddMember);
    assert_eq!(alone.priority, 1);

    let profile_pending = engine.next_task(&admin, 3, false);
    assert_eq!(profile_pending.key, TaskKind::GroupProfile);
    assert_eq!(profile_pending.priority, 2);

    let standard_self = engine.next_task(&admin, 3, true);
    assert_eq!(standard_self.key, TaskKind::UserProfile);
    assert_eq!(standard_self.priority, 3);

    let mut complete_admin = admin.clone();
    complete_admin.is_standard = false;
    let notify = engine.next_task(&complete_admin, 3, true);
    assert_eq!(notify.key, TaskKind::NotifyMembers);
    assert_eq!(notify.priority, 4);
}

#[test]
fn non_admins_skip_the_group_steps() {
    let engine = engine(Catalog::standard());
    let group = home_group();
    let regular = member(2, &group, false);

    let standard_self = engine.next_task(&regular, 1, false);
    assert_eq!(standard_self.key, TaskKind::UserProfile);
    assert_eq!(standard_self.priority, 1);

    let mut complete = regular.clone();
    complete.is_standard = false;
    let community = engine.next_task(&complete, 1, false);
    assert_eq!(community.key, TaskKind::JoinCommunity);
    assert_eq!(community.priority, 2);
}
