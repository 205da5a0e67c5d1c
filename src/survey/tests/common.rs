use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::catalog::{
    Catalog, Choice, GroupKind, Question, QuestionGroup, QuestionId, QuestionKind, SelectOption,
    SkipRule, SurveyMode, UpdateRule,
};
use crate::emissions::{EmissionsCalculator, LocaleTable};
use crate::survey::memory::{
    MemoryAnswerRepository, MemoryEmissionsRepository, MemoryMemberRepository,
};
use crate::survey::repository::MemberRepository;
use crate::survey::{Group, GroupId, MemberRecord, SurveyService, User, UserId};

pub(super) fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

pub(super) fn question(id: &str) -> Question {
    Question {
        id: QuestionId::from(id),
        kind: QuestionKind::Number,
        group: QuestionGroup::Transportation,
        label: format!("Question {id}"),
        heading: None,
        hint: None,
        input_suffix: None,
        choices: Vec::new(),
        select: Vec::new(),
        skip_for: Vec::new(),
        goto: None,
        update: Vec::new(),
    }
}

/// Small synthetic survey exercising every catalog mechanism:
/// AA radio branches and clears, BB carries a select and an update rule,
/// DD is skipped in group mode so gotos chain past it, EE is array-valued.
pub(super) fn synthetic_catalog() -> Catalog {
    let questions = vec![
        Question {
            kind: QuestionKind::Radio,
            choices: vec![
                Choice {
                    value: 1.0,
                    label: "Yes".to_string(),
                    goto: Some(QuestionId::from("BB")),
                    clear: Vec::new(),
                },
                Choice {
                    value: 0.0,
                    label: "No".to_string(),
                    goto: Some(QuestionId::from("CC")),
                    clear: vec![QuestionId::from("BB")],
                },
            ],
            goto: Some(QuestionId::from("BB")),
            ..question("AA")
        },
        Question {
            select: vec![
                SelectOption {
                    label: "per week".to_string(),
                    value: 52.0,
                },
                SelectOption {
                    label: "per year".to_string(),
                    value: 1.0,
                },
            ],
            goto: Some(QuestionId::from("CC")),
            update: vec![UpdateRule {
                target: QuestionId::from("CC"),
                value: 9.0,
            }],
            ..question("BB")
        },
        Question {
            goto: Some(QuestionId::from("DD")),
            ..question("CC")
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("EE")),
            ..question("DD")
        },
        Question {
            kind: QuestionKind::Checkbox,
            choices: vec![
                Choice {
                    value: 200.0,
                    label: "Paper".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
                Choice {
                    value: 150.0,
                    label: "Plastic".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
            ],
            ..question("EE")
        },
    ];

    Catalog::new(questions).expect("synthetic catalog is consistent")
}

pub(super) fn office_group() -> Group {
    Group {
        id: GroupId(10),
        name: "acme".to_string(),
        label: "Acme Widgets".to_string(),
        kind: GroupKind::Office,
    }
}

pub(super) fn home_group() -> Group {
    Group {
        id: GroupId(11),
        name: "maple-house".to_string(),
        label: "Maple House".to_string(),
        kind: GroupKind::Home,
    }
}

pub(super) fn user(id: u64) -> User {
    User {
        id: UserId(id),
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
    }
}

pub(super) fn member(user_id: u64, group: &Group, is_admin: bool) -> MemberRecord {
    MemberRecord {
        user_id: UserId(user_id),
        group_id: group.id,
        year: 2025,
        name: format!("User {user_id}"),
        locale: "US-IL".to_string(),
        locale_percent: 100,
        is_admin,
        is_champion: false,
        is_standard: true,
        emissions: None,
        created_on: now(),
        removed: false,
    }
}

pub(super) type MemoryService =
    SurveyService<MemoryAnswerRepository, MemoryEmissionsRepository, MemoryMemberRepository>;

pub(super) struct Fixture {
    pub(super) service: MemoryService,
    pub(super) answers: Arc<MemoryAnswerRepository>,
    pub(super) emissions: Arc<MemoryEmissionsRepository>,
    pub(super) members: Arc<MemoryMemberRepository>,
}

/// Service over the standard catalog with empty in-memory stores.
pub(super) fn fixture() -> Fixture {
    let answers = Arc::new(MemoryAnswerRepository::default());
    let emissions = Arc::new(MemoryEmissionsRepository::default());
    let members = Arc::new(MemoryMemberRepository::default());

    let service = SurveyService::new(
        Catalog::standard(),
        LocaleTable::standard(),
        EmissionsCalculator::new(),
        answers.clone(),
        emissions.clone(),
        members.clone(),
    );

    Fixture {
        service,
        answers,
        emissions,
        members,
    }
}

/// Fixture pre-seeded with one admin member of the office group.
pub(super) fn fixture_with_member() -> Fixture {
    let fixture = fixture();
    fixture
        .members
        .upsert(member(1, &office_group(), true))
        .expect("member saved");
    fixture
}
