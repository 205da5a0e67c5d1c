use super::domain::{
    Choice, GroupKind, Question, QuestionGroup, QuestionId, QuestionKind, SelectOption, SkipRule,
    SurveyMode, UpdateRule,
};

fn base(id: &str, kind: QuestionKind, group: QuestionGroup, label: &str) -> Question {
    Question {
        id: QuestionId::from(id),
        kind,
        group,
        label: label.to_string(),
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

fn frequency_select() -> Vec<SelectOption> {
    vec![
        SelectOption {
            label: "per week".to_string(),
            value: 52.0,
        },
        SelectOption {
            label: "per month".to_string(),
            value: 12.0,
        },
        SelectOption {
            label: "per year".to_string(),
            value: 1.0,
        },
    ]
}

fn yearly_select() -> Vec<SelectOption> {
    vec![
        SelectOption {
            label: "per month".to_string(),
            value: 12.0,
        },
        SelectOption {
            label: "per year".to_string(),
            value: 1.0,
        },
    ]
}

/// The built-in survey. Question order here is the order the overview
/// walks when looking for the next unanswered question.
pub(crate) fn standard_questions() -> Vec<Question> {
    vec![
        // Energy: asked once per group, about the shared space.
        Question {
            heading: Some("Heating".to_string()),
            choices: vec![
                Choice {
                    value: 1.0,
                    label: "Natural gas".to_string(),
                    goto: Some(QuestionId::from("EG")),
                    clear: vec![QuestionId::from("EO"), QuestionId::from("ER")],
                },
                Choice {
                    value: 2.0,
                    label: "Heating oil".to_string(),
                    goto: Some(QuestionId::from("EO")),
                    clear: vec![QuestionId::from("EG"), QuestionId::from("ER")],
                },
                Choice {
                    value: 3.0,
                    label: "Propane".to_string(),
                    goto: Some(QuestionId::from("ER")),
                    clear: vec![QuestionId::from("EG"), QuestionId::from("EO")],
                },
                Choice {
                    value: 4.0,
                    label: "Electric or no heating".to_string(),
                    goto: Some(QuestionId::from("EP")),
                    clear: vec![
                        QuestionId::from("EG"),
                        QuestionId::from("EO"),
                        QuestionId::from("ER"),
                    ],
                },
            ],
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("EG")),
            ..base(
                "EH",
                QuestionKind::Radio,
                QuestionGroup::Energy,
                "How is your space heated?",
            )
        },
        Question {
            input_suffix: Some("therms".to_string()),
            select: yearly_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("EP")),
            ..base(
                "EG",
                QuestionKind::Number,
                QuestionGroup::Energy,
                "How many therms of natural gas does your space use?",
            )
        },
        Question {
            input_suffix: Some("gallons".to_string()),
            select: yearly_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("EP")),
            ..base(
                "EO",
                QuestionKind::Number,
                QuestionGroup::Energy,
                "How many gallons of heating oil does your space use?",
            )
        },
        Question {
            input_suffix: Some("gallons".to_string()),
            select: yearly_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("EP")),
            ..base(
                "ER",
                QuestionKind::Number,
                QuestionGroup::Energy,
                "How many gallons of propane does your space use?",
            )
        },
        Question {
            input_suffix: Some("kWh".to_string()),
            hint: Some("Your utility bill lists kilowatt hours used.".to_string()),
            select: yearly_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("OA")),
            ..base(
                "EP",
                QuestionKind::Number,
                QuestionGroup::Energy,
                "How many kilowatt hours of electricity does your space use?",
            )
        },
        // Home and office: square footage, servers, waste, diet.
        Question {
            input_suffix: Some("sq ft".to_string()),
            skip_for: vec![
                SkipRule::Mode(SurveyMode::User),
                SkipRule::ModeGroup(SurveyMode::Group, GroupKind::Home),
            ],
            goto: Some(QuestionId::from("WS")),
            // A group that switched from home to office keeps stale
            // home-area answers out of the totals.
            update: vec![UpdateRule {
                target: QuestionId::from("HA"),
                value: 0.0,
            }],
            ..base(
                "OA",
                QuestionKind::Number,
                QuestionGroup::HomeOffice,
                "What is the square footage of your office?",
            )
        },
        Question {
            input_suffix: Some("sq ft".to_string()),
            skip_for: vec![
                SkipRule::Mode(SurveyMode::User),
                SkipRule::ModeGroup(SurveyMode::Group, GroupKind::Office),
            ],
            goto: Some(QuestionId::from("HP")),
            update: vec![UpdateRule {
                target: QuestionId::from("OA"),
                value: 0.0,
            }],
            ..base(
                "HA",
                QuestionKind::Number,
                QuestionGroup::HomeOffice,
                "What is the square footage of your home?",
            )
        },
        Question {
            skip_for: vec![
                SkipRule::Mode(SurveyMode::User),
                SkipRule::ModeGroup(SurveyMode::Group, GroupKind::Office),
            ],
            goto: Some(QuestionId::from("WA")),
            ..base(
                "HP",
                QuestionKind::Number,
                QuestionGroup::HomeOffice,
                "How many people live in your home?",
            )
        },
        Question {
            hint: Some(
                "Only count servers running on-site. Cloud hosting is covered by \
                 your provider."
                    .to_string(),
            ),
            skip_for: vec![
                SkipRule::Mode(SurveyMode::User),
                SkipRule::ModeGroup(SurveyMode::Group, GroupKind::Home),
            ],
            goto: Some(QuestionId::from("WA")),
            ..base(
                "WS",
                QuestionKind::Number,
                QuestionGroup::HomeOffice,
                "How many servers does your organization run on-site?",
            )
        },
        Question {
            heading: Some("Waste".to_string()),
            choices: vec![
                Choice {
                    value: 200.0,
                    label: "Paper and cardboard".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
                Choice {
                    value: 150.0,
                    label: "Plastic".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
                Choice {
                    value: 300.0,
                    label: "Glass and metal".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
                Choice {
                    value: 500.0,
                    label: "Food scraps and compost".to_string(),
                    goto: None,
                    clear: Vec::new(),
                },
            ],
            skip_for: vec![SkipRule::Mode(SurveyMode::User)],
            goto: Some(QuestionId::from("MD")),
            ..base(
                "WA",
                QuestionKind::Checkbox,
                QuestionGroup::HomeOffice,
                "Which materials do you %GROUP% keep out of the landfill?",
            )
        },
        Question {
            select: vec![SelectOption {
                label: "days per week".to_string(),
                value: 52.0,
            }],
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TC")),
            ..base(
                "MD",
                QuestionKind::Number,
                QuestionGroup::HomeOffice,
                "How many days per week do you eat meat?",
            )
        },
        // Transportation: asked of each member individually.
        Question {
            choices: vec![
                Choice {
                    value: 1.0,
                    label: "Yes".to_string(),
                    goto: Some(QuestionId::from("CM")),
                    clear: Vec::new(),
                },
                Choice {
                    value: 0.0,
                    label: "No".to_string(),
                    goto: Some(QuestionId::from("TF")),
                    clear: vec![QuestionId::from("CM")],
                },
            ],
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("CM")),
            ..base(
                "TC",
                QuestionKind::Radio,
                QuestionGroup::Transportation,
                "Do you own or regularly drive a car?",
            )
        },
        Question {
            input_suffix: Some("miles".to_string()),
            select: frequency_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TF")),
            ..base(
                "CM",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many miles do you drive?",
            )
        },
        Question {
            choices: vec![
                Choice {
                    value: 1.0,
                    label: "Yes".to_string(),
                    goto: Some(QuestionId::from("FL")),
                    clear: Vec::new(),
                },
                Choice {
                    value: 0.0,
                    label: "No".to_string(),
                    goto: Some(QuestionId::from("TT")),
                    clear: vec![
                        QuestionId::from("FL"),
                        QuestionId::from("FM"),
                        QuestionId::from("FS"),
                    ],
                },
            ],
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("FL")),
            ..base(
                "TF",
                QuestionKind::Radio,
                QuestionGroup::Transportation,
                "Did you fly anywhere this year?",
            )
        },
        Question {
            hint: Some("Count round trips of roughly 3,000 miles each way.".to_string()),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("FM")),
            ..base(
                "FL",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many long flights (over four hours) did you take?",
            )
        },
        Question {
            hint: Some("Count round trips of roughly 1,800 miles each way.".to_string()),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("FS")),
            ..base(
                "FM",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many medium flights (two to four hours) did you take?",
            )
        },
        Question {
            hint: Some("Count round trips of roughly 300 miles each way.".to_string()),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TT")),
            ..base(
                "FS",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many short flights (under two hours) did you take?",
            )
        },
        Question {
            choices: vec![
                Choice {
                    value: 1.0,
                    label: "Yes".to_string(),
                    goto: Some(QuestionId::from("TL")),
                    clear: Vec::new(),
                },
                Choice {
                    value: 0.0,
                    label: "No".to_string(),
                    goto: Some(QuestionId::from("HD")),
                    clear: vec![
                        QuestionId::from("TL"),
                        QuestionId::from("TM"),
                        QuestionId::from("TS"),
                        QuestionId::from("BL"),
                        QuestionId::from("BM"),
                        QuestionId::from("BS"),
                        QuestionId::from("SL"),
                        QuestionId::from("SS"),
                    ],
                },
            ],
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TL")),
            ..base(
                "TT",
                QuestionKind::Radio,
                QuestionGroup::Transportation,
                "Do you ride trains, buses, or the subway?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TM")),
            ..base(
                "TL",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many long train trips (500 miles or more) did you take?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("TS")),
            ..base(
                "TM",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many medium train trips (around 250 miles) did you take?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("BL")),
            ..base(
                "TS",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many short train trips (under 100 miles) did you take?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("BM")),
            ..base(
                "BL",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many long bus trips (500 miles or more) did you take?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("BS")),
            ..base(
                "BM",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many medium bus trips (around 250 miles) did you take?",
            )
        },
        Question {
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("SL")),
            ..base(
                "BS",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many short bus trips (under 100 miles) did you take?",
            )
        },
        Question {
            select: frequency_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("SS")),
            ..base(
                "SL",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many long subway or light rail rides do you take?",
            )
        },
        Question {
            select: frequency_select(),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            goto: Some(QuestionId::from("HD")),
            ..base(
                "SS",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many short subway or light rail rides do you take?",
            )
        },
        Question {
            input_suffix: Some("nights".to_string()),
            skip_for: vec![SkipRule::Mode(SurveyMode::Group)],
            ..base(
                "HD",
                QuestionKind::Number,
                QuestionGroup::Transportation,
                "How many nights did you stay in hotels?",
            )
        },
    ]
}
