use std::fmt;
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Two-letter survey question code, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the survey is being filled for an individual member or for
/// the group profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyMode {
    User,
    Group,
}

impl SurveyMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

/// Kind of organization tracked by a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Home,
    Office,
}

impl GroupKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Office => "office",
        }
    }

    /// Noun used when a question label mentions the rest of the group.
    pub const fn member_noun(self) -> &'static str {
        match self {
            Self::Home => "family members",
            Self::Office => "employees",
        }
    }
}

/// Input control backing a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Radio,
    Number,
    Select,
    Checkbox,
}

/// Category a question is grouped under in the survey overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionGroup {
    Energy,
    HomeOffice,
    Transportation,
}

impl QuestionGroup {
    pub const fn ordered() -> [Self; 3] {
        [Self::Energy, Self::HomeOffice, Self::Transportation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Energy => "Energy",
            Self::HomeOffice => "Home and Office",
            Self::Transportation => "Transportation",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Energy => "lightbulb",
            Self::HomeOffice => "home",
            Self::Transportation => "train",
        }
    }
}

/// Applicability rule excluding a question from a survey mode, either
/// outright or for one group kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    Mode(SurveyMode),
    ModeGroup(SurveyMode, GroupKind),
}

impl SkipRule {
    /// Whether the rule excludes a question for the given mode and group kind.
    pub fn excludes(self, mode: SurveyMode, kind: GroupKind) -> bool {
        match self {
            SkipRule::Mode(skip_mode) => skip_mode == mode,
            SkipRule::ModeGroup(skip_mode, skip_kind) => skip_mode == mode && skip_kind == kind,
        }
    }
}

impl fmt::Display for SkipRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipRule::Mode(mode) => f.write_str(mode.label()),
            SkipRule::ModeGroup(mode, kind) => {
                write!(f, "{}:{}", mode.label(), kind.label())
            }
        }
    }
}

impl FromStr for SkipRule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_mode = |raw: &str| match raw {
            "user" => Ok(SurveyMode::User),
            "group" => Ok(SurveyMode::Group),
            other => Err(format!("unknown survey mode '{other}'")),
        };

        match value.split_once(':') {
            None => Ok(SkipRule::Mode(parse_mode(value)?)),
            Some((mode, kind)) => {
                let kind = match kind {
                    "home" => GroupKind::Home,
                    "office" => GroupKind::Office,
                    other => return Err(format!("unknown group kind '{other}'")),
                };
                Ok(SkipRule::ModeGroup(parse_mode(mode)?, kind))
            }
        }
    }
}

impl Serialize for SkipRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SkipRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// One selectable option for a radio or checkbox question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub value: f64,
    pub label: String,
    /// Next question when this choice is picked, overriding the question's goto.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<QuestionId>,
    /// Answers force-written to zero when this choice is picked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clear: Vec<QuestionId>,
}

/// Scaling option recorded alongside an answer, e.g. "per month" = 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: f64,
}

/// Literal answer force-written to another question whenever this one
/// is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRule {
    pub target: QuestionId,
    pub value: f64,
}

/// A single survey question definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub kind: QuestionKind,
    pub group: QuestionGroup,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub select: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_for: Vec<SkipRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goto: Option<QuestionId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<UpdateRule>,
}

impl Question {
    /// Whether skip rules exclude this question for the mode/group kind.
    pub fn is_skipped(&self, mode: SurveyMode, kind: GroupKind) -> bool {
        self.skip_for.iter().any(|rule| rule.excludes(mode, kind))
    }

    /// Answers for this question are stored as JSON arrays.
    pub fn is_array_valued(&self) -> bool {
        self.kind == QuestionKind::Checkbox
    }

    /// The choice whose value numerically matches the submitted value.
    pub fn matching_choice(&self, value: f64) -> Option<&Choice> {
        self.choices
            .iter()
            .find(|choice| (choice.value - value).abs() < f64::EPSILON)
    }
}
