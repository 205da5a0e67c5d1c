//! Survey question catalog: definitions, applicability filtering, and
//! load-time referential validation.

pub mod domain;
mod loader;
mod standard;

pub use domain::{
    Choice, GroupKind, Question, QuestionGroup, QuestionId, QuestionKind, SelectOption, SkipRule,
    SurveyMode, UpdateRule,
};
pub use loader::load_from_path;

/// Referential problems detected when a catalog is constructed. These are
/// configuration errors and never surface during answer handling.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog file could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
    #[error("question {question} {field} references unknown question {target}")]
    DanglingReference {
        question: QuestionId,
        field: &'static str,
        target: QuestionId,
    },
}

/// Immutable, validated question list. Constructed once at startup and
/// passed by reference into the reconciler, writer, and progress engine.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and dangling goto, clear,
    /// and update references.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let catalog = Self { questions };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The built-in carbon calculator survey.
    pub fn standard() -> Self {
        Self::new(standard::standard_questions()).expect("standard catalog is internally consistent")
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question definition by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    /// Questions remaining after skip rules are applied for the given
    /// mode and group kind, in catalog order.
    pub fn applicable(&self, mode: SurveyMode, kind: GroupKind) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| !question.is_skipped(mode, kind))
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for question in &self.questions {
            if !seen.insert(&question.id) {
                return Err(CatalogError::DuplicateId(question.id.clone()));
            }
        }

        let exists = |id: &QuestionId| self.questions.iter().any(|question| &question.id == id);

        for question in &self.questions {
            if let Some(target) = &question.goto {
                if !exists(target) {
                    return Err(CatalogError::DanglingReference {
                        question: question.id.clone(),
                        field: "goto",
                        target: target.clone(),
                    });
                }
            }

            for rule in &question.update {
                if !exists(&rule.target) {
                    return Err(CatalogError::DanglingReference {
                        question: question.id.clone(),
                        field: "update",
                        target: rule.target.clone(),
                    });
                }
            }

            for choice in &question.choices {
                if let Some(target) = &choice.goto {
                    if !exists(target) {
                        return Err(CatalogError::DanglingReference {
                            question: question.id.clone(),
                            field: "choice goto",
                            target: target.clone(),
                        });
                    }
                }

                for target in &choice.clear {
                    if !exists(target) {
                        return Err(CatalogError::DanglingReference {
                            question: question.id.clone(),
                            field: "clear",
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
