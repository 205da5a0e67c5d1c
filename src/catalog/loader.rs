use std::fs;
use std::path::Path;

use super::domain::Question;
use super::{Catalog, CatalogError};

/// Load and validate a catalog from a JSON file. The file holds an array
/// of question definitions in survey order.
pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let raw = fs::read_to_string(path)?;
    let questions: Vec<Question> = serde_json::from_str(&raw)?;

    Catalog::new(questions)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::catalog::QuestionId;

    #[test]
    fn loads_questions_from_json() {
        let payload = r#"[
            {
                "id": "AA",
                "kind": "number",
                "group": "energy",
                "label": "How many therms?",
                "select": [{ "label": "per year", "value": 1.0 }],
                "skip_for": ["user"],
                "goto": "BB"
            },
            {
                "id": "BB",
                "kind": "radio",
                "group": "energy",
                "label": "Any heating at all?",
                "choices": [
                    { "value": 0.0, "label": "No", "clear": ["AA"] },
                    { "value": 1.0, "label": "Yes" }
                ],
                "skip_for": ["user", "group:home"]
            }
        ]"#;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(payload.as_bytes()).expect("write payload");

        let catalog = load_from_path(file.path()).expect("catalog loads");
        assert_eq!(catalog.len(), 2);

        let first = catalog.question(&QuestionId::from("AA")).expect("AA exists");
        assert_eq!(first.goto, Some(QuestionId::from("BB")));
        assert_eq!(first.select.len(), 1);

        let second = catalog.question(&QuestionId::from("BB")).expect("BB exists");
        assert_eq!(second.choices[0].clear, vec![QuestionId::from("AA")]);
        assert_eq!(second.skip_for.len(), 2);
    }

    #[test]
    fn dangling_reference_in_file_is_rejected() {
        let payload = r#"[
            {
                "id": "AA",
                "kind": "number",
                "group": "energy",
                "label": "How many therms?",
                "goto": "ZZ"
            }
        ]"#;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(payload.as_bytes()).expect("write payload");

        let result = load_from_path(file.path());
        assert!(matches!(
            result,
            Err(CatalogError::DanglingReference { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"not json").expect("write payload");

        assert!(matches!(
            load_from_path(file.path()),
            Err(CatalogError::Parse(_))
        ));
    }
}
