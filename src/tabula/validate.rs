use thiserror::Error;

use crate::model::{Draft, FieldValue};
use crate::schema::{EntitySchema, FieldKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    /// Required text field empty after trimming.
    Required,
    /// Numeric field missing, non-numeric, or not finite.
    NotANumber,
    /// Numeric field below zero.
    Negative,
    /// Select field value outside the allowed options.
    InvalidOption(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldProblem {
    pub field: String,
    pub label: String,
    pub problem: Problem,
}

/// Every problem found in a draft, in schema field order. The rendered
/// message mirrors the console's form errors ("Please fill in all fields.",
/// "Price and stock must be non-negative.").
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", render_problems(.problems))]
pub struct ValidationError {
    pub problems: Vec<FieldProblem>,
}

/// Checks a draft against the schema, reporting all problems at once.
pub fn validate(schema: &EntitySchema, draft: &Draft) -> Result<(), ValidationError> {
    let mut problems = Vec::new();

    for field in &schema.fields {
        let value = draft.get(&field.name);
        match &field.kind {
            FieldKind::Text => {
                if field.required {
                    let text = value.and_then(FieldValue::as_text).unwrap_or("");
                    if text.trim().is_empty() {
                        problems.push(FieldProblem {
                            field: field.name.clone(),
                            label: field.label.clone(),
                            problem: Problem::Required,
                        });
                    }
                }
            }
            FieldKind::Number => match value.and_then(FieldValue::as_number) {
                Some(n) if !n.is_finite() => problems.push(FieldProblem {
                    field: field.name.clone(),
                    label: field.label.clone(),
                    problem: Problem::NotANumber,
                }),
                Some(n) if n < 0.0 => problems.push(FieldProblem {
                    field: field.name.clone(),
                    label: field.label.clone(),
                    problem: Problem::Negative,
                }),
                Some(_) => {}
                None => problems.push(FieldProblem {
                    field: field.name.clone(),
                    label: field.label.clone(),
                    problem: Problem::NotANumber,
                }),
            },
            FieldKind::Select(options) => {
                let text = value.and_then(FieldValue::as_text).unwrap_or("");
                if !options.iter().any(|o| o == text) {
                    problems.push(FieldProblem {
                        field: field.name.clone(),
                        label: field.label.clone(),
                        problem: Problem::InvalidOption(options.clone()),
                    });
                }
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { problems })
    }
}

fn render_problems(problems: &[FieldProblem]) -> String {
    let mut parts = Vec::new();

    if problems.iter().any(|p| p.problem == Problem::Required) {
        parts.push("Please fill in all fields.".to_string());
    }

    let not_numbers: Vec<&FieldProblem> = problems
        .iter()
        .filter(|p| p.problem == Problem::NotANumber)
        .collect();
    if !not_numbers.is_empty() {
        parts.push(format!("{} must be a number.", join_labels(&not_numbers)));
    }

    let negatives: Vec<&FieldProblem> = problems
        .iter()
        .filter(|p| p.problem == Problem::Negative)
        .collect();
    if !negatives.is_empty() {
        parts.push(format!("{} must be non-negative.", join_labels(&negatives)));
    }

    for p in problems {
        if let Problem::InvalidOption(options) = &p.problem {
            parts.push(format!("{} must be one of: {}.", p.label, options.join(", ")));
        }
    }

    parts.join(" ")
}

// "Price" / "Price and stock" / "Price, stock and rating"
fn join_labels(problems: &[&FieldProblem]) -> String {
    let labels: Vec<String> = problems
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i == 0 {
                p.label.clone()
            } else {
                p.label.to_lowercase()
            }
        })
        .collect();

    match labels.len() {
        0 => String::new(),
        1 => labels[0].clone(),
        _ => format!(
            "{} and {}",
            labels[..labels.len() - 1].join(", "),
            labels[labels.len() - 1]
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PRODUCTS, USERS};

    #[test]
    fn blank_required_fields_fail() {
        let mut draft = USERS.blank_draft();
        draft.set("name", FieldValue::text("   "));

        let err = validate(&USERS, &draft).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all fields.");
        assert_eq!(err.problems.len(), 2);
    }

    #[test]
    fn negative_price_fails_with_form_copy() {
        let mut draft = PRODUCTS.blank_draft();
        draft.set("name", FieldValue::text("Product F"));
        draft.set("description", FieldValue::text("New"));
        draft.set("category", FieldValue::text("Misc"));
        draft.set("price", FieldValue::number(-5.0));

        let err = validate(&PRODUCTS, &draft).unwrap_err();
        assert_eq!(err.to_string(), "Price must be non-negative.");
    }

    #[test]
    fn negative_price_and_stock_join_labels() {
        let mut draft = PRODUCTS.blank_draft();
        draft.set("name", FieldValue::text("Product F"));
        draft.set("description", FieldValue::text("New"));
        draft.set("category", FieldValue::text("Misc"));
        draft.set("price", FieldValue::number(-1.0));
        draft.set("stock", FieldValue::number(-2.0));

        let err = validate(&PRODUCTS, &draft).unwrap_err();
        assert_eq!(err.to_string(), "Price and stock must be non-negative.");
    }

    #[test]
    fn nan_is_not_a_number() {
        let mut draft = PRODUCTS.blank_draft();
        draft.set("name", FieldValue::text("Product F"));
        draft.set("description", FieldValue::text("New"));
        draft.set("category", FieldValue::text("Misc"));
        draft.set("price", FieldValue::number(f64::NAN));

        let err = validate(&PRODUCTS, &draft).unwrap_err();
        assert!(err
            .problems
            .iter()
            .any(|p| p.field == "price" && p.problem == Problem::NotANumber));
    }

    #[test]
    fn select_values_must_be_listed_options() {
        let mut draft = USERS.blank_draft();
        draft.set("name", FieldValue::text("John Doe"));
        draft.set("email", FieldValue::text("john.doe@example.com"));
        draft.set("role", FieldValue::text("Superuser"));

        let err = validate(&USERS, &draft).unwrap_err();
        assert_eq!(err.to_string(), "Role must be one of: Admin, Editor, Viewer.");
    }

    #[test]
    fn negative_zero_passes() {
        let mut draft = PRODUCTS.blank_draft();
        draft.set("name", FieldValue::text("Product F"));
        draft.set("description", FieldValue::text("New"));
        draft.set("category", FieldValue::text("Misc"));
        draft.set("price", FieldValue::number(-0.0));

        assert!(validate(&PRODUCTS, &draft).is_ok());
    }

    #[test]
    fn complete_draft_passes() {
        let mut draft = USERS.blank_draft();
        draft.set("name", FieldValue::text("John Doe"));
        draft.set("email", FieldValue::text("john.doe@example.com"));

        assert!(validate(&USERS, &draft).is_ok());
    }
}
