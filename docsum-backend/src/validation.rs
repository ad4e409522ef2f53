use serde::Serialize;

/// One rejected field of a request body.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `{"error": <first message>, "validation": {<field>: {code, message}}}`
pub fn to_payload(issues: &[ValidationIssue]) -> serde_json::Value {
    let fields: serde_json::Map<_, _> = issues
        .iter()
        .map(|issue| {
            (
                issue.field.clone(),
                serde_json::json!({ "code": issue.code, "message": issue.message }),
            )
        })
        .collect();
    let summary = issues
        .first()
        .map(|issue| issue.message.as_str())
        .unwrap_or("invalid request");
    serde_json::json!({ "error": summary, "validation": fields })
}
