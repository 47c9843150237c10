//! Response schemas requested from structured-output providers

use serde_json::json;

use crate::domain::llm::ResponseSchema;

/// `{score, justification}`
pub fn judge_verdict_schema() -> ResponseSchema {
    ResponseSchema::new(
        "judge_verdict",
        json!({
            "type": "OBJECT",
            "properties": {
                "score": {"type": "NUMBER"},
                "justification": {"type": "STRING"}
            },
            "required": ["score", "justification"],
            "propertyOrdering": ["score", "justification"]
        }),
    )
}

/// `{score, output: {strengths, issues, suggestions}}`
pub fn detailed_verdict_schema() -> ResponseSchema {
    let string_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});

    ResponseSchema::new(
        "detailed_verdict",
        json!({
            "type": "OBJECT",
            "properties": {
                "score": {"type": "NUMBER"},
                "output": {
                    "type": "OBJECT",
                    "properties": {
                        "strengths": string_list,
                        "issues": string_list,
                        "suggestions": string_list
                    },
                    "required": ["strengths", "issues", "suggestions"],
                    "propertyOrdering": ["strengths", "issues", "suggestions"]
                }
            },
            "required": ["score", "output"],
            "propertyOrdering": ["score", "output"]
        }),
    )
}

/// `{score, refinedPrompt, suggestions[], strengths[], weaknesses[]}`
pub fn refinement_schema() -> ResponseSchema {
    ResponseSchema::new(
        "prompt_refinement",
        json!({
            "type": "OBJECT",
            "properties": {
                "score": {"type": "NUMBER"},
                "refinedPrompt": {"type": "STRING"},
                "suggestions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "type": {
                                "type": "STRING",
                                "enum": ["clarity", "specificity", "effectiveness", "structure"]
                            },
                            "title": {"type": "STRING"},
                            "description": {"type": "STRING"},
                            "before": {"type": "STRING"},
                            "after": {"type": "STRING"},
                            "impact": {"type": "STRING", "enum": ["high", "medium", "low"]}
                        },
                        "propertyOrdering": ["type", "title", "description", "before", "after", "impact"]
                    }
                },
                "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
                "weaknesses": {"type": "ARRAY", "items": {"type": "STRING"}}
            },
            "propertyOrdering": ["score", "refinedPrompt", "suggestions", "strengths", "weaknesses"]
        }),
    )
}
