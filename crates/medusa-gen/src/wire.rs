//! Wire types for the `generateContent` call.
//!
//! The response schema pins the model to the one shape the core accepts:
//! nested `{name, children}` objects, `SCHEMA_DEPTH` levels deep, with the
//! innermost level reduced to a bare `name`.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const TEMPERATURE: f64 = 0.2;
pub const MAX_OUTPUT_TOKENS: u32 = 800;
/// Levels of `{name, children}` admitted by the response schema.
pub const SCHEMA_DEPTH: usize = 4;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Content {
    pub role: &'static str,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Part {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub response_mime_type: &'static str,
    pub response_schema: Value,
}

pub(crate) fn generate_request(topic: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![Part {
                text: prompt_for(topic),
            }],
        }],
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            response_mime_type: "application/json",
            response_schema: outline_schema(SCHEMA_DEPTH),
        },
    }
}

fn prompt_for(topic: &str) -> String {
    format!(
        "Create a hierarchical mind map about: {topic}.\n\
         Return it as a JSON object with a root node named after the main topic, \
         and children nodes for subtopics.\n\
         The structure should be: {{name: \"root topic\", children: [{{name: \"subtopic\", children: [{{name: \"detail\"}}]}}]}}\n\
         Use at least 2-3 levels of hierarchy to organize the information."
    )
}

/// Builds the nested response schema. The root level additionally marks
/// both fields required so the model cannot answer with a bare string.
fn outline_schema(levels: usize) -> Value {
    fn level(remaining: usize) -> Value {
        if remaining <= 1 {
            return json!({
                "type": "OBJECT",
                "properties": { "name": { "type": "STRING" } },
            });
        }
        json!({
            "type": "OBJECT",
            "properties": {
                "name": { "type": "STRING" },
                "children": { "type": "ARRAY", "items": level(remaining - 1) },
            },
        })
    }

    let mut schema = level(levels);
    schema["required"] = json!(["name", "children"]);
    schema
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// First non-empty text part of the first candidate, if any.
    pub(crate) fn first_text(&self) -> Option<String> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| {
                p.text
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_the_fixed_generation_constants() {
        let request = generate_request("the solar system");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["generationConfig"]["temperature"], json!(0.2));
        assert_eq!(value["generationConfig"]["maxOutputTokens"], json!(800));
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["contents"][0]["role"], "user");
        let prompt = value["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("the solar system"));
        assert!(prompt.contains("2-3 levels"));
    }

    #[test]
    fn schema_nests_to_the_fixed_depth() {
        let schema = outline_schema(SCHEMA_DEPTH);
        assert_eq!(schema["required"], json!(["name", "children"]));

        let mut level = &schema;
        for depth in 1..SCHEMA_DEPTH {
            level = &level["properties"]["children"]["items"];
            assert_eq!(level["type"], "OBJECT", "missing level {depth}");
        }
        // Innermost level carries a name only.
        assert_eq!(level["properties"]["name"]["type"], "STRING");
        assert!(level["properties"].get("children").is_none());
    }

    #[test]
    fn extracts_the_first_candidate_text() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"name\":\"Topic\"}" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(response.first_text().unwrap(), "{\"name\":\"Topic\"}");
    }

    #[test]
    fn empty_or_blank_candidates_yield_nothing() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.first_text().is_none());

        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "   " }] } }]
        }))
        .unwrap();
        assert!(response.first_text().is_none());
    }
}
