use crate::error::{Error, Result};
use crate::models::completion::ChatCompletionResponse;
use crate::models::mcq::{McqItem, McqSet, OPTIONS_PER_QUESTION, QUESTIONS_PER_SET};
use crate::utils::text::{wrap_text, WRAP_WIDTH};
use serde_json::Value as JsonValue;

pub const NOT_A_LIST: &str = "Response is not a list of questions";

/// What to do with an MCQ item that fails structural validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum McqItemPolicy {
    /// Fail the whole batch.
    #[default]
    Reject,
    /// Log and discard the item, keep the rest.
    Drop,
}

impl std::str::FromStr for McqItemPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(McqItemPolicy::Reject),
            "drop" => Ok(McqItemPolicy::Drop),
            other => Err(format!("expected `reject` or `drop`, got `{}`", other)),
        }
    }
}

/// Pulls `choices[0].message.content` out of a raw completion body.
pub fn extract_content(body: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(body = %body, "Model API returned a non-JSON body");
        Error::MalformedUpstreamResponse(format!("response body is not valid JSON: {}", e))
    })?;

    parsed.first_content().map(str::to_string).ok_or_else(|| {
        tracing::error!(body = %body, "Model API response has no choices[0].message.content");
        Error::MalformedUpstreamResponse("missing choices[0].message.content".to_string())
    })
}

pub fn normalize_material(body: &str) -> Result<String> {
    let content = extract_content(body)?;
    Ok(wrap_text(content.trim(), WRAP_WIDTH))
}

pub fn normalize_mcq(body: &str, policy: McqItemPolicy) -> Result<McqSet> {
    let content = extract_content(body)?;
    parse_mcq_content(&content, policy)
}

pub fn parse_mcq_content(content: &str, policy: McqItemPolicy) -> Result<McqSet> {
    let cleaned = strip_code_fence(content);
    let value: JsonValue = serde_json::from_str(cleaned).map_err(|e| {
        tracing::error!(content = %content, "Failed to parse JSON response");
        Error::InvalidContentFormat(e)
    })?;

    let raw_items = match value {
        JsonValue::Array(items) => items,
        _ => {
            tracing::error!(content = %content, "Parsed content is not an array");
            return Err(Error::UnexpectedShape(NOT_A_LIST.to_string()));
        }
    };

    let mut questions = Vec::with_capacity(raw_items.len());
    for (idx, raw) in raw_items.iter().enumerate() {
        match coerce_item(raw) {
            Ok(item) => questions.push(item),
            Err(reason) => match policy {
                McqItemPolicy::Reject => {
                    tracing::error!(question = idx + 1, %reason, item = %raw, "Rejecting question batch");
                    return Err(Error::UnexpectedShape(format!(
                        "Question {} {}",
                        idx + 1,
                        reason
                    )));
                }
                McqItemPolicy::Drop => {
                    tracing::warn!(question = idx + 1, %reason, item = %raw, "Dropping malformed question");
                }
            },
        }
    }

    if questions.is_empty() && !raw_items.is_empty() {
        return Err(Error::UnexpectedShape(
            "Response contains no valid questions".to_string(),
        ));
    }
    if questions.len() != QUESTIONS_PER_SET {
        tracing::warn!(
            expected = QUESTIONS_PER_SET,
            received = questions.len(),
            "Model returned an unexpected number of questions"
        );
    }
    Ok(questions)
}

/// Removes a surrounding markdown fence such as ```` ```json ... ``` ````.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    let rest = match rest.find('\n') {
        Some(pos) if rest[..pos].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            &rest[pos + 1..]
        }
        _ => rest,
    };
    rest.trim()
}

fn coerce_item(v: &JsonValue) -> std::result::Result<McqItem, String> {
    let obj = v.as_object().ok_or("is not an object")?;

    let question = obj
        .get("question")
        .and_then(|q| q.as_str())
        .filter(|q| !q.trim().is_empty())
        .ok_or("is missing question text")?
        .to_string();

    let raw_options = obj
        .get("options")
        .and_then(|o| o.as_array())
        .ok_or("is missing options")?;
    if raw_options.len() != OPTIONS_PER_QUESTION {
        return Err(format!(
            "must have exactly {} options (found {})",
            OPTIONS_PER_QUESTION,
            raw_options.len()
        ));
    }

    let (options, correct_option_index) = if raw_options.iter().all(JsonValue::is_string) {
        let options: Vec<String> = raw_options
            .iter()
            .filter_map(|o| o.as_str().map(str::to_string))
            .collect();
        let index = obj
            .get("correct_option_index")
            .and_then(|i| i.as_u64())
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < options.len())
            .ok_or("has an invalid correct_option_index")?;
        (options, index)
    } else {
        flagged_options(raw_options)?
    };

    let explanation = obj
        .get("explanation")
        .and_then(|e| e.as_str())
        .ok_or("is missing an explanation")?
        .to_string();

    Ok(McqItem {
        question,
        options,
        correct_option_index,
        explanation,
    })
}

// `[{ "text": "...", "is_correct": bool }, ...]` with exactly one correct entry.
fn flagged_options(raw: &[JsonValue]) -> std::result::Result<(Vec<String>, usize), String> {
    let mut options = Vec::with_capacity(raw.len());
    let mut correct = Vec::new();
    for (idx, opt) in raw.iter().enumerate() {
        let text = opt
            .get("text")
            .and_then(|t| t.as_str())
            .ok_or("has malformed options")?;
        if opt.get("is_correct").and_then(|c| c.as_bool()).unwrap_or(false) {
            correct.push(idx);
        }
        options.push(text.to_string());
    }
    match correct.as_slice() {
        [index] => Ok((options, *index)),
        _ => Err("must have exactly one correct option".to_string()),
    }
}
