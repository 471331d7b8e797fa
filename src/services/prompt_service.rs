use crate::dto::generation_dto::{MaterialParams, McqParams};
use crate::models::completion::{ChatCompletionRequest, ChatMessage};

pub const MATERIAL_SYSTEM_PROMPT: &str =
    "You are an expert educator creating high-quality educational content.";

pub const MCQ_SYSTEM_PROMPT: &str = "You are an expert educator creating high-quality multiple choice questions. Always return valid JSON.";

pub const MCQ_TEMPERATURE: f32 = 0.7;
pub const MCQ_MAX_TOKENS: u32 = 2000;

pub fn material_prompt(params: &MaterialParams) -> String {
    format!(
        r#"As an expert educator, create comprehensive educational material for the following:
Course: {course}
Lesson: {lesson}
Material Topic: {material}

Please provide:
1. A detailed explanation of the topic
2. Key concepts and definitions
3. Examples and applications
4. Practice questions or exercises
5. Additional resources or references

Format the content in a clear, structured way that's easy for students to understand."#,
        course = params.course_title,
        lesson = params.lesson_title,
        material = params.material_title,
    )
}

pub fn mcq_prompt(params: &McqParams) -> String {
    format!(
        r#"As an expert educator, create multiple choice questions for the following:
Course: {course}
Quiz Title: {quiz}
Description: {description}

Please generate 5 high-quality multiple choice questions. For each question:
1. Provide a clear and concise question
2. Include exactly 4 possible answers
3. Indicate the correct answer by its zero-based position in the options
4. Provide a brief explanation for the correct answer

Format each question as a JSON object with the following structure:
{{
    "question": "The question text",
    "options": ["Option A", "Option B", "Option C", "Option D"],
    "correct_option_index": 0,
    "explanation": "Explanation of the correct answer"
}}

Return the questions as a JSON array only, without markdown or commentary."#,
        course = params.course_title,
        quiz = params.quiz_title,
        description = params.description,
    )
}

pub fn build_material_request(model: &str, params: &MaterialParams) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(MATERIAL_SYSTEM_PROMPT),
            ChatMessage::user(material_prompt(params)),
        ],
        temperature: None,
        max_tokens: None,
    }
}

pub fn build_mcq_request(model: &str, params: &McqParams) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(MCQ_SYSTEM_PROMPT),
            ChatMessage::user(mcq_prompt(params)),
        ],
        temperature: Some(MCQ_TEMPERATURE),
        max_tokens: Some(MCQ_MAX_TOKENS),
    }
}
