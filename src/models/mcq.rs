use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const OPTIONS_PER_QUESTION: usize = 4;
pub const QUESTIONS_PER_SET: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct McqItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
}

pub type McqSet = Vec<McqItem>;
