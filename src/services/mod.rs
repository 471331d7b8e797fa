pub mod generation_service;
pub mod model_client;
pub mod normalizer;
pub mod prompt_service;
