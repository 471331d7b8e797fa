use crate::dto::generation_dto::{
    payload_from_body, GenerateMaterialPayload, GenerateMcqPayload, MaterialParams, McqParams,
};
use crate::error::{Error, Result};
use crate::models::envelope::ResultEnvelope;
use crate::models::mcq::McqSet;
use crate::services::model_client::ModelClient;
use crate::services::normalizer::{normalize_material, normalize_mcq, McqItemPolicy};
use crate::services::prompt_service::{build_material_request, build_mcq_request};
use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

#[derive(Clone)]
pub struct GenerationService {
    client: ModelClient,
    material_model: String,
    mcq_model: String,
    mcq_item_policy: McqItemPolicy,
}

impl GenerationService {
    pub fn new(
        client: ModelClient,
        material_model: String,
        mcq_model: String,
        mcq_item_policy: McqItemPolicy,
    ) -> Self {
        Self {
            client,
            material_model,
            mcq_model,
            mcq_item_policy,
        }
    }

    pub async fn generate_material(&self, params: &MaterialParams) -> Result<String> {
        let payload = build_material_request(&self.material_model, params);
        let response = self.client.chat_completion(&payload).await?;
        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            "Completion received"
        );
        normalize_material(&response.body)
    }

    pub async fn generate_mcq(&self, params: &McqParams) -> Result<McqSet> {
        let payload = build_mcq_request(&self.mcq_model, params);
        let response = self.client.chat_completion(&payload).await?;
        tracing::debug!(
            status = response.status,
            bytes = response.body.len(),
            "Completion received"
        );
        let questions = normalize_mcq(&response.body, self.mcq_item_policy)?;
        tracing::info!(count = questions.len(), "Generated questions");
        Ok(questions)
    }

    /// Runs one material invocation end to end. Never fails: every error
    /// becomes an error envelope.
    #[tracing::instrument(name = "generate_material", skip_all, fields(invocation_id = %Uuid::new_v4()))]
    pub async fn handle_material(&self, body: &JsonValue) -> ResultEnvelope {
        let outcome = async {
            let params = payload_from_body::<GenerateMaterialPayload>(body).into_params()?;
            let content = self.generate_material(&params).await?;
            Ok::<_, Error>(json!({ "content": content }))
        }
        .await;
        into_envelope(outcome)
    }

    #[tracing::instrument(name = "generate_mcq", skip_all, fields(invocation_id = %Uuid::new_v4()))]
    pub async fn handle_mcq(&self, body: &JsonValue) -> ResultEnvelope {
        let outcome = async {
            let params = payload_from_body::<GenerateMcqPayload>(body).into_params()?;
            let questions = self.generate_mcq(&params).await?;
            Ok::<_, Error>(json!({ "questions": questions }))
        }
        .await;
        into_envelope(outcome)
    }
}

fn into_envelope(outcome: Result<JsonValue>) -> ResultEnvelope {
    match outcome {
        Ok(body) => ResultEnvelope::ok(body),
        Err(err) => {
            match &err {
                Error::Validation(fields) => {
                    tracing::warn!(kind = err.kind(), missing = ?fields, "Rejected request")
                }
                _ => tracing::error!(kind = err.kind(), error = %err, "Generation failed"),
            }
            ResultEnvelope::from_error(&err)
        }
    }
}
