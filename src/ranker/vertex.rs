use crate::config::AiConfig;
use crate::model::RankError;
use crate::ranker::{
    collect_text, CategoryLabel, CategoryRequest, RankCandidate, Ranker, Suggestion, UserContext,
};

use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

const CATEGORY_INSTRUCTION: &str = "You are a culinary consultant recommending cuisines. \
You receive a JSON object with the user's preference, their location and the available cuisine \
categories. Select the categories that match the preference and return them as a JSON array of \
objects with the 'id' and 'label' of each selected category. Return an empty JSON array when \
nothing matches.";

const SUGGESTION_INSTRUCTION: &str = "You are a restaurant picker. You receive a JSON object \
with the user's initial preference, additional details, location, preferred cuisines and a map \
of nearby restaurants keyed by restaurant code, each with its simplified menu. Choose the single \
restaurant that best fits the user, paying attention to the desired spice level. Answer with a \
JSON object {\"code\": \"<restaurant code>\", \"reason\": \"<short explanation>\"}.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content>,
    system_instruction: Instruction<'a>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct Instruction<'a> {
    parts: Vec<InstructionPart<'a>>,
}

#[derive(Debug, Serialize)]
struct InstructionPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
    top_p: f64,
    seed: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

/// Ranking oracle backed by a Vertex AI generative model.
pub struct VertexRanker {
    client: Client,
    config: AiConfig,
}

impl VertexRanker {
    pub fn new(config: AiConfig) -> Result<Self, RankError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RankError::Api(format!("client: {e}")))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "https://{}/v1/projects/{}/locations/{}/publishers/google/models/{}:streamGenerateContent",
            self.config.api_endpoint, self.config.project_id, self.config.location, self.config.model_id,
        )
    }

    fn request<'a>(&self, instruction: &'a str, input: String) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: input }],
            }],
            system_instruction: Instruction {
                parts: vec![InstructionPart { text: instruction }],
            },
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                top_p: self.config.top_p,
                seed: 0,
            },
            safety_settings: vec![SafetySetting {
                category: "HARM_CATEGORY_HATE_SPEECH",
                threshold: "OFF",
            }],
        }
    }

    /// Sends one generation request and returns the model's reassembled answer.
    async fn generate(&self, instruction: &str, input: String) -> Result<String, RankError> {
        let payload = self.request(instruction, input);
        let exchange = async {
            let response = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.config.access_token)
                .json(&payload)
                .send()
                .await?;
            let status = response.status();
            Ok::<_, reqwest::Error>((status, response.text().await?))
        };

        let (status, body) =
            within(Duration::from_secs(self.config.timeout_seconds), exchange).await?;
        if !status.is_success() {
            warn!("Model API responded [{}]: {}", status, body);
            return Err(RankError::Api(format!("status {status}")));
        }
        info!("Model answered [{}], {} bytes", status, body.len());

        collect_text(&body)
    }
}

/// Runs a whole model exchange, body included, under one deadline.
async fn within<T>(
    limit: Duration,
    exchange: impl Future<Output = Result<T, reqwest::Error>>,
) -> Result<T, RankError> {
    match timeout(limit, exchange).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("Model request failed: {:?}", e);
            Err(RankError::Api(format!("request failed: {e}")))
        }
        Err(_) => {
            warn!("Model request timed out");
            Err(RankError::Unreachable)
        }
    }
}

/// The user message for a suggestion: the user's context plus menus keyed by vendor code.
fn suggestion_input(candidates: &[RankCandidate], context: &UserContext) -> Result<Value, RankError> {
    let mut menus = Map::new();
    for candidate in candidates {
        let restaurant = &candidate.restaurant.restaurant;
        menus.insert(
            restaurant.code.clone(),
            json!({
                "code": restaurant.code,
                "name": restaurant.name,
                "rating": restaurant.rating,
                "weight": candidate.restaurant.weight(),
                "menu": candidate.menu,
            }),
        );
    }

    let mut input =
        serde_json::to_value(context).map_err(|e| RankError::InvalidAnswer(e.to_string()))?;
    if let Value::Object(fields) = &mut input {
        fields.insert("menus".into(), Value::Object(menus));
    }
    Ok(input)
}

#[async_trait::async_trait]
impl Ranker for VertexRanker {
    async fn rank(
        &self,
        candidates: &[RankCandidate],
        context: &UserContext,
    ) -> Result<Suggestion, RankError> {
        let input = suggestion_input(candidates, context)?;
        let answer = self.generate(SUGGESTION_INSTRUCTION, input.to_string()).await?;
        serde_json::from_str(&answer)
            .map_err(|e| RankError::InvalidAnswer(format!("suggestion: {e}")))
    }

    async fn filter_categories(
        &self,
        request: &CategoryRequest,
    ) -> Result<Vec<CategoryLabel>, RankError> {
        let input =
            serde_json::to_string(request).map_err(|e| RankError::InvalidAnswer(e.to_string()))?;
        let answer = self.generate(CATEGORY_INSTRUCTION, input).await?;
        serde_json::from_str(&answer)
            .map_err(|e| RankError::InvalidAnswer(format!("categories: {e}")))
    }
}
