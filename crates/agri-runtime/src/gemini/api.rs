//! Gemini wire format (`models/{model}:generateContent`).

use serde::{Deserialize, Serialize};

use agri_core::{
    Completion, FinishReason, GenerationOptions, GroundingSource, Message, ModelInfo, Role,
    TokenUsage,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content<'a>>,

    pub generation_config: GenerationConfig,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part<'a> {
    Text(&'a str),
    InlineData(Blob<'a>),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub struct GoogleSearch {}

impl<'a> GenerateContentRequest<'a> {
    /// Build a request. System messages become the system instruction unless
    /// `options.system_prompt` overrides them; images follow the text part.
    pub fn build(messages: &'a [Message], options: &'a GenerationOptions) -> Self {
        let mut system_parts: Vec<Part<'a>> = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role {
                Role::System => system_parts.push(Part::Text(&message.content)),
                Role::User | Role::Assistant => {
                    let mut parts = Vec::with_capacity(1 + message.images.len());
                    if !message.content.is_empty() {
                        parts.push(Part::Text(&message.content));
                    }
                    parts.extend(message.images.iter().map(|image| {
                        Part::InlineData(Blob {
                            mime_type: &image.mime_type,
                            data: &image.data,
                        })
                    }));
                    let role = if message.role == Role::User { "user" } else { "model" };
                    contents.push(Content {
                        role: Some(role),
                        parts,
                    });
                }
            }
        }

        if let Some(prompt) = options.system_prompt.as_deref() {
            system_parts = vec![Part::Text(prompt)];
        }

        let system_instruction = (!system_parts.is_empty()).then(|| Content {
            role: None,
            parts: system_parts,
        });

        let tools = if options.web_search {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };

        Self {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                max_output_tokens: options.max_tokens,
            },
            tools,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub struct GroundingChunk {
    pub web: Option<WebChunk>,
}

#[derive(Debug, Deserialize)]
pub struct WebChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Convert to a completion. Only the first candidate is used; thought
    /// parts are dropped and text parts concatenated.
    pub fn into_completion(self, requested_model: &str) -> Completion {
        let model = self.model_version.unwrap_or_else(|| requested_model.to_string());
        let usage = self.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        let Some(candidate) = self.candidates.into_iter().next() else {
            let blocked = self
                .prompt_feedback
                .is_some_and(|f| f.block_reason.is_some());
            return Completion {
                content: String::new(),
                model,
                usage,
                finish_reason: Some(if blocked {
                    FinishReason::ContentFilter
                } else {
                    FinishReason::Other
                }),
                sources: Vec::new(),
            };
        };

        let content = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        let sources = candidate
            .grounding_metadata
            .map(|g| {
                g.grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .filter_map(|web| {
                        web.uri
                            .map(|uri| GroundingSource::new(uri, web.title.unwrap_or_default()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Completion {
            content,
            model,
            usage,
            finish_reason: candidate.finish_reason.as_deref().map(map_finish_reason),
            sources,
        }
    }
}

fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Other,
    }
}

#[derive(Debug, Deserialize)]
pub struct ListModelsResponse {
    #[serde(default)]
    pub models: Vec<ApiModel>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiModel {
    pub name: String,
    pub display_name: Option<String>,
    pub input_token_limit: Option<u32>,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ListModelsResponse {
    /// Models that can serve `generateContent`
    pub fn into_model_infos(self) -> Vec<ModelInfo> {
        self.models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| {
                let id = m.name.strip_prefix("models/").unwrap_or(&m.name).to_string();
                ModelInfo {
                    supports_vision: id.starts_with("gemini"),
                    name: m.display_name.unwrap_or_else(|| id.clone()),
                    context_length: m.input_token_limit,
                    id,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::InlineImage;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let messages = vec![
            Message::system("You are AgriGuru."),
            Message::user("Analyze this").with_image(InlineImage::new("image/jpeg", "AAAA")),
        ];
        let options = GenerationOptions::default().with_temperature(0.2);

        let request = GenerateContentRequest::build(&messages, &options);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value["contents"],
            json!([{
                "role": "user",
                "parts": [
                    {"text": "Analyze this"},
                    {"inlineData": {"mimeType": "image/jpeg", "data": "AAAA"}}
                ]
            }])
        );
        assert_eq!(
            value["systemInstruction"],
            json!({"parts": [{"text": "You are AgriGuru."}]})
        );
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_assistant_maps_to_model_role() {
        let messages = vec![Message::user("hi"), Message::assistant("hello")];
        let options = GenerationOptions::default();
        let value = serde_json::to_value(GenerateContentRequest::build(&messages, &options)).unwrap();
        assert_eq!(value["contents"][1]["role"], "model");
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_web_search_and_prompt_override() {
        let messages = vec![Message::system("ignored"), Message::user("prices?")];
        let mut options = GenerationOptions::default().with_web_search(true);
        options.system_prompt = Some("override".into());

        let value = serde_json::to_value(GenerateContentRequest::build(&messages, &options)).unwrap();
        assert_eq!(value["tools"], json!([{"googleSearch": {}}]));
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "override");
    }

    #[test]
    fn test_response_with_grounding() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "## Tomato prices\n"},
                    {"text": "- Azadpur: 1200-1500/qtl"}
                ]},
                "finishReason": "STOP",
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://agmarknet.gov.in", "title": "Agmarknet"}},
                    {"retrievedContext": {"uri": "ignored"}},
                    {"web": {"uri": "https://example.org"}}
                ]}
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 20, "totalTokenCount": 30},
            "modelVersion": "gemini-2.5-flash-001"
        });

        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let completion = response.into_completion("gemini-2.5-flash");

        assert_eq!(completion.content, "## Tomato prices\n- Azadpur: 1200-1500/qtl");
        assert_eq!(completion.model, "gemini-2.5-flash-001");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 30);
        assert_eq!(
            completion.sources,
            vec![
                GroundingSource::new("https://agmarknet.gov.in", "Agmarknet"),
                GroundingSource::new("https://example.org", ""),
            ]
        );
    }

    #[test]
    fn test_blocked_prompt() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let completion = response.into_completion("gemini-2.5-flash");
        assert!(completion.content.is_empty());
        assert_eq!(completion.finish_reason, Some(FinishReason::ContentFilter));
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason("MAX_TOKENS"), FinishReason::Length);
        assert_eq!(map_finish_reason("SAFETY"), FinishReason::ContentFilter);
        assert_eq!(map_finish_reason("SOMETHING_NEW"), FinishReason::Other);
    }

    #[test]
    fn test_model_list_filters_generate_content() {
        let body = json!({"models": [
            {"name": "models/gemini-2.5-flash", "displayName": "Gemini 2.5 Flash",
             "inputTokenLimit": 1_048_576, "supportedGenerationMethods": ["generateContent", "countTokens"]},
            {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
        ]});
        let response: ListModelsResponse = serde_json::from_value(body).unwrap();
        let models = response.into_model_infos();

        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, "gemini-2.5-flash");
        assert_eq!(models[0].name, "Gemini 2.5 Flash");
        assert!(models[0].supports_vision);
    }
}
