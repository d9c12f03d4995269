//! API Client

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Chat message for display
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user` or `model`
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: "model".into(),
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TaskInfo {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Source {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

impl Source {
    pub fn label(&self) -> String {
        if self.title.trim().is_empty() {
            self.uri.clone()
        } else {
            self.title.clone()
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPriceResult {
    pub price_info: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WeatherSummary {
    pub temperature: i64,
    pub temperature_unit: String,
    pub feels_like: i64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_speed_unit: String,
    pub description: String,
    pub condition: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub conversation_id: String,
}

/// Absolute URL for an API path on the serving origin
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, String> {
    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Request failed").to_string())
    }
}

async fn post<T: DeserializeOwned>(path: &str, body: &serde_json::Value) -> Result<T, String> {
    let response = reqwest::Client::new()
        .post(api_url(path))
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(response).await
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = reqwest::get(api_url(path)).await.map_err(|e| e.to_string())?;
    read_json(response).await
}

/// Image tools offered by the server
pub async fn fetch_tasks() -> Result<Vec<TaskInfo>, String> {
    get("/api/tasks").await
}

/// Analyze a photo (as a `data:` URL) for one task
pub async fn analyze_image(task: &str, image_data_url: &str) -> Result<String, String> {
    #[derive(Deserialize)]
    struct AnalyzeResponse {
        result: String,
    }

    let body = serde_json::json!({ "task": task, "image": image_data_url });
    let response: AnalyzeResponse = post("/api/analyze", &body).await?;
    Ok(response.result)
}

pub async fn market_price(crop: &str) -> Result<MarketPriceResult, String> {
    post("/api/market-price", &serde_json::json!({ "crop": crop })).await
}

pub async fn weather(latitude: f64, longitude: f64) -> Result<WeatherSummary, String> {
    get(&format!("/api/weather?lat={latitude}&lon={longitude}")).await
}

/// Send a chat message to the backend
pub async fn send_chat(message: &str, conversation_id: Option<&str>) -> Result<ChatReply, String> {
    let mut body = serde_json::json!({ "message": message });
    if let Some(id) = conversation_id {
        body["conversation_id"] = serde_json::json!(id);
    }
    post("/api/chat", &body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_label() {
        let titled = Source { uri: "https://enam.gov.in".into(), title: "eNAM".into() };
        let bare = Source { uri: "https://enam.gov.in".into(), title: String::new() };
        assert_eq!(titled.label(), "eNAM");
        assert_eq!(bare.label(), "https://enam.gov.in");
    }

    #[test]
    fn test_market_result_wire_format() {
        let result: MarketPriceResult =
            serde_json::from_str(r###"{"priceInfo": "## Onion", "sources": []}"###).unwrap();
        assert_eq!(result.price_info, "## Onion");
        assert!(result.sources.is_empty());
    }
}
