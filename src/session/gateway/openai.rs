// OpenAI chat completions gateway

use anyhow::Result;
use reqwest::Client;

use super::{Candidate, CompletionGateway};
use crate::config::RequestTemplate;
use crate::session::Turn;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAiGateway {
	api_key: String,
	client: Client,
}

impl OpenAiGateway {
	pub fn new(api_key: String) -> Self {
		Self {
			api_key,
			client: Client::new(),
		}
	}
}

/// Build the chat completions request body. Optional template fields are
/// inserted only when set; an unset field is omitted entirely rather than
/// sent as a zero value.
fn build_request_body(template: &RequestTemplate, transcript: &[Turn]) -> serde_json::Value {
	let messages = transcript
		.iter()
		.map(|turn| {
			serde_json::json!({
				"role": turn.role.as_str(),
				"content": turn.content,
			})
		})
		.collect::<Vec<_>>();

	let mut body = serde_json::json!({
		"model": template.model,
		"messages": messages,
	});

	if let Some(max_tokens) = template.max_tokens {
		body["max_tokens"] = serde_json::json!(max_tokens);
	}
	if let Some(temperature) = template.temperature {
		body["temperature"] = serde_json::json!(temperature);
	}
	if let Some(n) = template.completion_count {
		body["n"] = serde_json::json!(n);
	}
	if !template.stop_sequences.is_empty() {
		body["stop"] = serde_json::json!(template.stop_sequences);
	}

	body
}

/// Extract the ordered candidate replies from a successful response.
fn parse_candidates(response_json: &serde_json::Value) -> Result<Vec<Candidate>> {
	let choices = response_json
		.get("choices")
		.and_then(|c| c.as_array())
		.ok_or_else(|| anyhow::anyhow!("Invalid response format: missing choices array"))?;

	let mut candidates = Vec::new();
	for choice in choices {
		let message = choice
			.get("message")
			.ok_or_else(|| anyhow::anyhow!("Invalid response format: choice without message"))?;

		let role = message
			.get("role")
			.and_then(|r| r.as_str())
			.unwrap_or("assistant")
			.to_string();
		let content = message
			.get("content")
			.and_then(|c| c.as_str())
			.unwrap_or_default()
			.to_string();

		candidates.push(Candidate { role, content });
	}

	if candidates.is_empty() {
		return Err(anyhow::anyhow!("Response contained no completion choices"));
	}

	Ok(candidates)
}

/// Assemble a readable error from a failed response, pulling the message,
/// code, and type out of the error object when present.
fn extract_error(status: reqwest::StatusCode, response_json: &serde_json::Value, response_text: &str) -> anyhow::Error {
	let mut error_details = Vec::new();
	error_details.push(format!("HTTP {}", status));

	if let Some(error_obj) = response_json.get("error") {
		if let Some(msg) = error_obj.get("message").and_then(|m| m.as_str()) {
			error_details.push(format!("Message: {}", msg));
		}
		if let Some(code) = error_obj.get("code").and_then(|c| c.as_str()) {
			error_details.push(format!("Code: {}", code));
		}
		if let Some(type_) = error_obj.get("type").and_then(|t| t.as_str()) {
			error_details.push(format!("Type: {}", type_));
		}
	}

	if error_details.len() == 1 {
		error_details.push(format!("Raw response: {}", response_text));
	}

	anyhow::anyhow!("OpenAI API error: {}", error_details.join(" | "))
}

#[async_trait::async_trait]
impl CompletionGateway for OpenAiGateway {
	async fn complete(
		&self,
		template: &RequestTemplate,
		transcript: &[Turn],
	) -> Result<Vec<Candidate>> {
		let request_body = build_request_body(template, transcript);

		let response = self
			.client
			.post(OPENAI_API_URL)
			.header("Authorization", format!("Bearer {}", self.api_key))
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await?;

		let status = response.status();

		// Read as text first so parse failures can show the raw body
		let response_text = response.text().await?;
		let response_json: serde_json::Value = match serde_json::from_str(&response_text) {
			Ok(json) => json,
			Err(e) => {
				return Err(anyhow::anyhow!(
					"Failed to parse response JSON: {}. Response: {}",
					e,
					response_text
				));
			}
		};

		if !status.is_success() {
			return Err(extract_error(status, &response_json, &response_text));
		}

		// Some failures come back with HTTP 200 and an error in the body
		if response_json.get("error").is_some() {
			return Err(extract_error(status, &response_json, &response_text));
		}

		parse_candidates(&response_json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn template() -> RequestTemplate {
		RequestTemplate {
			model: "gpt-3.5-turbo".to_string(),
			max_tokens: None,
			temperature: None,
			completion_count: None,
			stop_sequences: Vec::new(),
			speak_replies_aloud: false,
		}
	}

	#[test]
	fn test_unset_optionals_are_omitted() {
		let body = build_request_body(&template(), &[Turn::user("hello")]);

		assert_eq!(body["model"], "gpt-3.5-turbo");
		assert!(body.get("max_tokens").is_none());
		assert!(body.get("temperature").is_none());
		assert!(body.get("n").is_none());
		assert!(body.get("stop").is_none());
	}

	#[test]
	fn test_set_optionals_are_sent() {
		let template = RequestTemplate {
			max_tokens: Some(256),
			temperature: Some(0.7),
			completion_count: Some(2),
			stop_sequences: vec!["END".to_string()],
			..template()
		};
		let body = build_request_body(&template, &[Turn::user("hello")]);

		assert_eq!(body["max_tokens"], 256);
		assert_eq!(body["temperature"], 0.7);
		assert_eq!(body["n"], 2);
		assert_eq!(body["stop"], serde_json::json!(["END"]));
	}

	#[test]
	fn test_messages_preserve_transcript_order() {
		let transcript = vec![
			Turn::user("hello"),
			Turn::assistant("hi there"),
			Turn::user("more"),
		];
		let body = build_request_body(&template(), &transcript);

		let messages = body["messages"].as_array().unwrap();
		assert_eq!(messages.len(), 3);
		assert_eq!(messages[0]["role"], "user");
		assert_eq!(messages[0]["content"], "hello");
		assert_eq!(messages[1]["role"], "assistant");
		assert_eq!(messages[1]["content"], "hi there");
		assert_eq!(messages[2]["role"], "user");
		assert_eq!(messages[2]["content"], "more");
	}

	#[test]
	fn test_parse_candidates_in_order() {
		let response = serde_json::json!({
			"choices": [
				{"message": {"role": "assistant", "content": "first"}},
				{"message": {"role": "assistant", "content": "second"}},
			]
		});
		let candidates = parse_candidates(&response).unwrap();
		assert_eq!(candidates.len(), 2);
		assert_eq!(candidates[0].content, "first");
		assert_eq!(candidates[1].content, "second");
	}

	#[test]
	fn test_parse_empty_choices_is_error() {
		let response = serde_json::json!({"choices": []});
		assert!(parse_candidates(&response).is_err());
	}

	#[test]
	fn test_parse_missing_choices_is_error() {
		let response = serde_json::json!({"unexpected": true});
		assert!(parse_candidates(&response).is_err());
	}
}
