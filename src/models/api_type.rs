//! Wire-protocol families of upstream providers.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InspectorError;

/// Wire-protocol family of the provider endpoint that served a request.
///
/// Determines which JSON field paths hold the assistant reply inside a
/// captured body. The set is closed; names from the gateway that are not
/// listed here are treated as "no api type" rather than as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiType {
    /// `POST /v1/chat/completions`
    OpenaiChatCompletions,
    /// `POST /v1/responses`
    OpenaiResponses,
    /// `GET /v1/models`
    OpenaiModels,
    /// `POST /v1/messages`
    AnthropicMessages,
}

impl ApiType {
    /// All known API types.
    pub const ALL: [ApiType; 4] = [
        ApiType::OpenaiChatCompletions,
        ApiType::OpenaiResponses,
        ApiType::OpenaiModels,
        ApiType::AnthropicMessages,
    ];

    /// Wire name, as stored in request logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::OpenaiChatCompletions => "openai_chat_completions",
            ApiType::OpenaiResponses => "openai_responses",
            ApiType::OpenaiModels => "openai_models",
            ApiType::AnthropicMessages => "anthropic_messages",
        }
    }

    /// Parse a wire name, returning `None` for unknown or future values.
    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl std::fmt::Display for ApiType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ApiType {
    type Err = InspectorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_wire(&s.trim().to_lowercase())
            .ok_or_else(|| InspectorError::InvalidApiType(s.to_string()))
    }
}

/// Deserialize an optional api type, mapping unknown names to `None`.
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<ApiType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| {
        let parsed = ApiType::from_wire(&name);
        if parsed.is_none() {
            tracing::debug!(api_type = %name, "Unrecognized api type in request log");
        }
        parsed
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_roundtrip() {
        for api_type in ApiType::ALL {
            assert_eq!(ApiType::from_wire(api_type.as_str()), Some(api_type));
            let json = serde_json::to_string(&api_type).unwrap();
            assert_eq!(json, format!("\"{}\"", api_type.as_str()));
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "anthropic_messages".parse::<ApiType>().unwrap(),
            ApiType::AnthropicMessages
        );
        assert_eq!(
            " OPENAI_RESPONSES ".parse::<ApiType>().unwrap(),
            ApiType::OpenaiResponses
        );
        assert!("gemini_generate".parse::<ApiType>().is_err());
    }

    #[test]
    fn test_unknown_wire_name() {
        assert_eq!(ApiType::from_wire("gemini_generate_content"), None);
        assert_eq!(ApiType::from_wire(""), None);
    }
}
