//! Quote results and race outcomes
//!
//! Wire format uses camelCase field names (`apiName`, `timeTaken`, ...)
//! for compatibility with existing consumers of the JSON API.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::UpstreamError;

/// Identifier for an upstream quote provider.
///
/// Serializes to the wire names used in API responses and event payloads
/// (`dummyJson`, `zenQuotes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    #[serde(rename = "dummyJson")]
    DummyJson,
    #[serde(rename = "zenQuotes")]
    ZenQuotes,
}

impl SourceId {
    /// Wire name, as it appears in JSON keys and the `apiName` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceId::DummyJson => "dummyJson",
            SourceId::ZenQuotes => "zenQuotes",
        }
    }

    /// Human-readable provider name, used in error and fallback text.
    pub fn display_name(&self) -> &'static str {
        match self {
            SourceId::DummyJson => "DummyJSON",
            SourceId::ZenQuotes => "ZenQuotes",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of a single upstream quote fetch.
///
/// Failures are data, not errors: a failed fetch still produces a
/// `QuoteResult` with `error = true`, a fallback `quote` text, and the
/// elapsed time up to the point the failure was detected.
///
/// `is_fastest` is `None` until the race coordinator scores the result;
/// it is assigned exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub api_name: SourceId,
    pub quote: String,
    pub author: String,
    /// Elapsed wall time in milliseconds, rounded to 2 decimal places.
    pub time_taken: f64,
    /// Username used for the authenticated provider, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fastest: Option<bool>,
}

impl QuoteResult {
    /// A successful fetch, not yet scored.
    pub fn success(
        api_name: SourceId,
        quote: impl Into<String>,
        author: impl Into<String>,
        time_taken: f64,
        user: Option<String>,
    ) -> Self {
        Self {
            api_name,
            quote: quote.into(),
            author: author.into(),
            time_taken,
            user,
            error: false,
            error_message: None,
            is_fastest: None,
        }
    }

    /// A failed fetch folded into result form.
    ///
    /// The quote text becomes a descriptive fallback embedding the error,
    /// the author is the literal `"Error"`, and `time_taken` carries the
    /// time spent before the failure was detected (0 for pre-flight
    /// failures).
    pub fn failure(
        api_name: SourceId,
        err: &UpstreamError,
        time_taken: f64,
        user: Option<String>,
    ) -> Self {
        Self {
            api_name,
            quote: format!(
                "Unable to fetch quote from {}: {}",
                api_name.display_name(),
                err
            ),
            author: "Error".to_string(),
            time_taken,
            user,
            error: true,
            error_message: Some(err.to_string()),
            is_fastest: None,
        }
    }
}

/// The combined outcome of one race: both results, in call order
/// (DummyJSON first, ZenQuotes second).
///
/// At most one result is flagged fastest; when both fetches failed,
/// neither is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceOutcome {
    #[serde(rename = "dummyJson")]
    pub dummy_json: QuoteResult,
    #[serde(rename = "zenQuotes")]
    pub zen_quotes: QuoteResult,
}

impl RaceOutcome {
    /// Both results in call order.
    pub fn results(&self) -> [&QuoteResult; 2] {
        [&self.dummy_json, &self.zen_quotes]
    }

    pub fn get(&self, source: SourceId) -> &QuoteResult {
        match source {
            SourceId::DummyJson => &self.dummy_json,
            SourceId::ZenQuotes => &self.zen_quotes,
        }
    }

    /// The winning entry. When both fetches failed and neither is flagged,
    /// defaults deterministically to the first-registered source.
    pub fn fastest(&self) -> (SourceId, &QuoteResult) {
        if self.zen_quotes.is_fastest == Some(true) {
            (SourceId::ZenQuotes, &self.zen_quotes)
        } else {
            (SourceId::DummyJson, &self.dummy_json)
        }
    }
}

/// Response body for the fastest-quote endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestQuote {
    pub who_is_fastest: SourceId,
    pub quote: QuoteResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_id_wire_names() {
        assert_eq!(
            serde_json::to_string(&SourceId::DummyJson).unwrap(),
            "\"dummyJson\""
        );
        assert_eq!(
            serde_json::to_string(&SourceId::ZenQuotes).unwrap(),
            "\"zenQuotes\""
        );
    }

    #[test]
    fn quote_result_serializes_camel_case() {
        let mut result = QuoteResult::success(
            SourceId::DummyJson,
            "Stay hungry.",
            "Steve Jobs",
            42.13,
            Some("emilys".to_string()),
        );
        result.is_fastest = Some(true);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["apiName"], "dummyJson");
        assert_eq!(value["quote"], "Stay hungry.");
        assert_eq!(value["author"], "Steve Jobs");
        assert_eq!(value["timeTaken"], 42.13);
        assert_eq!(value["user"], "emilys");
        assert_eq!(value["error"], false);
        assert_eq!(value["isFastest"], true);
        // Absent optionals are omitted, not null
        assert!(value.get("errorMessage").is_none());
    }

    #[test]
    fn quote_result_round_trips() {
        let mut result = QuoteResult::failure(
            SourceId::ZenQuotes,
            &UpstreamError::Status {
                source: SourceId::ZenQuotes,
                status: 503,
                body: "upstream down".to_string(),
            },
            17.5,
            None,
        );
        result.is_fastest = Some(false);

        let json = serde_json::to_string(&result).unwrap();
        let parsed: QuoteResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn failure_result_embeds_error() {
        let err = UpstreamError::Transport {
            source: SourceId::DummyJson,
            message: "connection refused".to_string(),
        };
        let result = QuoteResult::failure(SourceId::DummyJson, &err, 0.0, None);

        assert!(result.error);
        assert_eq!(result.author, "Error");
        assert!(result.quote.starts_with("Unable to fetch quote from DummyJSON:"));
        assert_eq!(result.error_message.as_deref(), Some(err.to_string().as_str()));
        assert_eq!(result.is_fastest, None);
    }

    #[test]
    fn fastest_defaults_to_first_registered_source() {
        let failed = |source| {
            let mut r = QuoteResult::failure(
                source,
                &UpstreamError::Transport {
                    source,
                    message: "timeout".to_string(),
                },
                0.0,
                None,
            );
            r.is_fastest = Some(false);
            r
        };
        let outcome = RaceOutcome {
            dummy_json: failed(SourceId::DummyJson),
            zen_quotes: failed(SourceId::ZenQuotes),
        };

        let (source, _) = outcome.fastest();
        assert_eq!(source, SourceId::DummyJson);
    }
}
