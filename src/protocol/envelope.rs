//! Wire Envelope
//!
//! Text-frame JSON framing for the driver control channel. A request carries
//! a numeric correlation id and a payload tagged with the command name; the
//! driver echoes the id back on the matching response.

use serde_json::{Map, Value};
use snafu::Snafu;

/// Extra parameters attached to an outgoing command
pub type CommandParams = Map<String, Value>;

/// Why an inbound frame was rejected
#[derive(Debug, Snafu)]
pub enum FrameError {
    /// The frame is not valid JSON
    #[snafu(display("frame is not valid JSON: {source}"))]
    Json { source: serde_json::Error },

    /// The frame has no numeric `id` field
    #[snafu(display("frame has no numeric id"))]
    MissingId,

    /// The frame has no `data` payload
    #[snafu(display("frame has no data payload"))]
    MissingData,
}

/// A decoded driver-to-client frame.
///
/// `data` is opaque at this layer; typed decoding happens in
/// [`commands`](crate::protocol::commands) or in the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseEnvelope {
    /// Correlation id echoed from a request, or a driver-chosen tag on a push
    pub id: u64,
    /// Result payload
    pub data: Value,
}

/// Serialize a request frame: `{ "id": N, "data": { "type": NAME, ...params } }`.
///
/// Parameters are merged after the `type` tag, so a parameter named `type`
/// would override it (matching the original envelope layout).
pub fn request_frame(
    id: u64,
    command: &str,
    params: CommandParams,
) -> Result<String, serde_json::Error> {
    let mut data = Map::with_capacity(params.len() + 1);
    data.insert("type".to_owned(), Value::String(command.to_owned()));
    data.extend(params);

    let mut frame = Map::with_capacity(2);
    frame.insert("id".to_owned(), Value::from(id));
    frame.insert("data".to_owned(), Value::Object(data));

    serde_json::to_string(&Value::Object(frame))
}

/// Decode an inbound frame.
///
/// Frames without a non-negative numeric `id` or without a `data` payload are
/// rejected; the caller drops them with a diagnostic instead of failing any
/// pending operation.
pub fn parse_frame(raw: &str) -> Result<ResponseEnvelope, FrameError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| FrameError::Json { source })?;

    let id = value
        .get("id")
        .and_then(Value::as_u64)
        .ok_or(FrameError::MissingId)?;

    let data = match value.get("data") {
        Some(data) if !data.is_null() => data.clone(),
        _ => return Err(FrameError::MissingData),
    };

    Ok(ResponseEnvelope { id, data })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_frame_layout() {
        let mut params = CommandParams::new();
        params.insert("pretty".to_owned(), Value::Bool(true));

        let frame = request_frame(3, "GetConfig", params).expect("serialize");
        let value: Value = serde_json::from_str(&frame).expect("parse back");

        assert_eq!(value["id"], 3);
        assert_eq!(value["data"]["type"], "GetConfig");
        assert_eq!(value["data"]["pretty"], true);
    }

    #[test]
    fn test_request_frame_without_params() {
        let frame = request_frame(0, "GetStatus", CommandParams::new()).expect("serialize");
        let value: Value = serde_json::from_str(&frame).expect("parse back");

        assert_eq!(value, json!({ "id": 0, "data": { "type": "GetStatus" } }));
    }

    #[test]
    fn test_parse_frame_roundtrip() {
        let envelope =
            parse_frame(r#"{ "id": 7, "data": { "status": "Connected" } }"#).expect("parse");

        assert_eq!(envelope.id, 7);
        assert_eq!(envelope.data["status"], "Connected");
    }

    #[test]
    fn test_parse_frame_rejects_invalid_json() {
        assert!(matches!(parse_frame("not json"), Err(FrameError::Json { .. })));
    }

    #[test]
    fn test_parse_frame_rejects_missing_id() {
        assert!(matches!(
            parse_frame(r#"{ "notid": true }"#),
            Err(FrameError::MissingId)
        ));
        assert!(matches!(
            parse_frame(r#"{ "id": "GetStatus", "data": {} }"#),
            Err(FrameError::MissingId)
        ));
        assert!(matches!(
            parse_frame(r#"{ "id": -1, "data": {} }"#),
            Err(FrameError::MissingId)
        ));
    }

    #[test]
    fn test_parse_frame_rejects_missing_data() {
        assert!(matches!(
            parse_frame(r#"{ "id": 2 }"#),
            Err(FrameError::MissingData)
        ));
        assert!(matches!(
            parse_frame(r#"{ "id": 2, "data": null }"#),
            Err(FrameError::MissingData)
        ));
    }
}
