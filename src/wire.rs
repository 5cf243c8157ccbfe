//! Loki push API body (`POST /loki/api/v1/push`, JSON flavour).

use serde::{Deserialize, Serialize};

/// Top-level push body: one or more streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub streams: Vec<StreamEntry>,
}

/// A stream descriptor and its `[timestamp, line]` pairs.
///
/// Timestamps are Unix epoch nanoseconds rendered as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamEntry {
    pub stream: Stream,
    pub values: Vec<[String; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub service: String,
    pub level: String,
    pub environment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
}

impl PushRequest {
    /// Body carrying exactly one stream with one line.
    pub fn single(stream: Stream, timestamp: String, line: String) -> Self {
        PushRequest {
            streams: vec![StreamEntry {
                stream,
                values: vec![[timestamp, line]],
            }],
        }
    }

    /// Iterate over every `(stream, timestamp, line)` triple in the body.
    pub fn lines(&self) -> impl Iterator<Item = (&Stream, &str, &str)> {
        self.streams.iter().flat_map(|entry| {
            entry
                .values
                .iter()
                .map(move |[ts, line]| (&entry.stream, ts.as_str(), line.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn stream(function_name: Option<&str>) -> Stream {
        Stream {
            service: "s".to_string(),
            level: "info".to_string(),
            environment: "e".to_string(),
            function_name: function_name.map(str::to_string),
        }
    }

    #[test]
    fn serializes_to_loki_schema() {
        let request = PushRequest::single(stream(None), "1700000000000000000".into(), "hello".into());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "streams": [{
                    "stream": { "service": "s", "level": "info", "environment": "e" },
                    "values": [["1700000000000000000", "hello"]]
                }]
            })
        );
    }

    #[test]
    fn function_name_is_emitted_only_when_set() {
        let without = serde_json::to_value(stream(None)).unwrap();
        assert!(without.get("function_name").is_none());

        let with = serde_json::to_value(stream(Some("s_checkout"))).unwrap();
        assert_eq!(with.get("function_name"), Some(&Value::from("s_checkout")));
    }

    #[test]
    fn lines_walks_all_pairs() {
        let request = PushRequest::single(stream(None), "1".into(), "one".into());
        let collected: Vec<_> = request.lines().map(|(s, ts, line)| (s.level.as_str(), ts, line)).collect();
        assert_eq!(collected, vec![("info", "1", "one")]);
    }
}
