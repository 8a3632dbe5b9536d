use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A vertex of the payload. Only the fields the viewer draws are kept.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	#[serde(deserialize_with = "id_from_json")]
	pub id: String,
	#[serde(default = "default_score")]
	pub score: f64,
	#[serde(default)]
	pub group: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	#[serde(deserialize_with = "id_from_json")]
	pub source: String,
	#[serde(deserialize_with = "id_from_json")]
	pub target: String,
	#[serde(default)]
	pub value: f64,
}

/// The `{ nodes, links }` body returned by the graph endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

fn default_score() -> f64 {
	1.0
}

/// Node ids arrive as either JSON strings or numbers.
fn id_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(s) => Ok(s),
		Value::Number(n) => Ok(n.to_string()),
		other => Err(serde::de::Error::custom(format!(
			"expected string or number id, got {other}"
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let body = r#"{
			"nodes": [
				{"id": "alice", "score": 3, "group": 1, "extra": true},
				{"id": 42, "group": "files"}
			],
			"links": [{"source": "alice", "target": 42, "value": 7.5}]
		}"#;
		let data: GraphData = serde_json::from_str(body).unwrap();

		assert_eq!(data.nodes[0].id, "alice");
		assert_eq!(data.nodes[0].score, 3.0);
		assert_eq!(data.nodes[1].id, "42");
		assert_eq!(data.nodes[1].score, 1.0);
		assert_eq!(data.links[0].target, "42");
		assert_eq!(data.links[0].value, 7.5);
	}

	#[test]
	fn missing_arrays_are_empty() {
		let data: GraphData = serde_json::from_str("{}").unwrap();
		assert!(data.nodes.is_empty());
		assert!(data.links.is_empty());
	}

	#[test]
	fn rejects_object_ids() {
		let body = r#"{"nodes": [{"id": {"nested": 1}}], "links": []}"#;
		assert!(serde_json::from_str::<GraphData>(body).is_err());
	}
}
