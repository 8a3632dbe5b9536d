//! Client for the graph backend.

use gloo_net::http::Request;
use log::debug;
use thiserror::Error;

use crate::components::force_graph::GraphData;

/// Repository and date range a graph is requested for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphQuery {
	/// Repository owner.
	pub owner: String,
	/// Repository name.
	pub repo: String,
	/// Start date, `YYYY-MM-DD`.
	pub start: Option<String>,
	/// End date, `YYYY-MM-DD`.
	pub end: Option<String>,
}

impl GraphQuery {
	/// `owner=..&repo=..[&start=..][&end=..]`, every value percent-encoded.
	/// Empty dates are left out.
	pub fn to_query_string(&self) -> String {
		let mut query = format!(
			"owner={}&repo={}",
			urlencoding::encode(&self.owner),
			urlencoding::encode(&self.repo)
		);
		for (key, value) in [("start", &self.start), ("end", &self.end)] {
			if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
				query.push_str(&format!("&{key}={}", urlencoding::encode(v)));
			}
		}
		query
	}
}

/// Why a graph could not be loaded.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Network(String),
	/// The backend answered with a non-2xx status.
	#[error("backend returned {status} {status_text}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// HTTP status text.
		status_text: String,
	},
	/// The body was not a graph payload.
	#[error("invalid graph payload: {0}")]
	Parse(String),
}

/// Full request URL for `query` against the backend at `base`.
pub fn graph_url(base: &str, query: &GraphQuery) -> String {
	format!("{}/graph?{}", base.trim_end_matches('/'), query.to_query_string())
}

/// Fetches and parses the graph for `query`.
pub async fn fetch_graph(base: &str, query: &GraphQuery) -> Result<GraphData, FetchError> {
	let url = graph_url(base, query);
	debug!("GET {url}");

	let response = Request::get(&url)
		.send()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;

	check_status(response.ok(), response.status(), response.status_text())?;

	let text = response
		.text()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;

	parse_graph(&text)
}

/// Anything outside 2xx is a failure, whatever the body says.
fn check_status(ok: bool, status: u16, status_text: String) -> Result<(), FetchError> {
	if ok {
		Ok(())
	} else {
		Err(FetchError::Status {
			status,
			status_text,
		})
	}
}

fn parse_graph(body: &str) -> Result<GraphData, FetchError> {
	serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn query(start: Option<&str>, end: Option<&str>) -> GraphQuery {
		GraphQuery {
			owner: "octocat".into(),
			repo: "hello-world".into(),
			start: start.map(Into::into),
			end: end.map(Into::into),
		}
	}

	#[test]
	fn url_carries_all_parameters() {
		let url = graph_url(
			"http://localhost:8080",
			&query(Some("2024-01-01"), Some("2024-01-15")),
		);
		assert_eq!(
			url,
			"http://localhost:8080/graph?owner=octocat&repo=hello-world&start=2024-01-01&end=2024-01-15"
		);
	}

	#[test]
	fn url_omits_missing_dates() {
		assert_eq!(
			graph_url("http://api/", &query(None, Some(""))),
			"http://api/graph?owner=octocat&repo=hello-world"
		);
		assert_eq!(
			graph_url("http://api", &query(None, Some("2024-02-01"))),
			"http://api/graph?owner=octocat&repo=hello-world&end=2024-02-01"
		);
	}

	#[test]
	fn reserved_characters_are_encoded() {
		let q = GraphQuery {
			owner: "a&b".into(),
			repo: "x y=z".into(),
			start: None,
			end: None,
		};
		assert_eq!(q.to_query_string(), "owner=a%26b&repo=x%20y%3Dz");
	}

	#[test]
	fn non_ok_status_is_a_failure() {
		assert_eq!(
			check_status(false, 404, "Not Found".into()),
			Err(FetchError::Status {
				status: 404,
				status_text: "Not Found".into(),
			})
		);
		let err = check_status(false, 500, "Internal Server Error".into()).unwrap_err();
		assert_eq!(err.to_string(), "backend returned 500 Internal Server Error");
		assert_eq!(check_status(true, 200, "OK".into()), Ok(()));
	}

	#[test]
	fn parse_failure_is_reported() {
		assert!(matches!(parse_graph("not json"), Err(FetchError::Parse(_))));
		assert_eq!(parse_graph(r#"{"nodes":[],"links":[]}"#), Ok(GraphData::default()));
	}
}
