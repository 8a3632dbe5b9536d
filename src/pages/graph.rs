use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::error;

use crate::api::{FetchError, GraphQuery, fetch_graph};
use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::config::AppConfig;

/// Where a graph request stands.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
	Loading,
	Failed(FetchError),
	Ready(GraphData),
}

impl From<Option<Result<GraphData, FetchError>>> for LoadState {
	fn from(value: Option<Result<GraphData, FetchError>>) -> Self {
		match value {
			None => Self::Loading,
			Some(Err(e)) => Self::Failed(e),
			Some(Ok(data)) => Self::Ready(data),
		}
	}
}

/// What the page body shows for a [`LoadState`].
#[derive(Clone, Debug, PartialEq)]
pub enum PageView {
	Placeholder(&'static str),
	Viewer(GraphData),
}

impl From<LoadState> for PageView {
	fn from(state: LoadState) -> Self {
		match state {
			LoadState::Loading => Self::Placeholder("loading..."),
			LoadState::Failed(e) => {
				error!("graph load failed: {e}");
				Self::Placeholder("failed to load")
			}
			LoadState::Ready(data) => Self::Viewer(data),
		}
	}
}

/// Reads the graph query out of URL parameters. Missing owner/repo become
/// empty strings and are left for the backend to reject.
pub fn query_from_params(get: impl Fn(&str) -> Option<String>) -> GraphQuery {
	GraphQuery {
		owner: get("owner").unwrap_or_default(),
		repo: get("repo").unwrap_or_default(),
		start: get("start").filter(|s| !s.is_empty()),
		end: get("end").filter(|s| !s.is_empty()),
	}
}

/// Fetches the graph named in the query string and shows it.
#[component]
pub fn GraphPage() -> impl IntoView {
	let config = use_context::<AppConfig>().unwrap_or_default();
	let params = use_query_map();
	let query = params.with_untracked(|p| query_from_params(|key| p.get(key)));

	let graph = LocalResource::new(move || {
		let (base, query) = (config.api_base.clone(), query.clone());
		async move { fetch_graph(&base, &query).await }
	});

	view! {
		<div class="fullscreen-graph">
			{move || match PageView::from(LoadState::from(graph.get())) {
				PageView::Placeholder(text) => view! { <div>{text}</div> }.into_any(),
				PageView::Viewer(data) => {
					view! { <ForceGraphCanvas data=Signal::stored(data) fullscreen=true /> }.into_any()
				}
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn load_state_has_three_outcomes() {
		assert_eq!(LoadState::from(None), LoadState::Loading);
		assert_eq!(
			LoadState::from(Some(Err(FetchError::Status {
				status: 500,
				status_text: "Internal Server Error".into(),
			}))),
			LoadState::Failed(FetchError::Status {
				status: 500,
				status_text: "Internal Server Error".into(),
			})
		);
		assert_eq!(
			LoadState::from(Some(Ok(GraphData::default()))),
			LoadState::Ready(GraphData::default())
		);
	}

	#[test]
	fn failed_fetch_shows_message_and_no_viewer() {
		let failures = [
			FetchError::Network("connection refused".into()),
			FetchError::Status {
				status: 404,
				status_text: "Not Found".into(),
			},
			FetchError::Parse("expected value at line 1".into()),
		];
		for e in failures {
			let view = PageView::from(LoadState::from(Some(Err(e))));
			assert_eq!(view, PageView::Placeholder("failed to load"));
		}
	}

	#[test]
	fn pending_and_ready_views() {
		assert_eq!(
			PageView::from(LoadState::Loading),
			PageView::Placeholder("loading...")
		);
		assert_eq!(
			PageView::from(LoadState::Ready(GraphData::default())),
			PageView::Viewer(GraphData::default())
		);
	}

	#[test]
	fn reads_query_parameters() {
		let params: HashMap<&str, &str> = HashMap::from([
			("owner", "octocat"),
			("repo", "hello-world"),
			("start", "2024-01-01"),
			("end", ""),
		]);
		let query = query_from_params(|k| params.get(k).map(|v| v.to_string()));

		assert_eq!(query.owner, "octocat");
		assert_eq!(query.repo, "hello-world");
		assert_eq!(query.start.as_deref(), Some("2024-01-01"));
		assert_eq!(query.end, None);
	}

	#[test]
	fn missing_owner_becomes_empty() {
		let query = query_from_params(|_| None);
		assert_eq!(query, GraphQuery::default());
	}
}
