use chrono::{Days, Local, NaiveDate};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use log::info;

use crate::api::GraphQuery;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_RANGE_DAYS: u64 = 14;

/// Values of the home form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HomeForm {
	pub owner: String,
	pub repo: String,
	pub start: String,
	pub end: String,
}

impl HomeForm {
	/// Empty owner/repo, range covering the two weeks up to `today`.
	pub fn with_defaults(today: NaiveDate) -> Self {
		let start = today
			.checked_sub_days(Days::new(DEFAULT_RANGE_DAYS))
			.unwrap_or(today);
		Self {
			owner: String::new(),
			repo: String::new(),
			start: start.format(DATE_FORMAT).to_string(),
			end: today.format(DATE_FORMAT).to_string(),
		}
	}

	pub fn to_query(&self) -> GraphQuery {
		GraphQuery {
			owner: self.owner.clone(),
			repo: self.repo.clone(),
			start: Some(self.start.clone()),
			end: Some(self.end.clone()),
		}
	}
}

/// Client-side route of the graph page for `query`.
pub fn graph_route(query: &GraphQuery) -> String {
	format!("/graph?{}", query.to_query_string())
}

/// Form asking for a repository and a date range.
#[component]
pub fn Home() -> impl IntoView {
	let defaults = HomeForm::with_defaults(Local::now().date_naive());
	let owner = RwSignal::new(defaults.owner);
	let repo = RwSignal::new(defaults.repo);
	let start = RwSignal::new(defaults.start);
	let end = RwSignal::new(defaults.end);

	let navigate = use_navigate();
	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let form = HomeForm {
			owner: owner.get_untracked(),
			repo: repo.get_untracked(),
			start: start.get_untracked(),
			end: end.get_untracked(),
		};
		let route = graph_route(&form.to_query());
		info!("navigating to {route}");
		navigate(&route, Default::default());
	};

	view! {
		<div class="home">
			<h1>"Repository graph"</h1>
			<form on:submit=on_submit>
				<div>
					<label for="owner">"Repository owner"</label>
					<input type="text" name="owner" id="owner" autofocus=true bind:value=owner />
				</div>

				<div>
					<label for="repo">"Repository name"</label>
					<input type="text" name="repo" id="repo" bind:value=repo />
				</div>

				<div>
					<label for="start">"Start date"</label>
					<input type="date" name="start" id="start" bind:value=start />
				</div>

				<div>
					<label for="end">"End date"</label>
					<input type="date" name="end" id="end" bind:value=end />
				</div>

				<button type="submit">"Show me the graph"</button>
			</form>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_cover_last_two_weeks() {
		let today = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
		let form = HomeForm::with_defaults(today);
		assert_eq!(form.start, "2024-02-20");
		assert_eq!(form.end, "2024-03-05");
		assert!(form.owner.is_empty() && form.repo.is_empty());
	}

	#[test]
	fn submit_route_carries_all_fields() {
		let form = HomeForm {
			owner: "octocat".into(),
			repo: "hello-world".into(),
			start: "2024-01-01".into(),
			end: "2024-01-15".into(),
		};
		assert_eq!(
			graph_route(&form.to_query()),
			"/graph?owner=octocat&repo=hello-world&start=2024-01-01&end=2024-01-15"
		);
	}

	#[test]
	fn empty_owner_is_still_submitted() {
		let form = HomeForm::with_defaults(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
		assert_eq!(
			graph_route(&form.to_query()),
			"/graph?owner=&repo=&start=2024-01-01&end=2024-01-15"
		);
	}
}
