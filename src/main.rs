use leptos::prelude::*;
use repo_graph_web::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
