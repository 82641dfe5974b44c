use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphSnapshot};
use crate::components::panels::{CommitList, IssueList, PanelConfig, PeoplePopupPanel, RepoForm};
use crate::config::VizConfig;
use crate::session::Session;

/// Repository form on top, graph on the left, panels on the right.
#[component]
pub fn Home() -> impl IntoView {
	let session = Session::new(VizConfig::default());
	provide_context(session);
	let panels = PanelConfig::new(session.theme.into());

	// Changes only when a different repository's first tree arrives, which
	// remounts the canvas with a fresh layout engine.
	let graph_key = Memo::new(move |_| {
		session
			.snapshot
			.with(|s| s.is_some())
			.then(|| session.repo.get())
			.flatten()
	});
	let snapshot = Signal::derive(move || {
		session
			.snapshot
			.get()
			.unwrap_or_else(GraphSnapshot::rooted)
	});

	view! {
		<div
			class="page"
			style=move || format!("min-height: 100vh; padding: 8px; {}", session.theme.get().colors())
		>
			<RepoForm config=panels />
			{move || {
				session
					.error
					.get()
					.map(|e| view! { <p class="error" style="color: #d62728;">{e}</p> })
			}}
			{move || session.loading.get().then(|| view! { <p class="loading">"Loading…"</p> })}
			<div style="display: flex; gap: 8px; align-items: flex-start;">
				<div class="graph">
					{move || {
						graph_key
							.get()
							.map(|_| {
								view! {
									<ForceGraphCanvas
										data=snapshot
										theme=session.theme
										config=session.config.layout
									/>
								}
							})
					}}
				</div>
				<div style="display: flex; flex-direction: column; gap: 8px;">
					<CommitList config=panels />
					<IssueList config=panels />
					<PeoplePopupPanel config=panels />
				</div>
			</div>
		</div>
	}
}
