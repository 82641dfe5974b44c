use leptos::prelude::*;

use super::PanelConfig;
use crate::session::{CommitEntry, Session};

/// Recent commits; clicking one re-renders the graph at that commit.
#[component]
pub fn CommitList(config: PanelConfig) -> impl IntoView {
	let session = expect_context::<Session>();

	view! {
		<div class="commit-list" style=move || config.panel_style()>
			<div style=move || config.title_style()>"Commit List"</div>
			{move || {
				session
					.commits
					.get()
					.into_iter()
					.map(|commit| {
						let CommitEntry { tree_sha, message, author, .. } = commit;
						let title = format!("By: {}", author.login);
						view! {
							<button
								style=move || config.row_style()
								on:click=move |_| session.select_commit(tree_sha.clone())
								on:mouseover=move |_| {
									session.show_people(title.clone(), vec![author.clone()])
								}
								on:mouseout=move |_| session.hide_people()
							>
								{message}
							</button>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
