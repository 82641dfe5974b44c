use leptos::prelude::*;

use super::PanelConfig;
use crate::session::Session;

#[component]
pub fn IssueList(config: PanelConfig) -> impl IntoView {
	let session = expect_context::<Session>();

	view! {
		<div class="issue-list" style=move || config.panel_style()>
			<div style=move || config.title_style()>"Issue List"</div>
			{move || {
				session
					.issues
					.get()
					.into_iter()
					.map(|issue| {
						let (title, assignees) = (issue.title, issue.assignees);
						view! {
							<button
								style=move || config.row_style()
								on:mouseover=move |_| {
									session.show_people("Assignees".to_string(), assignees.clone())
								}
								on:mouseout=move |_| session.hide_people()
							>
								{title}
							</button>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
