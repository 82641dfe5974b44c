use leptos::prelude::*;

use super::PanelConfig;
use crate::session::Session;

/// Author or assignees of the hovered row, with avatars.
#[component]
pub fn PeoplePopupPanel(config: PanelConfig) -> impl IntoView {
	let session = expect_context::<Session>();

	move || {
		session.popup.get().map(|popup| {
			let people = popup
				.people
				.into_iter()
				.map(|person| match person.avatar_url {
					Some(src) => view! {
						<img
							src=src
							alt=person.login
							style="display: block; width: 200px; border: 1px solid lightgrey;"
						/>
					}
					.into_any(),
					None => view! { <div>{person.login}</div> }.into_any(),
				})
				.collect_view();
			view! {
				<div class="people-popup" style=move || config.panel_style()>
					<div style=move || config.title_style()>{popup.title}</div>
					{people}
				</div>
			}
		})
	}
}
