use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use super::PanelConfig;
use crate::session::Session;

/// Owner/repository inputs, the hide-files switch and the theme toggle.
#[component]
pub fn RepoForm(config: PanelConfig) -> impl IntoView {
	let session = expect_context::<Session>();
	let (owner, set_owner) = signal(String::new());
	let (name, set_name) = signal(String::new());

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		session.load_repository(owner.get_untracked(), name.get_untracked());
	};

	view! {
		<form
			class="repo-form"
			on:submit=on_submit
			style=move || format!("display: flex; gap: 8px; padding: 4px 0; {}", config.theme.get().colors())
		>
			<input
				type="text"
				placeholder="owner"
				prop:value=move || owner.get()
				on:input=move |ev| set_owner.set(event_target_value(&ev))
			/>
			<input
				type="text"
				placeholder="repository"
				prop:value=move || name.get()
				on:input=move |ev| set_name.set(event_target_value(&ev))
			/>
			<button type="submit" style=move || config.theme.get().colors()>"Visualize"</button>
			<label>
				<input
					type="checkbox"
					prop:checked=move || !session.include_files.get()
					on:change=move |ev| session.include_files.set(!event_target_checked(&ev))
				/>
				"Hide files"
			</label>
			<button
				type="button"
				style=move || config.theme.get().colors()
				on:click=move |_| session.toggle_theme()
			>
				{move || config.theme.get().toggle_label()}
			</button>
		</form>
	}
}
