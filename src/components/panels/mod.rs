//! Side panels: repository form, commit and issue lists, people popup.

mod commit_list;
mod issue_list;
mod people_popup;
mod repo_form;

use leptos::prelude::*;

pub use commit_list::CommitList;
pub use issue_list::IssueList;
pub use people_popup::PeoplePopupPanel;
pub use repo_form::RepoForm;

use crate::config::Theme;

/// Styling input handed to every panel.
#[derive(Clone, Copy)]
pub struct PanelConfig {
	pub theme: Signal<Theme>,
	pub width_px: u32,
}

impl PanelConfig {
	pub fn new(theme: Signal<Theme>) -> Self {
		Self {
			theme,
			width_px: 200,
		}
	}

	pub fn panel_style(&self) -> String {
		panel_style(self.theme.get(), self.width_px)
	}

	pub fn title_style(&self) -> String {
		title_style(self.theme.get(), self.width_px)
	}

	pub fn row_style(&self) -> String {
		row_style(self.theme.get(), self.width_px)
	}
}

fn panel_style(theme: Theme, width: u32) -> String {
	format!(
		"overflow-y: auto; width: {width}px; height: 200px; border: 2px solid grey; \
		 border-radius: 5px; {}",
		theme.colors()
	)
}

fn title_style(theme: Theme, width: u32) -> String {
	format!(
		"display: block; font-family: \"Helvetica Neue\", Helvetica, sans-serif; \
		 font-size: 20px; font-weight: bold; text-align: center; width: {width}px; {}",
		theme.colors()
	)
}

fn row_style(theme: Theme, width: u32) -> String {
	format!(
		"display: block; font-size: 15px; width: {width}px; text-align: left; \
		 border: 1px solid lightgrey; border-radius: 2px; {}",
		theme.colors()
	)
}
