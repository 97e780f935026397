//! The current Selection and the info panel state machine it drives.

use crate::api::ElementKind;

/// The one node or edge the user is looking at.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
	pub kind: ElementKind,
	pub id: String,
}

impl Selection {
	pub fn node(id: impl Into<String>) -> Self {
		Self {
			kind: ElementKind::Node,
			id: id.into(),
		}
	}

	pub fn edge(id: impl Into<String>) -> Self {
		Self {
			kind: ElementKind::Edge,
			id: id.into(),
		}
	}

	pub fn is(&self, kind: ElementKind, id: &str) -> bool {
		self.kind == kind && self.id == id
	}
}

/// Input to [`InfoPanel::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelEvent {
	/// Canvas click on an element, or search-result navigation.
	Pick(Selection),
	BackgroundClick,
	Close,
	ToggleMenu,
	Edit,
	Delete,
	ConfirmDelete,
	CancelDelete,
}

/// Work the owner has to do after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelEffect {
	OpenEditor(Selection),
	Delete(Selection),
}

/// `Closed -> Open(selection) -> Closed`, plus the action menu and the
/// delete confirmation while open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InfoPanel {
	#[default]
	Closed,
	Open {
		selection: Selection,
		menu_open: bool,
		confirming_delete: bool,
	},
}

impl InfoPanel {
	pub fn selection(&self) -> Option<&Selection> {
		match self {
			InfoPanel::Closed => None,
			InfoPanel::Open { selection, .. } => Some(selection),
		}
	}

	pub fn is_open(&self) -> bool {
		matches!(self, InfoPanel::Open { .. })
	}

	pub fn menu_open(&self) -> bool {
		matches!(self, InfoPanel::Open { menu_open: true, .. })
	}

	pub fn confirming_delete(&self) -> bool {
		matches!(
			self,
			InfoPanel::Open {
				confirming_delete: true,
				..
			}
		)
	}

	pub fn apply(&mut self, event: PanelEvent) -> Option<PanelEffect> {
		match event {
			PanelEvent::Pick(selection) => {
				// A new pick always starts from a fresh panel.
				*self = InfoPanel::Open {
					selection,
					menu_open: false,
					confirming_delete: false,
				};
				None
			}
			PanelEvent::BackgroundClick | PanelEvent::Close => {
				*self = InfoPanel::Closed;
				None
			}
			event => {
				let InfoPanel::Open {
					selection,
					menu_open,
					confirming_delete,
				} = self
				else {
					return None;
				};
				match event {
					PanelEvent::ToggleMenu => {
						*menu_open = !*menu_open;
						None
					}
					PanelEvent::Edit => {
						*menu_open = false;
						Some(PanelEffect::OpenEditor(selection.clone()))
					}
					PanelEvent::Delete => {
						*menu_open = false;
						*confirming_delete = true;
						None
					}
					PanelEvent::ConfirmDelete if *confirming_delete => {
						*confirming_delete = false;
						Some(PanelEffect::Delete(selection.clone()))
					}
					PanelEvent::CancelDelete | PanelEvent::ConfirmDelete => {
						*confirming_delete = false;
						None
					}
					PanelEvent::Pick(_) | PanelEvent::BackgroundClick | PanelEvent::Close => None,
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn open_on(id: &str) -> InfoPanel {
		let mut panel = InfoPanel::default();
		panel.apply(PanelEvent::Pick(Selection::node(id)));
		panel
	}

	#[test]
	fn background_click_clears_selection() {
		let mut panel = open_on("n1");
		assert_eq!(panel.selection(), Some(&Selection::node("n1")));
		panel.apply(PanelEvent::BackgroundClick);
		assert_eq!(panel.selection(), None);
	}

	#[test]
	fn close_button_closes() {
		let mut panel = open_on("n1");
		panel.apply(PanelEvent::Close);
		assert!(!panel.is_open());
	}

	#[test]
	fn picking_again_resets_menu_and_confirm() {
		let mut panel = open_on("n1");
		panel.apply(PanelEvent::ToggleMenu);
		panel.apply(PanelEvent::Delete);
		assert!(panel.confirming_delete());

		panel.apply(PanelEvent::Pick(Selection::edge("a->b")));
		assert_eq!(panel.selection(), Some(&Selection::edge("a->b")));
		assert!(!panel.menu_open());
		assert!(!panel.confirming_delete());
	}

	#[test]
	fn edit_closes_menu_and_delegates() {
		let mut panel = open_on("n1");
		panel.apply(PanelEvent::ToggleMenu);
		assert!(panel.menu_open());
		let effect = panel.apply(PanelEvent::Edit);
		assert_eq!(effect, Some(PanelEffect::OpenEditor(Selection::node("n1"))));
		assert!(!panel.menu_open());
		assert!(panel.is_open());
	}

	#[test]
	fn delete_requires_confirmation() {
		let mut panel = open_on("n1");
		panel.apply(PanelEvent::ToggleMenu);
		assert_eq!(panel.apply(PanelEvent::Delete), None);
		assert!(!panel.menu_open());
		assert!(panel.confirming_delete());

		assert_eq!(
			panel.apply(PanelEvent::ConfirmDelete),
			Some(PanelEffect::Delete(Selection::node("n1")))
		);
		assert!(!panel.confirming_delete());
	}

	#[test]
	fn confirm_without_prompt_does_nothing() {
		let mut panel = open_on("n1");
		assert_eq!(panel.apply(PanelEvent::ConfirmDelete), None);
	}

	#[test]
	fn cancel_keeps_panel_open() {
		let mut panel = open_on("n1");
		panel.apply(PanelEvent::Delete);
		assert_eq!(panel.apply(PanelEvent::CancelDelete), None);
		assert!(panel.is_open());
		assert!(!panel.confirming_delete());
	}

	#[test]
	fn closed_panel_ignores_actions() {
		let mut panel = InfoPanel::default();
		assert_eq!(panel.apply(PanelEvent::Edit), None);
		assert_eq!(panel, InfoPanel::Closed);
	}
}
