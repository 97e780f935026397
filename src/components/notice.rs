//! Transient success and error messages.

use std::time::Duration;

use leptos::prelude::*;

/// How long a notice stays up.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
	Success,
	Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
	pub id: u64,
	pub kind: NoticeKind,
	pub text: String,
}

/// The newest few notices, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoticeList {
	next_id: u64,
	entries: Vec<Notice>,
}

impl NoticeList {
	pub const LIMIT: usize = 3;

	/// Add a notice, dropping the oldest beyond [`Self::LIMIT`]. Returns its id.
	pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
		self.next_id += 1;
		let id = self.next_id;
		self.entries.push(Notice {
			id,
			kind,
			text: text.into(),
		});
		if self.entries.len() > Self::LIMIT {
			let excess = self.entries.len() - Self::LIMIT;
			self.entries.drain(..excess);
		}
		id
	}

	pub fn dismiss(&mut self, id: u64) {
		self.entries.retain(|n| n.id != id);
	}

	pub fn entries(&self) -> &[Notice] {
		&self.entries
	}
}

/// Handle to the notice list in context.
#[derive(Clone, Copy)]
pub struct Notices {
	list: RwSignal<NoticeList>,
}

impl Notices {
	pub fn provide() -> Self {
		let notices = Self {
			list: RwSignal::new(NoticeList::default()),
		};
		provide_context(notices);
		notices
	}

	pub fn success(&self, text: impl Into<String>) {
		self.push(NoticeKind::Success, text.into());
	}

	pub fn error(&self, text: impl Into<String>) {
		self.push(NoticeKind::Error, text.into());
	}

	fn push(&self, kind: NoticeKind, text: String) {
		let Some(id) = self.list.try_update(|l| l.push(kind, text)) else {
			return;
		};
		let list = self.list;
		set_timeout(
			move || {
				list.try_update(|l| l.dismiss(id));
			},
			NOTICE_TTL,
		);
	}

	pub fn dismiss(&self, id: u64) {
		self.list.try_update(|l| l.dismiss(id));
	}
}

/// The notice handle, or a detached one when no provider is mounted.
pub fn use_notices() -> Notices {
	use_context::<Notices>().unwrap_or_else(|| Notices {
		list: RwSignal::new(NoticeList::default()),
	})
}

#[component]
pub fn NoticeStack() -> impl IntoView {
	let notices = use_notices();

	view! {
		<div class="cg-notices">
			{move || {
				notices
					.list
					.get()
					.entries()
					.iter()
					.cloned()
					.map(|notice| {
						let id = notice.id;
						let class = match notice.kind {
							NoticeKind::Success => "cg-notice cg-notice-success",
							NoticeKind::Error => "cg-notice cg-notice-error",
						};
						view! {
							<div class=class role="alert">
								<span>{notice.text}</span>
								<button
									class="cg-icon-button"
									aria-label="Dismiss"
									on:click=move |_| notices.dismiss(id)
								>
									"✕"
								</button>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
