//! Apply-then-confirm state changes with rollback on failure.

use std::cell::RefCell;
use std::future::Future;

use leptos::prelude::*;
use log::debug;

use crate::api::ApiError;

/// Somewhere an optimistic change can be written to.
pub trait StateCell<S> {
	fn update_with(&self, f: &mut dyn FnMut(&mut S));
}

impl<S> StateCell<S> for RefCell<S> {
	fn update_with(&self, f: &mut dyn FnMut(&mut S)) {
		f(&mut self.borrow_mut());
	}
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
	fn update_with(&self, f: &mut dyn FnMut(&mut S)) {
		// A disposed signal means the view is gone; nothing to update.
		let _ = self.try_update(|s| f(s));
	}
}

/// A projected state change and its inverse.
pub struct OptimisticMutation<S> {
	forward: Box<dyn Fn(&mut S)>,
	inverse: Box<dyn Fn(&mut S)>,
}

impl<S> OptimisticMutation<S> {
	pub fn new(forward: impl Fn(&mut S) + 'static, inverse: impl Fn(&mut S) + 'static) -> Self {
		Self {
			forward: Box::new(forward),
			inverse: Box::new(inverse),
		}
	}

	pub fn apply(&self, state: &mut S) {
		(self.forward)(state);
	}

	pub fn rollback(&self, state: &mut S) {
		(self.inverse)(state);
	}

	/// Apply to `cell`, await `remote`, and undo the change if it fails.
	///
	/// A cancelled request leaves the state alone: the owning view is being
	/// torn down and its state must not be touched.
	pub async fn run<T, C, F>(self, cell: &C, remote: F) -> Result<T, ApiError>
	where
		C: StateCell<S>,
		F: Future<Output = Result<T, ApiError>>,
	{
		cell.update_with(&mut |s| self.apply(s));
		let result = remote.await;
		match &result {
			Err(err) if err.is_cancelled() => {}
			Err(err) => {
				debug!("crowdgraph: rolling back optimistic change: {}", err);
				cell.update_with(&mut |s| self.rollback(s));
			}
			Ok(_) => {}
		}
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;

	fn counter() -> OptimisticMutation<i32> {
		OptimisticMutation::new(|n| *n += 1, |n| *n -= 1)
	}

	#[test]
	fn success_keeps_projected_state() {
		let cell = RefCell::new(10);
		let result = block_on(counter().run(&cell, async { Ok::<_, ApiError>(()) }));
		assert!(result.is_ok());
		assert_eq!(*cell.borrow(), 11);
	}

	#[test]
	fn failure_rolls_back() {
		let cell = RefCell::new(10);
		let result = block_on(counter().run(&cell, async {
			Err::<(), _>(ApiError::Rejected {
				message: Some("nope".into()),
			})
		}));
		assert!(result.is_err());
		assert_eq!(*cell.borrow(), 10);
	}

	#[test]
	fn state_is_projected_before_the_request_resolves() {
		let cell = RefCell::new(0);
		let seen = block_on(counter().run(&cell, async { Ok::<_, ApiError>(*cell.borrow()) }));
		assert_eq!(seen, Ok(1));
	}

	#[test]
	fn cancellation_leaves_state_untouched() {
		let cell = RefCell::new(3);
		let result = block_on(counter().run(&cell, async { Err::<(), _>(ApiError::Cancelled) }));
		assert_eq!(result, Err(ApiError::Cancelled));
		assert_eq!(*cell.borrow(), 4);
	}
}
