//! Cancellation scope for requests owned by one mounted view.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable};

use super::error::ApiError;

/// Tracks in-flight requests so a view can abort all of them on teardown.
///
/// Cloning shares the scope. After [`RequestScope::cancel_all`] every pending
/// and every future request resolves to [`ApiError::Cancelled`].
#[derive(Clone, Debug, Default)]
pub struct RequestScope {
	inner: Arc<ScopeInner>,
}

#[derive(Debug, Default)]
struct ScopeInner {
	cancelled: AtomicBool,
	next_id: AtomicU64,
	handles: Mutex<HashMap<u64, AbortHandle>>,
}

impl RequestScope {
	pub fn new() -> Self {
		Self::default()
	}

	/// Wrap a request future so it can be aborted by this scope.
	pub fn run<T, F>(&self, request: F) -> impl Future<Output = Result<T, ApiError>> + use<T, F>
	where
		F: Future<Output = Result<T, ApiError>>,
	{
		let (handle, registration) = AbortHandle::new_pair();
		let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
		if self.is_cancelled() {
			handle.abort();
		} else if let Ok(mut handles) = self.inner.handles.lock() {
			handles.insert(id, handle);
		}

		let inner = self.inner.clone();
		let request = Abortable::new(request, registration);
		async move {
			let outcome = request.await;
			if let Ok(mut handles) = inner.handles.lock() {
				handles.remove(&id);
			}
			match outcome {
				Ok(result) => result,
				Err(_) => Err(ApiError::Cancelled),
			}
		}
	}

	/// Abort every outstanding request and refuse new ones.
	pub fn cancel_all(&self) {
		self.inner.cancelled.store(true, Ordering::Relaxed);
		if let Ok(mut handles) = self.inner.handles.lock() {
			for (_, handle) in handles.drain() {
				handle.abort();
			}
		}
	}

	pub fn is_cancelled(&self) -> bool {
		self.inner.cancelled.load(Ordering::Relaxed)
	}

	pub fn in_flight(&self) -> usize {
		self.inner.handles.lock().map(|h| h.len()).unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::channel::oneshot;
	use futures::executor::block_on;

	#[test]
	fn completed_request_passes_through() {
		let scope = RequestScope::new();
		let result = block_on(scope.run(async { Ok::<_, ApiError>(7) }));
		assert_eq!(result, Ok(7));
		assert_eq!(scope.in_flight(), 0);
	}

	#[test]
	fn cancel_aborts_pending_request() {
		let scope = RequestScope::new();
		let (tx, rx) = oneshot::channel::<u32>();
		let pending = scope.run(async move { rx.await.map_err(|_| ApiError::Cancelled) });
		assert_eq!(scope.in_flight(), 1);

		scope.cancel_all();
		let _ = tx.send(1);
		assert_eq!(block_on(pending), Err(ApiError::Cancelled));
		assert_eq!(scope.in_flight(), 0);
	}

	#[test]
	fn requests_after_cancel_never_run() {
		let scope = RequestScope::new();
		scope.cancel_all();
		let result = block_on(scope.run(async { Ok::<_, ApiError>("late") }));
		assert_eq!(result, Err(ApiError::Cancelled));
	}
}
