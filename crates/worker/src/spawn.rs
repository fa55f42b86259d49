//! Named task spawning.

use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::join_set::panic_message;

/// Returns the ambient tokio handle, or a shared fallback runtime when the
/// caller is not inside one (UI threads, plain `main`).
fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("seek-worker-global")
			.build()
			.expect("failed to build seek-worker global tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns a named async worker task.
pub fn spawn<F>(worker: &'static str, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker, "worker.spawn");
	runtime_handle().spawn(fut)
}

/// Spawns a named task and runs `on_panic` with the panic message if it panics.
///
/// The returned handle resolves once the task has ended and `on_panic` (if
/// any) has run. Aborting it only detaches the watch; the task keeps running.
pub fn spawn_watched<F, P>(worker: &'static str, fut: F, on_panic: P) -> JoinHandle<()>
where
	F: Future<Output = ()> + Send + 'static,
	P: FnOnce(&str) + Send + 'static,
{
	let task = spawn(worker, fut);
	runtime_handle().spawn(async move {
		let Err(err) = task.await else {
			return;
		};
		if let Some(panic) = panic_message(err) {
			tracing::error!(worker, %panic, "worker.panicked");
			on_panic(&panic);
		}
	})
}

/// Spawns blocking work on the runtime's blocking pool.
pub fn spawn_blocking<F, R>(worker: &'static str, f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	tracing::trace!(worker, "worker.spawn_blocking");
	runtime_handle().spawn_blocking(f)
}
