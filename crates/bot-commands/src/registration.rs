//! Background publication of command lists to channel APIs.

use crate::error::CommandResult;
use crate::types::Definition;
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

/// Channel-provided function that publishes command definitions.
pub type RegisterFn =
    Arc<dyn Fn(CancellationToken, Vec<Definition>) -> BoxFuture<'static, CommandResult> + Send + Sync>;

/// Wrap an async closure as a [`RegisterFn`].
pub fn register_fn<F, Fut>(f: F) -> RegisterFn
where
    F: Fn(CancellationToken, Vec<Definition>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult> + Send + 'static,
{
    Arc::new(move |ctx: CancellationToken, definitions: Vec<Definition>| {
        f(ctx, definitions).boxed()
    })
}

/// Run `register` once on a detached task and return immediately.
///
/// The outcome is logged, never reported back. The task stops when `ctx` is
/// cancelled; the register function is always polled at least once before
/// cancellation is checked. Outside a Tokio runtime nothing is spawned and
/// `None` is returned.
pub fn spawn_registration(
    channel: &str,
    ctx: CancellationToken,
    register: RegisterFn,
    definitions: Vec<Definition>,
) -> Option<JoinHandle<()>> {
    let runtime = match Handle::try_current() {
        Ok(runtime) => runtime,
        Err(e) => {
            warn!(channel = %channel, error = %e, "No runtime, skipping command registration");
            return None;
        }
    };

    let span = tracing::info_span!("command_registration", channel = %channel);
    let count = definitions.len();

    let handle = runtime.spawn(
        async move {
            let attempt = register(ctx.clone(), definitions);
            tokio::select! {
                biased;
                result = attempt => match result {
                    Ok(()) => info!(count, "Registered commands"),
                    Err(e) => warn!(error = %e, "Command registration failed"),
                },
                _ = ctx.cancelled() => debug!("Command registration cancelled"),
            }
        }
        .instrument(span),
    );
    Some(handle)
}
