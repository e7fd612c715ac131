//! The shared consumer poll loop: one message in flight at a time, fixed
//! inter-poll delay, runs until a shutdown signal.

use tokio::time::{Duration, interval};
use tracing::{debug, error, info};

use crate::entity::outreach_log::OutreachStatus;
use crate::outreach::{DispatchOutcome, Dispatcher};
use crate::queue::OutreachQueue;

/// Poll the channel until ctrl-c / SIGTERM.
///
/// Every failure mode inside a poll is logged and swallowed here; the loop
/// only exits on shutdown.
pub async fn run_consumer<D: Dispatcher>(
    queue: &OutreachQueue,
    channel_name: &str,
    dispatcher: &D,
    poll_interval: Duration,
) {
    let mut ticker = interval(poll_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                poll_once(queue, channel_name, dispatcher).await;
            }
            _ = shutdown_signal() => {
                info!(channel = %channel_name, "Shutdown signal received, stopping consumer");
                break;
            }
        }
    }
}

/// One poll iteration: dequeue, filter on the initiation marker, dispatch,
/// log the outcome. This is the single place that owns dispatch
/// observability.
pub async fn poll_once<D: Dispatcher>(queue: &OutreachQueue, channel_name: &str, dispatcher: &D) {
    let signal = match queue.dequeue(channel_name).await {
        Ok(Some(signal)) => signal,
        Ok(None) => {
            debug!(channel = %channel_name, "No messages in the queue");
            return;
        }
        Err(e) => {
            error!(
                name = "outreach.consumer.dequeue_failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                channel = %channel_name,
                error = %e,
                message = "Failed to fetch from queue"
            );
            return;
        }
    };

    if signal.status != OutreachStatus::Initiated.as_str() {
        info!(
            channel = %channel_name,
            outreach_id = signal.outreach_id,
            status = %signal.status,
            "Ignoring signal without initiation marker"
        );
        return;
    }

    match dispatcher.dispatch(signal.outreach_id).await {
        Ok(DispatchOutcome::Delivered { outreach_id }) => {
            info!(channel = %channel_name, outreach_id, "Outreach dispatched");
        }
        Ok(DispatchOutcome::RecordMissing { outreach_id }) => {
            error!(
                name = "outreach.consumer.record_missing",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                channel = %channel_name,
                outreach_id,
                message = "No outreach record for queued id"
            );
        }
        Ok(DispatchOutcome::ChannelMismatch {
            outreach_id,
            expected,
            actual,
        }) => {
            info!(
                channel = %channel_name,
                outreach_id,
                ?expected,
                ?actual,
                "Skipping record for a different channel"
            );
        }
        Ok(DispatchOutcome::LinkMissing { outreach_id, what }) => {
            error!(
                name = "outreach.consumer.link_missing",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                channel = %channel_name,
                outreach_id,
                what,
                message = "Join target missing, dispatch aborted"
            );
        }
        Ok(DispatchOutcome::Failed {
            outreach_id,
            reason,
        }) => {
            error!(
                name = "outreach.consumer.delivery_failed",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                channel = %channel_name,
                outreach_id,
                reason = %reason,
                message = "External delivery failed"
            );
        }
        Err(e) => {
            error!(
                name = "outreach.consumer.dispatch_error",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                channel = %channel_name,
                outreach_id = signal.outreach_id,
                error = %e,
                message = "Dispatch attempt errored"
            );
        }
    }
}

/// Resolves on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    use tokio::signal;
    let ctrl_c = signal::ctrl_c();
    #[cfg(unix)]
    let mut term_signal = signal::unix::signal(signal::unix::SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");
    #[cfg(unix)]
    let terminate = term_signal.recv();
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
