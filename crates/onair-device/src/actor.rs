use std::time::Duration;

use onair_core::Color;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::indicator::Indicator;

/// Depth of the actuation queue. Webhook bursts beyond this are dropped with
/// a warning; the upstream sender redelivers at-least-once.
const QUEUE_DEPTH: usize = 16;

/// One colour command, created per webhook delivery and consumed once.
#[derive(Debug, Clone, PartialEq)]
pub enum ActuationTask {
    SetColor {
        color: Color,
    },
    Blink {
        color: Color,
        duration: Duration,
        interval: Duration,
    },
}

// ─── Handle ───────────────────────────────────────────────────────────────

/// Fire-and-forget sender half of the actuation actor.
///
/// `schedule` returns immediately; the task runs on the actor's own tokio
/// task, so HTTP responses never wait on hardware I/O. Execution failures
/// are logged by the actor and swallowed.
#[derive(Clone)]
pub struct ActuationHandle {
    tx: mpsc::Sender<ActuationTask>,
}

impl ActuationHandle {
    pub fn schedule(&self, task: ActuationTask) {
        if let Err(e) = self.tx.try_send(task) {
            tracing::warn!("actuation task dropped: {e}");
        }
    }
}

// ─── Actor ────────────────────────────────────────────────────────────────

/// Spawn the single-owner actuation actor.
///
/// The actor takes exclusive ownership of the indicator and applies tasks
/// in the order scheduled. A task arriving while a blink sequence sleeps
/// preempts it: the blink cancels at the sleep boundary, forces the idle
/// colour, and the new task is applied immediately. When every handle is
/// dropped the actor drains, forces idle, and exits; awaiting the returned
/// join handle at shutdown guarantees the idle write happened before the
/// process leaves.
pub fn spawn(indicator: Indicator) -> (ActuationHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
    let task = tokio::spawn(run(indicator, rx));
    (ActuationHandle { tx }, task)
}

async fn run(indicator: Indicator, mut rx: mpsc::Receiver<ActuationTask>) {
    let mut next = rx.recv().await;
    while let Some(task) = next.take() {
        match apply(&indicator, task, &mut rx).await {
            Ok(preempting) => next = preempting,
            Err(e) => tracing::warn!("actuation failed: {e}"),
        }
        if next.is_none() {
            next = rx.recv().await;
        }
    }
    if let Err(e) = indicator.close().await {
        tracing::warn!("failed to idle indicator at shutdown: {e}");
    }
}

/// Apply one task. Returns the task that preempted a blink, if any.
async fn apply(
    indicator: &Indicator,
    task: ActuationTask,
    rx: &mut mpsc::Receiver<ActuationTask>,
) -> Result<Option<ActuationTask>> {
    match task {
        ActuationTask::SetColor { color } => {
            indicator.set_color(color).await?;
            Ok(None)
        }
        ActuationTask::Blink {
            color,
            duration,
            interval,
        } => blink(indicator, color, duration, interval, rx).await,
    }
}

/// Alternate `color` and idle every `interval` for `ceil(duration / interval)`
/// toggles, ending on idle regardless of parity. Each sleep is a preemption
/// point: a newly scheduled task cancels the remainder of the sequence.
async fn blink(
    indicator: &Indicator,
    color: Color,
    duration: Duration,
    interval: Duration,
    rx: &mut mpsc::Receiver<ActuationTask>,
) -> Result<Option<ActuationTask>> {
    let toggles = (duration.as_secs_f64() / interval.as_secs_f64()).ceil() as u32;
    let mut lit = true;
    for _ in 0..toggles {
        indicator
            .set_color(if lit { color } else { Color::IDLE })
            .await?;
        lit = !lit;
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            preempting = rx.recv() => {
                indicator.set_color(Color::IDLE).await?;
                return Ok(preempting);
            }
        }
    }
    indicator.set_color(Color::IDLE).await?;
    Ok(None)
}

// ─── Tests ────────────────────────────────────────────────────────────────
