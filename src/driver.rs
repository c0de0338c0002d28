// THEORY:
// The `driver` wraps a `ModelPipeline` in a single tokio actor task so that
// interactive embedders get the serial, debounced recomputation model the
// converter is designed around. Inputs arrive as messages; the actor applies
// them immediately but defers the (comparatively expensive) recomputation
// until the input signal has been quiet for a fixed short delay. A new event
// during the wait restarts the wait instead of queuing a second run, so a
// burst of slider movements collapses into one recomputation.
//
// Key architectural principles:
// 1.  **Exclusive Ownership**: The pipeline lives inside the actor task and
//     is never shared. All mutation is serialized by the message channel, so
//     no run can observe another run's partial state.
// 2.  **Quiescence, Not Cancellation**: Runs are not interruptible; they are
//     cheap enough to finish before the next trigger. The only concession to
//     burstiness is the debounce window in front of the run.
// 3.  **Snapshot Queries**: A snapshot forces any pending recomputation
//     first, so callers always observe documents that match the inputs they
//     last submitted.

use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::error::PipelineError;
use crate::pipeline::{DocumentSet, ModelPipeline, PipelineConfig};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

/// How long the input signal must stay quiet before a recomputation runs.
pub const QUIESCENCE_DELAY: Duration = Duration::from_millis(100);

const CHANNEL_CAPACITY: usize = 32;

/// One user-facing input change.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Image(PixelBuffer),
    Tolerance(i64),
    ModelName(String),
    CaseLabel(String),
    FallbackModel(String),
    Display(Value),
}

/// Message type for the pipeline actor.
enum DriverMessage {
    Input(InputEvent),
    Snapshot(oneshot::Sender<Result<DocumentSet, PipelineError>>),
    Shutdown,
}

/// Handle to the pipeline actor. Cheap to clone; all clones talk to the same
/// pipeline.
#[derive(Clone)]
pub struct PipelineDriver {
    sender: mpsc::Sender<DriverMessage>,
}

impl PipelineDriver {
    /// Spawns the actor task and returns its handle. Must be called from
    /// within a tokio runtime.
    pub fn spawn(config: PipelineConfig) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(run_actor(config, receiver));
        Self { sender }
    }

    /// Submits an input change. The recomputation happens after the
    /// quiescence delay, or eagerly on the next snapshot.
    pub async fn submit(&self, event: InputEvent) -> Result<(), PipelineError> {
        self.sender
            .send(DriverMessage::Input(event))
            .await
            .map_err(|_| PipelineError::DriverStopped)
    }

    /// Returns both documents plus the packed palette for the latest
    /// submitted inputs, forcing any pending recomputation first.
    pub async fn snapshot(&self) -> Result<DocumentSet, PipelineError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(DriverMessage::Snapshot(reply))
            .await
            .map_err(|_| PipelineError::DriverStopped)?;
        response.await.map_err(|_| PipelineError::DriverStopped)?
    }

    /// Stops the actor. Subsequent submits and snapshots fail with
    /// `DriverStopped`.
    pub async fn shutdown(&self) {
        let _ = self.sender.send(DriverMessage::Shutdown).await;
    }
}

async fn run_actor(config: PipelineConfig, mut receiver: mpsc::Receiver<DriverMessage>) {
    let mut pipeline = ModelPipeline::new(config);
    let mut dirty = false;

    loop {
        let message = if dirty {
            match timeout(QUIESCENCE_DELAY, receiver.recv()).await {
                Ok(message) => message,
                Err(_) => {
                    // The input signal has been quiet long enough; run now.
                    pipeline.process();
                    dirty = false;
                    continue;
                }
            }
        } else {
            receiver.recv().await
        };

        match message {
            Some(DriverMessage::Input(event)) => {
                apply_event(&mut pipeline, event);
                dirty = true;
            }
            Some(DriverMessage::Snapshot(reply)) => {
                if dirty {
                    pipeline.process();
                    dirty = false;
                }
                let _ = reply.send(pipeline.documents());
            }
            Some(DriverMessage::Shutdown) | None => break,
        }
    }
}

fn apply_event(pipeline: &mut ModelPipeline, event: InputEvent) {
    match event {
        InputEvent::Image(buffer) => pipeline.set_image(buffer),
        InputEvent::Tolerance(raw) => pipeline.set_tolerance(raw),
        InputEvent::ModelName(name) => pipeline.set_model_name(name),
        InputEvent::CaseLabel(label) => pipeline.set_case_label(label),
        InputEvent::FallbackModel(reference) => pipeline.set_fallback_model(reference),
        InputEvent::Display(display) => pipeline.set_display(display),
    }
}
