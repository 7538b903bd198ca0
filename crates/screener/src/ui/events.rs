use std::sync::Arc;
use std::time::Duration;

use screening_protocol::{HealthResponse, PredictionResult};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::service::{submit_with_timeout, PredictionService, SubmitError};
use crate::session::SubmitTicket;

pub(crate) enum UiEvent {
    Submission {
        attempt: u64,
        outcome: Result<PredictionResult, SubmitError>,
    },
    Health(Result<HealthResponse, SubmitError>),
}

/// Runs network work off the UI loop and reports back through `ui_tx`.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    service: Arc<dyn PredictionService>,
    timeout: Duration,
    ui_tx: mpsc::Sender<UiEvent>,
    cancel: CancellationToken,
}

impl Dispatcher {
    pub(crate) fn new(
        service: Arc<dyn PredictionService>,
        timeout: Duration,
        ui_tx: mpsc::Sender<UiEvent>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            service,
            timeout,
            ui_tx,
            cancel,
        }
    }

    pub(crate) fn spawn_submission(&self, ticket: SubmitTicket) {
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                outcome = submit_with_timeout(this.service.as_ref(), &ticket.request, this.timeout) => outcome,
                _ = this.cancel.cancelled() => {
                    info!(attempt = ticket.attempt, "submission abandoned on shutdown");
                    return;
                }
            };
            let event = UiEvent::Submission {
                attempt: ticket.attempt,
                outcome,
            };
            if this.ui_tx.send(event).await.is_err() {
                warn!(attempt = ticket.attempt, "ui closed before submission finished");
            }
        });
    }

    pub(crate) fn spawn_health_check(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                outcome = this.service.health() => outcome,
                _ = this.cancel.cancelled() => return,
            };
            match &outcome {
                Ok(health) => info!(status = %health.status, model_loaded = health.model_loaded, "health check"),
                Err(err) => warn!(error = %err, "health check failed"),
            }
            let _ = this.ui_tx.send(UiEvent::Health(outcome)).await;
        });
    }
}
