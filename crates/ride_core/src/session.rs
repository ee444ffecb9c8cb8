//! Route lookup session: one directions request in flight per ride draft.
//!
//! Each [`RouteLookup::request`] issues a new [`RequestToken`] and supersedes
//! whatever was in flight. The blocking provider call runs on the tokio
//! blocking pool; its result is published on a watch channel only while its
//! token is still the pending one, so a slow earlier answer can never
//! overwrite a newer route.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::routing::{DirectionsProvider, PlaceInput, RouteError, RouteEstimate, RouteEstimator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Pending(RequestToken),
    Ready(RequestToken, RouteEstimate),
    Failed(RequestToken, RouteError),
}

impl LookupState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LookupState::Pending(_))
    }

    pub fn token(&self) -> Option<RequestToken> {
        match self {
            LookupState::Idle => None,
            LookupState::Pending(token)
            | LookupState::Ready(token, _)
            | LookupState::Failed(token, _) => Some(*token),
        }
    }

    /// Settled outcome, if any.
    pub fn outcome(&self) -> Option<Result<RouteEstimate, RouteError>> {
        match self {
            LookupState::Ready(_, estimate) => Some(Ok(estimate.clone())),
            LookupState::Failed(_, err) => Some(Err(err.clone())),
            LookupState::Idle | LookupState::Pending(_) => None,
        }
    }
}

pub struct RouteLookup {
    provider: Arc<dyn DirectionsProvider>,
    estimator: RouteEstimator,
    runtime: Handle,
    next_token: u64,
    state: Arc<watch::Sender<LookupState>>,
    in_flight: Option<JoinHandle<()>>,
}

impl RouteLookup {
    pub fn new(
        provider: Arc<dyn DirectionsProvider>,
        estimator: RouteEstimator,
        runtime: Handle,
    ) -> Self {
        let (state, _) = watch::channel(LookupState::Idle);
        Self {
            provider,
            estimator,
            runtime,
            next_token: 1,
            state: Arc::new(state),
            in_flight: None,
        }
    }

    /// Start a lookup for `start` → `end`, superseding any pending one.
    pub fn request(&mut self, start: PlaceInput, end: PlaceInput) -> RequestToken {
        let token = RequestToken(self.next_token);
        self.next_token += 1;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        self.state.send_replace(LookupState::Pending(token));
        debug!(token = token.0, origin = %start.point, destination = %end.point, "directions lookup started");

        let provider = Arc::clone(&self.provider);
        let estimator = self.estimator;
        let state = Arc::clone(&self.state);
        let handle = self.runtime.spawn_blocking(move || {
            let outcome = provider
                .directions(start.point, end.point)
                .map_err(RouteError::from)
                .and_then(|response| estimator.summarize(&response, &start, &end));
            publish(&state, token, outcome);
        });
        self.in_flight = Some(handle);
        token
    }

    /// Drop the pending lookup, if any, and return to `Idle`.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        let previous = self.state.send_replace(LookupState::Idle);
        if let Some(token) = previous.token() {
            debug!(token = token.0, "directions lookup cancelled");
        }
    }

    pub fn current(&self) -> LookupState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LookupState> {
        self.state.subscribe()
    }

    /// Wait until no lookup is pending and return the state at that point.
    pub async fn wait_settled(&self) -> LookupState {
        let mut rx = self.state.subscribe();
        let settled = match rx.wait_for(|state| !state.is_pending()).await {
            Ok(state) => state.clone(),
            Err(_) => LookupState::Idle,
        };
        settled
    }

    /// Like [`wait_settled`](Self::wait_settled), but a lookup that ended
    /// without a result (cancelled, or never started) is `RouteError::Cancelled`.
    pub async fn wait_outcome(&self) -> Result<RouteEstimate, RouteError> {
        self.wait_settled()
            .await
            .outcome()
            .unwrap_or(Err(RouteError::Cancelled))
    }
}

impl Drop for RouteLookup {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

fn publish(
    state: &watch::Sender<LookupState>,
    token: RequestToken,
    outcome: Result<RouteEstimate, RouteError>,
) {
    let accepted = state.send_if_modified(|current| {
        if !matches!(current, LookupState::Pending(pending) if *pending == token) {
            return false;
        }
        *current = match &outcome {
            Ok(estimate) => LookupState::Ready(token, estimate.clone()),
            Err(err) => LookupState::Failed(token, err.clone()),
        };
        true
    });

    match (&outcome, accepted) {
        (_, false) => debug!(token = token.0, "discarding superseded directions result"),
        (Ok(_), true) => debug!(token = token.0, "directions lookup completed"),
        (Err(err), true) => warn!(token = token.0, error = %err, "directions lookup failed"),
    }
}
