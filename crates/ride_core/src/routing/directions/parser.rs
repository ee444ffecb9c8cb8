use super::error::DirectionsError;
use super::response::{DirectionsResponse, DirectionsRoute};
use super::STATUS_OK;
use crate::routing::RouteError;

/// Decode a raw JSON body from the provider.
pub fn parse_response(body: &str) -> Result<DirectionsResponse, DirectionsError> {
    Ok(serde_json::from_str(body)?)
}

/// The route to plan with: the first one, provided the status is OK and it
/// has at least one leg.
pub(crate) fn primary_route(resp: &DirectionsResponse) -> Result<&DirectionsRoute, RouteError> {
    let no_route = || RouteError::NoRouteFound {
        status: resp.status.clone(),
    };

    if resp.status != STATUS_OK {
        return Err(no_route());
    }

    let route = resp.routes.first().ok_or_else(no_route)?;
    if route.legs.is_empty() {
        return Err(no_route());
    }
    Ok(route)
}
