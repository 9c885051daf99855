use actix_web::{web, HttpRequest, HttpResponse};
use tracing::debug;

use super::ForwardDescriptor;
use crate::error::AppError;
use crate::extractors::Identity;
use crate::state::AppState;

/// Route handler shared by every proxied route. `identity` is present
/// only behind `AuthGate`.
pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
    identity: Option<Identity>,
) -> Result<HttpResponse, AppError> {
    let upstream = state.proxy.upstream();
    let descriptor =
        ForwardDescriptor::from_request(&req, body, &upstream.base_url, &upstream.strip_prefix)?;

    if let Some(identity) = &identity {
        debug!(subject_id = %identity.subject_id, target_url = %descriptor.target_url, "forwarding on behalf of");
    }

    state.proxy.dispatch(descriptor).await
}
