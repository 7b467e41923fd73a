use axum::{extract::FromRequestParts, http::request::Parts};
use common::Actor;

use crate::error::AppError;

pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

/// Caller identity taken from the headers set by the fronting identity proxy.
///
/// Add this as a handler parameter to require an actor. The role is passed
/// through to the audit trail and never checked.
pub struct CallerActor(pub Actor);

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl<S> FromRequestParts<S> for CallerActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header(parts, ACTOR_ID_HEADER).ok_or(AppError::ActorMissing)?;

        let mut actor = Actor::new(id);
        if let Some(role) = header(parts, ACTOR_ROLE_HEADER) {
            actor = actor.with_role(role);
        }
        Ok(CallerActor(actor))
    }
}
