//! Reference HTTP server exposing an [`AgentApi`] under `/api`.
//!
//! Every handler answers JSON. Failures become `{"error": message}` with the
//! status matching the error kind, which [`crate::client::HttpBackend`]
//! turns back into the same [`Error`] variant.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{self, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::domain::{AgentApi, DeclinePayload, Error};

pub const API_PREFIX: &str = "/api";

type Reply = Response<Full<Bytes>>;

pub struct Server {
    listener: TcpListener,
    api: Arc<dyn AgentApi>,
}

impl Server {
    pub async fn bind(addr: SocketAddr, api: Arc<dyn AgentApi>) -> Result<Self, Error> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, api })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn run(self) -> Result<(), Error> {
        info!(addr = %self.local_addr()?, "HTTP server listening");

        loop {
            let (stream, remote_addr) = self.listener.accept().await?;
            let io = TokioIo::new(stream);
            let api = Arc::clone(&self.api);

            tokio::spawn(async move {
                let service = service_fn(move |req| handle(Arc::clone(&api), req));
                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    warn!(addr = %remote_addr, error = %err, "Connection error");
                }
            });
        }
    }
}

/// HTTP status for an error kind.
pub fn status_of(error: &Error) -> StatusCode {
    match error {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidTransition(_) => StatusCode::CONFLICT,
        Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn handle(api: Arc<dyn AgentApi>, req: Request<Incoming>) -> Result<Reply, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(method = %method, path = %path, "Incoming request");

    if method == Method::OPTIONS {
        return Ok(reply(StatusCode::NO_CONTENT, Bytes::new()));
    }

    let body = req.into_body().collect().await?.to_bytes();
    let result = match segments(&path) {
        Some(segments) => {
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            route(api.as_ref(), &method, &segments, &body).await
        }
        None => Err(Error::not_found("Route")),
    };

    Ok(match result {
        Ok(value) => reply(StatusCode::OK, Bytes::from(value.to_string())),
        Err(e) => {
            let status = status_of(&e);
            if status.is_server_error() {
                warn!(method = %method, path = %path, error = %e, "request failed");
            } else {
                debug!(method = %method, path = %path, error = %e, "request rejected");
            }
            reply(status, Bytes::from(json!({ "error": e.to_string() }).to_string()))
        }
    })
}

/// Percent-decoded path segments below the API prefix.
fn segments(path: &str) -> Option<Vec<String>> {
    let rest = path.strip_prefix(API_PREFIX)?.trim_matches('/');
    rest.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::decode(s).ok().map(|s| s.into_owned()))
        .collect()
}

fn to_json<T: Serialize>(value: T) -> Result<Value, Error> {
    Ok(serde_json::to_value(value)?)
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Validation(format!("Invalid request body: {e}")))
}

async fn route(
    api: &dyn AgentApi,
    method: &Method,
    segments: &[&str],
    body: &[u8],
) -> Result<Value, Error> {
    match (method, segments) {
        (&Method::GET, ["wallet", "summary"]) => to_json(api.get_wallet_summary().await?),
        (&Method::GET, ["wallet", "health"]) => to_json(api.get_wallet_health().await?),
        (&Method::POST, ["agent", "wallet", "deposit"]) => {
            to_json(api.credit_agent_deposit(parse(body)?).await?)
        }
        (&Method::POST, ["agent", "wallet", "withdraw"]) => {
            to_json(api.request_withdrawal(parse(body)?).await?)
        }
        (&Method::GET, ["ledger"]) => to_json(api.get_ledger().await?),

        (&Method::GET, ["players"]) => to_json(api.get_players().await?),
        (&Method::GET, ["players", id]) => to_json(api.get_player(id).await?),
        (&Method::POST, ["players", id, "suspend"]) => {
            to_json(api.suspend_player(id, parse(body)?).await?)
        }
        (&Method::POST, ["players", id, "reactivate"]) => {
            to_json(api.reactivate_player(id, parse(body)?).await?)
        }
        (&Method::POST, ["players", id, "restrict"]) => {
            to_json(api.restrict_player(id, parse(body)?).await?)
        }
        (&Method::POST, ["players", id, "unrestrict"]) => {
            to_json(api.unrestrict_player(id, parse(body)?).await?)
        }

        (&Method::GET, ["invites"]) => to_json(api.get_invites().await?),
        (&Method::POST, ["invites"]) => to_json(api.create_invite(parse(body)?).await?),
        (&Method::POST, ["invites", id, "resend"]) => to_json(api.resend_invite(id).await?),
        (&Method::GET, ["invitations"]) => to_json(api.get_invitations().await?),
        (&Method::POST, ["invitations"]) => to_json(api.create_invitation(parse(body)?).await?),

        (&Method::GET, ["payouts"]) => to_json(api.get_payouts().await?),
        (&Method::GET, ["payouts", "escalations"]) => {
            to_json(api.get_escalation_tickets().await?)
        }
        (&Method::POST, ["payouts", id, "approve"]) => to_json(api.approve_payout(id).await?),
        (&Method::POST, ["payouts", id, "decline"]) => {
            let payload: DeclinePayload = parse(body)?;
            to_json(api.decline_payout(id, &payload.reason).await?)
        }
        (&Method::POST, ["payouts", id, "escalate"]) => {
            to_json(api.escalate_payout(id, parse(body)?).await?)
        }

        (&Method::GET, ["player-deposits-summary"]) => {
            to_json(api.get_player_deposits_summary().await?)
        }
        (&Method::GET, ["statements"]) => to_json(api.get_statements().await?),
        (&Method::GET, ["statements", id]) => to_json(api.get_statement(id).await?),
        (&Method::GET, ["goals"]) => to_json(api.get_goals().await?),
        (&Method::GET, ["wars"]) => to_json(api.get_wars().await?),
        (&Method::POST, ["wars", id, "register"]) => to_json(api.register_war(id).await?),
        (&Method::GET, ["alerts"]) => to_json(api.get_alerts().await?),
        (&Method::GET, ["dashboard"]) => to_json(api.dashboard().await?),

        _ => Err(Error::not_found("Route")),
    }
}

fn reply(status: StatusCode, body: Bytes) -> Reply {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_decoded_below_prefix() {
        assert_eq!(
            segments("/api/players/pl%201000/suspend").unwrap(),
            vec!["players", "pl 1000", "suspend"]
        );
        assert_eq!(segments("/api/").unwrap(), Vec::<String>::new());
        assert!(segments("/health").is_none());
    }

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(status_of(&Error::not_found("Payout")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(&Error::InvalidTransition("Payout cannot be approved".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(&Error::Validation("Amount must be greater than 0".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(&Error::Storage("disk full".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn replies_carry_cors_headers() {
        let response = reply(StatusCode::NO_CONTENT, Bytes::new());
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
