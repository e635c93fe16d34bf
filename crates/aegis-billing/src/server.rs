//! Local checkout-session HTTP endpoint.
//!
//! A single-route `tiny_http` server. `tiny_http::recv()` blocks, so the
//! accept loop runs in `spawn_blocking` and re-enters the runtime with
//! `Handle::block_on` for the async checkout flow. Every response carries
//! permissive CORS headers and OPTIONS preflight gets a bare 204.

use std::io::Read;
use std::sync::Arc;

use aegis_db::service::AegisService;

use crate::checkout::{CheckoutFlow, CheckoutRequest};
use crate::error::BillingError;
use crate::stripe::StripeApi;

const ROUTE: &str = "/create-checkout-session";

/// Status code and JSON body for one handled request.
#[derive(Debug, PartialEq, Eq)]
pub struct Handled {
    pub status: u16,
    pub body: String,
}

fn json_error(status: u16, message: &str) -> Handled {
    Handled {
        status,
        body: serde_json::json!({ "error": message }).to_string(),
    }
}

/// Route and execute one request. Split from the accept loop so it can be
/// tested without a live socket.
pub async fn handle_request<S: StripeApi>(
    service: &AegisService,
    stripe: &S,
    method: &str,
    path: &str,
    body: &str,
) -> Handled {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return Handled {
            status: 204,
            body: String::new(),
        };
    }
    if path != ROUTE {
        return json_error(404, "not found");
    }
    if !method.eq_ignore_ascii_case("POST") {
        return json_error(405, "method not allowed");
    }

    let request: CheckoutRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => return json_error(400, &format!("invalid request body: {e}")),
    };

    let flow = CheckoutFlow::new(service, stripe);
    match flow.create_session(&request).await {
        Ok(response) => match serde_json::to_string(&response) {
            Ok(body) => Handled { status: 200, body },
            Err(e) => json_error(500, &format!("serialization: {e}")),
        },
        Err(e) if e.is_client_fault() => json_error(400, &e.to_string()),
        Err(e) => {
            tracing::error!(error = %e, "checkout flow failed");
            json_error(500, &e.to_string())
        }
    }
}

fn cors_headers() -> Vec<tiny_http::Header> {
    // Static header bytes cannot fail to parse.
    vec![
        tiny_http::Header::from_bytes("Access-Control-Allow-Origin", "*").unwrap(),
        tiny_http::Header::from_bytes(
            "Access-Control-Allow-Headers",
            "authorization, content-type",
        )
        .unwrap(),
        tiny_http::Header::from_bytes("Access-Control-Allow-Methods", "POST, OPTIONS").unwrap(),
        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
    ]
}

/// Serve the checkout endpoint until the process is stopped.
///
/// # Errors
///
/// Returns `BillingError` if the server cannot bind or the accept loop
/// fails.
pub async fn serve<S: StripeApi + Send + Sync + 'static>(
    bind: &str,
    service: Arc<AegisService>,
    stripe: Arc<S>,
) -> Result<(), BillingError> {
    let server = tiny_http::Server::http(bind)
        .map_err(|e| BillingError::Other(anyhow::anyhow!("failed to bind {bind}: {e}")))?;
    tracing::info!(%bind, "checkout endpoint listening");

    let handle = tokio::runtime::Handle::current();
    let accept_loop: tokio::task::JoinHandle<()> = tokio::task::spawn_blocking(move || {
        loop {
            let mut request = match server.recv() {
                Ok(req) => req,
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    continue;
                }
            };

            let method = request.method().to_string();
            let path = request.url().split('?').next().unwrap_or("").to_string();
            let mut body = String::new();
            if let Err(e) = request.as_reader().read_to_string(&mut body) {
                tracing::warn!(error = %e, "failed to read request body");
            }

            let handled =
                handle.block_on(handle_request(&service, &*stripe, &method, &path, &body));

            let mut response =
                tiny_http::Response::from_string(handled.body).with_status_code(handled.status);
            for header in cors_headers() {
                response.add_header(header);
            }
            if let Err(e) = request.respond(response) {
                tracing::warn!(error = %e, "failed to write response");
            }
        }
    });
    accept_loop
        .await
        .map_err(|e| BillingError::Other(anyhow::anyhow!("server task: {e}")))?;
    Ok(())
}
