//! HTTP server assembly and startup.
//!
//! Builds the router over the loaded documents and serves it. Routes can be
//! mounted under an optional prefix.

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tracing::{event, Level};

const DEFAULT_HTTP_PORT: u16 = 3000;

/// Errors that can occur during server startup.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),
    #[error("Missing required builder attribute: {}", _0)]
    MissingRequiredAttribute(String),
}

/// The assembled HTTP server.
#[derive(Debug)]
pub struct Server {
    state: AppState,
    port: u16,
    routes_prefix: Option<String>,
}

impl Server {
    /// Builds the router with all service routes.
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/{document_id}/@submit-form", post(crate::submit::submit_form))
            .route("/{document_id}/@form-data", get(crate::form_data::form_data))
            .route(
                "/{document_id}/@form-data-export",
                get(crate::export::form_data_export),
            )
            .with_state(self.state.clone());

        match &self.routes_prefix {
            Some(prefix) => Router::new().nest(prefix, routes),
            None => routes,
        }
    }

    /// Binds the listener and serves until shutdown.
    pub async fn start(self) -> Result<(), Error> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", self.port)).await?;
        event!(Level::INFO, "Starting HTTP server on port {}", self.port);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Error::IO)
    }
}

/// Builder for the HTTP server.
#[derive(Debug, Default)]
pub struct ServerBuilder {
    state: Option<AppState>,
    port: Option<u16>,
    routes_prefix: Option<String>,
}

impl ServerBuilder {
    pub fn new() -> ServerBuilder {
        ServerBuilder {
            ..Default::default()
        }
    }

    pub fn state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn routes_prefix(mut self, prefix: Option<String>) -> Self {
        self.routes_prefix = prefix.map(|p| {
            if p.starts_with('/') {
                p
            } else {
                format!("/{p}")
            }
        });
        self
    }

    pub fn build(self) -> Result<Server, Error> {
        Ok(Server {
            state: self
                .state
                .ok_or_else(|| Error::MissingRequiredAttribute("state".to_string()))?,
            port: self.port.unwrap_or(DEFAULT_HTTP_PORT),
            routes_prefix: self.routes_prefix,
        })
    }
}
