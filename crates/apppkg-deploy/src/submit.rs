use crate::request::{inject_execution_unit_href, load_deployment_request};
use crate::transport::{HttpMethod, RegistryRequest, RegistryResponse, RegistryTransport};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{info, warn};

pub const PROXY_TICKET_VAR: &str = "MAAP_PGT";
pub const PROXY_TICKET_HEADER: &str = "proxy-ticket";

const CONFLICT_STATUS: u16 = 409;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub process_cwl_url: String,
    pub registry_endpoint: String,
    pub template_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployEnvironment {
    pub proxy_ticket: Option<String>,
}

impl DeployEnvironment {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            proxy_ticket: lookup(PROXY_TICKET_VAR).filter(|ticket| !ticket.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated { process_id: String },
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml decode error in `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("environment variable `MAAP_PGT` is not set")]
    MissingProxyTicket,
    #[error("registry request failed: {0}")]
    Transport(String),
    #[error("registry rejected process with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("registry conflict response has no `additionalProperties.processID`: {0}")]
    MissingProcessId(String),
    #[error("update of existing process `{process_id}` failed with HTTP {status}: {body}")]
    UpdateRejected {
        process_id: String,
        status: u16,
        body: String,
    },
}

/// Loads the request template, points it at the process CWL and submits it.
pub fn deploy_app_pack(
    request: &DeployRequest,
    environment: &DeployEnvironment,
    transport: &dyn RegistryTransport,
) -> Result<SubmitOutcome, DeployError> {
    let mut body = load_deployment_request(&request.template_path)?;
    if !inject_execution_unit_href(&mut body, request.process_cwl_url.as_str()) {
        warn!(
            template = %request.template_path.display(),
            "deployment template has no executionUnit.href to fill"
        );
    }

    let proxy_ticket = environment
        .proxy_ticket
        .as_deref()
        .ok_or(DeployError::MissingProxyTicket)?;

    submit_process(transport, request.registry_endpoint.as_str(), &body, proxy_ticket)
}

/// POSTs the process; on 409 updates the existing one with a single PUT to
/// `<endpoint>/<processID>`.
pub fn submit_process(
    transport: &dyn RegistryTransport,
    endpoint: &str,
    body: &Value,
    proxy_ticket: &str,
) -> Result<SubmitOutcome, DeployError> {
    let payload = serde_json::to_string(body)?;

    let response = send(transport, HttpMethod::Post, endpoint, &payload, proxy_ticket)?;
    if response.is_success() {
        return Ok(SubmitOutcome::Created);
    }
    if response.status != CONFLICT_STATUS {
        return Err(DeployError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }

    let process_id = conflict_process_id(response.body.as_str())?;
    let url = format!("{endpoint}/{process_id}");
    info!(%url, "process already exists, submitting PUT to modify it");

    let update = send(transport, HttpMethod::Put, url.as_str(), &payload, proxy_ticket)?;
    if update.is_success() {
        Ok(SubmitOutcome::Updated { process_id })
    } else {
        Err(DeployError::UpdateRejected {
            process_id,
            status: update.status,
            body: update.body,
        })
    }
}

fn send(
    transport: &dyn RegistryTransport,
    method: HttpMethod,
    url: &str,
    payload: &str,
    proxy_ticket: &str,
) -> Result<RegistryResponse, DeployError> {
    let response = transport
        .send(RegistryRequest {
            method,
            url: url.to_string(),
            headers: vec![
                (PROXY_TICKET_HEADER.to_string(), proxy_ticket.to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: payload.to_string(),
        })
        .map_err(DeployError::Transport)?;
    info!(%method, %url, status = response.status, body = %response.body, "registry response");
    Ok(response)
}

fn conflict_process_id(body: &str) -> Result<String, DeployError> {
    let parsed: Value =
        serde_json::from_str(body).map_err(|_| DeployError::MissingProcessId(body.to_string()))?;
    if let Some(detail) = parsed.get("detail").and_then(Value::as_str) {
        info!(detail, "registry conflict");
    }
    match parsed.pointer("/additionalProperties/processID") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(DeployError::MissingProcessId(body.to_string())),
    }
}

#[cfg(test)]
#[path = "submit_test.rs"]
mod tests;
