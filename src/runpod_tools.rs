//! MCP tool bindings for the `RunPod` API.
//!
//! Unique responsibility: expose the dispatcher's operations as named,
//! schema-validated MCP tools served over stdio.
//!
//! Every handler follows the same contract:
//! - validate what the schema cannot express (non-empty key, `gpuCount` >= 1)
//!   before any network call,
//! - issue exactly one dispatcher call,
//! - reply with a text payload on success, or an error-flagged text payload
//!   carrying the failure's message. Failures never cross the protocol
//!   boundary as raised faults.
//!
//! Repeated start/stop/terminate calls are forwarded as-is; the provider
//! governs idempotence, this layer performs no deduplication.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::Value;
use tracing::debug;

use crate::runpod_api::{RunpodApi, RunpodApiConfig, RunpodApiError};
use crate::runpod_types::{
    ApiKeyParams, CreatePodParams, EndpointParams, Pod, PodActionParams, ServerlessEndpoint,
};

/// MCP server exposing `RunPod` pod and serverless-endpoint tools.
///
/// Holds only an immutable dispatcher handle; no state is shared between
/// invocations and nothing is cached from the provider.
#[derive(Clone)]
pub struct RunpodMcpServer {
    api: Arc<RunpodApi>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RunpodMcpServer {
    /// Create a server with dispatcher configuration loaded from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self, RunpodApiError> {
        Ok(Self::new(RunpodApi::new(RunpodApiConfig::from_env()?)?))
    }

    /// Create a server around an existing dispatcher.
    #[must_use]
    pub fn new(api: RunpodApi) -> Self {
        Self {
            api: Arc::new(api),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List all RunPod pods owned by the account behind the API key")]
    async fn list_pods(
        &self,
        Parameters(args): Parameters<ApiKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        match self.api.get(&args.api_key, "/pod").await {
            Ok(pods) => {
                if let Ok(parsed) = serde_json::from_value::<Vec<Pod>>(pods.clone()) {
                    debug!(count = parsed.len(), "listed pods");
                }
                Ok(json_result(&pods))
            }
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Create a new RunPod pod with the given GPU type and container image")]
    async fn create_pod(
        &self,
        Parameters(args): Parameters<CreatePodParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        if args.gpu_count == 0 {
            return Ok(validation_error("gpuCount must be at least 1"));
        }
        let body = match serde_json::to_value(args.to_body()) {
            Ok(body) => body,
            Err(e) => {
                return Ok(validation_error(&format!(
                    "could not encode request body: {e}"
                )));
            }
        };
        match self.api.post(&args.api_key, "/pod", Some(&body)).await {
            Ok(created) => match serde_json::from_value::<Pod>(created) {
                Ok(pod) => {
                    debug!(pod_id = %pod.id, "created pod");
                    Ok(text_result(format!(
                        "Pod created successfully with ID: {}",
                        pod.id
                    )))
                }
                Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                    "provider api error: unexpected create response: {e}"
                ))])),
            },
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Get details of a single RunPod pod by ID")]
    async fn get_pod(
        &self,
        Parameters(args): Parameters<PodActionParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        let path = format!("/pod/{}", args.pod_id);
        match self.api.get(&args.api_key, &path).await {
            Ok(pod) => {
                if let Ok(parsed) = serde_json::from_value::<Pod>(pod.clone()) {
                    debug!(pod_id = %parsed.id, status = ?parsed.desired_status, "fetched pod");
                }
                Ok(json_result(&pod))
            }
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Terminate (delete) a RunPod pod; its storage is released")]
    async fn terminate_pod(
        &self,
        Parameters(args): Parameters<PodActionParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        let path = format!("/pod/{}/terminate", args.pod_id);
        match self.api.post(&args.api_key, &path, None).await {
            Ok(_) => Ok(text_result(format!(
                "Pod {} terminated successfully",
                args.pod_id
            ))),
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Start (resume) a stopped RunPod pod")]
    async fn start_pod(
        &self,
        Parameters(args): Parameters<PodActionParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        let path = format!("/pod/{}/start", args.pod_id);
        match self.api.post(&args.api_key, &path, None).await {
            Ok(_) => Ok(text_result(format!(
                "Pod {} started successfully",
                args.pod_id
            ))),
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Stop a running RunPod pod; storage is preserved")]
    async fn stop_pod(
        &self,
        Parameters(args): Parameters<PodActionParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        let path = format!("/pod/{}/stop", args.pod_id);
        match self.api.post(&args.api_key, &path, None).await {
            Ok(_) => Ok(text_result(format!(
                "Pod {} stopped successfully",
                args.pod_id
            ))),
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "List all RunPod serverless endpoints owned by the account")]
    async fn list_endpoints(
        &self,
        Parameters(args): Parameters<ApiKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        match self.api.get(&args.api_key, "/serverless-endpoint").await {
            Ok(endpoints) => {
                if let Ok(parsed) =
                    serde_json::from_value::<Vec<ServerlessEndpoint>>(endpoints.clone())
                {
                    debug!(count = parsed.len(), "listed serverless endpoints");
                }
                Ok(json_result(&endpoints))
            }
            Err(e) => Ok(error_result(&e)),
        }
    }

    #[tool(description = "Get details of a single RunPod serverless endpoint by ID")]
    async fn get_endpoint(
        &self,
        Parameters(args): Parameters<EndpointParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(rejected) = reject_empty_key(&args.api_key) {
            return Ok(rejected);
        }
        let path = format!("/serverless-endpoint/{}", args.endpoint_id);
        match self.api.get(&args.api_key, &path).await {
            Ok(endpoint) => {
                if let Ok(parsed) =
                    serde_json::from_value::<ServerlessEndpoint>(endpoint.clone())
                {
                    debug!(endpoint_id = %parsed.id, status = ?parsed.status, "fetched endpoint");
                }
                Ok(json_result(&endpoint))
            }
            Err(e) => Ok(error_result(&e)),
        }
    }
}

#[tool_handler]
impl ServerHandler for RunpodMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "RunPod MCP server: manage GPU pods (list, create, inspect, start, stop, \
                 terminate) and inspect serverless endpoints. Every tool takes the RunPod API \
                 key of the account to act on."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "runpod-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                website_url: None,
                icons: None,
            },
            ..Default::default()
        }
    }
}

// ============================================================================
// Result helpers
// ============================================================================

fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

fn json_result(value: &Value) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => CallToolResult::error(vec![Content::text(format!("provider api error: {e}"))]),
    }
}

fn error_result(err: &RunpodApiError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}

fn validation_error(message: &str) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("validation error: {message}"))])
}

/// Non-empty key check; the one required-field rule a JSON schema can state
/// but not enforce on content.
fn reject_empty_key(api_key: &str) -> Option<CallToolResult> {
    api_key
        .trim()
        .is_empty()
        .then(|| validation_error("apiKey must not be empty"))
}
