//! `RunPod` MCP server library.
//!
//! Exposes the `RunPod` REST API as Model Context Protocol tools:
//! - **Pods**: list, create, inspect, start, stop, terminate
//! - **Serverless endpoints**: list, inspect
//!
//! The server holds no state: every tool invocation carries its own API key,
//! issues exactly one HTTP request against the provider, and returns either a
//! textual payload or an error-flagged textual payload.
//!
//! ## Quick Start
//!
//! Serve the tools over stdio (the transport MCP clients spawn):
//!
//! ```ignore
//! use rmcp::{ServiceExt, transport::stdio};
//! use runpod_mcp::RunpodMcpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let server = RunpodMcpServer::from_env()?;
//!     let service = server.serve(stdio()).await?;
//!     service.waiting().await?;
//!     Ok(())
//! }
//! ```
//!
//! Optional environment overrides (a local `.env` is honored):
//!
//! ```text
//! RUNPOD_REST_URL=https://rest.runpod.io/v1
//! RUNPOD_HTTP_TIMEOUT_MS=30000
//! RUNPOD_USER_AGENT=runpod-mcp/0.1.0
//! ```

// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy for strict discipline
#![deny(clippy::all)]                 // All standard Clippy lints
#![deny(clippy::unwrap_used)]         // unwrap() is forbidden
#![deny(clippy::expect_used)]         // expect() is forbidden
#![deny(clippy::panic)]               // panic!() is forbidden
#![deny(clippy::print_stdout)]        // println!() would corrupt the stdio transport
#![deny(clippy::todo)]                // TODO is forbidden
#![deny(clippy::unimplemented)]       // unimplemented!() is forbidden
#![deny(clippy::unwrap_in_result)]    // unwrap() in Result is forbidden
#![deny(clippy::module_inception)]    // Module with same name as crate is forbidden
#![deny(clippy::redundant_clone)]     // Useless clones are forbidden

// ============================================================================
// Modules
// ============================================================================

/// REST dispatcher: the sole HTTP contact point with the provider.
///
/// Use this module to issue raw, single-attempt calls against the API.
pub mod runpod_api;

/// MCP tool bindings served over stdio.
///
/// Use this module to expose pod and endpoint management to MCP clients.
pub mod runpod_tools;

/// Provider record snapshots and tool parameter shapes.
///
/// Use this module for the typed data model shared by dispatcher and tools.
pub mod runpod_types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use runpod_api::{RunpodApi, RunpodApiConfig, RunpodApiError};
pub use runpod_tools::RunpodMcpServer;
pub use runpod_types::{
    ApiKeyParams, CloudType, CreatePodBody, CreatePodParams, EndpointParams, EnvVar, MachineInfo,
    Pod, PodActionParams, PodStatus, ServerlessEndpoint,
};
