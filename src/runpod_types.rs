//! `RunPod` data model and tool parameter shapes.
//!
//! Unique responsibility: define typed snapshots of provider records (pods,
//! serverless endpoints) and the per-tool parameter structs published as MCP
//! input schemas.
//!
//! Records are snapshots only: the provider owns every pod and endpoint, and
//! nothing here is cached between invocations. Each tool declares its own
//! parameter struct composing the shared API-key field with tool-specific
//! fields, so schemas are plain types instead of merged shapes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Provider records
// ============================================================================

/// Pod lifecycle status as reported by the provider.
///
/// The provider may introduce new statuses at any time; values outside the
/// known set decode to `Unknown` instead of failing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PodStatus {
    /// Pod is running.
    Active,
    /// Pod has been terminated (deleted, storage released).
    Terminated,
    /// Pod is waiting for resources.
    Pending,
    /// Pod has exited; storage is preserved.
    Exited,
    /// Pod failed to start or crashed.
    Failed,
    /// Pod is in the process of stopping.
    Stopping,
    /// Pod is stopped.
    Stopped,
    /// Status this crate does not know about yet.
    #[serde(other)]
    Unknown,
}

/// Snapshot of a pod as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    /// Pod ID assigned by the provider.
    pub id: String,
    /// Pod display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Number of GPUs attached.
    #[serde(default)]
    pub gpu_count: Option<u32>,
    /// Number of vCPUs attached.
    #[serde(default)]
    pub vcpu_count: Option<u32>,
    /// Memory in GB (the provider reports fractional sizes for some tiers).
    #[serde(default)]
    pub memory_in_gb: Option<f64>,
    /// Desired status reported by the provider.
    #[serde(default)]
    pub desired_status: Option<PodStatus>,
    /// Persistent volume size in GB.
    #[serde(default)]
    pub volume_in_gb: Option<u32>,
    /// Machine backing the pod.
    #[serde(default)]
    pub machine: Option<MachineInfo>,
    /// Hourly cost in USD.
    #[serde(default)]
    pub cost_per_hr: Option<f64>,
}

/// Machine descriptor attached to a pod.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineInfo {
    /// Host identifier for the machine backing the pod.
    #[serde(default)]
    pub pod_host_id: Option<String>,
    /// GPU type installed in the machine.
    #[serde(default)]
    pub gpu_type_id: Option<String>,
}

/// Snapshot of a serverless endpoint as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessEndpoint {
    /// Endpoint ID assigned by the provider.
    pub id: String,
    /// Endpoint display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Provider-reported status string.
    #[serde(default)]
    pub status: Option<String>,
    /// Worker currently serving the endpoint.
    #[serde(default)]
    pub worker_id: Option<String>,
    /// GPU identifiers the endpoint can schedule onto.
    #[serde(default)]
    pub gpu_ids: Option<Vec<String>>,
    /// Locations the endpoint can schedule into.
    #[serde(default)]
    pub locations: Option<Vec<String>>,
}

// ============================================================================
// Tool parameters
// ============================================================================

/// Cloud tier a pod is scheduled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudType {
    /// Secure data-center cloud.
    Secure,
    /// Community (peer-provided) cloud.
    Community,
}

/// Environment variable passed to a pod's container.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnvVar {
    /// Variable name.
    pub key: String,
    /// Variable value.
    pub value: String,
}

/// Arguments for tools that only authenticate (list operations).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyParams {
    /// `RunPod` API key authenticating this single invocation.
    pub api_key: String,
}

/// Arguments for tools addressing a single pod.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodActionParams {
    /// `RunPod` API key authenticating this single invocation.
    pub api_key: String,
    /// ID of the pod to act on.
    pub pod_id: String,
}

/// Arguments for tools addressing a single serverless endpoint.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointParams {
    /// `RunPod` API key authenticating this single invocation.
    pub api_key: String,
    /// ID of the serverless endpoint to inspect.
    pub endpoint_id: String,
}

/// Arguments for `create_pod`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodParams {
    /// `RunPod` API key authenticating this single invocation.
    pub api_key: String,
    /// GPU type to allocate (e.g. "NVIDIA `GeForce` RTX 4090").
    pub gpu_type_id: String,
    /// Container image to run (e.g. "runpod/base:0.4.0").
    pub image_name: String,
    /// Cloud tier to schedule into.
    #[serde(default)]
    pub cloud_type: Option<CloudType>,
    /// Number of GPUs to attach (at least 1).
    #[serde(default = "default_gpu_count")]
    pub gpu_count: u32,
    /// Pod display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Container disk size in GB.
    #[serde(default)]
    pub container_disk_in_gb: Option<u32>,
    /// Persistent volume size in GB.
    #[serde(default)]
    pub volume_in_gb: Option<u32>,
    /// Minimum number of vCPUs.
    #[serde(default)]
    pub min_vcpu_count: Option<u32>,
    /// Minimum memory in GB.
    #[serde(default)]
    pub min_memory_in_gb: Option<u32>,
    /// Environment variables for the container.
    #[serde(default)]
    pub env: Option<Vec<EnvVar>>,
    /// Ports to expose, e.g. "8888/http,22/tcp".
    #[serde(default)]
    pub ports: Option<String>,
}

const fn default_gpu_count() -> u32 {
    1
}

impl CreatePodParams {
    /// Build the JSON body dispatched to the pod-create endpoint.
    ///
    /// The API key never enters the body. `gpuCount` is always present, even
    /// when the caller omitted it and the default of 1 applies.
    #[must_use]
    pub fn to_body(&self) -> CreatePodBody {
        CreatePodBody {
            gpu_type_id: self.gpu_type_id.clone(),
            image_name: self.image_name.clone(),
            gpu_count: self.gpu_count,
            cloud_type: self.cloud_type,
            name: self.name.clone(),
            container_disk_in_gb: self.container_disk_in_gb,
            volume_in_gb: self.volume_in_gb,
            min_vcpu_count: self.min_vcpu_count,
            min_memory_in_gb: self.min_memory_in_gb,
            env: self.env.clone(),
            ports: self.ports.clone(),
        }
    }
}

/// Wire body for `POST /pod`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePodBody {
    /// GPU type to allocate.
    pub gpu_type_id: String,
    /// Container image to run.
    pub image_name: String,
    /// Number of GPUs to attach.
    pub gpu_count: u32,
    /// Cloud tier to schedule into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_type: Option<CloudType>,
    /// Pod display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Container disk size in GB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_disk_in_gb: Option<u32>,
    /// Persistent volume size in GB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_in_gb: Option<u32>,
    /// Minimum number of vCPUs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_vcpu_count: Option<u32>,
    /// Minimum memory in GB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_memory_in_gb: Option<u32>,
    /// Environment variables for the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<Vec<EnvVar>>,
    /// Ports to expose.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn pod_status_decodes_known_values() {
        let status: PodStatus = serde_json::from_value(json!("ACTIVE")).unwrap();
        assert_eq!(status, PodStatus::Active);
        let status: PodStatus = serde_json::from_value(json!("STOPPING")).unwrap();
        assert_eq!(status, PodStatus::Stopping);
    }

    #[test]
    fn pod_status_decodes_future_values_as_unknown() {
        let status: PodStatus = serde_json::from_value(json!("HIBERNATING")).unwrap();
        assert_eq!(status, PodStatus::Unknown);
    }

    #[test]
    fn pod_snapshot_tolerates_missing_optionals() {
        let pod: Pod = serde_json::from_value(json!({ "id": "abc123" })).unwrap();
        assert_eq!(pod.id, "abc123");
        assert!(pod.name.is_none());
        assert!(pod.desired_status.is_none());
    }

    #[test]
    fn pod_snapshot_decodes_full_record() {
        let pod: Pod = serde_json::from_value(json!({
            "id": "abc123",
            "name": "trainer",
            "gpuCount": 2,
            "vcpuCount": 16,
            "memoryInGb": 62.5,
            "desiredStatus": "EXITED",
            "volumeInGb": 40,
            "machine": { "podHostId": "host-9", "gpuTypeId": "NVIDIA A40" },
            "costPerHr": 0.79
        }))
        .unwrap();
        assert_eq!(pod.desired_status, Some(PodStatus::Exited));
        assert_eq!(pod.machine.unwrap().pod_host_id.as_deref(), Some("host-9"));
        assert_eq!(pod.cost_per_hr, Some(0.79));
    }

    #[test]
    fn create_params_require_image_name() {
        let result: Result<CreatePodParams, _> = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn create_params_require_gpu_type() {
        let result: Result<CreatePodParams, _> = serde_json::from_value(json!({
            "apiKey": "k",
            "imageName": "runpod/base:0.4.0"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn create_params_reject_cloud_type_outside_enum() {
        let result: Result<CreatePodParams, _> = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40",
            "imageName": "runpod/base:0.4.0",
            "cloudType": "HYBRID"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn create_params_default_gpu_count_to_one() {
        let params: CreatePodParams = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40",
            "imageName": "runpod/base:0.4.0"
        }))
        .unwrap();
        assert_eq!(params.gpu_count, 1);
    }

    #[test]
    fn create_body_always_carries_gpu_count() {
        let params: CreatePodParams = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40",
            "imageName": "runpod/base:0.4.0"
        }))
        .unwrap();
        let body = serde_json::to_value(params.to_body()).unwrap();
        assert_eq!(body["gpuCount"], 1);
        assert_eq!(body["gpuTypeId"], "NVIDIA A40");
        // The API key authenticates the call; it never enters the body.
        assert!(body.get("apiKey").is_none());
    }

    #[test]
    fn create_body_omits_unset_optionals() {
        let params: CreatePodParams = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40",
            "imageName": "runpod/base:0.4.0"
        }))
        .unwrap();
        let body = serde_json::to_value(params.to_body()).unwrap();
        assert!(body.get("name").is_none());
        assert!(body.get("env").is_none());
        assert!(body.get("ports").is_none());
    }

    #[test]
    fn create_body_serializes_cloud_type_and_env() {
        let params: CreatePodParams = serde_json::from_value(json!({
            "apiKey": "k",
            "gpuTypeId": "NVIDIA A40",
            "imageName": "runpod/base:0.4.0",
            "cloudType": "COMMUNITY",
            "gpuCount": 2,
            "env": [{ "key": "MODE", "value": "train" }],
            "ports": "8888/http,22/tcp"
        }))
        .unwrap();
        let body = serde_json::to_value(params.to_body()).unwrap();
        assert_eq!(body["cloudType"], "COMMUNITY");
        assert_eq!(body["gpuCount"], 2);
        assert_eq!(body["env"][0]["key"], "MODE");
        assert_eq!(body["ports"], "8888/http,22/tcp");
    }

    #[test]
    fn endpoint_snapshot_decodes_lists() {
        let endpoint: ServerlessEndpoint = serde_json::from_value(json!({
            "id": "ep-1",
            "name": "whisper",
            "status": "RUNNING",
            "workerId": "w-7",
            "gpuIds": ["AMPERE_16"],
            "locations": ["EU-RO-1", "US-OR-1"]
        }))
        .unwrap();
        assert_eq!(endpoint.status.as_deref(), Some("RUNNING"));
        assert_eq!(endpoint.locations.unwrap().len(), 2);
    }
}
