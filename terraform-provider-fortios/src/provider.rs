//! Terraform Provider Implementation
//!
//! Implements the Terraform Plugin Protocol for FortiOS.

use crate::resources::{all_data_sources, all_resources, DataSourceDef, ResourceDef, ResourceState};
use crate::schema::{
    Diagnostic, ProviderSchema, RpcRequest, RpcResponse, SchemaAttribute, SchemaBlock,
};
use fortios_client::FortiClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::runtime::Runtime;

/// Provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub hostname: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub insecure: Option<bool>,
    pub vdom: Option<String>,
}

/// FortiOS Terraform Provider
pub struct FortiosProvider {
    config: Arc<RwLock<Option<ProviderConfig>>>,
    client: Arc<RwLock<Option<FortiClient>>>,
    device_version: Arc<RwLock<Option<String>>>,
    resources: HashMap<&'static str, &'static ResourceDef>,
    data_sources: HashMap<&'static str, DataSourceDef>,
    runtime: Runtime,
}

impl FortiosProvider {
    /// Create a new provider
    pub fn new() -> Self {
        let resources: HashMap<&'static str, &'static ResourceDef> = all_resources()
            .into_iter()
            .map(|def| (def.type_name, def))
            .collect();
        let data_sources: HashMap<&'static str, DataSourceDef> = all_data_sources()
            .into_iter()
            .map(|ds| (ds.type_name(), ds))
            .collect();

        let runtime = Runtime::new().expect("Failed to create Tokio runtime");

        Self {
            config: Arc::new(RwLock::new(None)),
            client: Arc::new(RwLock::new(None)),
            device_version: Arc::new(RwLock::new(None)),
            resources,
            data_sources,
            runtime,
        }
    }

    /// Get provider schema
    fn get_schema(&self) -> ProviderSchema {
        let provider_block = SchemaBlock::new()
            .with_attribute(
                "hostname",
                SchemaAttribute::string()
                    .with_description("FortiGate address (e.g. 192.0.2.1 or https://fw.example.com)")
                    .required(),
            )
            .with_attribute(
                "token",
                SchemaAttribute::string()
                    .with_description("REST API access token")
                    .optional()
                    .sensitive(),
            )
            .with_attribute(
                "username",
                SchemaAttribute::string()
                    .with_description("Administrator name for session authentication")
                    .optional(),
            )
            .with_attribute(
                "password",
                SchemaAttribute::string()
                    .with_description("Administrator password")
                    .optional()
                    .sensitive(),
            )
            .with_attribute(
                "insecure",
                SchemaAttribute::bool()
                    .with_description("Skip TLS verification")
                    .optional()
                    .with_default(serde_json::json!(false)),
            )
            .with_attribute(
                "vdom",
                SchemaAttribute::string()
                    .with_description("Default virtual domain for all objects")
                    .optional(),
            )
            .with_description("FortiOS configuration provider");

        let mut schema = ProviderSchema::new(provider_block);

        for (name, def) in &self.resources {
            schema = schema.with_resource(name, def.schema());
        }
        for (name, ds) in &self.data_sources {
            schema = schema.with_data_source(name, ds.schema());
        }

        schema
    }

    /// Configure the provider
    fn configure(&self, config: ProviderConfig) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        let Some(hostname) = config.hostname.clone() else {
            diagnostics.push(Diagnostic::error("hostname is required"));
            return diagnostics;
        };
        let endpoint = if hostname.starts_with("http://") || hostname.starts_with("https://") {
            hostname
        } else {
            format!("https://{hostname}")
        };

        let mut client =
            FortiClient::new(&endpoint).with_insecure(config.insecure.unwrap_or(false));

        if let Some(token) = &config.token {
            client = client.with_token(token);
        } else if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let result = self
                .runtime
                .block_on(async { client.login(username, password).await });
            if let Err(e) = result {
                diagnostics.push(Diagnostic::error(&format!("Authentication failed: {}", e)));
                return diagnostics;
            }
        } else {
            diagnostics.push(Diagnostic::error(
                "Either token or username/password must be provided",
            ));
            return diagnostics;
        }

        // Connectivity probe doubling as firmware detection; some field
        // behavior is version-conditional on the device side.
        match self
            .runtime
            .block_on(async { client.update_device_version().await })
        {
            Ok(version) => {
                tracing::debug!(version = %version, "detected device firmware");
                *self.device_version.write().unwrap() = Some(version);
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(&format!(
                    "Failed to probe device version: {}",
                    e
                )));
                return diagnostics;
            }
        }

        *self.config.write().unwrap() = Some(config);
        *self.client.write().unwrap() = Some(client);

        diagnostics
    }

    /// Get the configured client
    fn get_client(&self) -> Result<FortiClient, Diagnostic> {
        self.client
            .read()
            .unwrap()
            .clone()
            .ok_or_else(|| Diagnostic::error("Provider not configured"))
    }

    /// Firmware version detected when the provider was configured.
    pub fn device_version(&self) -> Option<String> {
        self.device_version.read().unwrap().clone()
    }

    fn default_vdom(&self) -> Option<String> {
        self.config
            .read()
            .unwrap()
            .as_ref()
            .and_then(|c| c.vdom.clone())
    }

    /// Thread the provider-level vdom into a state that has none of its own.
    fn apply_default_vdom(&self, state: &mut ResourceState) {
        if state.get(crate::resources::VDOM_PARAM).is_none() {
            if let Some(vdom) = self.default_vdom() {
                state.set(crate::resources::VDOM_PARAM, crate::value::Value::String(vdom));
            }
        }
    }

    /// Handle an RPC request
    pub fn handle_request(&self, input: &str) -> String {
        let request: RpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(e) => {
                return serde_json::to_string(&RpcResponse::error(
                    0,
                    -32700,
                    &format!("Parse error: {}", e),
                ))
                .unwrap_or_default();
            }
        };

        let response = match request.method.as_str() {
            "GetProviderSchema" => self.handle_get_schema(request.id),
            "ConfigureProvider" => self.handle_configure(request.id, &request.params),
            "ValidateResourceConfig" => self.handle_validate_resource(request.id, &request.params),
            "PlanResourceChange" => self.handle_plan_resource(request.id, &request.params),
            "ApplyResourceChange" => self.handle_apply_resource(request.id, &request.params),
            "ReadResource" => self.handle_read_resource(request.id, &request.params),
            "ReadDataSource" => self.handle_read_data_source(request.id, &request.params),
            "ImportResourceState" => self.handle_import_resource(request.id, &request.params),
            "StopProvider" => RpcResponse::success(request.id, serde_json::json!({})),
            _ => RpcResponse::error(
                request.id,
                -32601,
                &format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            serde_json::to_string(&RpcResponse::error(
                request.id,
                -32603,
                &format!("Serialization error: {}", e),
            ))
            .unwrap_or_default()
        })
    }

    fn lookup_resource(&self, params: &Value) -> Result<&'static ResourceDef, Diagnostic> {
        let type_name = params
            .get("type_name")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        self.resources
            .get(type_name)
            .copied()
            .ok_or_else(|| Diagnostic::error(&format!("Unknown resource type: {}", type_name)))
    }

    fn state_param(params: &Value, key: &str) -> Option<ResourceState> {
        params.get(key).and_then(|v| {
            if v.is_null() {
                None
            } else {
                v.as_object().map(|_| ResourceState::from_json(v))
            }
        })
    }

    fn diagnostics_response(id: i64, diagnostics: Vec<Diagnostic>) -> RpcResponse {
        RpcResponse::success(id, serde_json::json!({ "diagnostics": diagnostics }))
    }

    /// Handle GetProviderSchema
    fn handle_get_schema(&self, id: i64) -> RpcResponse {
        let schema = self.get_schema();
        RpcResponse::success(id, serde_json::to_value(schema).unwrap_or_default())
    }

    /// Handle ConfigureProvider
    fn handle_configure(&self, id: i64, params: &Value) -> RpcResponse {
        let config: ProviderConfig = params
            .get("config")
            .and_then(|c| serde_json::from_value(c.clone()).ok())
            .unwrap_or_default();

        let diagnostics = self.configure(config);
        Self::diagnostics_response(id, diagnostics)
    }

    /// Handle ValidateResourceConfig
    fn handle_validate_resource(&self, id: i64, params: &Value) -> RpcResponse {
        let def = match self.lookup_resource(params) {
            Ok(def) => def,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let config = Self::state_param(params, "config").unwrap_or_default();
        Self::diagnostics_response(id, def.validate(&config))
    }

    /// Handle PlanResourceChange
    fn handle_plan_resource(&self, id: i64, params: &Value) -> RpcResponse {
        if let Err(diag) = self.lookup_resource(params) {
            return Self::diagnostics_response(id, vec![diag]);
        }

        // The engine reconciles against the device after apply; the plan is
        // the proposed state as-is.
        let proposed = Self::state_param(params, "proposed_new_state").unwrap_or_default();
        RpcResponse::success(
            id,
            serde_json::json!({
                "planned_state": proposed.to_json(),
                "diagnostics": []
            }),
        )
    }

    /// Handle ApplyResourceChange
    fn handle_apply_resource(&self, id: i64, params: &Value) -> RpcResponse {
        let def = match self.lookup_resource(params) {
            Ok(def) => def,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let client = match self.get_client() {
            Ok(c) => c,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let planned = Self::state_param(params, "planned_state");
        let prior = Self::state_param(params, "prior_state");

        let result = self.runtime.block_on(async {
            match (prior, planned) {
                (Some(prior), None) => def.delete(&client, &prior).await.map(|_| None),
                (None, Some(mut planned)) => {
                    self.apply_default_vdom(&mut planned);
                    def.create(&client, &planned).await.map(Some)
                }
                (Some(prior), Some(mut planned)) => {
                    self.apply_default_vdom(&mut planned);
                    def.update(&client, &prior, &planned).await.map(Some)
                }
                (None, None) => Ok(None),
            }
        });

        match result {
            Ok(Some(new_state)) => RpcResponse::success(
                id,
                serde_json::json!({
                    "new_state": new_state.to_json(),
                    "diagnostics": []
                }),
            ),
            Ok(None) => RpcResponse::success(
                id,
                serde_json::json!({
                    "new_state": null,
                    "diagnostics": []
                }),
            ),
            Err(diagnostics) => Self::diagnostics_response(id, diagnostics),
        }
    }

    /// Handle ReadResource
    fn handle_read_resource(&self, id: i64, params: &Value) -> RpcResponse {
        let def = match self.lookup_resource(params) {
            Ok(def) => def,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let client = match self.get_client() {
            Ok(c) => c,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let mut current = Self::state_param(params, "current_state").unwrap_or_default();
        self.apply_default_vdom(&mut current);

        let result = self
            .runtime
            .block_on(async { def.read(&client, &current).await });

        match result {
            Ok(state) if state.is_empty() => RpcResponse::success(
                id,
                serde_json::json!({
                    "new_state": null,
                    "diagnostics": []
                }),
            ),
            Ok(state) => RpcResponse::success(
                id,
                serde_json::json!({
                    "new_state": state.to_json(),
                    "diagnostics": []
                }),
            ),
            Err(diagnostics) => Self::diagnostics_response(id, diagnostics),
        }
    }

    /// Handle ReadDataSource
    fn handle_read_data_source(&self, id: i64, params: &Value) -> RpcResponse {
        let type_name = params
            .get("type_name")
            .and_then(|v| v.as_str())
            .unwrap_or("");
        let Some(ds) = self.data_sources.get(type_name) else {
            return Self::diagnostics_response(
                id,
                vec![Diagnostic::error(&format!(
                    "Unknown data source type: {}",
                    type_name
                ))],
            );
        };

        let client = match self.get_client() {
            Ok(c) => c,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let mut config = Self::state_param(params, "config").unwrap_or_default();
        self.apply_default_vdom(&mut config);

        let result = self
            .runtime
            .block_on(async { ds.read(&client, &config).await });

        match result {
            Ok(state) if state.is_empty() => Self::diagnostics_response(
                id,
                vec![Diagnostic::error(&format!(
                    "{} not found on the device",
                    type_name
                ))],
            ),
            Ok(state) => RpcResponse::success(
                id,
                serde_json::json!({
                    "state": state.to_json(),
                    "diagnostics": []
                }),
            ),
            Err(diagnostics) => Self::diagnostics_response(id, diagnostics),
        }
    }

    /// Handle ImportResourceState
    fn handle_import_resource(&self, id: i64, params: &Value) -> RpcResponse {
        let def = match self.lookup_resource(params) {
            Ok(def) => def,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let resource_id = params.get("id").and_then(|v| v.as_str()).unwrap_or("");

        let client = match self.get_client() {
            Ok(c) => c,
            Err(diag) => return Self::diagnostics_response(id, vec![diag]),
        };

        let result = self
            .runtime
            .block_on(async { def.import_read(&client, resource_id).await });

        match result {
            Ok(state) if state.is_empty() => Self::diagnostics_response(
                id,
                vec![Diagnostic::error(&format!(
                    "Resource {} not found",
                    resource_id
                ))],
            ),
            Ok(state) => RpcResponse::success(
                id,
                serde_json::json!({
                    "imported_resources": [{
                        "type_name": def.type_name,
                        "state": state.to_json()
                    }],
                    "diagnostics": []
                }),
            ),
            Err(diagnostics) => Self::diagnostics_response(id, diagnostics),
        }
    }
}

impl Default for FortiosProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = FortiosProvider::new();
        assert!(!provider.resources.is_empty());
        assert!(!provider.data_sources.is_empty());
    }

    #[test]
    fn test_provider_schema() {
        let provider = FortiosProvider::new();
        let schema = provider.get_schema();

        assert!(schema.provider.attributes.contains_key("hostname"));
        assert!(schema.provider.attributes.contains_key("token"));
        assert!(schema.provider.attributes.contains_key("vdom"));
        assert!(schema
            .resource_schemas
            .contains_key("fortios_firewall_policy"));
        assert!(schema
            .data_source_schemas
            .contains_key("fortios_system_dhcp_server"));
    }

    #[test]
    fn test_handle_get_schema() {
        let provider = FortiosProvider::new();
        let response = provider.handle_request(
            r#"{"jsonrpc":"2.0","id":1,"method":"GetProviderSchema","params":{}}"#,
        );

        assert!(response.contains("provider"));
        assert!(response.contains("resource_schemas"));
        assert!(response.contains("fortios_log_fortianalyzer_setting"));
    }

    #[test]
    fn test_handle_unknown_method() {
        let provider = FortiosProvider::new();
        let response = provider
            .handle_request(r#"{"jsonrpc":"2.0","id":1,"method":"UnknownMethod","params":{}}"#);

        assert!(response.contains("error"));
        assert!(response.contains("Method not found"));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let provider = FortiosProvider::new();
        let response = provider.handle_request(
            r#"{"jsonrpc":"2.0","id":4,"method":"ValidateResourceConfig","params":{
                "type_name":"fortios_system_dhcp_server",
                "config":{"interface":"port2","netmask":"255.255.255.0","lease_time":5}}}"#,
        );

        assert!(response.contains("lease_time"));
    }

    #[test]
    fn test_configure_requires_hostname() {
        let provider = FortiosProvider::new();
        let diags = provider.configure(ProviderConfig::default());
        assert!(!diags.is_empty());
        assert!(diags[0].summary.contains("hostname"));
    }
}
