//! FortiOS configuration resources.
//!
//! Each resource is one [`ResourceDef`]: a CMDB path, a primary-key
//! attribute, and a static field table. One generic engine implements the
//! whole CRUD lifecycle against those descriptors; nothing is written per
//! resource beyond its table.

pub mod firewall;
pub mod log;
pub mod system;
pub mod user;

use crate::mapping::{self, FieldSpec, FlattenOptions, TableSpec};
use crate::schema::{Diagnostic, ResourceSchema, SchemaAttribute, SchemaBlock};
use crate::value::Value;
use fortios_client::FortiClient;
use indexmap::IndexMap;

/// Result type for resource operations
pub type ResourceResult<T> = Result<T, Vec<Diagnostic>>;

/// Attribute holding the virtual-domain scope of an object.
pub const VDOM_PARAM: &str = "vdomparam";
/// Attribute requesting key-sorted nested tables for stable diffs.
pub const SORT_SUBTABLE_PARAM: &str = "dynamic_sort_subtable";
/// Attribute requesting that reads flatten every nested table.
pub const GET_ALL_TABLES_PARAM: &str = "get_all_tables";

/// Client-side retry counter, set before every call.
const CALL_RETRIES: u32 = 1;

/// Name-keyed member table shared by interface/address/service lists.
pub static NAME_MEMBER_TABLE: TableSpec = TableSpec {
    fields: &[FieldSpec::string("name").required().len(1, 79)],
    mkey: Some("name"),
};

/// Resource state
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    pub values: IndexMap<String, Value>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Self {
        match Value::from_json(json) {
            Value::Object(values) => Self { values },
            _ => Self::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        Value::Object(self.values.clone()).to_json()
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|v| v.as_str()).map(String::from)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Declarative descriptor of one FortiOS configuration object type.
pub struct ResourceDef {
    pub type_name: &'static str,
    /// CMDB path on the device, e.g. `firewall/policy`.
    pub path: &'static str,
    /// Terraform attribute backing the identifier; `None` for singleton
    /// settings objects, which exist exactly once per vdom.
    pub mkey: Option<&'static str>,
    pub table: &'static TableSpec,
    pub description: &'static str,
}

impl ResourceDef {
    pub fn is_singleton(&self) -> bool {
        self.mkey.is_none()
    }

    /// Resource schema: the field table plus the provider-side control
    /// attributes every resource carries.
    pub fn schema(&self) -> ResourceSchema {
        let block = mapping::schema_block(self.table)
            .with_attribute(
                VDOM_PARAM,
                SchemaAttribute::string()
                    .optional()
                    .force_new()
                    .with_description("Virtual domain the object is applied to"),
            )
            .with_attribute(
                SORT_SUBTABLE_PARAM,
                SchemaAttribute::bool()
                    .optional()
                    .with_default(serde_json::json!(false))
                    .with_description("Sort nested tables by their key field"),
            )
            .with_attribute(
                GET_ALL_TABLES_PARAM,
                SchemaAttribute::bool()
                    .optional()
                    .with_default(serde_json::json!(false))
                    .with_description("Refresh every nested table, configured or not"),
            )
            .with_description(self.description);
        ResourceSchema::new(1, block)
    }

    /// Data-source schema: everything computed except the key selector.
    pub fn data_source_schema(&self) -> ResourceSchema {
        let mut block = mapping::schema_block(self.table);
        mark_all_computed(&mut block);
        if let Some(mkey) = self.mkey {
            if let Some(attr) = block.attributes.get_mut(mkey) {
                attr.required = true;
                attr.optional = false;
                attr.computed = false;
            }
        }
        let block = block
            .with_attribute(
                VDOM_PARAM,
                SchemaAttribute::string()
                    .optional()
                    .with_description("Virtual domain the object is applied to"),
            )
            .with_description(self.description);
        ResourceSchema::new(1, block)
    }

    /// Check configured values against the table's declared constraints.
    pub fn validate(&self, config: &ResourceState) -> Vec<Diagnostic> {
        mapping::validate_config(self.table, &config.as_value())
            .into_iter()
            .map(|message| Diagnostic::error(&message))
            .collect()
    }

    /// Create the object on the device and read it back.
    ///
    /// Singletons have no create call; the first apply is an update. The
    /// Terraform identifier comes from the response `mkey`, falling back to
    /// the resource type name when the device assigns none.
    pub async fn create(
        &self,
        client: &FortiClient,
        planned: &ResourceState,
    ) -> ResourceResult<ResourceState> {
        let client = client.clone().with_retries(CALL_RETRIES);
        let vdom = planned.get_string(VDOM_PARAM);
        let body = mapping::build_request_body(self.table, &planned.as_value(), None)
            .map_err(|e| self.op_error("creating", e))?
            .to_json();

        let response = if self.is_singleton() {
            client.update_object(self.path, "", &body, vdom.as_deref()).await
        } else {
            client.create_object(self.path, &body, vdom.as_deref()).await
        }
        .map_err(|e| self.op_error("creating", e))?;

        let id = response
            .mkey_string()
            .unwrap_or_else(|| self.type_name.to_string());

        self.refresh(&client, &id, planned, vdom.as_deref(), self.flatten_options(planned))
            .await
    }

    /// Read current device state; an empty result means the object was
    /// removed out-of-band and must be dropped from state.
    pub async fn read(
        &self,
        client: &FortiClient,
        current: &ResourceState,
    ) -> ResourceResult<ResourceState> {
        let client = client.clone().with_retries(CALL_RETRIES);
        let vdom = current.get_string(VDOM_PARAM);
        let id = current
            .get_string("id")
            .ok_or_else(|| self.op_error("reading", "missing identifier"))?;
        self.refresh(&client, &id, current, vdom.as_deref(), self.flatten_options(current))
            .await
    }

    /// Read for `terraform import`: nothing is in state yet, so every
    /// nested table is flattened.
    pub async fn import_read(&self, client: &FortiClient, id: &str) -> ResourceResult<ResourceState> {
        let client = client.clone().with_retries(CALL_RETRIES);
        let opts = FlattenOptions {
            get_all_tables: true,
            sort_subtables: false,
        };
        self.refresh(&client, id, &ResourceState::new(), None, opts).await
    }

    /// Update the object in place and read it back. Prior state decides
    /// which removed fields are sent as explicit nulls.
    pub async fn update(
        &self,
        client: &FortiClient,
        current: &ResourceState,
        planned: &ResourceState,
    ) -> ResourceResult<ResourceState> {
        let client = client.clone().with_retries(CALL_RETRIES);
        let vdom = planned
            .get_string(VDOM_PARAM)
            .or_else(|| current.get_string(VDOM_PARAM));
        let id = current
            .get_string("id")
            .ok_or_else(|| self.op_error("updating", "missing identifier"))?;
        let body = mapping::build_request_body(
            self.table,
            &planned.as_value(),
            Some(&current.as_value()),
        )
        .map_err(|e| self.op_error("updating", e))?
        .to_json();

        let call_mkey = if self.is_singleton() { "" } else { id.as_str() };
        let response = client
            .update_object(self.path, call_mkey, &body, vdom.as_deref())
            .await
            .map_err(|e| self.op_error("updating", e))?;

        // A rename moves the object to a new mkey; the response carries it.
        let id = response.mkey_string().unwrap_or(id);
        self.refresh(&client, &id, planned, vdom.as_deref(), self.flatten_options(planned))
            .await
    }

    /// Delete the object. Singleton settings objects cannot be deleted;
    /// they are reset by an update mapping every field to null.
    pub async fn delete(&self, client: &FortiClient, current: &ResourceState) -> ResourceResult<()> {
        let client = client.clone().with_retries(CALL_RETRIES);
        let vdom = current.get_string(VDOM_PARAM);

        if self.is_singleton() {
            let body = mapping::reset_body(self.table).to_json();
            client
                .update_object(self.path, "", &body, vdom.as_deref())
                .await
                .map_err(|e| self.op_error("deleting", e))?;
            return Ok(());
        }

        let id = current
            .get_string("id")
            .ok_or_else(|| self.op_error("deleting", "missing identifier"))?;
        client
            .delete_object(self.path, &id, vdom.as_deref())
            .await
            .map_err(|e| self.op_error("deleting", e))?;
        Ok(())
    }

    async fn refresh(
        &self,
        client: &FortiClient,
        id: &str,
        prior: &ResourceState,
        vdom: Option<&str>,
        opts: FlattenOptions,
    ) -> ResourceResult<ResourceState> {
        let call_mkey = if self.is_singleton() { "" } else { id };
        let result = client
            .read_object(self.path, call_mkey, vdom)
            .await
            .map_err(|e| self.op_error("reading", e))?;

        let Some(api_json) = result else {
            return Ok(ResourceState::new());
        };

        let api = Value::from_json(&api_json);
        let refreshed = mapping::refresh_object(self.table, &api, &prior.as_value(), opts)
            .map_err(|e| self.op_error("reading", e))?;

        let mut state = ResourceState {
            values: refreshed.as_object().cloned().unwrap_or_default(),
        };
        for key in [VDOM_PARAM, SORT_SUBTABLE_PARAM, GET_ALL_TABLES_PARAM] {
            if let Some(value) = prior.get(key) {
                state.set(key, value.clone());
            }
        }
        state.set("id", Value::from(id));
        Ok(state)
    }

    fn flatten_options(&self, state: &ResourceState) -> FlattenOptions {
        FlattenOptions {
            get_all_tables: state.get_bool(GET_ALL_TABLES_PARAM).unwrap_or(false),
            sort_subtables: state.get_bool(SORT_SUBTABLE_PARAM).unwrap_or(false),
        }
    }

    fn op_error<E: std::fmt::Display>(&self, op: &str, err: E) -> Vec<Diagnostic> {
        vec![Diagnostic::error(&format!(
            "Error {op} {} resource: {err}",
            self.type_name
        ))]
    }
}

fn mark_all_computed(block: &mut SchemaBlock) {
    for attr in block.attributes.values_mut() {
        attr.required = false;
        attr.optional = false;
        attr.computed = true;
    }
    for nested in block.blocks.values_mut() {
        mark_all_computed(&mut nested.block);
    }
}

/// A read-only view over a resource definition.
pub struct DataSourceDef {
    pub resource: &'static ResourceDef,
}

impl DataSourceDef {
    pub fn type_name(&self) -> &'static str {
        self.resource.type_name
    }

    pub fn schema(&self) -> ResourceSchema {
        self.resource.data_source_schema()
    }

    pub async fn read(
        &self,
        client: &FortiClient,
        config: &ResourceState,
    ) -> ResourceResult<ResourceState> {
        let def = self.resource;
        let client = client.clone().with_retries(CALL_RETRIES);
        let vdom = config.get_string(VDOM_PARAM);
        let mkey_attr = def
            .mkey
            .ok_or_else(|| def.op_error("reading", "data source has no key attribute"))?;
        let id = config
            .get(mkey_attr)
            .and_then(id_string)
            .ok_or_else(|| def.op_error("reading", format!("{mkey_attr} is not set")))?;
        let opts = FlattenOptions {
            get_all_tables: true,
            sort_subtables: true,
        };
        def.refresh(&client, &id, config, vdom.as_deref(), opts).await
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Number(_) => value.as_i64().map(|i| i.to_string()),
        _ => None,
    }
}

/// Get all available resources
pub fn all_resources() -> Vec<&'static ResourceDef> {
    vec![
        &system::SYSTEM_DHCP_SERVER,
        &system::SYSTEM_CLUSTER_SYNC,
        &firewall::FIREWALL_POLICY,
        &firewall::FIREWALL_PROXY_ADDRESS,
        &user::USER_GROUP,
        &user::USER_LOCAL,
        &log::LOG_FORTIANALYZER_SETTING,
    ]
}

/// Get all available data sources
pub fn all_data_sources() -> Vec<DataSourceDef> {
    vec![
        DataSourceDef {
            resource: &system::SYSTEM_DHCP_SERVER,
        },
        DataSourceDef {
            resource: &firewall::FIREWALL_POLICY,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resource_state() {
        let mut state = ResourceState::new();
        state.set("name", Value::from("dmz-servers"));
        state.set("policyid", Value::from(4_i64));

        assert_eq!(state.get_string("name"), Some("dmz-servers".to_string()));
        assert_eq!(state.get_i64("policyid"), Some(4));
        assert!(state.get_bool("name").is_none());
    }

    #[test]
    fn test_resource_state_json_round_trip() {
        let json = serde_json::json!({
            "name": "g1",
            "member": [{ "name": "u1" }],
        });
        let state = ResourceState::from_json(&json);
        assert_eq!(state.to_json(), json);
    }

    #[test]
    fn test_every_table_has_bijective_naming() {
        for def in all_resources() {
            mapping::check_naming_bijection(def.table)
                .unwrap_or_else(|e| panic!("{}: {e}", def.type_name));
        }
    }

    #[test]
    fn test_type_names_are_unique() {
        let mut seen = HashSet::new();
        for def in all_resources() {
            assert!(seen.insert(def.type_name), "duplicate {}", def.type_name);
        }
    }

    #[test]
    fn test_resource_schema_carries_control_attributes() {
        let schema = system::SYSTEM_DHCP_SERVER.schema();
        assert!(schema.block.attributes.contains_key(VDOM_PARAM));
        assert!(schema.block.attributes.contains_key(SORT_SUBTABLE_PARAM));
        assert!(schema.block.attributes.contains_key(GET_ALL_TABLES_PARAM));
        assert!(schema.block.blocks.contains_key("ip_range"));
    }

    #[test]
    fn test_singletons_have_no_mkey() {
        assert!(log::LOG_FORTIANALYZER_SETTING.is_singleton());
        assert!(!system::SYSTEM_DHCP_SERVER.is_singleton());
    }

    #[test]
    fn test_data_source_schema_is_read_only() {
        let schema = firewall::FIREWALL_POLICY.data_source_schema();
        let policyid = &schema.block.attributes["policyid"];
        assert!(policyid.required);
        let name = &schema.block.attributes["name"];
        assert!(name.computed);
        assert!(!name.required);
    }

    #[test]
    fn test_validate_flags_out_of_range_values() {
        let mut config = ResourceState::new();
        config.set("lease_time", Value::from(5_i64));
        config.set("interface", Value::from("port2"));
        config.set("netmask", Value::from("255.255.255.0"));
        let diags = system::SYSTEM_DHCP_SERVER.validate(&config);
        assert!(!diags.is_empty());
    }
}
