//! Schema-driven mapping between Terraform state and the FortiOS API.
//!
//! Every configuration object is described once, as a static table of
//! [`FieldSpec`] rows. One generic walker expands a Terraform configuration
//! tree into the JSON body the device expects, and one flattens the device's
//! response back into state. Terraform attribute names use underscores; the
//! device uses hyphens. The table is the single source of truth for naming,
//! sensitivity, validation, and clear-on-removal behavior.

use crate::schema::{NestedBlock, NestingMode, SchemaAttribute, SchemaBlock};
use crate::value::Value;
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::collections::HashSet;
use thiserror::Error;

/// A field-level mapping failure, tagged with the offending field path.
#[derive(Error, Debug)]
#[error("field {field}: {message}")]
pub struct MappingError {
    pub field: String,
    pub message: String,
}

impl MappingError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn nest(mut self, parent: &str) -> Self {
        self.field = format!("{parent}.{}", self.field);
        self
    }
}

/// Scalar or nested-table shape of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Str,
    Int,
    Table(&'static TableSpec),
}

/// What to send for a field the user removed from configuration.
///
/// `Null` and `EmptyList` are only sent when prior state held a value;
/// a never-configured field is always omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPolicy {
    Omit,
    Null,
    EmptyList,
}

/// One row of a resource's field table.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub api: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub force_new: bool,
    pub clear: ClearPolicy,
    pub int_range: Option<(i64, i64)>,
    pub str_len: Option<(u64, u64)>,
    pub description: &'static str,
}

impl FieldSpec {
    const fn of_kind(name: &'static str, kind: FieldKind, clear: ClearPolicy) -> Self {
        Self {
            name,
            api: None,
            kind,
            required: false,
            computed: false,
            sensitive: false,
            force_new: false,
            clear,
            int_range: None,
            str_len: None,
            description: "",
        }
    }

    pub const fn string(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Str, ClearPolicy::Omit)
    }

    pub const fn int(name: &'static str) -> Self {
        Self::of_kind(name, FieldKind::Int, ClearPolicy::Omit)
    }

    pub const fn table(name: &'static str, spec: &'static TableSpec) -> Self {
        Self::of_kind(name, FieldKind::Table(spec), ClearPolicy::EmptyList)
    }

    /// Verbatim API field name, overriding the hyphenation default.
    pub const fn api(mut self, name: &'static str) -> Self {
        self.api = Some(name);
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub const fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub const fn clear(mut self, policy: ClearPolicy) -> Self {
        self.clear = policy;
        self
    }

    pub const fn range(mut self, min: i64, max: i64) -> Self {
        self.int_range = Some((min, max));
        self
    }

    pub const fn len(mut self, min: u64, max: u64) -> Self {
        self.str_len = Some((min, max));
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// The device-side field name: explicit override, or underscores
    /// swapped for hyphens.
    pub fn api_name(&self) -> String {
        match self.api {
            Some(name) => name.to_string(),
            None => self.name.replace('_', "-"),
        }
    }
}

/// A configuration object or nested member table.
#[derive(Debug)]
pub struct TableSpec {
    pub fields: &'static [FieldSpec],
    /// Member identity and sort key for nested collections.
    pub mkey: Option<&'static str>,
}

impl TableSpec {
    fn mkey_field(&self) -> Option<&FieldSpec> {
        self.mkey
            .and_then(|key| self.fields.iter().find(|f| f.name == key))
    }
}

/// Flatten behavior switches, threaded explicitly through the call chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    /// Flatten optional nested tables even when absent from prior state
    /// (import and data-source reads).
    pub get_all_tables: bool,
    /// Sort nested members by their designated key for stable diffs.
    pub sort_subtables: bool,
}

// ============================================================================
// Expand: Terraform configuration -> API request body
// ============================================================================

/// Assemble the request body for one configuration object.
///
/// Fields present in `config` are passed through (nested tables recurse,
/// keys renamed to the device convention). Absent fields follow their
/// [`ClearPolicy`]: an explicit null or empty list is sent only when `prior`
/// shows the device still holds a value to clear.
pub fn build_request_body(
    table: &TableSpec,
    config: &Value,
    prior: Option<&Value>,
) -> Result<Value, MappingError> {
    let mut body = IndexMap::new();

    for field in table.fields {
        match config.get(field.name).filter(|v| !v.is_null()) {
            Some(value) => {
                body.insert(field.api_name(), expand_field(field, value)?);
            }
            None => {
                if field.computed {
                    continue;
                }
                let had_value = prior
                    .and_then(|p| p.get(field.name))
                    .map(|v| !v.is_null())
                    .unwrap_or(false);
                match field.clear {
                    ClearPolicy::Omit => {}
                    ClearPolicy::Null if had_value => {
                        body.insert(field.api_name(), Value::Null);
                    }
                    ClearPolicy::EmptyList if had_value => {
                        body.insert(field.api_name(), Value::List(Vec::new()));
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(Value::Object(body))
}

fn expand_field(field: &FieldSpec, value: &Value) -> Result<Value, MappingError> {
    match field.kind {
        FieldKind::Str => value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| MappingError::new(field.name, "expected a string")),
        FieldKind::Int => value
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| MappingError::new(field.name, "expected an integer")),
        FieldKind::Table(spec) => {
            let items = value
                .as_list()
                .ok_or_else(|| MappingError::new(field.name, "expected a block list"))?;
            let mut members = Vec::with_capacity(items.len());
            for item in items {
                members.push(build_request_body(spec, item, None).map_err(|e| e.nest(field.name))?);
            }
            Ok(Value::List(members))
        }
    }
}

/// The reset body used to delete singleton settings objects: every
/// non-computed field mapped to its null/empty sentinel.
pub fn reset_body(table: &TableSpec) -> Value {
    let mut body = IndexMap::new();
    for field in table.fields {
        if field.computed {
            continue;
        }
        let sentinel = match field.kind {
            FieldKind::Table(_) => Value::List(Vec::new()),
            _ => Value::Null,
        };
        body.insert(field.api_name(), sentinel);
    }
    Value::Object(body)
}

// ============================================================================
// Flatten: API response -> Terraform state
// ============================================================================

/// Rebuild state from a device response.
///
/// Sensitive fields are never taken from the device; whatever `prior` holds
/// is carried over. Fields the device does not return are skipped, which
/// keeps state refresh working across firmware versions that predate a
/// field. Nested tables are merged with prior state by member key and,
/// when requested, sorted by it.
pub fn refresh_object(
    table: &TableSpec,
    api: &Value,
    prior: &Value,
    opts: FlattenOptions,
) -> Result<Value, MappingError> {
    let mut state = IndexMap::new();

    for field in table.fields {
        if field.sensitive {
            if let Some(value) = prior.get(field.name).filter(|v| !v.is_null()) {
                state.insert(field.name.to_string(), value.clone());
            }
            continue;
        }

        let Some(api_value) = api.get(&field.api_name()) else {
            continue;
        };
        if api_value.is_null() {
            continue;
        }

        match field.kind {
            FieldKind::Str => {
                let s = api_value
                    .as_str()
                    .ok_or_else(|| MappingError::new(field.name, "device sent a non-string"))?;
                state.insert(field.name.to_string(), Value::String(s.to_string()));
            }
            FieldKind::Int => {
                let i = api_value
                    .as_i64()
                    .ok_or_else(|| MappingError::new(field.name, "device sent a non-integer"))?;
                state.insert(field.name.to_string(), Value::Integer(i));
            }
            FieldKind::Table(spec) => {
                let prior_list = prior.get(field.name);
                if !opts.get_all_tables && prior_list.is_none() {
                    // Optional block the user never configured; leaving it
                    // out of state avoids a permanent diff.
                    continue;
                }
                let items = api_value
                    .as_list()
                    .ok_or_else(|| MappingError::new(field.name, "device sent a non-table"))?;
                let members = flatten_table(spec, items, prior_list, opts, field.name)?;
                state.insert(field.name.to_string(), Value::List(members));
            }
        }
    }

    Ok(Value::Object(state))
}

/// Flatten one nested member table, pairing device members with their prior
/// state counterparts by key. Members known to prior state keep its order;
/// new members follow in device order.
fn flatten_table(
    spec: &TableSpec,
    api_items: &[Value],
    prior_list: Option<&Value>,
    opts: FlattenOptions,
    field_name: &str,
) -> Result<Vec<Value>, MappingError> {
    let prior_members = prior_list.and_then(Value::as_list).unwrap_or(&[]);
    let key_field = spec.mkey_field();
    let no_prior = Value::Null;

    let mut paired: Vec<(usize, Value)> = Vec::with_capacity(api_items.len());
    for api_member in api_items {
        let prior_index = key_field.and_then(|kf| {
            let api_key = api_member.get(&kf.api_name())?;
            prior_members
                .iter()
                .position(|p| p.get(kf.name).map(|k| key_eq(k, api_key)).unwrap_or(false))
        });
        let prior_member = prior_index.map(|i| &prior_members[i]).unwrap_or(&no_prior);
        let member =
            refresh_object(spec, api_member, prior_member, opts).map_err(|e| e.nest(field_name))?;
        paired.push((prior_index.unwrap_or(usize::MAX), member));
    }
    paired.sort_by_key(|(prior_index, _)| *prior_index);

    let mut members: Vec<Value> = paired.into_iter().map(|(_, member)| member).collect();
    if opts.sort_subtables {
        if let Some(key) = spec.mkey {
            sort_members(&mut members, key);
        }
    }
    Ok(members)
}

/// Deterministic member ordering by a designated key field.
///
/// Integer keys compare numerically, string keys lexically; members missing
/// the key sink to the end. The sort is stable, so flattening the same
/// response twice yields identical output regardless of input order.
pub fn sort_members(members: &mut [Value], key: &str) {
    members.sort_by(|a, b| match (a.get(key), b.get(key)) {
        (Some(x), Some(y)) => compare_keys(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn compare_keys(a: &Value, b: &Value) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.as_str().unwrap_or("").cmp(b.as_str().unwrap_or("")),
    }
}

fn key_eq(a: &Value, b: &Value) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x == y,
        _ => match (a.as_str(), b.as_str()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
    }
}

// ============================================================================
// Validation and schema derivation
// ============================================================================

/// Check a configuration tree against the table's declared constraints.
/// Returns one message per violation, tagged with the field path.
pub fn validate_config(table: &TableSpec, config: &Value) -> Vec<String> {
    let mut errors = Vec::new();
    validate_into(table, config, "", &mut errors);
    errors
}

fn validate_into(table: &TableSpec, config: &Value, prefix: &str, errors: &mut Vec<String>) {
    for field in table.fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        let Some(value) = config.get(field.name).filter(|v| !v.is_null()) else {
            if field.required {
                errors.push(format!("{path}: required field is not set"));
            }
            continue;
        };
        match field.kind {
            FieldKind::Str => match value.as_str() {
                None => errors.push(format!("{path}: expected a string")),
                Some(s) => {
                    if let Some((min, max)) = field.str_len {
                        let len = s.len() as u64;
                        if len < min || len > max {
                            errors.push(format!(
                                "{path}: length {len} is outside the allowed range {min}-{max}"
                            ));
                        }
                    }
                }
            },
            FieldKind::Int => match value.as_i64() {
                None => errors.push(format!("{path}: expected an integer")),
                Some(i) => {
                    if let Some((min, max)) = field.int_range {
                        if i < min || i > max {
                            errors.push(format!(
                                "{path}: {i} is outside the allowed range {min}-{max}"
                            ));
                        }
                    }
                }
            },
            FieldKind::Table(spec) => match value.as_list() {
                None => errors.push(format!("{path}: expected a block list")),
                Some(items) => {
                    for item in items {
                        validate_into(spec, item, &path, errors);
                    }
                }
            },
        }
    }
}

/// Derive the Terraform schema block for a field table, so the schema and
/// the mapper cannot drift apart.
pub fn schema_block(table: &TableSpec) -> SchemaBlock {
    let mut block = SchemaBlock::new();
    for field in table.fields {
        match field.kind {
            FieldKind::Table(spec) => {
                block = block.with_block(
                    field.name,
                    NestedBlock {
                        nesting_mode: NestingMode::List,
                        block: schema_block(spec),
                        min_items: None,
                        max_items: None,
                    },
                );
            }
            FieldKind::Str | FieldKind::Int => {
                let mut attr = match field.kind {
                    FieldKind::Str => SchemaAttribute::string(),
                    _ => SchemaAttribute::number(),
                };
                attr = if field.required {
                    attr.required()
                } else {
                    attr.optional()
                };
                if field.computed {
                    attr = attr.computed();
                }
                if field.sensitive {
                    attr = attr.sensitive();
                }
                if field.force_new {
                    attr = attr.force_new();
                }
                if let Some((min, max)) = field.int_range {
                    attr = attr.int_range(min, max);
                }
                if let Some((min, max)) = field.str_len {
                    attr = attr.string_len(min, max);
                }
                if !field.description.is_empty() {
                    attr = attr.with_description(field.description);
                }
                block = block.with_attribute(field.name, attr);
            }
        }
    }
    block
}

/// Every Terraform name must map to exactly one API name and back within
/// one table, recursively.
pub fn check_naming_bijection(table: &TableSpec) -> Result<(), String> {
    let mut tf_names = HashSet::new();
    let mut api_names = HashSet::new();
    for field in table.fields {
        if !tf_names.insert(field.name) {
            return Err(format!("duplicate field name {}", field.name));
        }
        if !api_names.insert(field.api_name()) {
            return Err(format!("duplicate API name {}", field.api_name()));
        }
        if let FieldKind::Table(spec) = field.kind {
            check_naming_bijection(spec).map_err(|e| format!("{}: {e}", field.name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static PEER_TABLE: TableSpec = TableSpec {
        fields: &[
            FieldSpec::int("id").computed(),
            FieldSpec::string("peer_ip").required(),
            FieldSpec::string("psk").sensitive(),
        ],
        mkey: Some("id"),
    };

    static TEST_TABLE: TableSpec = TableSpec {
        fields: &[
            FieldSpec::int("fosid").api("id").computed(),
            FieldSpec::string("status"),
            FieldSpec::string("default_gateway").clear(ClearPolicy::Null),
            FieldSpec::int("lease_time").range(300, 8_640_000),
            FieldSpec::table("peer", &PEER_TABLE),
        ],
        mkey: None,
    };

    fn config() -> Value {
        Value::from_json(&json!({
            "fosid": 5,
            "status": "enable",
            "default_gateway": "10.0.0.1",
            "lease_time": 604800,
            "peer": [
                { "id": 2, "peer_ip": "192.0.2.2", "psk": "hunter2" },
                { "id": 1, "peer_ip": "192.0.2.1", "psk": "hunter1" },
            ],
        }))
    }

    #[test]
    fn test_expand_renames_and_recurses() {
        let body = build_request_body(&TEST_TABLE, &config(), None).unwrap();
        let json = body.to_json();
        assert_eq!(json["id"], 5);
        assert_eq!(json["status"], "enable");
        assert_eq!(json["default-gateway"], "10.0.0.1");
        assert_eq!(json["peer"][0]["peer-ip"], "192.0.2.2");
        assert_eq!(json["peer"][0]["psk"], "hunter2");
    }

    #[test]
    fn test_expand_flatten_round_trip() {
        // Non-sensitive fields survive expand -> (simulated device echo) ->
        // flatten unchanged.
        let config = config();
        let body = build_request_body(&TEST_TABLE, &config, None).unwrap();
        let state =
            refresh_object(&TEST_TABLE, &body, &config, FlattenOptions::default()).unwrap();
        assert_eq!(state.get("fosid"), config.get("fosid"));
        assert_eq!(state.get("status"), config.get("status"));
        assert_eq!(state.get("default_gateway"), config.get("default_gateway"));
        assert_eq!(state.get("lease_time"), config.get("lease_time"));
        // psk came back from prior state, not the device echo
        assert_eq!(
            state.get("peer").unwrap().as_list().unwrap()[0].get("psk"),
            Some(&Value::from("hunter2"))
        );
    }

    #[test]
    fn test_clear_null_only_when_prior_had_value() {
        let config = Value::from_json(&json!({ "status": "enable" }));

        // Never configured: omitted entirely.
        let body = build_request_body(&TEST_TABLE, &config, None).unwrap();
        assert!(body.get("default-gateway").is_none());

        // Previously set, now removed: explicit null.
        let prior = Value::from_json(&json!({ "default_gateway": "10.0.0.1" }));
        let body = build_request_body(&TEST_TABLE, &config, Some(&prior)).unwrap();
        assert_eq!(body.get("default-gateway"), Some(&Value::Null));
    }

    #[test]
    fn test_clear_empty_list_when_prior_had_members() {
        let config = Value::from_json(&json!({ "status": "enable" }));
        let prior = Value::from_json(&json!({ "peer": [{ "id": 1 }] }));
        let body = build_request_body(&TEST_TABLE, &config, Some(&prior)).unwrap();
        assert_eq!(body.get("peer"), Some(&Value::List(Vec::new())));
    }

    #[test]
    fn test_expand_type_mismatch_names_field() {
        let config = Value::from_json(&json!({ "lease_time": "soon" }));
        let err = build_request_body(&TEST_TABLE, &config, None).unwrap_err();
        assert_eq!(err.field, "lease_time");
    }

    #[test]
    fn test_flatten_normalizes_float_integers() {
        let api = Value::from_json(&json!({ "id": 5.0, "lease-time": 604800.0 }));
        let state =
            refresh_object(&TEST_TABLE, &api, &Value::object(), FlattenOptions::default())
                .unwrap();
        assert_eq!(state.get("fosid"), Some(&Value::Integer(5)));
        assert_eq!(state.get("lease_time"), Some(&Value::Integer(604800)));
    }

    #[test]
    fn test_flatten_tolerates_missing_device_fields() {
        // Older firmware may not know a field at all.
        let api = Value::from_json(&json!({ "status": "enable" }));
        let state =
            refresh_object(&TEST_TABLE, &api, &Value::object(), FlattenOptions::default())
                .unwrap();
        assert_eq!(state.get("status"), Some(&Value::from("enable")));
        assert!(state.get("lease_time").is_none());
    }

    #[test]
    fn test_flatten_skips_unconfigured_tables() {
        let api = Value::from_json(&json!({
            "status": "enable",
            "peer": [{ "id": 1, "peer-ip": "192.0.2.1" }],
        }));
        let prior = Value::from_json(&json!({ "status": "enable" }));

        let state = refresh_object(&TEST_TABLE, &api, &prior, FlattenOptions::default()).unwrap();
        assert!(state.get("peer").is_none());

        let all = FlattenOptions {
            get_all_tables: true,
            ..Default::default()
        };
        let state = refresh_object(&TEST_TABLE, &api, &prior, all).unwrap();
        assert!(state.get("peer").is_some());
    }

    #[test]
    fn test_sorted_flatten_is_order_insensitive() {
        let forward = Value::from_json(&json!({
            "peer": [
                { "id": 1, "peer-ip": "192.0.2.1" },
                { "id": 2, "peer-ip": "192.0.2.2" },
            ],
        }));
        let reversed = Value::from_json(&json!({
            "peer": [
                { "id": 2, "peer-ip": "192.0.2.2" },
                { "id": 1, "peer-ip": "192.0.2.1" },
            ],
        }));
        let opts = FlattenOptions {
            get_all_tables: true,
            sort_subtables: true,
        };
        let a = refresh_object(&TEST_TABLE, &forward, &Value::object(), opts).unwrap();
        let b = refresh_object(&TEST_TABLE, &reversed, &Value::object(), opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsorted_flatten_keeps_prior_member_order() {
        // The device reorders; state keeps the user's order for known
        // members and appends new ones.
        let api = Value::from_json(&json!({
            "peer": [
                { "id": 1, "peer-ip": "192.0.2.1" },
                { "id": 3, "peer-ip": "192.0.2.3" },
                { "id": 2, "peer-ip": "192.0.2.2" },
            ],
        }));
        let prior = Value::from_json(&json!({
            "peer": [
                { "id": 2, "peer_ip": "192.0.2.2" },
                { "id": 1, "peer_ip": "192.0.2.1" },
            ],
        }));
        let state = refresh_object(&TEST_TABLE, &api, &prior, FlattenOptions::default()).unwrap();
        let ids: Vec<i64> = state
            .get("peer")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .map(|m| m.get("id").unwrap().as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_sensitive_members_preserved_through_merge() {
        let api = Value::from_json(&json!({
            "peer": [{ "id": 1, "peer-ip": "192.0.2.1", "psk": "" }],
        }));
        let prior = Value::from_json(&json!({
            "peer": [{ "id": 1, "peer_ip": "192.0.2.1", "psk": "hunter1" }],
        }));
        let state = refresh_object(&TEST_TABLE, &api, &prior, FlattenOptions::default()).unwrap();
        assert_eq!(
            state.get("peer").unwrap().as_list().unwrap()[0].get("psk"),
            Some(&Value::from("hunter1"))
        );
    }

    #[test]
    fn test_reset_body_nulls_every_field() {
        let body = reset_body(&TEST_TABLE);
        let fields = body.as_object().unwrap();
        // computed fosid is left alone
        assert!(!fields.contains_key("id"));
        assert_eq!(fields.get("status"), Some(&Value::Null));
        assert_eq!(fields.get("default-gateway"), Some(&Value::Null));
        assert_eq!(fields.get("lease-time"), Some(&Value::Null));
        assert_eq!(fields.get("peer"), Some(&Value::List(Vec::new())));
    }

    #[test]
    fn test_validate_config_reports_field_paths() {
        let config = Value::from_json(&json!({
            "lease_time": 10,
            "peer": [{ "id": 1 }],
        }));
        let errors = validate_config(&TEST_TABLE, &config);
        assert!(errors.iter().any(|e| e.starts_with("lease_time:")));
        assert!(errors.iter().any(|e| e.starts_with("peer.peer_ip:")));
    }

    #[test]
    fn test_schema_block_mirrors_table() {
        let block = schema_block(&TEST_TABLE);
        assert!(block.attributes.contains_key("fosid"));
        assert!(block.attributes["fosid"].computed);
        assert!(block.blocks.contains_key("peer"));
        let peer = &block.blocks["peer"].block;
        assert!(peer.attributes["peer_ip"].required);
        assert!(peer.attributes["psk"].sensitive);
    }

    #[test]
    fn test_naming_bijection_detects_collisions() {
        assert!(check_naming_bijection(&TEST_TABLE).is_ok());

        static COLLIDING: TableSpec = TableSpec {
            fields: &[
                FieldSpec::string("dns_server"),
                FieldSpec::string("dns-server").api("dns-server"),
            ],
            mkey: None,
        };
        assert!(check_naming_bijection(&COLLIDING).is_err());
    }
}
