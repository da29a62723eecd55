//! Firewall configuration objects.

use super::{ResourceDef, NAME_MEMBER_TABLE};
use crate::mapping::{ClearPolicy, FieldSpec, TableSpec};

// ============================================================================
// Policy
// ============================================================================

static FIREWALL_POLICY_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("policyid").computed().describe("Policy identifier"),
        FieldSpec::string("name").len(1, 35).describe("Policy name"),
        FieldSpec::string("uuid").computed(),
        FieldSpec::table("srcintf", &NAME_MEMBER_TABLE)
            .required()
            .describe("Incoming interfaces"),
        FieldSpec::table("dstintf", &NAME_MEMBER_TABLE)
            .required()
            .describe("Outgoing interfaces"),
        FieldSpec::table("srcaddr", &NAME_MEMBER_TABLE)
            .required()
            .describe("Source address objects"),
        FieldSpec::table("dstaddr", &NAME_MEMBER_TABLE)
            .required()
            .describe("Destination address objects"),
        FieldSpec::table("service", &NAME_MEMBER_TABLE)
            .required()
            .describe("Service objects"),
        FieldSpec::string("action").describe("accept, deny, or ipsec"),
        FieldSpec::string("status").describe("Enable or disable the policy"),
        FieldSpec::string("schedule")
            .required()
            .len(1, 35)
            .describe("Schedule object name"),
        FieldSpec::string("nat").describe("Enable source NAT"),
        FieldSpec::string("logtraffic").describe("all, utm, or disable"),
        FieldSpec::string("utm_status").describe("Enable UTM inspection"),
        FieldSpec::string("inspection_mode").describe("flow or proxy"),
        FieldSpec::string("av_profile")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("Antivirus profile applied to matching traffic"),
        FieldSpec::string("webfilter_profile")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("Web filter profile applied to matching traffic"),
        FieldSpec::string("ips_sensor")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("IPS sensor applied to matching traffic"),
        FieldSpec::string("fixedport").describe("Keep source ports under NAT"),
        FieldSpec::string("comments").len(0, 1023).clear(ClearPolicy::Null),
    ],
    mkey: None,
};

pub static FIREWALL_POLICY: ResourceDef = ResourceDef {
    type_name: "fortios_firewall_policy",
    path: "firewall/policy",
    mkey: Some("policyid"),
    table: &FIREWALL_POLICY_TABLE,
    description: "Configure IPv4 firewall policies",
};

// ============================================================================
// Proxy address
// ============================================================================

static CATEGORY_TABLE: TableSpec = TableSpec {
    fields: &[FieldSpec::int("id").describe("FortiGuard category identifier")],
    mkey: Some("id"),
};

static HEADER_GROUP_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Group entry identifier"),
        FieldSpec::string("header_name").len(0, 79).describe("HTTP header name"),
        FieldSpec::string("header").len(0, 255).describe("Pattern the header must match"),
        FieldSpec::string("case_sensitivity").describe("Match case-sensitively"),
    ],
    mkey: Some("id"),
};

static FIREWALL_PROXY_ADDRESS_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::string("name")
            .required()
            .force_new()
            .len(1, 79)
            .describe("Address object name"),
        FieldSpec::string("uuid").computed(),
        FieldSpec::string("type")
            .describe("host-regex, url, category, method, ua, or header"),
        FieldSpec::string("host")
            .len(0, 79)
            .describe("Address or address group the object applies to"),
        FieldSpec::string("host_regex")
            .len(0, 255)
            .clear(ClearPolicy::Null)
            .describe("Host name regular expression"),
        FieldSpec::string("path")
            .len(0, 255)
            .clear(ClearPolicy::Null)
            .describe("URL path regular expression"),
        FieldSpec::string("query")
            .len(0, 255)
            .clear(ClearPolicy::Null)
            .describe("Query segment match"),
        FieldSpec::string("referrer").describe("Enable referrer matching"),
        FieldSpec::string("method").describe("HTTP methods, comma separated"),
        FieldSpec::string("ua").describe("Browser signatures, comma separated"),
        FieldSpec::int("color")
            .range(0, 32)
            .describe("Icon color in the device GUI"),
        FieldSpec::string("comment").len(0, 255).clear(ClearPolicy::Null),
        FieldSpec::table("category", &CATEGORY_TABLE)
            .describe("FortiGuard categories the object matches"),
        FieldSpec::table("header_group", &HEADER_GROUP_TABLE)
            .describe("HTTP header match group"),
    ],
    mkey: None,
};

pub static FIREWALL_PROXY_ADDRESS: ResourceDef = ResourceDef {
    type_name: "fortios_firewall_proxy_address",
    path: "firewall/proxy-address",
    mkey: Some("name"),
    table: &FIREWALL_PROXY_ADDRESS_TABLE,
    description: "Configure web proxy address objects",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_member_tables_share_name_key() {
        for table in ["srcintf", "dstintf", "srcaddr", "dstaddr", "service"] {
            let field = FIREWALL_POLICY_TABLE
                .fields
                .iter()
                .find(|f| f.name == table)
                .unwrap();
            assert!(field.required, "{table} should be required");
        }
    }

    #[test]
    fn test_proxy_address_name_forces_replacement() {
        let name = FIREWALL_PROXY_ADDRESS_TABLE
            .fields
            .iter()
            .find(|f| f.name == "name")
            .unwrap();
        assert!(name.force_new);
    }
}
