//! System configuration objects.

use super::{ResourceDef, NAME_MEMBER_TABLE};
use crate::mapping::{ClearPolicy, FieldSpec, TableSpec};

// ============================================================================
// DHCP server
// ============================================================================

static IP_RANGE_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Range identifier"),
        FieldSpec::string("start_ip")
            .required()
            .describe("First address of the range"),
        FieldSpec::string("end_ip")
            .required()
            .describe("Last address of the range"),
    ],
    mkey: Some("id"),
};

static RESERVED_ADDRESS_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Reservation identifier"),
        FieldSpec::string("ip").describe("Reserved address"),
        FieldSpec::string("mac").describe("Client MAC address"),
        FieldSpec::string("action").describe("assign, block, or reserved"),
        FieldSpec::string("description").len(0, 255),
    ],
    mkey: Some("id"),
};

static DHCP_OPTIONS_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Option entry identifier"),
        FieldSpec::int("code").range(0, 255).describe("DHCP option code"),
        FieldSpec::string("type").describe("hex, string, ip, or fqdn"),
        FieldSpec::string("value").len(0, 312).describe("Option value"),
    ],
    mkey: Some("id"),
};

static SYSTEM_DHCP_SERVER_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("fosid").api("id").computed().describe("Server identifier"),
        FieldSpec::string("status").describe("Enable or disable this server"),
        FieldSpec::int("lease_time")
            .range(300, 8_640_000)
            .describe("Lease duration in seconds"),
        FieldSpec::string("dns_service")
            .describe("How DNS servers are assigned to clients"),
        FieldSpec::string("dns_server1").clear(ClearPolicy::Null),
        FieldSpec::string("dns_server2").clear(ClearPolicy::Null),
        FieldSpec::string("domain")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("Domain name suffix handed to clients"),
        FieldSpec::string("netmask")
            .required()
            .describe("Netmask assigned by this server"),
        FieldSpec::string("interface")
            .required()
            .len(1, 15)
            .describe("Interface the server listens on"),
        FieldSpec::string("default_gateway")
            .clear(ClearPolicy::Null)
            .describe("Gateway handed to clients"),
        FieldSpec::string("timezone_option")
            .describe("disable, default, or specify"),
        FieldSpec::string("next_server")
            .clear(ClearPolicy::Null)
            .describe("TFTP server address for PXE boot"),
        FieldSpec::string("ntp_server1").clear(ClearPolicy::Null),
        FieldSpec::string("filename")
            .len(0, 127)
            .clear(ClearPolicy::Null)
            .describe("Boot file name for PXE clients"),
        FieldSpec::table("ip_range", &IP_RANGE_TABLE)
            .describe("Address pools leased to clients"),
        FieldSpec::table("reserved_address", &RESERVED_ADDRESS_TABLE)
            .describe("Per-MAC address reservations"),
        FieldSpec::table("options", &DHCP_OPTIONS_TABLE)
            .describe("Additional DHCP options"),
    ],
    mkey: None,
};

pub static SYSTEM_DHCP_SERVER: ResourceDef = ResourceDef {
    type_name: "fortios_system_dhcp_server",
    path: "system.dhcp/server",
    mkey: Some("fosid"),
    table: &SYSTEM_DHCP_SERVER_TABLE,
    description: "Configure DHCP servers",
};

// ============================================================================
// Cluster sync
// ============================================================================

static CUSTOM_SERVICE_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Service entry identifier"),
        FieldSpec::string("src_port_range").describe("Source port range to sync"),
        FieldSpec::string("dst_port_range").describe("Destination port range to sync"),
    ],
    mkey: Some("id"),
};

static SESSION_SYNC_FILTER_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::string("srcintf").len(0, 15),
        FieldSpec::string("dstintf").len(0, 15),
        FieldSpec::string("srcaddr"),
        FieldSpec::string("dstaddr"),
        FieldSpec::table("custom_service", &CUSTOM_SERVICE_TABLE)
            .describe("Only sessions matching these services are synced"),
    ],
    mkey: None,
};

static SYSTEM_CLUSTER_SYNC_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("sync_id")
            .api("sync-id")
            .computed()
            .describe("Sync filter identifier"),
        FieldSpec::string("peervd")
            .len(0, 31)
            .describe("Vdom that connects to the peer"),
        FieldSpec::string("peerip").describe("Peer cluster member address"),
        FieldSpec::string("ipsec_tunnel")
            .clear(ClearPolicy::Null)
            .describe("Tunnel carrying the sync traffic"),
        FieldSpec::int("hb_interval")
            .range(1, 20)
            .describe("Heartbeat interval in 100ms units"),
        FieldSpec::int("hb_lost_threshold")
            .range(1, 60)
            .describe("Lost heartbeats before the peer is declared down"),
        FieldSpec::table("syncvd", &NAME_MEMBER_TABLE)
            .describe("Vdoms whose sessions are synced"),
        FieldSpec::table("down_intfs_before_sess_sync", &NAME_MEMBER_TABLE)
            .describe("Interfaces held down until the initial sync finishes"),
        FieldSpec::table("session_sync_filter", &SESSION_SYNC_FILTER_TABLE)
            .describe("Which sessions are synchronized"),
    ],
    mkey: None,
};

pub static SYSTEM_CLUSTER_SYNC: ResourceDef = ResourceDef {
    type_name: "fortios_system_cluster_sync",
    path: "system/cluster-sync",
    mkey: Some("sync_id"),
    table: &SYSTEM_CLUSTER_SYNC_TABLE,
    description: "Configure FGSP session synchronization",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldKind;

    #[test]
    fn test_dhcp_mkey_maps_to_api_id() {
        let field = SYSTEM_DHCP_SERVER_TABLE
            .fields
            .iter()
            .find(|f| f.name == "fosid")
            .unwrap();
        assert_eq!(field.api_name(), "id");
    }

    #[test]
    fn test_cluster_sync_nests_two_levels() {
        let filter = SYSTEM_CLUSTER_SYNC_TABLE
            .fields
            .iter()
            .find(|f| f.name == "session_sync_filter")
            .unwrap();
        let FieldKind::Table(spec) = filter.kind else {
            panic!("session_sync_filter should be a table");
        };
        assert!(spec
            .fields
            .iter()
            .any(|f| matches!(f.kind, FieldKind::Table(_)) && f.name == "custom_service"));
    }
}
