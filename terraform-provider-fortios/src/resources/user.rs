//! User and authentication configuration objects.

use super::ResourceDef;
use crate::mapping::{ClearPolicy, FieldSpec, TableSpec};

// ============================================================================
// User group
// ============================================================================

static MEMBER_TABLE: TableSpec = TableSpec {
    fields: &[FieldSpec::string("name")
        .required()
        .len(1, 79)
        .describe("Local user or remote server object name")],
    mkey: Some("name"),
};

static MATCH_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Match entry identifier"),
        FieldSpec::string("server_name")
            .len(1, 35)
            .describe("Remote auth server this rule applies to"),
        FieldSpec::string("group_name")
            .len(1, 511)
            .describe("Group name on the remote server"),
    ],
    mkey: Some("id"),
};

static GUEST_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::int("id").computed().describe("Guest entry identifier"),
        FieldSpec::string("user_id").len(0, 64).describe("Guest login"),
        FieldSpec::string("name").len(0, 64),
        FieldSpec::string("password").sensitive(),
        FieldSpec::string("mobile_phone").len(0, 35),
        FieldSpec::string("email").len(0, 64),
        FieldSpec::string("expiration").describe("Account expiry timestamp"),
    ],
    mkey: Some("id"),
};

static USER_GROUP_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::string("name")
            .required()
            .len(1, 35)
            .describe("Group name"),
        FieldSpec::int("fosid").api("id").computed().describe("Group identifier"),
        FieldSpec::string("group_type")
            .describe("firewall, fsso-service, rsso, or guest"),
        FieldSpec::int("authtimeout")
            .range(0, 43_200)
            .describe("Idle timeout in minutes, 0 for the global default"),
        FieldSpec::string("auth_concurrent_override")
            .describe("Override the global concurrent-login limit"),
        FieldSpec::int("auth_concurrent_value")
            .range(0, 100)
            .describe("Concurrent logins allowed per user"),
        FieldSpec::string("http_digest_realm")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("Realm attribute for digest authentication"),
        FieldSpec::string("sso_attribute_value")
            .len(0, 511)
            .clear(ClearPolicy::Null)
            .describe("RADIUS class attribute for RSSO groups"),
        FieldSpec::table("member", &MEMBER_TABLE)
            .describe("Users and remote servers in this group"),
        FieldSpec::table("match", &MATCH_TABLE)
            .describe("Remote group matches"),
        FieldSpec::table("guest", &GUEST_TABLE)
            .describe("Guest accounts for guest groups"),
    ],
    mkey: None,
};

pub static USER_GROUP: ResourceDef = ResourceDef {
    type_name: "fortios_user_group",
    path: "user/group",
    mkey: Some("name"),
    table: &USER_GROUP_TABLE,
    description: "Configure user groups",
};

// ============================================================================
// Local user
// ============================================================================

static USER_LOCAL_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::string("name")
            .required()
            .len(1, 64)
            .describe("User name"),
        FieldSpec::int("fosid").api("id").computed().describe("User identifier"),
        FieldSpec::string("status").describe("Allow or block logins"),
        FieldSpec::string("type")
            .required()
            .describe("password, radius, tacacs+, or ldap"),
        FieldSpec::string("passwd").sensitive().describe("Local password"),
        FieldSpec::string("ldap_server")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("LDAP server for remote authentication"),
        FieldSpec::string("radius_server")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("RADIUS server for remote authentication"),
        FieldSpec::string("two_factor")
            .describe("disable, fortitoken, email, or sms"),
        FieldSpec::string("email_to")
            .len(0, 63)
            .clear(ClearPolicy::Null)
            .describe("Destination for two-factor email codes"),
        FieldSpec::string("sms_phone")
            .len(0, 15)
            .clear(ClearPolicy::Null)
            .describe("Destination for two-factor SMS codes"),
    ],
    mkey: None,
};

pub static USER_LOCAL: ResourceDef = ResourceDef {
    type_name: "fortios_user_local",
    path: "user/local",
    mkey: Some("name"),
    table: &USER_LOCAL_TABLE,
    description: "Configure local users",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldKind;

    #[test]
    fn test_guest_password_is_sensitive() {
        let guest = USER_GROUP_TABLE
            .fields
            .iter()
            .find(|f| f.name == "guest")
            .unwrap();
        let FieldKind::Table(spec) = guest.kind else {
            panic!("guest should be a table");
        };
        let password = spec.fields.iter().find(|f| f.name == "password").unwrap();
        assert!(password.sensitive);
    }

    #[test]
    fn test_local_user_password_never_cleared() {
        let passwd = USER_LOCAL_TABLE
            .fields
            .iter()
            .find(|f| f.name == "passwd")
            .unwrap();
        assert!(passwd.sensitive);
        assert_eq!(passwd.clear, ClearPolicy::Omit);
    }
}
