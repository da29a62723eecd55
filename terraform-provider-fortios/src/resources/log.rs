//! Logging configuration objects.

use super::{ResourceDef, NAME_MEMBER_TABLE};
use crate::mapping::{ClearPolicy, FieldSpec, TableSpec};

static LOG_FORTIANALYZER_SETTING_TABLE: TableSpec = TableSpec {
    fields: &[
        FieldSpec::string("status").describe("Enable log forwarding"),
        FieldSpec::string("server")
            .len(0, 127)
            .clear(ClearPolicy::Null)
            .describe("FortiAnalyzer address"),
        FieldSpec::string("certificate")
            .len(0, 35)
            .clear(ClearPolicy::Null)
            .describe("Certificate used for device authentication"),
        FieldSpec::string("source_ip")
            .clear(ClearPolicy::Null)
            .describe("Source address for log connections"),
        FieldSpec::string("enc_algorithm").describe("high-medium, high, or low"),
        FieldSpec::string("ssl_min_proto_version")
            .describe("Lowest TLS version accepted"),
        FieldSpec::string("hmac_algorithm").describe("sha256 or sha1"),
        FieldSpec::string("reliable").describe("Use reliable (TCP) log transport"),
        FieldSpec::string("priority").describe("default or low"),
        FieldSpec::int("conn_timeout")
            .range(1, 3_600)
            .describe("Connection timeout in seconds"),
        FieldSpec::int("monitor_keepalive_period")
            .range(1, 120)
            .describe("Seconds between OFTP keepalives"),
        FieldSpec::int("monitor_failure_retry_period")
            .range(1, 86_400)
            .describe("Seconds between reconnect attempts"),
        FieldSpec::int("max_log_rate")
            .range(0, 100_000)
            .describe("Log rate cap in lines per second, 0 unlimited"),
        FieldSpec::string("upload_option")
            .describe("store-and-upload, realtime, or a schedule"),
        FieldSpec::string("upload_interval").describe("daily, weekly, or monthly"),
        FieldSpec::string("upload_day").describe("Day of week or month to upload"),
        FieldSpec::string("upload_time").describe("Time of day to upload"),
        FieldSpec::string("access_config")
            .describe("Let the FortiAnalyzer push log settings"),
        FieldSpec::table("serial", &NAME_MEMBER_TABLE)
            .describe("Serial numbers of accepted FortiAnalyzers"),
    ],
    mkey: None,
};

/// Exactly one of these exists per vdom; apply is an upsert and destroy
/// resets every field instead of deleting.
pub static LOG_FORTIANALYZER_SETTING: ResourceDef = ResourceDef {
    type_name: "fortios_log_fortianalyzer_setting",
    path: "log.fortianalyzer/setting",
    mkey: None,
    table: &LOG_FORTIANALYZER_SETTING_TABLE,
    description: "Global FortiAnalyzer log forwarding settings",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::reset_body;
    use crate::value::Value;

    #[test]
    fn test_reset_body_covers_every_setting() {
        let body = reset_body(&LOG_FORTIANALYZER_SETTING_TABLE);
        let fields = body.as_object().unwrap();
        assert_eq!(fields.len(), LOG_FORTIANALYZER_SETTING_TABLE.fields.len());
        assert_eq!(fields.get("server"), Some(&Value::Null));
        assert_eq!(fields.get("serial"), Some(&Value::List(Vec::new())));
    }
}
