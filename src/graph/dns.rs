//! Custom-domain binding into a pre-existing hosted zone.

use serde::Serialize;

use crate::config::ConfigValue;

/// Name of the alias record created under the hosted zone.
pub const DNS_RECORD_NAME: &str = "api";

/// Record types supported by the binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Alias A record.
    A,
}

/// A hosted zone imported by reference.
///
/// The zone pre-exists; this system never creates or mutates one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostedZoneRef {
    /// Logical id of the import.
    pub logical_id: String,
    /// Zone id, resolved at apply time.
    pub zone_id: ConfigValue,
    /// Zone name, resolved at apply time.
    pub zone_name: ConfigValue,
}

/// An alias record pointing at the distribution's edge domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DnsRecord {
    /// Logical id of the record.
    pub logical_id: String,
    /// Record name under the zone.
    pub record_name: String,
    /// Record type.
    pub record_type: RecordType,
    /// Logical id of the imported zone.
    pub zone: String,
    /// Alias target, resolved at apply time.
    pub target: ConfigValue,
}
