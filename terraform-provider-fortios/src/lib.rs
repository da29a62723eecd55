//! Terraform Provider for FortiOS
//!
//! Exposes FortiGate configuration objects (DHCP servers, firewall
//! policies, user groups, proxy addresses, ...) as Terraform resources and
//! data sources. Every object type is described by a declarative field
//! table; one generic engine handles schema generation, CRUD dispatch, and
//! the translation between Terraform state and the device's REST API.

pub mod mapping;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod value;
