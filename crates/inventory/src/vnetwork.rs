//! Virtual network adapters, one per row of `tabvNetwork`.

use crate::coerce;
use crate::error::Result;
use crate::search::Row;
use serde::Serialize;
use std::fmt;

/// A VM's virtual network adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VNetwork {
    pub vm: String,
    pub adapter: String,
    network: String,
    pub switch: String,
    pub connected: bool,
    pub mac_address: String,
    pub power_state: String,
    ip_address: String,
}

impl VNetwork {
    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            vm: row.text("VM")?,
            adapter: row.text("Adapter")?,
            network: row.text("Network")?,
            switch: row.text("Switch")?,
            connected: coerce::to_bool(row.require("Connected")?),
            mac_address: row.text("Mac Address")?,
            power_state: row.text("Powerstate")?,
            ip_address: row.text("IP Address")?,
        })
    }

    /// Port group name; `None` when the adapter is not attached to one.
    #[must_use]
    pub fn network(&self) -> Option<&str> {
        (!self.network.is_empty()).then_some(self.network.as_str())
    }

    /// Guest IP addresses reported by VMware Tools.
    #[must_use]
    pub fn ip_addresses(&self) -> Vec<String> {
        if self.ip_address == "unknown" {
            return Vec::new();
        }
        coerce::split_list(&self.ip_address)
    }
}

impl fmt::Display for VNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.vm, self.adapter, self.network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(network: &str, ip: &str) -> Row {
        [
            ("VM", "vm01"),
            ("Powerstate", "poweredOn"),
            ("Adapter", "Vmxnet3"),
            ("Network", network),
            ("Switch", "dvSwitch0"),
            ("Connected", "True"),
            ("Mac Address", "00:50:56:aa:bb:cc"),
            ("IP Address", ip),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ip_addresses() {
        let nic = VNetwork::from_row(&row("VLAN10", "10.0.0.5, fe80::1")).unwrap();
        assert_eq!(nic.ip_addresses(), vec!["10.0.0.5", "fe80::1"]);
        assert!(nic.connected);
        assert_eq!(nic.network(), Some("VLAN10"));
        assert_eq!(nic.to_string(), "vm01,Vmxnet3,VLAN10");
    }

    #[test]
    fn test_unknown_or_empty_ip() {
        assert!(VNetwork::from_row(&row("VLAN10", "unknown")).unwrap().ip_addresses().is_empty());
        assert!(VNetwork::from_row(&row("VLAN10", "")).unwrap().ip_addresses().is_empty());
    }

    #[test]
    fn test_detached_adapter() {
        let nic = VNetwork::from_row(&row("", "")).unwrap();
        assert_eq!(nic.network(), None);
    }
}
