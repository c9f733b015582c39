use std::fmt::{self, Display, Formatter};
use std::net::Ipv4Addr;

use hilink_xml::{request_document, request_node, WriteError, XmlNode};

use crate::defaults::DhcpDefaults;

/// The first three octets of a /24 LAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPrefix([u8; 3]);

impl NetworkPrefix {
    pub fn of(address: Ipv4Addr) -> Self {
        let [a, b, c, _] = address.octets();
        Self([a, b, c])
    }

    /// Address of `host` inside this network.
    pub fn host(&self, host: u8) -> Ipv4Addr {
        let [a, b, c] = self.0;
        Ipv4Addr::new(a, b, c, host)
    }
}

impl Display for NetworkPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{a}.{b}.{c}")
    }
}

/// LAN and DHCP server settings posted to `/api/dhcp/settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpSettings {
    pub lan_address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub network: NetworkPrefix,
    pub range_start: Ipv4Addr,
    pub range_end: Ipv4Addr,
    pub lease_time: u32,
    pub primary_dns: Ipv4Addr,
    pub secondary_dns: Ipv4Addr,
}

impl DhcpSettings {
    /// Derive the settings for a router that will live at `lan_address`.
    pub fn for_address(lan_address: Ipv4Addr, defaults: &DhcpDefaults) -> Self {
        let network = NetworkPrefix::of(lan_address);
        Self {
            lan_address,
            netmask: defaults.netmask,
            network,
            range_start: network.host(defaults.range_start_host),
            range_end: network.host(defaults.range_end_host),
            lease_time: defaults.lease_time,
            primary_dns: defaults.primary_dns,
            secondary_dns: defaults.secondary_dns,
        }
    }

    /// `<request>` fields in the order the firmware expects them.
    pub fn request_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("DhcpIPAddress", self.lan_address.to_string()),
            ("DhcpLanNetmask", self.netmask.to_string()),
            ("DhcpStatus", "1".to_string()),
            ("DhcpStartIPAddress", self.range_start.to_string()),
            ("DhcpEndIPAddress", self.range_end.to_string()),
            ("DhcpLeaseTime", self.lease_time.to_string()),
            ("DnsStatus", "1".to_string()),
            ("PrimaryDns", self.primary_dns.to_string()),
            ("SecondaryDns", self.secondary_dns.to_string()),
        ]
    }

    /// The settings as a `<request>` tree.
    pub fn request(&self) -> XmlNode {
        request_node(self.request_fields())
    }

    /// The XML body for the settings POST.
    pub fn payload(&self) -> Result<String, WriteError> {
        request_document(self.request_fields())
    }
}

/// A confirmed address change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangePlan {
    pub current: Ipv4Addr,
    pub new: Ipv4Addr,
    pub dhcp: DhcpSettings,
}

impl ChangePlan {
    pub fn new(current: Ipv4Addr, new: Ipv4Addr, defaults: &DhcpDefaults) -> Self {
        Self {
            current,
            new,
            dhcp: DhcpSettings::for_address(new, defaults),
        }
    }

    pub fn current_url(&self) -> String {
        format!("http://{}", self.current)
    }

    pub fn new_url(&self) -> String {
        format!("http://{}", self.new)
    }
}
