use std::net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use log::debug;

/// Whether something accepts TCP connections at `addr` within `timeout`.
pub fn tcp_reachable(addr: SocketAddr, timeout: Duration) -> bool {
    if timeout.is_zero() {
        return false;
    }
    match TcpStream::connect_timeout(&addr, timeout) {
        Ok(_) => true,
        Err(err) => {
            debug!("{addr} not reachable: {err}");
            false
        }
    }
}

/// Whether the host answers HTTP on port 80.
pub fn http_host_reachable(host: IpAddr, timeout: Duration) -> bool {
    tcp_reachable(SocketAddr::new(host, 80), timeout)
}

/// Whether the server behind an `http://host:port/...` URL accepts
/// connections. Unparseable URLs count as unreachable.
pub fn endpoint_reachable(endpoint: &str, timeout: Duration) -> bool {
    let Some(authority) = authority(endpoint) else {
        debug!("cannot read host from WebDriver endpoint {endpoint}");
        return false;
    };
    match authority.to_socket_addrs() {
        Ok(addrs) => addrs.into_iter().any(|addr| tcp_reachable(addr, timeout)),
        Err(err) => {
            debug!("cannot resolve {authority}: {err}");
            false
        }
    }
}

/// `host:port` of an http(s) URL, with the scheme's default port filled in.
fn authority(endpoint: &str) -> Option<String> {
    let (rest, default_port) = if let Some(rest) = endpoint.strip_prefix("http://") {
        (rest, 80)
    } else if let Some(rest) = endpoint.strip_prefix("https://") {
        (rest, 443)
    } else {
        (endpoint, 80)
    };
    let host = rest.split('/').next().filter(|host| !host.is_empty())?;
    if host.rsplit_once(':').is_some_and(|(_, port)| port.parse::<u16>().is_ok()) {
        Some(host.to_string())
    } else {
        Some(format!("{host}:{default_port}"))
    }
}
