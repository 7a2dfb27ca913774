//! Network listener utilities.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create the proxy's TCP listener.
///
/// Built through socket2 so SO_REUSEADDR can be set before bind, which lets
/// a restarted proxy reclaim its port without waiting out TIME_WAIT.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(1024)?; // Backlog size

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
