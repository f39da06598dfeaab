//! 本机地址解析
//!
//! 解析失败只影响 `host` 字段，告警照常投递。

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};

use crate::error::HostError;

/// 本机地址解析器
pub trait HostResolver: Send + Sync {
    fn resolve(&self) -> Result<String, HostError>;
}

impl<F> HostResolver for F
where
    F: Fn() -> Result<String, HostError> + Send + Sync,
{
    fn resolve(&self) -> Result<String, HostError> {
        self()
    }
}

/// 基于系统 hostname 的解析器：读取主机名并解析为 IP 地址
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn resolve(&self) -> Result<String, HostError> {
        let hostname = hostname::get()
            .map_err(HostError::Hostname)?
            .to_string_lossy()
            .into_owned();

        let addrs: Vec<SocketAddr> = (hostname.as_str(), 0)
            .to_socket_addrs()
            .map_err(|source| HostError::Lookup {
                hostname: hostname.clone(),
                source,
            })?
            .collect();

        pick_address(&addrs)
            .map(|ip| ip.to_string())
            .ok_or(HostError::NoAddress(hostname))
    }
}

/// 优先选择非回环 IPv4，其次任意非回环地址，最后回退到第一个地址
fn pick_address(addrs: &[SocketAddr]) -> Option<IpAddr> {
    let ips: Vec<IpAddr> = addrs.iter().map(SocketAddr::ip).collect();

    ips.iter()
        .find(|ip| ip.is_ipv4() && !ip.is_loopback())
        .or_else(|| ips.iter().find(|ip| !ip.is_loopback()))
        .or_else(|| ips.first())
        .copied()
}
