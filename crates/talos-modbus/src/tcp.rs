//! Modbus-TCP 后端（tokio-modbus 同步客户端）
//!
//! 对 `tokio_modbus::client::sync::Context` 的薄适配：建立到控制器
//! 的 TCP 连接并绑定 unit id，把嵌套的 `Result<Result<T, Exception>>`
//! 展平成本层的 [`TransportError`]。连接随 Context 析构关闭。

use std::net::SocketAddr;

use tokio_modbus::Slave;
use tokio_modbus::client::sync::{Context, Reader, Writer, tcp};
use tracing::debug;

use crate::{ModbusTransport, TransportError};

/// 基于 TCP 套接字的 Modbus 传输
pub struct TcpTransport {
    ctx: Context,
    addr: SocketAddr,
}

impl TcpTransport {
    /// 连接控制器并绑定 unit id
    pub fn connect(addr: SocketAddr, unit_id: u8) -> Result<Self, TransportError> {
        let ctx = tcp::connect_slave(addr, Slave(unit_id))
            .map_err(|e| TransportError::Io(std::io::Error::other(e.to_string())))?;
        debug!(%addr, unit_id, "modbus-tcp connected");
        Ok(Self { ctx, addr })
    }

    /// 对端地址
    pub fn peer_addr(&self) -> SocketAddr {
        self.addr
    }
}

/// 展平 tokio-modbus 的双层结果：外层是传输失败，内层是从站异常
fn flatten<T, X, E>(result: Result<Result<T, X>, E>) -> Result<T, TransportError>
where
    X: std::fmt::Display,
    E: std::fmt::Display,
{
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(exception)) => Err(TransportError::Exception(exception.to_string())),
        Err(error) => Err(TransportError::Protocol(error.to_string())),
    }
}

impl ModbusTransport for TcpTransport {
    fn read_holding_registers(
        &mut self,
        addr: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        flatten(self.ctx.read_holding_registers(addr, count))
    }

    fn write_register(&mut self, addr: u16, value: u16) -> Result<(), TransportError> {
        flatten(self.ctx.write_single_register(addr, value))
    }

    fn write_registers(&mut self, addr: u16, values: &[u16]) -> Result<(), TransportError> {
        flatten(self.ctx.write_multiple_registers(addr, values))
    }
}
