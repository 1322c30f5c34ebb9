//! # Talos Modbus 传输层
//!
//! Modbus-TCP 传输抽象，提供统一的保持寄存器读写接口。
//!
//! 驱动层只依赖 [`ModbusTransport`] trait；真实实现由 `tcp` feature
//! 下的 [`TcpTransport`]（tokio-modbus 同步客户端）提供，测试使用
//! `mock` feature 下的 [`MockTransport`]。
//!
//! 本层不做任何重试——重试属于上层的策略决定。

use thiserror::Error;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "tcp")]
pub use tcp::TcpTransport;

#[cfg(any(feature = "mock", test))]
pub mod mock;

#[cfg(any(feature = "mock", test))]
pub use mock::{MockTransport, WriteOp};

/// 传输层统一错误类型
#[derive(Error, Debug)]
pub enum TransportError {
    /// 套接字/IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 从站返回 Modbus 异常响应
    #[error("Modbus exception: {0}")]
    Exception(String),

    /// 连接已断开
    #[error("Transport disconnected")]
    Disconnected,

    /// 协议层面的其他失败（帧错误等）
    #[error("Modbus protocol error: {0}")]
    Protocol(String),
}

/// Modbus 保持寄存器传输接口（阻塞式）
///
/// 每个方法对应一次完整的请求/响应往返。实现必须保证单次调用内
/// 的请求与响应配对；跨线程共享一个连接时由调用方互斥保护。
pub trait ModbusTransport: Send {
    /// 读取 `count` 个保持寄存器
    fn read_holding_registers(&mut self, addr: u16, count: u16)
    -> Result<Vec<u16>, TransportError>;

    /// 写入单个保持寄存器
    fn write_register(&mut self, addr: u16, value: u16) -> Result<(), TransportError>;

    /// 写入连续多个保持寄存器
    fn write_registers(&mut self, addr: u16, values: &[u16]) -> Result<(), TransportError>;
}

// Box<dyn ...> 直接透传，便于驱动层做类型擦除
impl ModbusTransport for Box<dyn ModbusTransport> {
    fn read_holding_registers(
        &mut self,
        addr: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        (**self).read_holding_registers(addr, count)
    }

    fn write_register(&mut self, addr: u16, value: u16) -> Result<(), TransportError> {
        (**self).write_register(addr, value)
    }

    fn write_registers(&mut self, addr: u16, values: &[u16]) -> Result<(), TransportError> {
        (**self).write_registers(addr, values)
    }
}
