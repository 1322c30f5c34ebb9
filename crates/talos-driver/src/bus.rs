//! 寄存器访问层
//!
//! 对传输层的快速失败（fail-fast）包装：每次调用即一次寄存器操作，
//! 失败立即映射为带地址的 [`DriverError::Communication`]，不做重试
//! （重试是上层的策略决定），除单次寄存器操作外无副作用。
//!
//! 传输连接放在互斥锁之后：看门狗线程与运动线程共享同一条
//! Modbus-TCP 套接字时，请求/响应配对由这把锁保证串行。

use parking_lot::Mutex;
use talos_modbus::ModbusTransport;

use crate::error::{DriverError, Result};

/// 互斥保护的寄存器总线
pub struct RegisterBus<T> {
    transport: Mutex<T>,
}

impl<T: ModbusTransport> RegisterBus<T> {
    /// 接管一条传输连接
    pub fn new(transport: T) -> Self {
        Self {
            transport: Mutex::new(transport),
        }
    }

    /// 读取 `count` 个保持寄存器
    pub fn read_registers(&self, addr: u16, count: u16) -> Result<Vec<u16>> {
        self.transport
            .lock()
            .read_holding_registers(addr, count)
            .map_err(|source| DriverError::Communication { address: addr, source })
    }

    /// 读取单个保持寄存器
    pub fn read_register(&self, addr: u16) -> Result<u16> {
        let registers = self.read_registers(addr, 1)?;
        Ok(registers[0])
    }

    /// 写入单个保持寄存器
    pub fn write_register(&self, addr: u16, value: u16) -> Result<()> {
        self.transport
            .lock()
            .write_register(addr, value)
            .map_err(|source| DriverError::Communication { address: addr, source })
    }

    /// 写入连续多个保持寄存器
    pub fn write_registers(&self, addr: u16, values: &[u16]) -> Result<()> {
        self.transport
            .lock()
            .write_registers(addr, values)
            .map_err(|source| DriverError::Communication { address: addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talos_modbus::MockTransport;

    #[test]
    fn test_read_write_through() {
        let mock = MockTransport::new();
        let bus = RegisterBus::new(mock.clone());

        bus.write_register(0x10, 42).unwrap();
        assert_eq!(bus.read_register(0x10).unwrap(), 42);

        bus.write_registers(0x20, &[1, 2]).unwrap();
        assert_eq!(bus.read_registers(0x20, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_read_failure_carries_address() {
        let mock = MockTransport::new();
        mock.queue_read_error(0x01FF, "link down");
        let bus = RegisterBus::new(mock);

        match bus.read_register(0x01FF) {
            Err(DriverError::Communication { address, .. }) => assert_eq!(address, 0x01FF),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
