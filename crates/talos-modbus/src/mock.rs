//! Mock 传输（无硬件依赖）
//!
//! 内存寄存器文件 + 写入日志 + 可脚本化的读响应，用于驱动层测试。
//! `MockTransport` 可 `Clone`，克隆体共享同一份状态：测试侧保留
//! 一个克隆用于脚本化与断言，驱动侧拿走另一个。

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::{ModbusTransport, TransportError};

/// 一次寄存器写入的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// 单寄存器写入
    Single { addr: u16, value: u16 },
    /// 多寄存器写入
    Multiple { addr: u16, values: Vec<u16> },
}

/// 脚本化的读响应
enum MockResponse {
    Data(Vec<u16>),
    Error(String),
}

#[derive(Default)]
struct MockState {
    registers: HashMap<u16, u16>,
    queued: HashMap<u16, VecDeque<MockResponse>>,
    write_errors: VecDeque<String>,
    journal: Vec<WriteOp>,
    read_counts: HashMap<u16, usize>,
}

/// 内存中的 Modbus 传输替身
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// 创建全零寄存器文件的 mock
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置单个寄存器的当前值
    pub fn set_register(&self, addr: u16, value: u16) {
        self.state.lock().unwrap().registers.insert(addr, value);
    }

    /// 从 `addr` 起设置连续寄存器
    pub fn set_registers(&self, addr: u16, values: &[u16]) {
        let mut state = self.state.lock().unwrap();
        for (i, &value) in values.iter().enumerate() {
            state.registers.insert(addr + i as u16, value);
        }
    }

    /// 为起始地址 `addr` 排队一次脚本化读响应（优先于寄存器文件）
    pub fn queue_read(&self, addr: u16, values: Vec<u16>) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(addr)
            .or_default()
            .push_back(MockResponse::Data(values));
    }

    /// 为起始地址 `addr` 排队一次读失败
    pub fn queue_read_error(&self, addr: u16, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .queued
            .entry(addr)
            .or_default()
            .push_back(MockResponse::Error(message.into()));
    }

    /// 让下一次写入失败（不记录日志，不改写寄存器文件）
    pub fn queue_write_error(&self, message: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .write_errors
            .push_back(message.into());
    }

    /// 全部写入记录（按发生顺序）
    pub fn writes(&self) -> Vec<WriteOp> {
        self.state.lock().unwrap().journal.clone()
    }

    /// 清空写入记录
    pub fn clear_writes(&self) {
        self.state.lock().unwrap().journal.clear();
    }

    /// 起始地址 `addr` 被读取的次数
    pub fn read_count(&self, addr: u16) -> usize {
        *self
            .state
            .lock()
            .unwrap()
            .read_counts
            .get(&addr)
            .unwrap_or(&0)
    }
}

impl ModbusTransport for MockTransport {
    fn read_holding_registers(
        &mut self,
        addr: u16,
        count: u16,
    ) -> Result<Vec<u16>, TransportError> {
        let mut state = self.state.lock().unwrap();
        *state.read_counts.entry(addr).or_insert(0) += 1;

        if let Some(queue) = state.queued.get_mut(&addr)
            && let Some(response) = queue.pop_front()
        {
            return match response {
                MockResponse::Data(values) => {
                    if values.len() != count as usize {
                        return Err(TransportError::Protocol(format!(
                            "scripted response length {} != requested {}",
                            values.len(),
                            count
                        )));
                    }
                    Ok(values)
                },
                MockResponse::Error(message) => Err(TransportError::Exception(message)),
            };
        }

        Ok((addr..addr + count)
            .map(|a| *state.registers.get(&a).unwrap_or(&0))
            .collect())
    }

    fn write_register(&mut self, addr: u16, value: u16) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.write_errors.pop_front() {
            return Err(TransportError::Exception(message));
        }
        state.registers.insert(addr, value);
        state.journal.push(WriteOp::Single { addr, value });
        Ok(())
    }

    fn write_registers(&mut self, addr: u16, values: &[u16]) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        if let Some(message) = state.write_errors.pop_front() {
            return Err(TransportError::Exception(message));
        }
        for (i, &value) in values.iter().enumerate() {
            state.registers.insert(addr + i as u16, value);
        }
        state.journal.push(WriteOp::Multiple {
            addr,
            values: values.to_vec(),
        });
        Ok(())
    }
}
