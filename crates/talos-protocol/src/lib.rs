//! # Talos Protocol
//!
//! 机械臂 Modbus 保持寄存器协议定义（无硬件依赖）
//!
//! ## 模块
//!
//! - `registers`: 寄存器地址常量定义
//! - `pose`: TCP 位姿定点数编码/解码
//! - `command`: 运动命令代码与分类
//! - `output`: 数字输出字（16 位位集）
//! - `status`: 状态寄存器的类型化解读
//!
//! ## 字节序
//!
//! 每个 32 位定点数占两个 16 位寄存器：寄存器内部为大端字节序
//! （Modbus 标准），寄存器对之间为小端字序（低位字在前）。

pub mod command;
pub mod output;
pub mod pose;
pub mod registers;
pub mod status;

// 重新导出常用类型
pub use command::RobotCommand;
pub use output::DigitalOutputWord;
pub use pose::Pose;
pub use status::{
    ErrorSnapshot, MotionState, OperationMode, PoseFlag, SystemState, TeachPanelMode,
    TeachPanelState,
};

use thiserror::Error;

/// 协议层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// 数字输出位索引超出 0~15
    #[error("Invalid digital output bit index: {bit} (expected 0-15)")]
    InvalidBitIndex { bit: u8 },

    /// 寄存器块长度不符
    #[error("Invalid register block length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// 未知的命令代码
    #[error("Unknown robot command code: {code}")]
    UnknownCommand { code: u16 },

    /// 状态寄存器出现未定义的值
    #[error("Unknown value {value} in status register {register}")]
    UnknownStatus { register: &'static str, value: u16 },
}
