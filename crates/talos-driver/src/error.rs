//! 驱动层错误类型定义

use talos_modbus::TransportError;
use talos_protocol::{ErrorSnapshot, ProtocolError, RobotCommand};
use thiserror::Error;

/// 驱动层错误类型
///
/// 就绪性失败（重试耗尽后机器人仍未就绪）不在此列——那是轮询控制
/// 回路里的常规结果，以布尔值 / [`MotionOutcome`](crate::MotionOutcome)
/// 的形式返回给调用方。
#[derive(Error, Debug)]
pub enum DriverError {
    /// 寄存器读写失败（传输层错误，立即上浮，本层不重试）
    #[error("Register 0x{address:04X} access failed: {source}")]
    Communication {
        address: u16,
        #[source]
        source: TransportError,
    },

    /// 建立控制器连接失败
    #[error("Failed to connect to controller: {0}")]
    Connect(#[from] TransportError),

    /// 协议层错误（寄存器块长度、未知代码等）
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// 调用方参数越界（任何寄存器写入发生之前拒绝）
    #[error("Invalid parameter '{param}': {reason}")]
    InvalidParameter { param: &'static str, reason: String },

    /// 带位姿命令未提供目标位姿
    #[error("Command {command:?} requires a target pose")]
    CommandRequiresPose { command: RobotCommand },

    /// 机器人本体报告故障（致命；恢复只能走 prepare_for_motion）
    #[error("Robot fault: {snapshot}")]
    RobotFault { snapshot: ErrorSnapshot },

    /// 等待被取消令牌中止
    #[error("Operation cancelled")]
    Cancelled,

    /// 带期限的等待超时
    #[error("Timed out after {timeout_ms}ms waiting for target position")]
    Timeout { timeout_ms: u64 },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DriverError::Communication {
            address: 0x0324,
            source: TransportError::Disconnected,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("0x0324"));

        let err = DriverError::CommandRequiresPose {
            command: RobotCommand::MovP,
        };
        assert!(format!("{}", err).contains("MovP"));

        let err = DriverError::RobotFault {
            snapshot: ErrorSnapshot {
                controller: 3,
                group: 0,
                joints: [0; 6],
            },
        };
        assert!(format!("{}", err).contains("controller error 0x0003"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DriverError>();
    }
}
