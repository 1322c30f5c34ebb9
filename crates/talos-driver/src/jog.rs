//! 连续 JOG 便捷接口
//!
//! 把"轴 + 方向"映射到 601~612 的笛卡尔连续 JOG 命令代码。连续
//! JOG 在命令保持期间持续运动，调用方负责在松开时调用
//! [`jog_stop`](Talos::jog_stop)。

use talos_modbus::ModbusTransport;
use talos_protocol::RobotCommand;

use crate::error::Result;
use crate::motion::{MotionOptions, MotionOutcome};
use crate::talos::Talos;

/// 可 JOG 的笛卡尔轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogAxis {
    X,
    Y,
    Z,
    Rx,
    Ry,
    Rz,
}

/// JOG 方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogDirection {
    Positive,
    Negative,
}

impl JogAxis {
    /// 对应的连续 JOG 命令
    pub fn command(self, direction: JogDirection) -> RobotCommand {
        use JogDirection::{Negative, Positive};
        match (self, direction) {
            (Self::X, Positive) => RobotCommand::ContinuousJogXPlus,
            (Self::X, Negative) => RobotCommand::ContinuousJogXMinus,
            (Self::Y, Positive) => RobotCommand::ContinuousJogYPlus,
            (Self::Y, Negative) => RobotCommand::ContinuousJogYMinus,
            (Self::Z, Positive) => RobotCommand::ContinuousJogZPlus,
            (Self::Z, Negative) => RobotCommand::ContinuousJogZMinus,
            (Self::Rx, Positive) => RobotCommand::ContinuousJogRxPlus,
            (Self::Rx, Negative) => RobotCommand::ContinuousJogRxMinus,
            (Self::Ry, Positive) => RobotCommand::ContinuousJogRyPlus,
            (Self::Ry, Negative) => RobotCommand::ContinuousJogRyMinus,
            (Self::Rz, Positive) => RobotCommand::ContinuousJogRzPlus,
            (Self::Rz, Negative) => RobotCommand::ContinuousJogRzMinus,
        }
    }
}

impl<T: ModbusTransport> Talos<T> {
    /// 沿指定轴/方向开始连续 JOG（非阻塞，不做就绪重试）
    pub fn jog(&self, axis: JogAxis, direction: JogDirection) -> Result<MotionOutcome> {
        let options = MotionOptions {
            retry: false,
            blocking: Some(false),
            ..Default::default()
        };
        self.send_motion_command(axis.command(direction), None, &options)
    }

    /// 结束连续 JOG（等价于停止命令）
    pub fn jog_stop(&self) -> Result<()> {
        self.motion_stop()
    }
}
