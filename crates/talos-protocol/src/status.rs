//! 状态寄存器的类型化解读
//!
//! 每个状态查询对应一个寄存器读取；本模块把裸寄存器值翻译成封闭
//! 枚举，并提供错误快照的组装与诊断文本。

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ProtocolError;
use crate::registers::JOINT_ERROR_BLOCK_LEN;

/// 到位标志（寄存器 0x031F）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum PoseFlag {
    /// 已到达目标位置
    InPosition = 1,
    /// 尚未到达目标位置
    Moving = 2,
}

/// 运动状态（寄存器 0x00E0）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum MotionState {
    /// 停止
    Idle = 0,
    /// 运动中
    Moving = 1,
}

/// 系统状态（寄存器 0x0138）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum SystemState {
    /// 一般状态
    Normal = 0,
    /// 机器人停止，功能性暂停触发
    StoppedPaused = 2,
    /// 机器人运动中，但功能性暂停触发
    MovingPaused = 3,
}

/// 操作模式（寄存器 0x0139）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum OperationMode {
    /// 非有线
    Unwired = 0,
    /// T1（速度限制 25%，可手自动）
    T1 = 1,
    /// T2（不限制速度，可手自动）
    T2 = 2,
    /// 自动模式（不限制速度，不可手动）
    Auto = 3,
}

/// 教导盒启用状态（寄存器 0x013B）
///
/// 教导盒持有控制权时远端无法操作机器人。
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum TeachPanelState {
    /// 已释放控制权
    Released = 0,
    /// 持有控制权
    Engaged = 1,
}

/// 教导盒模式（寄存器 0x013C）
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum TeachPanelMode {
    /// 手动模式
    Manual = 0,
    /// 自动模式
    Auto = 1,
}

/// 解析状态寄存器值，未定义的值映射为 [`ProtocolError::UnknownStatus`]
pub fn parse_status<T>(register: &'static str, value: u16) -> Result<T, ProtocolError>
where
    T: TryFromPrimitive<Primitive = u16>,
{
    T::try_from_primitive(value).map_err(|_| ProtocolError::UnknownStatus { register, value })
}

/// 机器人错误快照
///
/// 控制器错误码、机器人组错误码与 J1..J6 关节错误码。全零是唯一
/// 的"无错误"取值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorSnapshot {
    /// 控制器错误码
    pub controller: u16,
    /// 机器人组错误码
    pub group: u16,
    /// 关节错误码，J1..J6
    pub joints: [u16; 6],
}

impl ErrorSnapshot {
    /// 从裸寄存器组装快照
    ///
    /// `joint_block` 是 0x0140 起的 16 字原始块；J1..J6 对应其中的
    /// 末 4 字加首 2 字（控制器的寄存器布局如此）。
    pub fn from_raw(
        controller: u16,
        group: u16,
        joint_block: &[u16],
    ) -> Result<Self, ProtocolError> {
        if joint_block.len() != JOINT_ERROR_BLOCK_LEN as usize {
            return Err(ProtocolError::InvalidLength {
                expected: JOINT_ERROR_BLOCK_LEN as usize,
                actual: joint_block.len(),
            });
        }
        let joints = [
            joint_block[12],
            joint_block[13],
            joint_block[14],
            joint_block[15],
            joint_block[0],
            joint_block[1],
        ];
        Ok(Self {
            controller,
            group,
            joints,
        })
    }

    /// 是否无任何错误
    pub fn is_clear(&self) -> bool {
        self.controller == 0 && self.group == 0 && self.joints.iter().all(|&e| e == 0)
    }

    /// 构建人类可读的诊断文本，逐项列出非零错误字段
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        if self.controller != 0 {
            lines.push(format!("controller error 0x{:04X}", self.controller));
        }
        if self.group != 0 {
            lines.push(format!("robot group error 0x{:04X}", self.group));
        }
        for (i, &code) in self.joints.iter().enumerate() {
            if code != 0 {
                lines.push(format!("joint J{} error 0x{:04X}", i + 1, code));
            }
        }
        if lines.is_empty() {
            "no error".to_string()
        } else {
            lines.join("; ")
        }
    }
}

impl std::fmt::Display for ErrorSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        let flag: PoseFlag = parse_status("pose flag", 1).unwrap();
        assert_eq!(flag, PoseFlag::InPosition);

        let state: SystemState = parse_status("system state", 2).unwrap();
        assert_eq!(state, SystemState::StoppedPaused);

        let err = parse_status::<SystemState>("system state", 7).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnknownStatus {
                register: "system state",
                value: 7
            }
        );
    }

    #[test]
    fn test_snapshot_joint_reorder() {
        let mut block = [0u16; 16];
        block[12] = 11; // J1
        block[13] = 22; // J2
        block[14] = 33; // J3
        block[15] = 44; // J4
        block[0] = 55; // J5
        block[1] = 66; // J6
        let snap = ErrorSnapshot::from_raw(0, 0, &block).unwrap();
        assert_eq!(snap.joints, [11, 22, 33, 44, 55, 66]);
    }

    #[test]
    fn test_snapshot_is_clear() {
        let snap = ErrorSnapshot::from_raw(0, 0, &[0u16; 16]).unwrap();
        assert!(snap.is_clear());

        let snap = ErrorSnapshot {
            controller: 0,
            group: 0,
            joints: [0, 0, 0, 1, 0, 0],
        };
        assert!(!snap.is_clear());
    }

    #[test]
    fn test_snapshot_bad_block_length() {
        let err = ErrorSnapshot::from_raw(0, 0, &[0u16; 6]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidLength {
                expected: 16,
                actual: 6
            }
        );
    }

    #[test]
    fn test_describe() {
        let snap = ErrorSnapshot {
            controller: 0x0012,
            group: 0,
            joints: [0, 0, 0x0300, 0, 0, 0],
        };
        let text = snap.describe();
        assert!(text.contains("controller error 0x0012"));
        assert!(text.contains("joint J3 error 0x0300"));
        assert!(!text.contains("group"));

        assert_eq!(ErrorSnapshot::default().describe(), "no error");
    }
}
