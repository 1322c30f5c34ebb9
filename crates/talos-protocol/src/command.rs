//! 运动命令代码与分类
//!
//! 控制器通过命令寄存器接收一个封闭的整数代码集合。代码分为两类：
//!
//! - **带位姿命令**：点到点/直线/圆弧/多关节运动，派发前必须写入
//!   目标位姿载荷；
//! - **无位姿命令**：全关节原点复归、连续 JOG、停止，不得伴随
//!   位姿写入。
//!
//! 分类由 [`RobotCommand::requires_pose`] 给出，派发层在每次下发前
//! 据此校验。

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ProtocolError;

/// 机器人命令代码（命令寄存器的合法取值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RobotCommand {
    // 单步 JOG：外部轴 1~6（代码 1~12）
    JogExt1Plus = 1,
    JogExt1Minus = 2,
    JogExt2Plus = 3,
    JogExt2Minus = 4,
    JogExt3Plus = 5,
    JogExt3Minus = 6,
    JogExt4Plus = 7,
    JogExt4Minus = 8,
    JogExt5Plus = 9,
    JogExt5Minus = 10,
    JogExt6Plus = 11,
    JogExt6Minus = 12,

    // 单步 JOG：关节 J1~J4（代码 25~32）
    JogJ1Plus = 25,
    JogJ1Minus = 26,
    JogJ2Plus = 27,
    JogJ2Minus = 28,
    JogJ3Plus = 29,
    JogJ3Minus = 30,
    JogJ4Plus = 31,
    JogJ4Minus = 32,

    // 单步 JOG：笛卡尔（代码 201~212）
    JogXPlus = 201,
    JogXMinus = 202,
    JogYPlus = 203,
    JogYMinus = 204,
    JogZPlus = 205,
    JogZMinus = 206,
    JogRxPlus = 207,
    JogRxMinus = 208,
    JogRyPlus = 209,
    JogRyMinus = 210,
    JogRzPlus = 211,
    JogRzMinus = 212,

    // 运动命令（代码 301~307）
    MovP = 301,
    MovL = 302,
    MultiMovJ = 305,
    MArchP = 306,
    MArchL = 307,

    // 单轴定位（代码 312~321）
    GotoJ1 = 312,
    GotoJ2 = 313,
    GotoJ3 = 314,
    GotoJ4 = 315,
    GotoExt1 = 316,
    GotoExt2 = 317,
    GotoExt3 = 318,
    GotoExt4 = 319,
    GotoExt5 = 320,
    GotoExt6 = 321,

    // 连续 JOG：外部轴 1~6（代码 401~412）
    ContinuousJogExt1Plus = 401,
    ContinuousJogExt1Minus = 402,
    ContinuousJogExt2Plus = 403,
    ContinuousJogExt2Minus = 404,
    ContinuousJogExt3Plus = 405,
    ContinuousJogExt3Minus = 406,
    ContinuousJogExt4Plus = 407,
    ContinuousJogExt4Minus = 408,
    ContinuousJogExt5Plus = 409,
    ContinuousJogExt5Minus = 410,
    ContinuousJogExt6Plus = 411,
    ContinuousJogExt6Minus = 412,

    // 连续 JOG：关节 J1~J4（代码 425~432）
    ContinuousJogJ1Plus = 425,
    ContinuousJogJ1Minus = 426,
    ContinuousJogJ2Plus = 427,
    ContinuousJogJ2Minus = 428,
    ContinuousJogJ3Plus = 429,
    ContinuousJogJ3Minus = 430,
    ContinuousJogJ4Plus = 431,
    ContinuousJogJ4Minus = 432,

    // 连续 JOG：笛卡尔（代码 601~612）
    ContinuousJogXPlus = 601,
    ContinuousJogXMinus = 602,
    ContinuousJogYPlus = 603,
    ContinuousJogYMinus = 604,
    ContinuousJogZPlus = 605,
    ContinuousJogZMinus = 606,
    ContinuousJogRxPlus = 607,
    ContinuousJogRxMinus = 608,
    ContinuousJogRyPlus = 609,
    ContinuousJogRyMinus = 610,
    ContinuousJogRzPlus = 611,
    ContinuousJogRzMinus = 612,

    // 停止（代码 1000）
    MotionStop = 1000,

    // 原点复归（代码 1400~1411）
    HomeAllSequenced = 1400,
    HomeJ1 = 1401,
    HomeJ2 = 1402,
    HomeJ3 = 1403,
    HomeJ4 = 1404,
    HomeAllJoints = 1405,
    HomeExt1 = 1406,
    HomeExt2 = 1407,
    HomeExt3 = 1408,
    HomeExt4 = 1409,
    HomeExt5 = 1410,
    HomeExt6 = 1411,
}

impl RobotCommand {
    /// 从寄存器值解析命令代码
    pub fn from_code(code: u16) -> Result<Self, ProtocolError> {
        Self::try_from(code).map_err(|_| ProtocolError::UnknownCommand { code })
    }

    /// 命令的寄存器值
    pub fn code(self) -> u16 {
        self.into()
    }

    /// 是否为无位姿命令
    ///
    /// 无位姿集合：停止、全关节原点复归、笛卡尔连续 JOG（601~612）
    /// 与外部轴 1~3 的连续 JOG（401~406）。集合外的命令派发时必须
    /// 提供目标位姿。
    pub fn is_positionless(self) -> bool {
        matches!(
            self,
            Self::MotionStop
                | Self::HomeAllJoints
                | Self::ContinuousJogXPlus
                | Self::ContinuousJogXMinus
                | Self::ContinuousJogYPlus
                | Self::ContinuousJogYMinus
                | Self::ContinuousJogZPlus
                | Self::ContinuousJogZMinus
                | Self::ContinuousJogRxPlus
                | Self::ContinuousJogRxMinus
                | Self::ContinuousJogRyPlus
                | Self::ContinuousJogRyMinus
                | Self::ContinuousJogRzPlus
                | Self::ContinuousJogRzMinus
                | Self::ContinuousJogExt1Plus
                | Self::ContinuousJogExt1Minus
                | Self::ContinuousJogExt2Plus
                | Self::ContinuousJogExt2Minus
                | Self::ContinuousJogExt3Plus
                | Self::ContinuousJogExt3Minus
        )
    }

    /// 是否为带位姿命令（派发前必须写入目标位姿）
    pub fn requires_pose(self) -> bool {
        !self.is_positionless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(RobotCommand::MovP.code(), 301);
        assert_eq!(RobotCommand::MovL.code(), 302);
        assert_eq!(RobotCommand::MotionStop.code(), 1000);
        assert_eq!(RobotCommand::HomeAllJoints.code(), 1405);
        assert_eq!(RobotCommand::ContinuousJogRzMinus.code(), 612);
    }

    #[test]
    fn test_from_code() {
        assert_eq!(RobotCommand::from_code(301).unwrap(), RobotCommand::MovP);
        assert_eq!(
            RobotCommand::from_code(999).unwrap_err(),
            ProtocolError::UnknownCommand { code: 999 }
        );
    }

    #[test]
    fn test_positionless_partition() {
        // 无位姿命令
        assert!(RobotCommand::MotionStop.is_positionless());
        assert!(RobotCommand::HomeAllJoints.is_positionless());
        assert!(RobotCommand::ContinuousJogXPlus.is_positionless());
        assert!(RobotCommand::ContinuousJogRzMinus.is_positionless());
        assert!(RobotCommand::ContinuousJogExt3Minus.is_positionless());

        // 带位姿命令
        assert!(RobotCommand::MovP.requires_pose());
        assert!(RobotCommand::MovL.requires_pose());
        assert!(RobotCommand::MultiMovJ.requires_pose());
        assert!(RobotCommand::MArchP.requires_pose());
        assert!(RobotCommand::MArchL.requires_pose());

        // 外部轴 4~6 的连续 JOG 不在无位姿集合内（控制器固件行为）
        assert!(RobotCommand::ContinuousJogExt4Plus.requires_pose());
        // 关节连续 JOG 同样不在集合内
        assert!(RobotCommand::ContinuousJogJ1Plus.requires_pose());
    }

    #[test]
    fn test_partition_is_exhaustive() {
        // 无位姿集合恰好 20 个代码
        let positionless: Vec<u16> = [1000u16, 1405]
            .into_iter()
            .chain(601..=612)
            .chain(401..=406)
            .collect();
        for code in positionless {
            assert!(RobotCommand::from_code(code).unwrap().is_positionless());
        }
    }
}
