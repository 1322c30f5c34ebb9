//! 寄存器地址常量定义
//!
//! 控制器的全部可用保持寄存器，按功能分组。多字寄存器同时给出宽度常量。

/// 控制器的 Modbus unit id（从站地址）
pub const UNIT_ID: u8 = 2;

// ============================================================================
// 状态查询寄存器（只读）
// ============================================================================

/// 当前 TCP 位姿（6 × 32 位定点数）
pub const REG_TCP_POSE: u16 = 0x00F0;
/// TCP 位姿寄存器宽度
pub const TCP_POSE_LEN: u16 = 12;

/// 运动状态（0 停止，1 运动中）
pub const REG_MOTION_STATE: u16 = 0x00E0;

/// 到位标志（1 到位，2 未到位）
pub const REG_POSE_FLAG: u16 = 0x031F;

/// 控制器错误码（0 表示无错误）
pub const REG_CONTROLLER_ERROR: u16 = 0x01FF;

/// 机器人组错误码（0 表示无错误）
pub const REG_GROUP_ERROR: u16 = 0x01E0;

/// 关节错误码块（16 字，末 4 字 + 首 2 字对应 J1..J6）
pub const REG_JOINT_ERRORS: u16 = 0x0140;
/// 关节错误码块宽度
pub const JOINT_ERROR_BLOCK_LEN: u16 = 16;

/// 警告码
pub const REG_WARNING_CODE: u16 = 0x020E;

/// 系统状态（0 正常，2 停止+功能性暂停，3 运动中+功能性暂停）
pub const REG_SYSTEM_STATE: u16 = 0x0138;

/// 操作模式（0 非有线，1 T1，2 T2，3 自动）
pub const REG_OPERATION_MODE: u16 = 0x0139;

/// 教导盒启用状态（0 未启用，1 启用；启用时远端无法操作）
pub const REG_TEACH_PANEL_STATE: u16 = 0x013B;

/// 教导盒模式（0 手动，1 自动）
pub const REG_TEACH_PANEL_MODE: u16 = 0x013C;

// ============================================================================
// 运动控制寄存器（只写）
// ============================================================================

/// 命令代码
pub const REG_COMMAND: u16 = 0x0300;

/// 速度（0~100）
pub const REG_SPEED: u16 = 0x0324;

/// 加速度（0~100）
pub const REG_ACCELERATION: u16 = 0x030A;

/// 减速度（0~100）
pub const REG_DECELERATION: u16 = 0x030C;

/// 目标位姿载荷（6 × 32 位定点数）
pub const REG_TARGET_POSE: u16 = 0x0330;

/// 数字输出字（应用侧只写，无回读）
pub const REG_DIGITAL_OUTPUT: u16 = 0x02FE;

// ============================================================================
// 系统层寄存器（错误复位 / 伺服使能）
// ============================================================================

/// 轴错误复位块（8 字，全部写入 [`ERROR_RESET_WORD`]）
pub const REG_AXIS_ERROR_RESET: u16 = 0x0020;
/// 轴错误复位块宽度
pub const AXIS_ERROR_RESET_LEN: u16 = 8;

/// 系统错误复位块（4 字，全部写入 [`ERROR_RESET_WORD`]）
pub const REG_SYSTEM_ERROR_RESET: u16 = 0x0180;
/// 系统错误复位块宽度
pub const SYSTEM_ERROR_RESET_LEN: u16 = 4;

/// 复位序列的附加写入块（2 字，写零；控制器固件要求）
pub const REG_RESET_AUX: u16 = 0x0002;
/// 附加写入块宽度
pub const RESET_AUX_LEN: u16 = 2;

/// 1/2 轴伺服使能寄存器
pub const REG_SERVO_AXES_12: u16 = 0x0006;
/// 3/4 轴伺服使能寄存器
pub const REG_SERVO_AXES_34: u16 = 0x0007;
/// 5/6 轴伺服使能寄存器
pub const REG_SERVO_AXES_56: u16 = 0x0000;

/// 伺服使能字（每轴各占一个字节）
pub const SERVO_ENABLE_WORD: u16 = 0x0101;
/// 伺服失能字
pub const SERVO_DISABLE_WORD: u16 = 0x0000;
/// 错误复位字
pub const ERROR_RESET_WORD: u16 = 0x0101;
