//! # Talos Driver
//!
//! 本模块提供 Talos 机械臂的控制驱动功能，包括：
//! - 寄存器访问（互斥串行的共享传输连接）
//! - 状态查询与就绪性判定
//! - 运动命令派发与到位等待（状态机式的固定派发顺序）
//! - 自动复归（错误复位 + 伺服使能 + 有界重试）
//! - 错误监控看门狗（后台线程，只读轮询）
//!
//! # 并发模型
//!
//! 一个驱动实例服务于单个运动下发线程；[`ErrorWatchdog`] 可以
//! 并发运行，因为它只读状态。共享传输连接由寄存器总线内部的
//! 互斥锁串行化。

mod builder;
mod bus;
mod cancel;
mod config;
mod error;
mod jog;
mod motion;
mod readiness;
mod status;
mod talos;
mod watchdog;

pub use builder::TalosBuilder;
pub use bus::RegisterBus;
pub use cancel::CancelToken;
pub use config::DriverConfig;
pub use error::{DriverError, Result};
pub use jog::{JogAxis, JogDirection};
pub use motion::{MotionOptions, MotionOutcome};
pub use talos::Talos;
pub use watchdog::ErrorWatchdog;

// 重新导出协议层常用类型，调用方通常只需要依赖本 crate
pub use talos_protocol::{
    DigitalOutputWord, ErrorSnapshot, MotionState, OperationMode, Pose, PoseFlag, RobotCommand,
    SystemState, TeachPanelMode, TeachPanelState,
};

#[cfg(feature = "tcp")]
pub use talos_modbus::TcpTransport;
