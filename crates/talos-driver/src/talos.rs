//! 驱动主体
//!
//! 提供对外的 [`Talos`] 结构体：持有寄存器总线和驱动自身缓存的
//! 状态（数字输出字、最近一次运动命令的位姿备忘）。
//!
//! 一个驱动实例在其生命周期内独占一条传输连接。缓存只由驱动的
//! 公开操作改写（单一写者），构造时重置为默认值，不做持久化——
//! 驱动未缓存的一切状态以物理控制器为准。

use parking_lot::Mutex;

use talos_modbus::ModbusTransport;
use talos_protocol::registers::{
    REG_ACCELERATION, REG_COMMAND, REG_DECELERATION, REG_DIGITAL_OUTPUT, REG_SPEED,
};
use talos_protocol::{DigitalOutputWord, Pose, RobotCommand};
use tracing::{debug, info};

use crate::bus::RegisterBus;
use crate::cancel::CancelToken;
use crate::config::DriverConfig;
use crate::error::Result;

/// Talos 机械臂驱动（对外 API）
///
/// 设计上服务于单个运动下发线程；错误看门狗可以并发运行，因为它
/// 只读状态寄存器，从不触碰缓存。多个线程并发下发运动命令时的
/// 交错顺序不做任何保证，需要调用方自行串行化。
pub struct Talos<T: ModbusTransport> {
    /// 寄存器总线（互斥保护的共享传输连接）
    bus: RegisterBus<T>,
    /// 驱动配置
    config: DriverConfig,
    /// 数字输出字缓存（输出寄存器对应用侧只写，无法回读）
    output_word: Mutex<DigitalOutputWord>,
    /// 最近一次带位姿命令的目标位姿备忘（到位确认用）
    motion_memo: Mutex<Option<Pose>>,
}

impl<T: ModbusTransport> std::fmt::Debug for Talos<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Talos")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: ModbusTransport> Talos<T> {
    /// 接管传输连接，创建驱动实例
    ///
    /// 构造时校验配置，并把默认速度/加速度/减速度写入对应寄存器。
    ///
    /// # 错误
    ///
    /// - [`DriverError::InvalidParameter`](crate::DriverError::InvalidParameter):
    ///   配置取值越界
    /// - [`DriverError::Communication`](crate::DriverError::Communication):
    ///   默认参数写入失败
    pub fn new(transport: T, config: DriverConfig) -> Result<Self> {
        config.validate()?;

        let talos = Self {
            bus: RegisterBus::new(transport),
            output_word: Mutex::new(DigitalOutputWord::ZERO),
            motion_memo: Mutex::new(None),
            config,
        };

        talos.write_default_rates()?;
        info!("talos driver initialized");
        Ok(talos)
    }

    /// 使用默认配置创建驱动实例
    pub fn with_defaults(transport: T) -> Result<Self> {
        Self::new(transport, DriverConfig::default())
    }

    /// 当前驱动配置
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub(crate) fn bus(&self) -> &RegisterBus<T> {
        &self.bus
    }

    pub(crate) fn motion_memo(&self) -> Option<Pose> {
        *self.motion_memo.lock()
    }

    pub(crate) fn remember_motion(&self, pose: Pose) {
        *self.motion_memo.lock() = Some(pose);
    }

    fn write_default_rates(&self) -> Result<()> {
        self.bus
            .write_register(REG_SPEED, self.config.default_speed as u16)?;
        self.bus
            .write_register(REG_ACCELERATION, self.config.default_acceleration as u16)?;
        self.bus
            .write_register(REG_DECELERATION, self.config.default_deceleration as u16)?;
        Ok(())
    }

    // ========================================================================
    // 数字输出
    // ========================================================================

    /// 打开吸盘（置位配置的输出位并写出整个输出字）
    pub fn suction_on(&self) -> Result<()> {
        let next = self.output_word().set(self.config.suction_output_bit)?;
        self.apply_output(next)
    }

    /// 关闭吸盘
    pub fn suction_off(&self) -> Result<()> {
        let next = self.output_word().clear(self.config.suction_output_bit)?;
        self.apply_output(next)
    }

    /// 以完整的 16 位值替换数字输出字
    pub fn set_output_word(&self, word: u16) -> Result<()> {
        self.apply_output(DigitalOutputWord::new(word))
    }

    /// 设置/清除单个输出位（`bit` 必须在 0~15 内）
    pub fn set_output_bit(&self, bit: u8, value: bool) -> Result<()> {
        let next = self.output_word().with_bit(bit, value)?;
        self.apply_output(next)
    }

    /// 最近一次成功写出的输出字（驱动缓存）
    pub fn output_word(&self) -> DigitalOutputWord {
        *self.output_word.lock()
    }

    /// 写出输出字；仅在写入成功后更新缓存，失败时缓存保持为
    /// 最后一次已知写出的值
    fn apply_output(&self, next: DigitalOutputWord) -> Result<()> {
        self.bus.write_register(REG_DIGITAL_OUTPUT, next.bits())?;
        *self.output_word.lock() = next;
        debug!(word = next.bits(), "digital output updated");
        Ok(())
    }

    // ========================================================================
    // 停止
    // ========================================================================

    /// 停止所有运动
    ///
    /// 写入停止命令；若驱动配置了默认阻塞，则等待控制器报告到位。
    pub fn motion_stop(&self) -> Result<()> {
        self.bus
            .write_register(REG_COMMAND, RobotCommand::MotionStop.code())?;
        info!("motion stop dispatched");
        if self.config.block {
            self.wait_until_in_position(&CancelToken::new())?;
        }
        Ok(())
    }
}
