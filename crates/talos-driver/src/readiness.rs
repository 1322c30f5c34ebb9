//! 错误复位、伺服使能与自动复归
//!
//! `prepare_for_motion` 是一次能力探测：复位错误锁存、使能全部
//! 伺服轴、检查就绪，重试预算耗尽返回 `false`——"还没就绪"是
//! 轮询控制回路里的常规可上报结果，不是异常。通信失败仍按错误
//! 上浮。

use std::time::Duration;

use talos_modbus::ModbusTransport;
use talos_protocol::registers::{
    AXIS_ERROR_RESET_LEN, ERROR_RESET_WORD, REG_AXIS_ERROR_RESET, REG_RESET_AUX,
    REG_SERVO_AXES_12, REG_SERVO_AXES_34, REG_SERVO_AXES_56, REG_SYSTEM_ERROR_RESET,
    RESET_AUX_LEN, SERVO_DISABLE_WORD, SERVO_ENABLE_WORD, SYSTEM_ERROR_RESET_LEN,
};
use tracing::{info, warn};

use crate::error::Result;
use crate::talos::Talos;

impl<T: ModbusTransport> Talos<T> {
    /// 复位错误锁存（轴错误块、系统错误块及固件要求的附加写入）
    pub fn reset_faults(&self) -> Result<()> {
        self.bus().write_registers(
            REG_AXIS_ERROR_RESET,
            &[ERROR_RESET_WORD; AXIS_ERROR_RESET_LEN as usize],
        )?;
        self.bus().write_registers(
            REG_SYSTEM_ERROR_RESET,
            &[ERROR_RESET_WORD; SYSTEM_ERROR_RESET_LEN as usize],
        )?;
        self.bus()
            .write_registers(REG_RESET_AUX, &[0; RESET_AUX_LEN as usize])?;
        Ok(())
    }

    /// 使能全部伺服轴，随后等待伺服整定
    pub fn enable_all_axes(&self) -> Result<()> {
        self.bus()
            .write_register(REG_SERVO_AXES_12, SERVO_ENABLE_WORD)?;
        self.bus()
            .write_register(REG_SERVO_AXES_34, SERVO_ENABLE_WORD)?;
        self.bus()
            .write_register(REG_SERVO_AXES_56, SERVO_ENABLE_WORD)?;
        spin_sleep::sleep(self.config().servo_settle_time);
        Ok(())
    }

    /// 失能全部伺服轴
    pub fn disable_all_axes(&self) -> Result<()> {
        self.bus()
            .write_register(REG_SERVO_AXES_12, SERVO_DISABLE_WORD)?;
        self.bus()
            .write_register(REG_SERVO_AXES_34, SERVO_DISABLE_WORD)?;
        self.bus()
            .write_register(REG_SERVO_AXES_56, SERVO_DISABLE_WORD)?;
        Ok(())
    }

    /// 让机器人自动进入可运动状态
    ///
    /// 每轮：复位错误锁存 → 使能全部轴 → 检查就绪。首轮成功即
    /// 返回 `true`；重试耗尽返回 `false`（从不因"未就绪"报错）。
    pub fn prepare_for_motion(&self, retry_times: u32, retry_delay: Duration) -> Result<bool> {
        for attempt in 1..=retry_times {
            self.reset_faults()?;
            self.enable_all_axes()?;

            if self.is_ready_for_motion()? {
                info!(attempt, "robot ready for motion");
                return Ok(true);
            }
            if let Some(reason) = self.not_ready_reason()? {
                warn!(attempt, %reason, "robot not ready");
            }
            spin_sleep::sleep(retry_delay);
        }

        warn!(retry_times, "robot failed to reach ready state");
        Ok(false)
    }
}
