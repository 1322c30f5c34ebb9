//! 运动命令派发与完成等待
//!
//! 派发流程（顺序固定）：就绪门控 → 参数写入 → 位姿要求校验 →
//! 位姿载荷 + 命令代码写入 → （可选）阻塞等待完成。
//!
//! 一次调用内的寄存器写入是有序的：参数、位姿、命令代码。参数
//! 寄存器在位姿校验之前写入是沿用的既有顺序——现场部署依赖
//! "位姿被拒时参数寄存器仍已更新"这一行为，不得调整。

use std::time::{Duration, Instant};

use talos_modbus::ModbusTransport;
use talos_protocol::registers::{
    REG_ACCELERATION, REG_COMMAND, REG_DECELERATION, REG_SPEED, REG_TARGET_POSE,
};
use talos_protocol::{Pose, RobotCommand};
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::{DriverError, Result};
use crate::talos::Talos;

/// 单次运动命令的可选项
#[derive(Debug, Clone)]
pub struct MotionOptions {
    /// 速度（0~100；`None` 保持寄存器现值）
    pub speed: Option<u8>,
    /// 加速度（0~100）
    pub acceleration: Option<u8>,
    /// 减速度（0~100）
    pub deceleration: Option<u8>,
    /// 派发前是否做就绪性重试
    pub retry: bool,
    /// 就绪性重试次数
    pub retry_times: u32,
    /// 就绪性重试间隔
    pub retry_delay: Duration,
    /// 是否阻塞到完成（`None` 用驱动配置的默认值）
    pub blocking: Option<bool>,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            speed: None,
            acceleration: None,
            deceleration: None,
            retry: true,
            retry_times: 3,
            retry_delay: Duration::from_secs(1),
            blocking: None,
        }
    }
}

/// 运动命令调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionOutcome {
    /// 机器人拒绝命令（就绪门控失败）——常规结果，未写入任何寄存器
    Rejected { reason: String },
    /// 已派发，不等待完成
    Dispatched,
    /// 已派发并确认到位
    Completed,
}

impl<T: ModbusTransport> Talos<T> {
    /// 发送运动命令
    ///
    /// 带位姿命令必须提供 `pose`；无位姿命令忽略传入的 `pose`，
    /// 不写位姿载荷，也不更新位姿备忘。
    ///
    /// 阻塞路径使用内部的空取消令牌；需要可取消的阻塞时，先以
    /// 非阻塞方式派发，再自行调用 [`wait_until_in_position`]。
    ///
    /// [`wait_until_in_position`]: Talos::wait_until_in_position
    ///
    /// # 错误
    ///
    /// - [`DriverError::InvalidParameter`]: 速度/加速度/减速度越界
    ///   （任何寄存器写入之前拒绝）
    /// - [`DriverError::CommandRequiresPose`]: 带位姿命令未提供位姿
    ///   （此时参数寄存器可能已更新，见模块说明）
    pub fn send_motion_command(
        &self,
        command: RobotCommand,
        pose: Option<&Pose>,
        options: &MotionOptions,
    ) -> Result<MotionOutcome> {
        // 1. 就绪门控：重试耗尽仍未就绪是"机器人拒绝命令"，
        //    不是异常
        if options.retry {
            for _ in 0..options.retry_times {
                if self.is_ready_for_motion()? {
                    break;
                }
                spin_sleep::sleep(options.retry_delay);
            }
        }
        if !self.is_ready_for_motion()? {
            let reason = self
                .not_ready_reason()?
                .unwrap_or_else(|| "robot not ready".to_string());
            warn!(command = ?command, %reason, "motion command rejected");
            return Ok(MotionOutcome::Rejected { reason });
        }

        // 2. 参数更新：先整体校验，再写入给定的参数
        for (param, value) in [
            ("speed", options.speed),
            ("acceleration", options.acceleration),
            ("deceleration", options.deceleration),
        ] {
            if let Some(v) = value
                && v > 100
            {
                return Err(DriverError::InvalidParameter {
                    param,
                    reason: format!("{} exceeds range 0-100", v),
                });
            }
        }
        if let Some(speed) = options.speed {
            self.bus().write_register(REG_SPEED, speed as u16)?;
        }
        if let Some(acceleration) = options.acceleration {
            self.bus()
                .write_register(REG_ACCELERATION, acceleration as u16)?;
        }
        if let Some(deceleration) = options.deceleration {
            self.bus()
                .write_register(REG_DECELERATION, deceleration as u16)?;
        }

        // 3 + 4. 位姿要求校验与派发
        if command.requires_pose() {
            let Some(target) = pose else {
                return Err(DriverError::CommandRequiresPose { command });
            };
            self.bus()
                .write_registers(REG_TARGET_POSE, &target.encode())?;
            self.remember_motion(*target);
        } else if pose.is_some() {
            debug!(command = ?command, "positionless command, ignoring supplied pose");
        }

        self.bus().write_register(REG_COMMAND, command.code())?;
        info!(command = ?command, code = command.code(), "motion command dispatched");

        // 5. 完成
        let blocking = options.blocking.unwrap_or(self.config().block);
        if blocking {
            self.wait_until_in_position(&CancelToken::new())?;
            Ok(MotionOutcome::Completed)
        } else {
            Ok(MotionOutcome::Dispatched)
        }
    }

    /// 等待机械臂到达目标位置
    ///
    /// 以 `block_time` 为间隔轮询到位标志。若存在位姿备忘（最近
    /// 一次带位姿命令），额外要求实测 TCP 位姿与目标的距离小于
    /// 阈值才算完成——控制器的到位标志在多段运动中会瞬时置位，
    /// 只作必要条件。
    ///
    /// 本层不设超时；`cancel` 令牌是唯一的中止手段。
    pub fn wait_until_in_position(&self, cancel: &CancelToken) -> Result<()> {
        loop {
            if cancel.is_cancelled() {
                return Err(DriverError::Cancelled);
            }
            if self.target_confirmed()? {
                return Ok(());
            }
            spin_sleep::sleep(self.config().block_time);
        }
    }

    /// 带期限的到位等待
    ///
    /// 与 [`wait_until_in_position`](Talos::wait_until_in_position)
    /// 相同，但超过 `timeout` 后返回 [`DriverError::Timeout`]。
    pub fn wait_until_in_position_timeout(
        &self,
        cancel: &CancelToken,
        timeout: Duration,
    ) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if cancel.is_cancelled() {
                return Err(DriverError::Cancelled);
            }
            if self.target_confirmed()? {
                return Ok(());
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(DriverError::Timeout {
                    timeout_ms: timeout.as_millis() as u64,
                });
            }
            spin_sleep::sleep(self.config().block_time.min(remaining));
        }
    }

    /// 实测位姿是否已进入目标阈值内（无备忘时返回 false）
    pub fn is_close_to_target(&self) -> Result<bool> {
        let Some(target) = self.motion_memo() else {
            return Ok(false);
        };
        let current = self.tcp_pose()?;
        Ok(current.distance(&target) < self.config().close_to_target_threshold)
    }

    /// 到位判定：标志到位，且（若有备忘）距离确认通过
    fn target_confirmed(&self) -> Result<bool> {
        if !self.is_in_position()? {
            return Ok(false);
        }
        match self.motion_memo() {
            None => Ok(true),
            Some(_) => self.is_close_to_target(),
        }
    }
}
