//! 驱动配置

use std::time::Duration;

use crate::error::{DriverError, Result};

/// 驱动配置
///
/// 构造驱动时校验一次；之后按值持有，不再变更。
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// 运动调用默认是否阻塞到完成
    pub block: bool,
    /// 到位轮询间隔
    pub block_time: Duration,
    /// 吸盘占用的数字输出位（0~15）
    pub suction_output_bit: u8,
    /// 默认速度（0~100，构造时写入速度寄存器）
    pub default_speed: u8,
    /// 默认加速度（0~100）
    pub default_acceleration: u8,
    /// 默认减速度（0~100）
    pub default_deceleration: u8,
    /// 错误监控线程的轮询间隔
    pub error_monitor_interval: Duration,
    /// 到位确认的距离阈值（六分量欧氏范数，线性/角度混合）
    pub close_to_target_threshold: f64,
    /// 伺服使能后的整定等待
    pub servo_settle_time: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            block: false,
            block_time: Duration::from_millis(100),
            suction_output_bit: 0,
            default_speed: 10,
            default_acceleration: 10,
            default_deceleration: 10,
            error_monitor_interval: Duration::from_millis(500),
            close_to_target_threshold: 0.01,
            servo_settle_time: Duration::from_secs(2),
        }
    }
}

impl DriverConfig {
    /// 校验配置取值范围
    pub fn validate(&self) -> Result<()> {
        if self.suction_output_bit > 15 {
            return Err(DriverError::InvalidParameter {
                param: "suction_output_bit",
                reason: format!("{} exceeds bit range 0-15", self.suction_output_bit),
            });
        }
        for (param, value) in [
            ("default_speed", self.default_speed),
            ("default_acceleration", self.default_acceleration),
            ("default_deceleration", self.default_deceleration),
        ] {
            if value > 100 {
                return Err(DriverError::InvalidParameter {
                    param,
                    reason: format!("{} exceeds range 0-100", value),
                });
            }
        }
        if !(self.close_to_target_threshold > 0.0) {
            return Err(DriverError::InvalidParameter {
                param: "close_to_target_threshold",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
