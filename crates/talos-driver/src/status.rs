//! 状态查询
//!
//! 每个查询对应一次寄存器读取并翻译为类型化的值；传输失败原样
//! 上浮为 [`DriverError::Communication`](crate::DriverError::Communication)。

use talos_modbus::ModbusTransport;
use talos_protocol::registers::{
    JOINT_ERROR_BLOCK_LEN, REG_CONTROLLER_ERROR, REG_GROUP_ERROR, REG_JOINT_ERRORS,
    REG_MOTION_STATE, REG_OPERATION_MODE, REG_POSE_FLAG, REG_SYSTEM_STATE, REG_TCP_POSE,
    REG_TEACH_PANEL_MODE, REG_TEACH_PANEL_STATE, REG_WARNING_CODE, TCP_POSE_LEN,
};
use talos_protocol::status::parse_status;
use talos_protocol::{
    ErrorSnapshot, MotionState, OperationMode, Pose, PoseFlag, SystemState, TeachPanelMode,
    TeachPanelState,
};

use crate::error::Result;
use crate::talos::Talos;

impl<T: ModbusTransport> Talos<T> {
    /// 当前 TCP 位姿
    pub fn tcp_pose(&self) -> Result<Pose> {
        let registers = self.bus().read_registers(REG_TCP_POSE, TCP_POSE_LEN)?;
        Ok(Pose::decode(&registers)?)
    }

    /// 到位标志
    pub fn pose_flag(&self) -> Result<PoseFlag> {
        let raw = self.bus().read_register(REG_POSE_FLAG)?;
        Ok(parse_status("pose flag", raw)?)
    }

    /// 运动状态
    pub fn motion_state(&self) -> Result<MotionState> {
        let raw = self.bus().read_register(REG_MOTION_STATE)?;
        Ok(parse_status("motion state", raw)?)
    }

    /// 系统状态
    pub fn system_state(&self) -> Result<SystemState> {
        let raw = self.bus().read_register(REG_SYSTEM_STATE)?;
        Ok(parse_status("system state", raw)?)
    }

    /// 操作模式
    pub fn operation_mode(&self) -> Result<OperationMode> {
        let raw = self.bus().read_register(REG_OPERATION_MODE)?;
        Ok(parse_status("operation mode", raw)?)
    }

    /// 教导盒启用状态
    pub fn teach_panel_state(&self) -> Result<TeachPanelState> {
        let raw = self.bus().read_register(REG_TEACH_PANEL_STATE)?;
        Ok(parse_status("teach panel state", raw)?)
    }

    /// 教导盒模式
    pub fn teach_panel_mode(&self) -> Result<TeachPanelMode> {
        let raw = self.bus().read_register(REG_TEACH_PANEL_MODE)?;
        Ok(parse_status("teach panel mode", raw)?)
    }

    /// 警告码（0 表示无警告）
    pub fn warning_code(&self) -> Result<u16> {
        self.bus().read_register(REG_WARNING_CODE)
    }

    /// 错误快照：控制器错误码、机器人组错误码、J1..J6 关节错误码
    pub fn error_snapshot(&self) -> Result<ErrorSnapshot> {
        let controller = self.bus().read_register(REG_CONTROLLER_ERROR)?;
        let group = self.bus().read_register(REG_GROUP_ERROR)?;
        let joint_block = self
            .bus()
            .read_registers(REG_JOINT_ERRORS, JOINT_ERROR_BLOCK_LEN)?;
        Ok(ErrorSnapshot::from_raw(controller, group, &joint_block)?)
    }

    /// 是否已到达目标位置（仅凭控制器的到位标志）
    pub fn is_in_position(&self) -> Result<bool> {
        Ok(self.pose_flag()? == PoseFlag::InPosition)
    }

    /// 机器人是否处于故障状态（任一错误字段非零）
    pub fn is_faulted(&self) -> Result<bool> {
        Ok(!self.error_snapshot()?.is_clear())
    }

    /// 机器人是否允许接收运动命令
    ///
    /// 就绪 = 无故障 且 教导盒已释放控制权 且 系统状态正常。
    /// 有意不要求"已到位"与自动模式：要求到位会让原点复归序列
    /// 死锁在第一条命令上。
    pub fn is_ready_for_motion(&self) -> Result<bool> {
        Ok(!self.is_faulted()?
            && self.teach_panel_state()? == TeachPanelState::Released
            && self.system_state()? == SystemState::Normal)
    }

    /// 机器人未就绪的原因；就绪时返回 `None`
    pub fn not_ready_reason(&self) -> Result<Option<String>> {
        let mut reasons = Vec::new();

        let snapshot = self.error_snapshot()?;
        if !snapshot.is_clear() {
            reasons.push(snapshot.describe());
        }
        if self.teach_panel_state()? == TeachPanelState::Engaged {
            reasons.push("teach panel holds control".to_string());
        }
        let system_state = self.system_state()?;
        if system_state != SystemState::Normal {
            reasons.push(format!("system state {:?}", system_state));
        }

        if reasons.is_empty() {
            Ok(None)
        } else {
            Ok(Some(reasons.join("; ")))
        }
    }
}
