//! 状态查询、就绪性判定与数字输出的集成测试（mock 传输）

mod common;

use common::ready_driver;
use talos_driver::{
    DriverError, MotionState, OperationMode, Pose, PoseFlag, SystemState, TeachPanelMode,
    TeachPanelState,
};
use talos_modbus::WriteOp;

const REG_TCP_POSE: u16 = 0x00F0;
const REG_MOTION_STATE: u16 = 0x00E0;
const REG_POSE_FLAG: u16 = 0x031F;
const REG_CONTROLLER_ERROR: u16 = 0x01FF;
const REG_GROUP_ERROR: u16 = 0x01E0;
const REG_JOINT_ERRORS: u16 = 0x0140;
const REG_WARNING_CODE: u16 = 0x020E;
const REG_SYSTEM_STATE: u16 = 0x0138;
const REG_OPERATION_MODE: u16 = 0x0139;
const REG_TEACH_PANEL_STATE: u16 = 0x013B;
const REG_TEACH_PANEL_MODE: u16 = 0x013C;
const REG_DIGITAL_OUTPUT: u16 = 0x02FE;

#[test]
fn test_tcp_pose_query() {
    let (mock, talos) = ready_driver();
    let pose = Pose::new(0.25, -0.5, 1.0, 45.0, -90.0, 180.0);
    mock.set_registers(REG_TCP_POSE, &pose.encode());

    let read = talos.tcp_pose().unwrap();
    for (a, b) in pose.components().iter().zip(read.components().iter()) {
        assert!((a - b).abs() <= 0.001 + 1e-9);
    }
}

#[test]
fn test_typed_status_queries() {
    let (mock, talos) = ready_driver();
    mock.set_register(REG_POSE_FLAG, 1);
    mock.set_register(REG_MOTION_STATE, 1);
    mock.set_register(REG_SYSTEM_STATE, 2);
    mock.set_register(REG_OPERATION_MODE, 3);
    mock.set_register(REG_TEACH_PANEL_STATE, 1);
    mock.set_register(REG_TEACH_PANEL_MODE, 0);
    mock.set_register(REG_WARNING_CODE, 0x0042);

    assert_eq!(talos.pose_flag().unwrap(), PoseFlag::InPosition);
    assert!(talos.is_in_position().unwrap());
    assert_eq!(talos.motion_state().unwrap(), MotionState::Moving);
    assert_eq!(talos.system_state().unwrap(), SystemState::StoppedPaused);
    assert_eq!(talos.operation_mode().unwrap(), OperationMode::Auto);
    assert_eq!(talos.teach_panel_state().unwrap(), TeachPanelState::Engaged);
    assert_eq!(talos.teach_panel_mode().unwrap(), TeachPanelMode::Manual);
    assert_eq!(talos.warning_code().unwrap(), 0x0042);
}

#[test]
fn test_unknown_status_value_is_protocol_error() {
    let (mock, talos) = ready_driver();
    mock.set_register(REG_SYSTEM_STATE, 9);
    assert!(matches!(
        talos.system_state().unwrap_err(),
        DriverError::Protocol(_)
    ));
}

#[test]
fn test_error_snapshot_joint_reorder() {
    let (mock, talos) = ready_driver();
    mock.set_register(REG_CONTROLLER_ERROR, 0x0007);
    mock.set_register(REG_GROUP_ERROR, 0x0001);
    // J1..J6 = 块内的末 4 字 + 首 2 字
    mock.set_register(REG_JOINT_ERRORS + 12, 101);
    mock.set_register(REG_JOINT_ERRORS + 15, 104);
    mock.set_register(REG_JOINT_ERRORS, 105);
    mock.set_register(REG_JOINT_ERRORS + 1, 106);

    let snapshot = talos.error_snapshot().unwrap();
    assert_eq!(snapshot.controller, 0x0007);
    assert_eq!(snapshot.group, 0x0001);
    assert_eq!(snapshot.joints, [101, 0, 0, 104, 105, 106]);
    assert!(talos.is_faulted().unwrap());
}

#[test]
fn test_readiness_depends_only_on_panel_and_system_when_clear() {
    // 错误寄存器全零时，就绪性只由教导盒与系统状态决定
    let (mock, talos) = ready_driver();
    assert!(talos.is_ready_for_motion().unwrap());
    assert_eq!(talos.not_ready_reason().unwrap(), None);

    mock.set_register(REG_TEACH_PANEL_STATE, 1);
    assert!(!talos.is_ready_for_motion().unwrap());
    let reason = talos.not_ready_reason().unwrap().unwrap();
    assert!(reason.contains("teach panel"));

    mock.set_register(REG_TEACH_PANEL_STATE, 0);
    mock.set_register(REG_SYSTEM_STATE, 2);
    assert!(!talos.is_ready_for_motion().unwrap());
    let reason = talos.not_ready_reason().unwrap().unwrap();
    assert!(reason.contains("StoppedPaused"));
}

#[test]
fn test_faulted_robot_is_not_ready() {
    let (mock, talos) = ready_driver();
    mock.set_register(REG_CONTROLLER_ERROR, 3);
    assert!(!talos.is_ready_for_motion().unwrap());
    let reason = talos.not_ready_reason().unwrap().unwrap();
    assert!(reason.contains("controller error 0x0003"));
}

#[test]
fn test_suction_writes_whole_word() {
    let (mock, talos) = ready_driver();

    talos.suction_on().unwrap();
    assert_eq!(talos.output_word().bits(), 0b1);
    talos.suction_off().unwrap();
    assert_eq!(talos.output_word().bits(), 0);

    assert_eq!(
        mock.writes(),
        vec![
            WriteOp::Single {
                addr: REG_DIGITAL_OUTPUT,
                value: 1
            },
            WriteOp::Single {
                addr: REG_DIGITAL_OUTPUT,
                value: 0
            },
        ]
    );
}

#[test]
fn test_set_output_bit_and_word() {
    let (mock, talos) = ready_driver();

    talos.set_output_bit(3, true).unwrap();
    talos.set_output_bit(5, true).unwrap();
    assert_eq!(talos.output_word().bits(), 0b101000);

    talos.set_output_word(0x00F0).unwrap();
    assert_eq!(talos.output_word().bits(), 0x00F0);

    let err = talos.set_output_bit(16, true).unwrap_err();
    assert!(matches!(err, DriverError::Protocol(_)));
    // 越界位在任何写入之前拒绝
    assert_eq!(mock.writes().len(), 3);
}

#[test]
fn test_failed_output_write_keeps_cache() {
    let (mock, talos) = ready_driver();
    talos.suction_on().unwrap();
    assert_eq!(talos.output_word().bits(), 1);

    mock.queue_write_error("link down");
    assert!(talos.set_output_word(0xFFFF).is_err());
    // 缓存仍代表最后一次已知成功写出的值
    assert_eq!(talos.output_word().bits(), 1);
}
