//! 自动复归（错误复位 + 伺服使能 + 有界重试）的集成测试

mod common;

use std::time::Duration;

use common::ready_driver;
use talos_driver::DriverError;
use talos_modbus::WriteOp;

const REG_SERVO_AXES_56: u16 = 0x0000;
const REG_RESET_AUX: u16 = 0x0002;
const REG_SERVO_AXES_12: u16 = 0x0006;
const REG_SERVO_AXES_34: u16 = 0x0007;
const REG_AXIS_ERROR_RESET: u16 = 0x0020;
const REG_SYSTEM_ERROR_RESET: u16 = 0x0180;
const REG_CONTROLLER_ERROR: u16 = 0x01FF;
const REG_TEACH_PANEL_STATE: u16 = 0x013B;

#[test]
fn test_reset_faults_payloads() {
    let (mock, talos) = ready_driver();
    talos.reset_faults().unwrap();

    assert_eq!(
        mock.writes(),
        vec![
            WriteOp::Multiple {
                addr: REG_AXIS_ERROR_RESET,
                values: vec![0x0101; 8],
            },
            WriteOp::Multiple {
                addr: REG_SYSTEM_ERROR_RESET,
                values: vec![0x0101; 4],
            },
            WriteOp::Multiple {
                addr: REG_RESET_AUX,
                values: vec![0, 0],
            },
        ]
    );
}

#[test]
fn test_enable_and_disable_all_axes() {
    let (mock, talos) = ready_driver();

    talos.enable_all_axes().unwrap();
    talos.disable_all_axes().unwrap();

    assert_eq!(
        mock.writes(),
        vec![
            WriteOp::Single {
                addr: REG_SERVO_AXES_12,
                value: 0x0101
            },
            WriteOp::Single {
                addr: REG_SERVO_AXES_34,
                value: 0x0101
            },
            WriteOp::Single {
                addr: REG_SERVO_AXES_56,
                value: 0x0101
            },
            WriteOp::Single {
                addr: REG_SERVO_AXES_12,
                value: 0
            },
            WriteOp::Single {
                addr: REG_SERVO_AXES_34,
                value: 0
            },
            WriteOp::Single {
                addr: REG_SERVO_AXES_56,
                value: 0
            },
        ]
    );
}

#[test]
fn test_prepare_succeeds_on_first_attempt() {
    let (mock, talos) = ready_driver();

    let ready = talos
        .prepare_for_motion(5, Duration::from_millis(1))
        .unwrap();
    assert!(ready);

    // 恰好一轮复位 + 使能
    let resets = mock
        .writes()
        .iter()
        .filter(|op| matches!(op, WriteOp::Multiple { addr, .. } if *addr == REG_AXIS_ERROR_RESET))
        .count();
    assert_eq!(resets, 1);
}

#[test]
fn test_prepare_exhausts_retries_and_returns_false() {
    let (mock, talos) = ready_driver();
    // 教导盒始终持有控制权：永远不会就绪
    mock.set_register(REG_TEACH_PANEL_STATE, 1);

    let ready = talos
        .prepare_for_motion(2, Duration::from_millis(1))
        .unwrap();
    assert!(!ready);

    // 恰好两轮复位 + 使能，且从不上浮为错误
    let writes = mock.writes();
    let resets = writes
        .iter()
        .filter(|op| matches!(op, WriteOp::Multiple { addr, .. } if *addr == REG_AXIS_ERROR_RESET))
        .count();
    assert_eq!(resets, 2);
    let enables = writes
        .iter()
        .filter(
            |op| matches!(op, WriteOp::Single { addr, value: 0x0101 } if *addr == REG_SERVO_AXES_12),
        )
        .count();
    assert_eq!(enables, 2);
}

#[test]
fn test_prepare_propagates_communication_failure() {
    let (mock, talos) = ready_driver();
    // 复位与使能成功，但就绪检查时链路中断
    mock.queue_read_error(REG_CONTROLLER_ERROR, "link down");

    let err = talos
        .prepare_for_motion(1, Duration::from_millis(1))
        .unwrap_err();
    assert!(matches!(err, DriverError::Communication { address, .. } if address == REG_CONTROLLER_ERROR));
}
