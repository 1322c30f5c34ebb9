//! 测试公共设施：快速配置 + 就绪状态的 mock 机器人

use std::time::Duration;

use talos_driver::{DriverConfig, Talos, TalosBuilder};
use talos_modbus::MockTransport;

/// 把所有等待间隔压到毫秒级的测试配置
pub fn fast_config() -> DriverConfig {
    DriverConfig {
        block_time: Duration::from_millis(1),
        servo_settle_time: Duration::from_millis(1),
        error_monitor_interval: Duration::from_millis(5),
        ..Default::default()
    }
}

/// 全零寄存器文件即是"就绪"：错误快照全零、教导盒已释放、
/// 系统状态正常。构造时写入的默认参数已从日志中清除。
pub fn ready_driver() -> (MockTransport, Talos<MockTransport>) {
    let mock = MockTransport::new();
    let talos = TalosBuilder::new()
        .config(fast_config())
        .with_transport(mock.clone())
        .expect("driver construction against mock must succeed");
    mock.clear_writes();
    (mock, talos)
}
