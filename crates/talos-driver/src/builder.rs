//! Builder 模式实现
//!
//! 提供链式构造 [`Talos`] 实例的便捷方式。

use crate::config::DriverConfig;
use crate::error::Result;
use crate::talos::Talos;
use talos_modbus::ModbusTransport;

/// Talos Builder（链式构造）
///
/// # Example
///
/// ```no_run
/// use talos_driver::TalosBuilder;
///
/// let talos = TalosBuilder::new()
///     .block(true)
///     .suction_output_bit(3)
///     .connect("192.168.1.1:502".parse().unwrap())
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TalosBuilder {
    config: DriverConfig,
}

impl TalosBuilder {
    /// 创建使用默认配置的 Builder
    pub fn new() -> Self {
        Self::default()
    }

    /// 整体替换驱动配置
    pub fn config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    /// 运动调用默认是否阻塞到完成
    pub fn block(mut self, block: bool) -> Self {
        self.config.block = block;
        self
    }

    /// 吸盘占用的数字输出位（0~15，构造时校验）
    pub fn suction_output_bit(mut self, bit: u8) -> Self {
        self.config.suction_output_bit = bit;
        self
    }

    /// 默认速度/加速度/减速度（0~100，构造时写入寄存器）
    pub fn default_rates(mut self, speed: u8, acceleration: u8, deceleration: u8) -> Self {
        self.config.default_speed = speed;
        self.config.default_acceleration = acceleration;
        self.config.default_deceleration = deceleration;
        self
    }

    /// 连接控制器并构建驱动（真实 Modbus-TCP 后端）
    #[cfg(feature = "tcp")]
    pub fn connect(
        self,
        addr: std::net::SocketAddr,
    ) -> Result<Talos<talos_modbus::TcpTransport>> {
        use talos_protocol::registers::UNIT_ID;

        let transport = talos_modbus::TcpTransport::connect(addr, UNIT_ID)?;
        Talos::new(transport, self.config)
    }

    /// 使用既有传输连接构建驱动（测试或自定义后端）
    pub fn with_transport<T: ModbusTransport>(self, transport: T) -> Result<Talos<T>> {
        Talos::new(transport, self.config)
    }
}
