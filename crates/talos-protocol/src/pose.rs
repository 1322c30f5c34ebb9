//! TCP 位姿类型与定点数编码
//!
//! 位姿在物理单位（米 / 度）和寄存器表示之间转换。线上表示为
//! 6 个 32 位有符号整数（毫米 / 毫度，`value * 1000` 向零截断），
//! 每个整数拆成两个寄存器：低位字在前（小端字序），寄存器内部
//! 为大端字节序。
//!
//! 截断是有意保留的控制器兼容行为：`decode(encode(p))` 与 `p`
//! 的每个分量最多相差 0.001（1 个定点单位）。

use crate::ProtocolError;

/// 位姿编码后的寄存器数量（6 × 2）
pub const POSE_REGISTER_COUNT: usize = 12;

/// 定点数缩放系数（米 → 毫米，度 → 毫度）
const FIXED_POINT_SCALE: f64 = 1000.0;

/// TCP 位姿（工具中心点的 6 自由度位置 + 姿态）
///
/// - `x`/`y`/`z`: 米
/// - `rx`/`ry`/`rz`: 度
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Pose {
    /// 从六个分量构造位姿
    pub fn new(x: f64, y: f64, z: f64, rx: f64, ry: f64, rz: f64) -> Self {
        Self { x, y, z, rx, ry, rz }
    }

    /// 分量数组视图，按 (x, y, z, rx, ry, rz) 顺序
    pub fn components(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.rx, self.ry, self.rz]
    }

    /// 编码为 12 个寄存器（定点数，低位字在前）
    pub fn encode(&self) -> [u16; POSE_REGISTER_COUNT] {
        let mut regs = [0u16; POSE_REGISTER_COUNT];
        for (i, value) in self.components().iter().enumerate() {
            // 向零截断，与控制器期望的定点数语义一致
            let raw = (value * FIXED_POINT_SCALE) as i32 as u32;
            regs[i * 2] = (raw & 0xFFFF) as u16;
            regs[i * 2 + 1] = (raw >> 16) as u16;
        }
        regs
    }

    /// 从 12 个寄存器解码位姿
    ///
    /// # 错误
    ///
    /// 寄存器切片长度不等于 12 时返回 [`ProtocolError::InvalidLength`]。
    pub fn decode(registers: &[u16]) -> Result<Self, ProtocolError> {
        if registers.len() != POSE_REGISTER_COUNT {
            return Err(ProtocolError::InvalidLength {
                expected: POSE_REGISTER_COUNT,
                actual: registers.len(),
            });
        }

        let mut components = [0.0f64; 6];
        for (i, component) in components.iter_mut().enumerate() {
            let low = registers[i * 2] as u32;
            let high = registers[i * 2 + 1] as u32;
            let raw = ((high << 16) | low) as i32;
            *component = raw as f64 / FIXED_POINT_SCALE;
        }

        let [x, y, z, rx, ry, rz] = components;
        Ok(Self { x, y, z, rx, ry, rz })
    }

    /// 与另一位姿之间的欧几里得距离，对全部六个分量求范数
    ///
    /// 线性分量（米）与角度分量（度）混在同一个范数里，这是沿用
    /// 控制器既有的到位判定方式；调用方的阈值按此约定整定。
    pub fn distance(&self, other: &Pose) -> f64 {
        self.components()
            .iter()
            .zip(other.components().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl From<[f64; 6]> for Pose {
    fn from(v: [f64; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl std::fmt::Display for Pose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}, {:.3}, {:.3}, {:.3})",
            self.x, self.y, self.z, self.rx, self.ry, self.rz
        )
    }
}
