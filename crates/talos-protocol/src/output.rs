//! 数字输出字（16 位位集）
//!
//! 输出寄存器对应用侧是只写的（协议不提供回读），因此驱动层缓存
//! 最近一次写入的值。本类型只承担纯数据的位运算；写入与缓存策略
//! 在驱动层。

use crate::ProtocolError;

/// 数字输出位数
pub const OUTPUT_BIT_COUNT: u8 = 16;

/// 16 位数字输出字
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DigitalOutputWord(u16);

impl DigitalOutputWord {
    /// 全零输出字
    pub const ZERO: Self = Self(0);

    /// 从原始寄存器值构造
    pub fn new(bits: u16) -> Self {
        Self(bits)
    }

    /// 原始寄存器值
    pub fn bits(self) -> u16 {
        self.0
    }

    /// 返回将第 `bit` 位置 1 后的输出字
    pub fn set(self, bit: u8) -> Result<Self, ProtocolError> {
        Self::check_bit(bit)?;
        Ok(Self(self.0 | (1 << bit)))
    }

    /// 返回将第 `bit` 位清 0 后的输出字
    pub fn clear(self, bit: u8) -> Result<Self, ProtocolError> {
        Self::check_bit(bit)?;
        Ok(Self(self.0 & !(1 << bit)))
    }

    /// 返回按 `value` 设置第 `bit` 位后的输出字
    pub fn with_bit(self, bit: u8, value: bool) -> Result<Self, ProtocolError> {
        if value { self.set(bit) } else { self.clear(bit) }
    }

    /// 读取第 `bit` 位
    pub fn get(self, bit: u8) -> Result<bool, ProtocolError> {
        Self::check_bit(bit)?;
        Ok(self.0 & (1 << bit) != 0)
    }

    fn check_bit(bit: u8) -> Result<(), ProtocolError> {
        if bit >= OUTPUT_BIT_COUNT {
            return Err(ProtocolError::InvalidBitIndex { bit });
        }
        Ok(())
    }
}

impl From<u16> for DigitalOutputWord {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}

impl From<DigitalOutputWord> for u16 {
    fn from(word: DigitalOutputWord) -> Self {
        word.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_roundtrip() {
        // 对任意起始字与任意合法位，clear(set(w, b), b) == clear(w, b)
        for start in [0x0000u16, 0xFFFF, 0xA5A5, 0x0001] {
            let word = DigitalOutputWord::new(start);
            for bit in 0..OUTPUT_BIT_COUNT {
                let set = word.set(bit).unwrap();
                assert!(set.get(bit).unwrap());
                let cleared = set.clear(bit).unwrap();
                assert_eq!(cleared, word.clear(bit).unwrap());
            }
        }
    }

    #[test]
    fn test_set_is_idempotent() {
        let word = DigitalOutputWord::new(0b0000_0001);
        let once = word.set(0).unwrap();
        let twice = once.set(0).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once.bits(), 0b0000_0001);
    }

    #[test]
    fn test_bit_out_of_range() {
        let word = DigitalOutputWord::ZERO;
        assert_eq!(
            word.set(16).unwrap_err(),
            ProtocolError::InvalidBitIndex { bit: 16 }
        );
        assert_eq!(
            word.clear(255).unwrap_err(),
            ProtocolError::InvalidBitIndex { bit: 255 }
        );
        assert!(word.get(16).is_err());
    }

    #[test]
    fn test_with_bit() {
        let word = DigitalOutputWord::ZERO.with_bit(3, true).unwrap();
        assert_eq!(word.bits(), 0b1000);
        let word = word.with_bit(3, false).unwrap();
        assert_eq!(word.bits(), 0);
    }
}
