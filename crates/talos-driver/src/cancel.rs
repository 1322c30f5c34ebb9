//! 取消令牌
//!
//! 到位等待没有内建超时（失速或急停下控制器可能永远不到位），
//! 调用方通过令牌中止轮询循环。克隆体共享同一取消状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 协作式取消令牌
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// 创建未取消的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消；所有克隆体都会观察到
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// 是否已请求取消
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}
