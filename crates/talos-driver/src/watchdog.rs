//! 错误监控看门狗
//!
//! 由调用方显式启动的单个后台线程，以固定间隔轮询错误快照。检测
//! 到第一处故障时记录日志、通过一次性通道交付故障并自行停止——
//! 不做任何恢复，恢复只能由持有者再次调用
//! [`prepare_for_motion`](crate::Talos::prepare_for_motion)。
//!
//! 看门狗只读状态寄存器，从不触碰驱动缓存，因此可以与单个运动
//! 下发线程并发运行（寄存器总线内部已对共享套接字互斥）。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded};
use talos_modbus::ModbusTransport;
use talos_protocol::ErrorSnapshot;
use tracing::{error, info, warn};

use crate::error::{DriverError, Result};
use crate::talos::Talos;

/// 错误监控看门狗句柄
pub struct ErrorWatchdog {
    handle: Option<thread::JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
    faults: Receiver<ErrorSnapshot>,
}

impl ErrorWatchdog {
    /// 启动监控线程，按驱动配置的间隔轮询
    pub fn start<T>(driver: Arc<Talos<T>>) -> Self
    where
        T: ModbusTransport + 'static,
    {
        let interval = driver.config().error_monitor_interval;
        Self::start_with_interval(driver, interval)
    }

    /// 以指定间隔启动监控线程
    pub fn start_with_interval<T>(driver: Arc<Talos<T>>, interval: Duration) -> Self
    where
        T: ModbusTransport + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let (fault_tx, fault_rx) = bounded(1);

        let shutdown_clone = shutdown.clone();
        let handle = thread::spawn(move || {
            monitor_loop(driver, interval, shutdown_clone, fault_tx);
        });

        info!(interval_ms = interval.as_millis() as u64, "error monitor started");
        Self {
            handle: Some(handle),
            shutdown,
            faults: fault_rx,
        }
    }

    /// 非阻塞获取已交付的故障
    pub fn try_fault(&self) -> Option<ErrorSnapshot> {
        self.faults.try_recv().ok()
    }

    /// 阻塞等待故障，超时返回 `None`
    pub fn wait_fault(&self, timeout: Duration) -> Option<ErrorSnapshot> {
        self.faults.recv_timeout(timeout).ok()
    }

    /// 与 [`try_fault`](Self::try_fault) 相同，但包装为驱动错误
    pub fn check(&self) -> Result<()> {
        match self.try_fault() {
            Some(snapshot) => Err(DriverError::RobotFault { snapshot }),
            None => Ok(()),
        }
    }

    /// 监控线程是否仍在轮询
    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::Relaxed)
    }

    /// 停止监控线程并等待其退出
    pub fn stop(mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for ErrorWatchdog {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn monitor_loop<T>(
    driver: Arc<Talos<T>>,
    interval: Duration,
    shutdown: Arc<AtomicBool>,
    fault_tx: Sender<ErrorSnapshot>,
) where
    T: ModbusTransport,
{
    while !shutdown.load(Ordering::Relaxed) {
        match driver.error_snapshot() {
            Ok(snapshot) if !snapshot.is_clear() => {
                error!(fault = %snapshot, "robot fault detected, error monitor stopping");
                let _ = fault_tx.send(snapshot);
                shutdown.store(true, Ordering::Relaxed);
                return;
            },
            Ok(_) => {},
            // 瞬时通信失败不终止监控，下一轮继续
            Err(e) => warn!(error = %e, "error monitor poll failed"),
        }
        thread::sleep(interval);
    }
}
