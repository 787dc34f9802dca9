#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct SystemStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

/// 批次執行時的程序資源監控（CPU、記憶體、耗時）
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Option<Mutex<MonitorState>>,
    start_time: Instant,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let state = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    Some(Mutex::new(MonitorState {
                        system,
                        pid,
                        peak_memory_mb: 0,
                    }))
                }
                Err(e) => {
                    tracing::warn!("System monitoring disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            state,
            start_time: Instant::now(),
        }
    }

    pub fn get_stats(&self) -> Option<SystemStats> {
        let mut state = self.state.as_ref()?.lock().ok()?;
        state.system.refresh_all();

        let process = state.system.process(state.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let cpu_usage = process.cpu_usage();

        state.peak_memory_mb = state.peak_memory_mb.max(memory_mb);

        Some(SystemStats {
            cpu_usage,
            memory_usage_mb: memory_mb,
            peak_memory_mb: state.peak_memory_mb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Time: {:?}",
                phase,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }

    /// 批次結束時輸出總耗時、峰值記憶體與每份文件平均耗時
    pub fn log_final_stats(&self, documents: usize) {
        if let Some(stats) = self.get_stats() {
            let per_document = stats
                .elapsed_time
                .checked_div(documents.max(1) as u32)
                .unwrap_or_default();
            tracing::info!(
                "📊 Final Stats - Documents: {}, Total Time: {:?}, Avg/Doc: {:?}, Peak Memory: {}MB",
                documents,
                stats.elapsed_time,
                per_document,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 為非CLI環境提供空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&self, _phase: &str) {}

    pub fn log_final_stats(&self, _documents: usize) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
