#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PollStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub uptime: Duration,
}

/// Resource usage of the poller process itself. The daemon runs unattended
/// on wall displays for weeks, so a per-cycle stats line is the only way
/// anyone notices a leak.
#[cfg(feature = "cli")]
pub struct PollMonitor {
    system: Mutex<System>,
    pid: Pid,
    start_time: Instant,
    peak_memory: Mutex<u64>,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl PollMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        let pid = sysinfo::get_current_pid().expect("Failed to get current PID");
        system.refresh_all();

        Self {
            system: Mutex::new(system),
            pid,
            start_time: Instant::now(),
            peak_memory: Mutex::new(0),
            enabled,
        }
    }

    pub fn get_stats(&self) -> Option<PollStats> {
        if !self.enabled {
            return None;
        }

        let mut system = self.system.lock().ok()?;
        system.refresh_all();

        let process = system.process(self.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_memory.lock().ok()?;
        if memory_mb > *peak {
            *peak = memory_mb;
        }
        let peak_memory_mb = *peak;

        Some(PollStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb,
            uptime: self.start_time.elapsed(),
        })
    }

    pub fn log_cycle(&self, polls: u64, updates: u64) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Cycle {} ({} updates) - CPU: {:.1}%, Memory: {}MB, Peak: {}MB, Uptime: {:?}",
                polls,
                updates,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.uptime
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            tracing::info!(
                "📊 Final Stats - Uptime: {:?}, Peak Memory: {}MB",
                stats.uptime,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for PollMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when built without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct PollMonitor;

#[cfg(not(feature = "cli"))]
impl PollMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_cycle(&self, _polls: u64, _updates: u64) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
