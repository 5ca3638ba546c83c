//! Resource use of a run: peak memory, CPU time and wall time, plus per-tick figures.

// Loss of precision is allowable in this module's use cases.
#![allow(clippy::cast_precision_loss)]

use std::time::{Duration, Instant};

use bytesize::ByteSize;
use humantime::format_duration;
use log::{debug, error, info};
use serde_derive::Serialize;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// How frequently the peak memory value is polled.
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Final statistics for a run. Per-tick figures are zero when no tick was run.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionStatistics {
    pub max_memory_usage: u64,
    pub cpu_time: Duration,
    pub wall_time: Duration,

    pub population: usize,
    pub ticks: usize,
    pub wall_time_per_tick: Duration,
    /// Individual updates per second of wall time, i.e. `population * ticks / wall_time`.
    pub individual_updates_per_second: f64,
}

pub(crate) struct ExecutionProfilingCollector {
    start_time: Instant,
    last_refresh: Instant,
    /// CPU-milliseconds already used by the process when the collector was created.
    start_cpu_time: u64,
    max_memory_usage: u64,
    system: System,
    /// `None` on platforms where `sysinfo` cannot find the current process.
    process_id: Option<Pid>,
}

impl ExecutionProfilingCollector {
    pub fn new() -> ExecutionProfilingCollector {
        let process_id = sysinfo::get_current_pid().ok();
        let now = Instant::now();
        let mut collector = ExecutionProfilingCollector {
            start_time: now,
            last_refresh: now,
            start_cpu_time: 0,
            max_memory_usage: 0,
            system: System::new(),
            process_id,
        };

        if let Some(pid) = process_id {
            debug!("Process ID: {}", pid);
            collector.update_system_info(ProcessRefreshKind::nothing().with_cpu().with_memory());
            if let Some(process) = collector.system.process(pid) {
                collector.max_memory_usage = process.memory();
                collector.start_cpu_time = process.accumulated_cpu_time();
            }
        }
        collector
    }

    /// Polls memory if at least `REFRESH_INTERVAL` has passed since the last poll. Cheap
    /// enough to call every tick.
    #[inline]
    pub fn refresh(&mut self) {
        if self.last_refresh.elapsed() >= REFRESH_INTERVAL {
            self.poll_memory();
            self.last_refresh = Instant::now();
        }
    }

    fn poll_memory(&mut self) {
        if let Some(pid) = self.process_id {
            self.update_system_info(ProcessRefreshKind::nothing().with_memory());
            if let Some(process) = self.system.process(pid) {
                self.max_memory_usage = self.max_memory_usage.max(process.memory());
            }
        }
    }

    #[inline]
    fn update_system_info(&mut self, process_refresh_kind: ProcessRefreshKind) {
        if let Some(pid) = self.process_id {
            if self.system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid]),
                true,
                process_refresh_kind,
            ) < 1
            {
                error!("could not refresh process statistics");
            }
        }
    }

    pub fn compute_final_statistics(
        &mut self,
        population: usize,
        ticks: usize,
    ) -> ExecutionStatistics {
        let mut cpu_time_millis = 0;
        if let Some(pid) = self.process_id {
            self.update_system_info(ProcessRefreshKind::nothing().with_cpu().with_memory());
            if let Some(process) = self.system.process(pid) {
                self.max_memory_usage = self.max_memory_usage.max(process.memory());
                cpu_time_millis = process
                    .accumulated_cpu_time()
                    .saturating_sub(self.start_cpu_time);
            }
        }

        let wall_time = self.start_time.elapsed();
        let (wall_time_per_tick, individual_updates_per_second) = if ticks > 0 {
            let seconds = wall_time.as_secs_f64();
            let rate = if seconds > 0.0 {
                (population * ticks) as f64 / seconds
            } else {
                0.0
            };
            (Duration::from_secs_f64(seconds / ticks as f64), rate)
        } else {
            (Duration::ZERO, 0.0)
        };

        ExecutionStatistics {
            max_memory_usage: self.max_memory_usage,
            cpu_time: Duration::from_millis(cpu_time_millis),
            wall_time,
            population,
            ticks,
            wall_time_per_tick,
            individual_updates_per_second,
        }
    }
}

/// Prints execution statistics to stdout.
pub fn print_execution_statistics(summary: &ExecutionStatistics) {
    println!("━━━━ Execution Summary ━━━━");
    if summary.max_memory_usage == 0 {
        println!("Memory and CPU statistics are not available on your platform.");
    } else {
        println!(
            "{:<25}{}",
            "Max memory usage:",
            ByteSize::b(summary.max_memory_usage)
        );
        println!("{:<25}{}", "CPU time:", format_duration(summary.cpu_time));
    }
    println!("{:<25}{}", "Wall time:", format_duration(summary.wall_time));
    println!("{:<25}{}", "Population:", summary.population);
    println!("{:<25}{}", "Ticks:", summary.ticks);
    if summary.ticks > 0 {
        println!(
            "{:<25}{}",
            "Wall time per tick:",
            format_duration(summary.wall_time_per_tick)
        );
        println!(
            "{:<25}{:.0}",
            "Updates per second:", summary.individual_updates_per_second
        );
    }
}

/// Logs execution statistics at `info` level.
pub fn log_execution_statistics(stats: &ExecutionStatistics) {
    info!("Execution complete.");
    if stats.max_memory_usage == 0 {
        info!("Memory and CPU statistics are not available on your platform.");
    } else {
        info!("Max memory usage: {}", ByteSize::b(stats.max_memory_usage));
        info!("CPU time: {}", format_duration(stats.cpu_time));
    }
    info!("Wall time: {}", format_duration(stats.wall_time));
    info!(
        "Population: {}, ticks: {}",
        stats.population, stats.ticks
    );
    if stats.ticks > 0 {
        info!(
            "Wall time per tick: {}",
            format_duration(stats.wall_time_per_tick)
        );
    }
}
