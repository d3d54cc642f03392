//! System power draw estimate used for PSU sizing.

use crate::resolver::Attribute;
use rigsmith_core::config::PowerConfig;
use rigsmith_core::{Build, Category};
use serde::Serialize;

/// Estimated draw of a build and the PSU rating it calls for
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerEstimate {
    /// CPU contribution (0 without a CPU)
    pub cpu_watts: f64,
    /// GPU contribution (0 without a GPU)
    pub gpu_watts: f64,
    /// Fixed platform overhead
    pub overhead_watts: f64,
    /// Sum of the above
    pub estimated: f64,
    /// Estimate times headroom, rounded up to a whole watt
    pub recommended: f64,
}

/// Estimate draw from the selected CPU and GPU
///
/// Returns `None` when neither is selected. A selected part whose power
/// figure cannot be read counts at the configured default.
pub fn estimate_power(build: &Build, config: &PowerConfig) -> Option<PowerEstimate> {
    let cpu = build.get(Category::Cpu);
    let gpu = build.get(Category::Gpu);
    if cpu.is_none() && gpu.is_none() {
        return None;
    }

    let cpu_watts = cpu.map_or(0.0, |cpu| {
        Attribute::CpuTdp.number(cpu).unwrap_or(config.default_cpu_tdp)
    });
    let gpu_watts = gpu.map_or(0.0, |gpu| {
        Attribute::GpuPowerRequirement
            .number(gpu)
            .unwrap_or(config.default_gpu_power)
    });
    let estimated = cpu_watts + gpu_watts + config.overhead_watts;
    let recommended = (estimated * config.headroom_factor).ceil();

    Some(PowerEstimate {
        cpu_watts,
        gpu_watts,
        overhead_watts: config.overhead_watts,
        estimated,
        recommended,
    })
}
