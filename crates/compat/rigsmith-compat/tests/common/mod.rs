//! Shared fixtures for compatibility tests

#![allow(dead_code)]

use rigsmith_core::{AttrValue, Build, Category, Component};
use tracing_subscriber::EnvFilter;

/// Initialize test logging
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rigsmith_compat=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Build from parts, each placed in its own category
pub fn build_of(parts: impl IntoIterator<Item = Component>) -> Build {
    parts.into_iter().fold(Build::new(), |build, part| {
        let category = part.category.expect("fixture parts carry a category");
        build.with_component(category, part).expect("fixture fits its slot")
    })
}

pub fn cpu(socket: &str, tdp: i64) -> Component {
    Component::new(format!("cpu-{socket}"), Category::Cpu, format!("{socket} processor"), 249.0)
        .with_attr("socket", socket)
        .with_attr("tdp", tdp)
}

pub fn motherboard(socket: &str) -> Component {
    Component::new(format!("mb-{socket}"), Category::Motherboard, format!("{socket} board"), 179.0)
        .with_attr("socket", socket)
}

pub fn gpu(name: &str, length: i64, power: i64) -> Component {
    Component::new("gpu-1", Category::Gpu, name, 599.0)
        .with_attr("length", length)
        .with_attr("powerRequirement", power)
}

pub fn case_with_gpu_clearance(max_gpu_length: i64) -> Component {
    Component::new("case-1", Category::Case, "Mid tower", 89.0).with_attr("maxGPULength", max_gpu_length)
}

pub fn psu(wattage: &str) -> Component {
    Component::new("psu-1", Category::Psu, format!("{wattage} PSU"), 79.0).with_attr("wattage", wattage)
}

/// A fully populated build with no conflicts
pub fn clean_build() -> Build {
    build_of([
        cpu("AM5", 105),
        motherboard("AM5")
            .with_attr("memoryType", "DDR5")
            .with_attr("memorySlots", 4)
            .with_attr("formFactor", "ATX")
            .with_attr("m2Slots", 3)
            .with_spec("PCIe 5.0 x16")
            .with_spec("PCIe 4.0 M.2"),
        Component::new("ram-1", Category::Memory, "2x16GB DDR5-6000", 109.0)
            .with_attr("memoryType", "DDR5")
            .with_attr("requiredSlots", 2)
            .with_attr("height", 34),
        Component::new("ssd-1", Category::Storage, "2TB NVMe", 149.0)
            .with_attr("formFactor", "M.2 2280")
            .with_attr("interface", "PCIe 4.0 x4 NVMe"),
        psu("850W").with_attr("pcie5", true),
        Component::new("case-1", Category::Case, "Airflow tower", 119.0)
            .with_attr("maxGPULength", 400)
            .with_attr("maxCoolerHeight", 170)
            .with_attr("supportedFormFactors", vec!["ATX", "Micro-ATX", "Mini-ITX"])
            .with_attr(
                "radiatorSupport",
                AttrValue::object([("front", AttrValue::from(360)), ("top", AttrValue::from(280))]),
            ),
        gpu("GeForce RTX 4070 Super", 300, 220),
        Component::new("cooler-1", Category::Cooling, "Dual tower", 99.0)
            .with_attr("supportedSockets", vec!["AM4", "AM5", "LGA1700"])
            .with_attr("tdpSupport", 250)
            .with_attr("height", 165)
            .with_attr("ramClearance", 40),
    ])
}
