//! Shared catalog fixtures for planner tests

#![allow(dead_code)]

use rigsmith_core::{Catalog, Category, Component};
use tracing_subscriber::EnvFilter;

/// Initialize test logging
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rigsmith_planner=debug")),
        )
        .with_test_writer()
        .try_init();
}

fn part(category: Category, id: &str, price: f64) -> Component {
    Component::new(id, category, id, price)
}

/// Small but realistic catalog covering every category
pub fn sample_catalog() -> Catalog {
    Catalog::new()
        .with_options(
            Category::Cpu,
            vec![
                part(Category::Cpu, "ryzen-5-5600", 129.0).with_attr("socket", "AM4").with_attr("tdp", 65),
                part(Category::Cpu, "ryzen-7-7700", 299.0).with_attr("socket", "AM5").with_attr("tdp", 65),
                part(Category::Cpu, "core-i7-14700k", 399.0).with_attr("socket", "LGA1700").with_attr("tdp", 125),
            ],
        )
        .with_options(
            Category::Motherboard,
            vec![
                part(Category::Motherboard, "b550", 109.0)
                    .with_attr("socket", "AM4")
                    .with_attr("memoryType", "DDR4")
                    .with_attr("formFactor", "ATX"),
                part(Category::Motherboard, "b650", 159.0)
                    .with_attr("socket", "AM5")
                    .with_attr("memoryType", "DDR5")
                    .with_attr("formFactor", "ATX"),
                part(Category::Motherboard, "z790", 229.0)
                    .with_attr("socket", "LGA1700")
                    .with_attr("memoryType", "DDR5")
                    .with_attr("formFactor", "ATX"),
            ],
        )
        .with_options(
            Category::Memory,
            vec![
                part(Category::Memory, "ddr4-32", 69.0).with_attr("memoryType", "DDR4"),
                part(Category::Memory, "ddr5-32", 99.0).with_attr("memoryType", "DDR5"),
            ],
        )
        .with_options(
            Category::Storage,
            vec![
                part(Category::Storage, "sata-1tb", 49.0).with_attr("formFactor", "2.5\""),
                part(Category::Storage, "nvme-2tb", 129.0).with_attr("formFactor", "M.2 2280"),
            ],
        )
        .with_options(
            Category::Psu,
            vec![
                part(Category::Psu, "psu-550", 59.0).with_attr("wattage", "550W"),
                part(Category::Psu, "psu-850", 119.0).with_attr("wattage", "850W"),
            ],
        )
        .with_options(
            Category::Case,
            vec![
                part(Category::Case, "compact", 59.0)
                    .with_attr("maxGPULength", 300)
                    .with_attr("supportedFormFactors", vec!["Micro-ATX", "Mini-ITX"]),
                part(Category::Case, "tower", 99.0)
                    .with_attr("maxGPULength", 380)
                    .with_attr("supportedFormFactors", vec!["ATX", "Micro-ATX"]),
            ],
        )
        .with_options(
            Category::Gpu,
            vec![
                part(Category::Gpu, "rx-7600", 259.0).with_attr("length", 240),
                part(Category::Gpu, "rtx-4070", 549.0).with_attr("length", 310),
                part(Category::Gpu, "rtx-4090", 1599.0).with_attr("length", 340),
            ],
        )
        .with_options(
            Category::Cooling,
            vec![
                part(Category::Cooling, "tower-air", 35.0).with_attr("supportedSockets", vec!["AM4", "AM5"]),
                part(Category::Cooling, "aio-240", 99.0)
                    .with_attr("type", "Liquid")
                    .with_attr("supportedSockets", vec!["AM4", "AM5", "LGA1700"]),
            ],
        )
        .with_options(
            Category::Monitor,
            vec![part(Category::Monitor, "24in-1080p", 129.0), part(Category::Monitor, "27in-1440p", 249.0)],
        )
}
