//! Compatibility rule network
//!
//! Each rule looks at a fixed set of categories and only fires when the
//! categories it compares are populated and the attributes it needs
//! resolve. Unknown data is never a conflict. Two-sided findings are
//! recorded once per participating category.

use crate::power::estimate_power;
use crate::predicates::{normalize_socket, ram_compatible, sockets_compatible};
use crate::resolver::Attribute;
use rigsmith_core::config::PowerConfig;
use rigsmith_core::{Build, Category, Component, Issue, IssueMap, Severity};
use std::fmt;
use tracing::debug;

/// An issue attributed to one category by one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Id of the rule that fired
    pub rule: &'static str,
    /// Category the issue is listed under
    pub category: Category,
    /// The issue itself
    pub issue: Issue,
}

/// Collector passed to every rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    entries: Vec<Finding>,
}

impl Findings {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue against a single category
    pub fn report(&mut self, rule: &'static str, category: Category, issue: Issue) {
        debug!(rule, %category, severity = %issue.severity, "{}", issue.message);
        self.entries.push(Finding { rule, category, issue });
    }

    /// Record the same issue against both categories of a pair
    pub fn report_pair(&mut self, rule: &'static str, pair: (Category, Category), issue: Issue) {
        self.report(rule, pair.0, issue.clone());
        self.report(rule, pair.1, issue);
    }

    /// Every finding, in report order
    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.entries.iter()
    }

    /// Number of findings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an error-severity finding landed on `category`
    pub fn blocks(&self, category: Category) -> bool {
        self.entries
            .iter()
            .any(|f| f.category == category && f.issue.severity == Severity::Error)
    }

    /// Fold into a complete per-category map
    pub fn into_issue_map(self) -> IssueMap {
        let mut map = IssueMap::new();
        for finding in self.entries {
            map.push(finding.category, finding.issue);
        }
        map
    }
}

/// A single compatibility check over a build
pub trait CompatibilityRule: Send + Sync + fmt::Debug {
    /// Stable identifier
    fn id(&self) -> &'static str;

    /// Categories the rule reads
    fn categories(&self) -> &'static [Category];

    /// Check if the rule reads `category`
    fn involves(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// Inspect the build and report what is wrong with it
    fn check(&self, build: &Build, findings: &mut Findings);
}

/// The stock rule set, in evaluation order
pub fn default_rules(power: &PowerConfig) -> Vec<Box<dyn CompatibilityRule>> {
    vec![
        Box::new(SocketRule),
        Box::new(MemoryRule),
        Box::new(GpuClearanceRule),
        Box::new(PowerBudgetRule::new(power.clone())),
        Box::new(CoolerCpuRule),
        Box::new(CoolerHeightRule),
        Box::new(CoolerRamClearanceRule),
        Box::new(FormFactorRule),
        Box::new(RadiatorRule),
        Box::new(StorageRule),
    ]
}

fn both(build: &Build, a: Category, b: Category) -> Option<(&Component, &Component)> {
    Some((build.get(a)?, build.get(b)?))
}

fn contains_ignoring_space(haystack: &str, needle: &str) -> bool {
    normalize_socket(haystack).contains(&normalize_socket(needle))
}

/// CPU socket must match the motherboard socket
#[derive(Debug, Clone, Copy, Default)]
pub struct SocketRule;

impl CompatibilityRule for SocketRule {
    fn id(&self) -> &'static str {
        "cpu-motherboard-socket"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Cpu, Category::Motherboard]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((cpu, board)) = both(build, Category::Cpu, Category::Motherboard) else {
            return;
        };
        let (Some(cpu_socket), Some(board_socket)) = (
            Attribute::CpuSocket.text(cpu),
            Attribute::MotherboardSocket.text(board),
        ) else {
            return;
        };
        if !sockets_compatible(Some(cpu_socket.as_str()), Some(board_socket.as_str())) {
            findings.report_pair(
                self.id(),
                (Category::Cpu, Category::Motherboard),
                Issue::error(format!(
                    "Socket mismatch: CPU uses {cpu_socket} but the motherboard has a {board_socket} socket"
                )),
            );
        }
    }
}

/// RAM type must be supported by the motherboard and fit its slots
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryRule;

impl CompatibilityRule for MemoryRule {
    fn id(&self) -> &'static str {
        "memory-motherboard"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Memory, Category::Motherboard]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((memory, board)) = both(build, Category::Memory, Category::Motherboard) else {
            return;
        };
        let pair = (Category::Memory, Category::Motherboard);

        if let (Some(ram_type), Some(board_type)) = (
            Attribute::MemoryType.text(memory),
            Attribute::MotherboardMemoryType.text(board),
        ) {
            if !ram_compatible(Some(board_type.as_str()), Some(ram_type.as_str())) {
                findings.report_pair(
                    self.id(),
                    pair,
                    Issue::error(format!(
                        "Memory type mismatch: {ram_type} memory is not supported by a {board_type} motherboard"
                    )),
                );
            }
        }

        if let (Some(required), Some(available)) = (
            Attribute::MemoryRequiredSlots.number(memory),
            Attribute::MotherboardMemorySlots.number(board),
        ) {
            if required > available {
                findings.report_pair(
                    self.id(),
                    pair,
                    Issue::error(format!(
                        "Not enough memory slots: kit needs {required} but the motherboard has {available}"
                    )),
                );
            }
        }
    }
}

/// GPU must fit the case
#[derive(Debug, Clone, Copy, Default)]
pub struct GpuClearanceRule;

impl CompatibilityRule for GpuClearanceRule {
    fn id(&self) -> &'static str {
        "gpu-case-length"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Gpu, Category::Case]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((gpu, case)) = both(build, Category::Gpu, Category::Case) else {
            return;
        };
        if let (Some(length), Some(max_length)) = (
            Attribute::GpuLength.number(gpu),
            Attribute::CaseMaxGpuLength.number(case),
        ) {
            if length > max_length {
                findings.report_pair(
                    self.id(),
                    (Category::Gpu, Category::Case),
                    Issue::error(format!(
                        "GPU is too long for the case: {length}mm card, {max_length}mm maximum"
                    )),
                );
            }
        }
    }
}

/// PSU must cover the estimated draw with headroom
#[derive(Debug, Clone, Default)]
pub struct PowerBudgetRule {
    power: PowerConfig,
}

impl PowerBudgetRule {
    /// Create the rule with the given power constants
    pub fn new(power: PowerConfig) -> Self {
        Self { power }
    }
}

impl CompatibilityRule for PowerBudgetRule {
    fn id(&self) -> &'static str {
        "psu-power-budget"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Psu, Category::Cpu, Category::Gpu]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some(psu) = build.get(Category::Psu) else {
            return;
        };
        let Some(estimate) = estimate_power(build, &self.power) else {
            return;
        };

        if let Some(wattage) = Attribute::PsuWattage.digits(psu) {
            if wattage < estimate.recommended {
                findings.report(
                    self.id(),
                    Category::Psu,
                    Issue::warning(format!(
                        "PSU may be underpowered: {wattage}W rated, {}W recommended for an estimated {}W draw",
                        estimate.recommended, estimate.estimated
                    )),
                );
            }
        }

        if let Some(gpu) = build.get(Category::Gpu) {
            if gpu.name.contains("RTX 40") && !Attribute::PsuPcie5.flag(psu) {
                findings.report_pair(
                    self.id(),
                    (Category::Psu, Category::Gpu),
                    Issue::warning(
                        "This GPU uses a 12VHPWR (PCIe 5) power connector; the PSU may need an adapter or lack a native cable",
                    ),
                );
            }
        }
    }
}

/// Cooler must mount on the CPU socket and handle its heat
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolerCpuRule;

impl CompatibilityRule for CoolerCpuRule {
    fn id(&self) -> &'static str {
        "cooler-cpu"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Cooling, Category::Cpu]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((cooler, cpu)) = both(build, Category::Cooling, Category::Cpu) else {
            return;
        };

        let sockets = Attribute::CoolerSockets.list(cooler).unwrap_or_default();
        if let Some(cpu_socket) = Attribute::CpuSocket.text(cpu) {
            let mounts = sockets
                .iter()
                .any(|socket| sockets_compatible(Some(socket.as_str()), Some(cpu_socket.as_str())));
            if !sockets.is_empty() && !mounts {
                findings.report_pair(
                    self.id(),
                    (Category::Cooling, Category::Cpu),
                    Issue::error(format!(
                        "Cooler does not support the {cpu_socket} socket (supports {})",
                        sockets.join(", ")
                    )),
                );
            }
        }

        if let (Some(rating), Some(tdp)) = (
            Attribute::CoolerTdpSupport.number(cooler),
            Attribute::CpuTdp.number(cpu),
        ) {
            if tdp > rating {
                findings.report(
                    self.id(),
                    Category::Cooling,
                    Issue::warning(format!(
                        "Cooler is rated for {rating}W but the CPU has a {tdp}W TDP"
                    )),
                );
            }
        }
    }
}

/// Cooler must fit under the side panel
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolerHeightRule;

impl CompatibilityRule for CoolerHeightRule {
    fn id(&self) -> &'static str {
        "cooler-case-height"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Cooling, Category::Case]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((cooler, case)) = both(build, Category::Cooling, Category::Case) else {
            return;
        };
        if let (Some(height), Some(max_height)) = (
            Attribute::CoolerHeight.number(cooler),
            Attribute::CaseMaxCoolerHeight.number(case),
        ) {
            if height > max_height {
                findings.report_pair(
                    self.id(),
                    (Category::Cooling, Category::Case),
                    Issue::error(format!(
                        "Cooler is too tall for the case: {height}mm cooler, {max_height}mm maximum"
                    )),
                );
            }
        }
    }
}

/// Tall memory may collide with the cooler
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolerRamClearanceRule;

impl CompatibilityRule for CoolerRamClearanceRule {
    fn id(&self) -> &'static str {
        "cooler-memory-clearance"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Cooling, Category::Memory]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((cooler, memory)) = both(build, Category::Cooling, Category::Memory) else {
            return;
        };
        if let (Some(clearance), Some(ram_height)) = (
            Attribute::CoolerRamClearance.number(cooler),
            Attribute::MemoryHeight.number(memory),
        ) {
            if ram_height > clearance {
                findings.report_pair(
                    self.id(),
                    (Category::Cooling, Category::Memory),
                    Issue::warning(format!(
                        "Memory may block the cooler: {ram_height}mm modules, {clearance}mm clearance"
                    )),
                );
            }
        }
    }
}

/// Case must accept the motherboard form factor
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFactorRule;

impl CompatibilityRule for FormFactorRule {
    fn id(&self) -> &'static str {
        "motherboard-case-form-factor"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Motherboard, Category::Case]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((board, case)) = both(build, Category::Motherboard, Category::Case) else {
            return;
        };
        let Some(form_factor) = Attribute::MotherboardFormFactor.text(board) else {
            return;
        };
        let supported = Attribute::CaseFormFactors.list(case).unwrap_or_default();
        let accepted = supported
            .iter()
            .any(|candidate| normalize_socket(candidate) == normalize_socket(&form_factor));
        if !supported.is_empty() && !accepted {
            findings.report_pair(
                self.id(),
                (Category::Motherboard, Category::Case),
                Issue::error(format!(
                    "Case does not fit a {form_factor} motherboard (supports {})",
                    supported.join(", ")
                )),
            );
        }
    }
}

/// Liquid cooler radiator must have a mounting position in the case
#[derive(Debug, Clone, Copy, Default)]
pub struct RadiatorRule;

impl CompatibilityRule for RadiatorRule {
    fn id(&self) -> &'static str {
        "radiator-case"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Cooling, Category::Case]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((cooler, case)) = both(build, Category::Cooling, Category::Case) else {
            return;
        };
        let liquid = Attribute::CoolerType
            .text(cooler)
            .is_some_and(|kind| kind.eq_ignore_ascii_case("liquid"));
        if !liquid {
            return;
        }
        let (Some(radiator), Some(positions)) = (
            Attribute::CoolerRadiatorSize.digits(cooler),
            Attribute::CaseRadiatorSupport.numbers(case),
        ) else {
            return;
        };
        if !positions.is_empty() && !positions.iter().any(|&size| size >= radiator) {
            findings.report_pair(
                self.id(),
                (Category::Cooling, Category::Case),
                Issue::warning(format!(
                    "Case may not fit a {radiator}mm radiator in any mounting position"
                )),
            );
        }
    }
}

/// Drive needs an M.2 slot and, ideally, a matching PCIe generation
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageRule;

impl CompatibilityRule for StorageRule {
    fn id(&self) -> &'static str {
        "storage-motherboard"
    }

    fn categories(&self) -> &'static [Category] {
        &[Category::Storage, Category::Motherboard]
    }

    fn check(&self, build: &Build, findings: &mut Findings) {
        let Some((storage, board)) = both(build, Category::Storage, Category::Motherboard) else {
            return;
        };
        let pair = (Category::Storage, Category::Motherboard);

        let is_m2 = Attribute::StorageFormFactor
            .text(storage)
            .is_some_and(|form| contains_ignoring_space(&form, "m.2") || contains_ignoring_space(&form, "m2"));
        if is_m2 && Attribute::MotherboardM2Slots.number(board) == Some(0.0) {
            findings.report_pair(
                self.id(),
                pair,
                Issue::error("M.2 drive selected but the motherboard has no M.2 slots"),
            );
        }

        let wants_gen4 = Attribute::StorageInterface
            .text(storage)
            .is_some_and(|interface| contains_ignoring_space(&interface, "PCIe 4.0"));
        if wants_gen4 && !board.specs.is_empty() {
            let board_has_gen4 = board.specs.iter().any(|spec| {
                contains_ignoring_space(spec, "PCIe 4.0") || contains_ignoring_space(spec, "PCIe 5.0")
            });
            if !board_has_gen4 {
                findings.report_pair(
                    self.id(),
                    pair,
                    Issue::warning(
                        "PCIe 4.0 drive on a motherboard without PCIe 4.0 support will run at reduced speed",
                    ),
                );
            }
        }
    }
}
