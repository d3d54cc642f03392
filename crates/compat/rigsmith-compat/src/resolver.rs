//! Attribute resolution
//!
//! Catalog records spell the same fact several ways (`socket`,
//! `compatibility.socket`, a `specs` entry named `socket`, ...). Each
//! logical [`Attribute`] owns an ordered list of candidate paths; the
//! first path that yields a usable value wins.
//!
//! Descent rules for one path, key by key:
//! - on an object, take the key; if it is missing (or null) and the
//!   object carries a `specs` array, use the `value` of the entry whose
//!   `name` equals the key;
//! - on an array, treat it as a `specs` list and look the key up by name.

use rigsmith_core::{AttrValue, Component};
use std::collections::BTreeMap;

/// Sequence of keys to descend through
pub type Path<'a> = &'a [&'a str];

const SPECS_KEY: &str = "specs";

/// First value found along any candidate path, without interpretation
pub fn resolve<'c>(component: &'c Component, candidates: &[Path<'_>]) -> Option<&'c AttrValue> {
    candidates
        .iter()
        .find_map(|path| resolve_path(&component.attributes, path))
}

/// First candidate path whose value `read` accepts
///
/// A path that resolves to something unreadable (e.g. `"n/a"` for a
/// number) does not stop the search.
pub fn resolve_with<T>(
    component: &Component,
    candidates: &[Path<'_>],
    read: impl Fn(&AttrValue) -> Option<T>,
) -> Option<T> {
    candidates
        .iter()
        .filter_map(|path| resolve_path(&component.attributes, path))
        .find_map(read)
}

fn resolve_path<'c>(root: &'c BTreeMap<String, AttrValue>, path: Path<'_>) -> Option<&'c AttrValue> {
    let (first, rest) = path.split_first()?;
    let mut current = child(root, first)?;
    for key in rest {
        current = match current {
            AttrValue::Object(map) => child(map, key)?,
            AttrValue::Array(entries) => spec_entry(entries, key)?,
            _ => return None,
        };
    }
    (!current.is_null()).then_some(current)
}

fn child<'c>(map: &'c BTreeMap<String, AttrValue>, key: &str) -> Option<&'c AttrValue> {
    match map.get(key) {
        Some(value) if !value.is_null() => Some(value),
        _ => match map.get(SPECS_KEY) {
            Some(AttrValue::Array(entries)) => spec_entry(entries, key),
            _ => None,
        },
    }
}

fn spec_entry<'c>(entries: &'c [AttrValue], key: &str) -> Option<&'c AttrValue> {
    entries.iter().find_map(|entry| match entry {
        AttrValue::Object(fields)
            if matches!(fields.get("name"), Some(AttrValue::String(name)) if name == key) =>
        {
            fields.get("value").filter(|value| !value.is_null())
        }
        _ => None,
    })
}

/// Logical attribute read by the compatibility rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// CPU socket
    CpuSocket,
    /// CPU thermal design power (W)
    CpuTdp,
    /// Motherboard CPU socket
    MotherboardSocket,
    /// Motherboard supported memory type(s), e.g. "DDR4/DDR5"
    MotherboardMemoryType,
    /// Motherboard DIMM slot count
    MotherboardMemorySlots,
    /// Motherboard form factor
    MotherboardFormFactor,
    /// Motherboard M.2 slot count
    MotherboardM2Slots,
    /// RAM generation
    MemoryType,
    /// Modules in the RAM kit
    MemoryRequiredSlots,
    /// Module height (mm)
    MemoryHeight,
    /// GPU card length (mm)
    GpuLength,
    /// GPU board power (W)
    GpuPowerRequirement,
    /// Maximum GPU length the case fits (mm)
    CaseMaxGpuLength,
    /// Maximum cooler height the case fits (mm)
    CaseMaxCoolerHeight,
    /// Motherboard form factors the case accepts
    CaseFormFactors,
    /// Radiator sizes per mounting position
    CaseRadiatorSupport,
    /// PSU rating (W)
    PsuWattage,
    /// PSU ships a native 12VHPWR / PCIe 5 connector
    PsuPcie5,
    /// Sockets the cooler mounts on
    CoolerSockets,
    /// Heat the cooler is rated to dissipate (W)
    CoolerTdpSupport,
    /// Cooler height (mm)
    CoolerHeight,
    /// RAM height the cooler clears (mm)
    CoolerRamClearance,
    /// "Air" or "Liquid"
    CoolerType,
    /// Radiator size, e.g. "360mm"
    CoolerRadiatorSize,
    /// Drive form factor, e.g. "M.2 2280"
    StorageFormFactor,
    /// Drive interface, e.g. "PCIe 4.0 x4 NVMe"
    StorageInterface,
}

impl Attribute {
    /// Candidate paths, most authoritative first
    pub fn paths(self) -> &'static [Path<'static>] {
        match self {
            Attribute::CpuSocket => &[
                &["socket"],
                &["compatibility", "socket"],
                &["specs", "socket"],
                &["cpuSocket"],
            ],
            Attribute::CpuTdp => &[
                &["tdp"],
                &["power", "tdp"],
                &["compatibility", "tdp"],
                &["specs", "tdp"],
            ],
            Attribute::MotherboardSocket => &[
                &["socket"],
                &["compatibility", "socket"],
                &["cpuSocket"],
                &["specs", "socket"],
            ],
            Attribute::MotherboardMemoryType => &[
                &["memoryType"],
                &["compatibility", "memoryType"],
                &["supportedMemory"],
                &["specs", "memoryType"],
            ],
            Attribute::MotherboardMemorySlots => &[
                &["memorySlots"],
                &["compatibility", "memorySlots"],
                &["dimmSlots"],
                &["specs", "memorySlots"],
            ],
            Attribute::MotherboardFormFactor => &[
                &["formFactor"],
                &["compatibility", "formFactor"],
                &["specs", "formFactor"],
            ],
            Attribute::MotherboardM2Slots => &[
                &["m2Slots"],
                &["compatibility", "m2Slots"],
                &["storage", "m2Slots"],
                &["specs", "m2Slots"],
            ],
            Attribute::MemoryType => &[
                &["memoryType"],
                &["type"],
                &["compatibility", "memoryType"],
                &["specs", "memoryType"],
            ],
            Attribute::MemoryRequiredSlots => &[
                &["requiredSlots"],
                &["modules"],
                &["compatibility", "requiredSlots"],
                &["specs", "requiredSlots"],
            ],
            Attribute::MemoryHeight => &[
                &["height"],
                &["dimensions", "height"],
                &["moduleHeight"],
                &["specs", "height"],
            ],
            Attribute::GpuLength => &[
                &["length"],
                &["dimensions", "length"],
                &["compatibility", "length"],
                &["specs", "length"],
            ],
            Attribute::GpuPowerRequirement => &[
                &["powerRequirement"],
                &["power", "requirement"],
                &["compatibility", "powerRequirement"],
                &["tdp"],
                &["specs", "powerRequirement"],
            ],
            Attribute::CaseMaxGpuLength => &[
                &["maxGPULength"],
                &["compatibility", "maxGPULength"],
                &["clearance", "gpu"],
                &["specs", "maxGPULength"],
            ],
            Attribute::CaseMaxCoolerHeight => &[
                &["maxCoolerHeight"],
                &["compatibility", "maxCoolerHeight"],
                &["clearance", "cooler"],
                &["specs", "maxCoolerHeight"],
            ],
            Attribute::CaseFormFactors => &[
                &["supportedFormFactors"],
                &["formFactors"],
                &["compatibility", "formFactors"],
                &["compatibility", "supportedFormFactors"],
            ],
            Attribute::CaseRadiatorSupport => &[
                &["radiatorSupport"],
                &["compatibility", "radiatorSupport"],
                &["specs", "radiatorSupport"],
            ],
            Attribute::PsuWattage => &[
                &["wattage"],
                &["power", "wattage"],
                &["compatibility", "wattage"],
                &["specs", "wattage"],
            ],
            Attribute::PsuPcie5 => &[&["pcie5"], &["compatibility", "pcie5"]],
            Attribute::CoolerSockets => &[
                &["supportedSockets"],
                &["compatibility", "supportedSockets"],
                &["sockets"],
                &["specs", "supportedSockets"],
            ],
            Attribute::CoolerTdpSupport => &[
                &["tdpSupport"],
                &["compatibility", "tdpSupport"],
                &["maxTdp"],
                &["specs", "tdpSupport"],
            ],
            Attribute::CoolerHeight => &[
                &["height"],
                &["dimensions", "height"],
                &["compatibility", "height"],
                &["specs", "height"],
            ],
            Attribute::CoolerRamClearance => &[
                &["ramClearance"],
                &["compatibility", "ramClearance"],
                &["clearance", "ram"],
                &["specs", "ramClearance"],
            ],
            Attribute::CoolerType => &[
                &["type"],
                &["coolerType"],
                &["compatibility", "type"],
                &["specs", "type"],
            ],
            Attribute::CoolerRadiatorSize => &[
                &["radiatorSize"],
                &["compatibility", "radiatorSize"],
                &["specs", "radiatorSize"],
            ],
            Attribute::StorageFormFactor => &[
                &["formFactor"],
                &["compatibility", "formFactor"],
                &["specs", "formFactor"],
            ],
            Attribute::StorageInterface => &[
                &["interface"],
                &["compatibility", "interface"],
                &["specs", "interface"],
            ],
        }
    }

    /// Raw value, uninterpreted
    pub fn raw(self, component: &Component) -> Option<&AttrValue> {
        resolve(component, self.paths())
    }

    /// Non-blank text
    pub fn text(self, component: &Component) -> Option<String> {
        resolve_with(component, self.paths(), AttrValue::as_text)
    }

    /// Finite number, units after the digits ignored
    pub fn number(self, component: &Component) -> Option<f64> {
        resolve_with(component, self.paths(), AttrValue::as_number)
    }

    /// Number built from the digits of the value only
    pub fn digits(self, component: &Component) -> Option<f64> {
        resolve_with(component, self.paths(), AttrValue::as_digits)
    }

    /// List of text values
    pub fn list(self, component: &Component) -> Option<Vec<String>> {
        resolve_with(component, self.paths(), AttrValue::as_text_list)
    }

    /// Numeric leaves of a map or array
    pub fn numbers(self, component: &Component) -> Option<Vec<f64>> {
        resolve_with(component, self.paths(), AttrValue::numeric_values)
    }

    /// Truthiness of the first resolvable value; absent reads as `false`
    pub fn flag(self, component: &Component) -> bool {
        self.raw(component).is_some_and(AttrValue::is_truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigsmith_core::Category;

    fn board() -> Component {
        Component::new("mb-1", Category::Motherboard, "B650", 180.0)
    }

    #[test]
    fn test_first_candidate_wins() {
        let component = board()
            .with_attr("socket", "AM5")
            .with_attr("compatibility", AttrValue::object([("socket", "AM4")]));
        assert_eq!(Attribute::MotherboardSocket.text(&component).as_deref(), Some("AM5"));
    }

    #[test]
    fn test_nested_fallback() {
        let component =
            board().with_attr("compatibility", AttrValue::object([("socket", "LGA1700")]));
        assert_eq!(
            Attribute::MotherboardSocket.text(&component).as_deref(),
            Some("LGA1700")
        );
    }

    #[test]
    fn test_specs_array_fallback_on_missing_key() {
        let specs = AttrValue::Array(vec![
            AttrValue::object([("name", "chipset"), ("value", "B650")]),
            AttrValue::object([("name", "formFactor"), ("value", "Micro-ATX")]),
        ]);
        let component = board().with_attr("specs", specs);
        assert_eq!(
            Attribute::MotherboardFormFactor.text(&component).as_deref(),
            Some("Micro-ATX")
        );
    }

    #[test]
    fn test_specs_fallback_inside_nested_object() {
        let nested = AttrValue::object([(
            "specs",
            AttrValue::Array(vec![AttrValue::object([
                ("name", AttrValue::from("socket")),
                ("value", AttrValue::from("AM4")),
            ])]),
        )]);
        let component = board().with_attr("compatibility", nested);
        let path: Path<'_> = &["compatibility", "socket"];
        assert_eq!(resolve(&component, &[path]), Some(&AttrValue::from("AM4")));
    }

    #[test]
    fn test_unreadable_value_falls_through() {
        let component = board()
            .with_attr("memorySlots", "unknown")
            .with_attr("dimmSlots", 4);
        assert_eq!(Attribute::MotherboardMemorySlots.number(&component), Some(4.0));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let component = board()
            .with_attr("socket", AttrValue::Null)
            .with_attr("cpuSocket", "AM5");
        assert_eq!(Attribute::MotherboardSocket.text(&component).as_deref(), Some("AM5"));
    }

    #[test]
    fn test_unresolved_is_none() {
        let component = board().with_attr("socket", AttrValue::object([("x", 1)]));
        assert_eq!(Attribute::MotherboardSocket.text(&component), None);
        assert_eq!(Attribute::MotherboardM2Slots.number(&component), None);
        assert!(!Attribute::PsuPcie5.flag(&component));
        assert_eq!(resolve(&component, &[]), None);
    }

    #[test]
    fn test_every_attribute_has_several_spellings() {
        use Attribute::*;
        for attribute in [
            CpuSocket, CpuTdp, MotherboardSocket, MotherboardMemoryType, MemoryType,
            GpuLength, CaseMaxGpuLength, PsuWattage, CoolerSockets, StorageInterface,
        ] {
            assert!(attribute.paths().len() >= 3, "{attribute:?}");
        }
    }
}
