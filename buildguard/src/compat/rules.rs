use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::build::BuildState;
use crate::compat::power::{estimate_wattage, recommended_wattage};
use crate::parts::CoolerType;

/// Motherboards that don't list SATA ports are assumed to have this many.
pub const DEFAULT_SATA_PORTS: u32 = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocks the build from proceeding.
    Error,
    /// Advisory only.
    Warning,
}

/// A detected incompatibility. `Display` gives the sentence shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    SocketMismatch { cpu_socket: String, board_socket: String },
    CoolerSocketUnsupported { cpu_socket: String },
    MemoryTypeMismatch { board_memory: String, ram_memory: String },
    FormFactorUnsupported { form_factor: String },
    GpuTooLong { gpu_length_mm: f64, case_max_mm: f64 },
    CoolerTooTall { cooler_height_mm: f64, case_max_mm: f64 },
    RadiatorUnsupported { radiator_size: String },
    M2SlotsExceeded { slots: u32, nvme_drives: usize },
    SataPortsExceeded { ports: u32, sata_drives: usize },
    InsufficientPower { estimated_w: u32, psu_w: u32 },
    LowPowerHeadroom { recommended_w: u32, psu_w: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::SocketMismatch { cpu_socket, board_socket } => write!(
                f,
                "Incompatible Socket: CPU ({}) does not match Motherboard ({}).",
                cpu_socket, board_socket
            ),
            Violation::CoolerSocketUnsupported { cpu_socket } => write!(
                f,
                "Incompatible Cooler: Cooler does not support CPU socket ({}).",
                cpu_socket
            ),
            Violation::MemoryTypeMismatch { board_memory, ram_memory } => write!(
                f,
                "Incompatible RAM: Motherboard requires {}, but RAM is {}.",
                board_memory, ram_memory
            ),
            Violation::FormFactorUnsupported { form_factor } => write!(
                f,
                "Incompatible Case: Case does not support {} motherboards.",
                form_factor
            ),
            Violation::GpuTooLong { gpu_length_mm, case_max_mm } => write!(
                f,
                "Physical Clearance: GPU length ({}mm) exceeds Case maximum ({}mm).",
                gpu_length_mm, case_max_mm
            ),
            Violation::CoolerTooTall { cooler_height_mm, case_max_mm } => write!(
                f,
                "Physical Clearance: Cooler height ({}mm) exceeds Case maximum ({}mm).",
                cooler_height_mm, case_max_mm
            ),
            Violation::RadiatorUnsupported { radiator_size } => write!(
                f,
                "Physical Clearance: Case does not support {}mm radiators.",
                radiator_size
            ),
            Violation::M2SlotsExceeded { slots, nvme_drives } => write!(
                f,
                "Storage Limit: Motherboard only has {} M.2 slots (Selected: {} NVMe drives).",
                slots, nvme_drives
            ),
            Violation::SataPortsExceeded { ports, sata_drives } => write!(
                f,
                "Storage Limit: Motherboard only has {} SATA ports (Selected: {} SATA drives).",
                ports, sata_drives
            ),
            Violation::InsufficientPower { estimated_w, psu_w } => write!(
                f,
                "Insufficient Power: Estimated usage ({}W) exceeds PSU wattage ({}W).",
                estimated_w, psu_w
            ),
            Violation::LowPowerHeadroom { recommended_w, psu_w } => write!(
                f,
                "Low Power Headroom: Recommended PSU is {}W for safe operation (Current: {}W).",
                recommended_w, psu_w
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub violation: Violation,
}

impl Issue {
    pub fn new(rule_id: &str, severity: Severity, violation: Violation) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: violation.to_string(),
            violation,
        }
    }

    pub fn error(rule_id: &str, violation: Violation) -> Self {
        Self::new(rule_id, Severity::Error, violation)
    }

    pub fn warning(rule_id: &str, violation: Violation) -> Self {
        Self::new(rule_id, Severity::Warning, violation)
    }
}

/// One compatibility check. A rule must stay silent unless every slot it
/// reads is filled.
pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn check(&self, build: &BuildState) -> Vec<Issue>;
}

pub struct RulesEngine {
    rules: Vec<Arc<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every built-in rule, in reporting order.
    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(CpuSocketRule));
        engine.add_rule(Arc::new(CoolerSocketRule));
        engine.add_rule(Arc::new(MemoryTypeRule));
        engine.add_rule(Arc::new(CaseFormFactorRule));
        engine.add_rule(Arc::new(GpuClearanceRule));
        engine.add_rule(Arc::new(CoolerClearanceRule));
        engine.add_rule(Arc::new(StorageCapacityRule));
        engine.add_rule(Arc::new(PowerBudgetRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn analyze(&self, build: &BuildState) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            issues.extend(rule.check(build));
        }
        issues
    }

    /// First id in `ids` that names no registered rule.
    pub fn unknown_rule<'a>(&self, ids: &'a [String]) -> Option<&'a str> {
        ids.iter()
            .map(String::as_str)
            .find(|id| !self.rules.iter().any(|r| r.id() == *id))
    }

    /// Run only the rules whose id is in `only`; an empty filter runs all.
    pub fn analyze_filtered(&self, build: &BuildState, only: &[String]) -> Vec<Issue> {
        if only.is_empty() {
            return self.analyze(build);
        }
        let mut issues = Vec::new();
        for rule in self.rules.iter().filter(|r| only.iter().any(|id| id == r.id())) {
            issues.extend(rule.check(build));
        }
        issues
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

// Rule implementations

pub struct CpuSocketRule;

impl Rule for CpuSocketRule {
    fn id(&self) -> &str {
        "cpu_socket"
    }

    fn name(&self) -> &str {
        "CPU / motherboard socket"
    }

    fn description(&self) -> &str {
        "CPU socket must match the motherboard socket"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(cpu), Some(board)) = (&build.cpu, &build.motherboard) else {
            return vec![];
        };
        if cpu.socket == board.cpu_socket {
            return vec![];
        }
        vec![Issue::error(
            self.id(),
            Violation::SocketMismatch {
                cpu_socket: cpu.socket.clone(),
                board_socket: board.cpu_socket.clone(),
            },
        )]
    }
}

pub struct CoolerSocketRule;

impl Rule for CoolerSocketRule {
    fn id(&self) -> &str {
        "cooler_socket"
    }

    fn name(&self) -> &str {
        "Cooler socket support"
    }

    fn description(&self) -> &str {
        "Cooler must list the CPU socket among its supported mounts"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(cpu), Some(cooler)) = (&build.cpu, &build.cooler) else {
            return vec![];
        };
        if cooler.supported_sockets.contains(&cpu.socket) {
            return vec![];
        }
        vec![Issue::error(
            self.id(),
            Violation::CoolerSocketUnsupported {
                cpu_socket: cpu.socket.clone(),
            },
        )]
    }
}

pub struct MemoryTypeRule;

impl Rule for MemoryTypeRule {
    fn id(&self) -> &str {
        "memory_type"
    }

    fn name(&self) -> &str {
        "Memory type"
    }

    fn description(&self) -> &str {
        "RAM generation must match the motherboard (DDR4/DDR5)"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(board), Some(ram)) = (&build.motherboard, &build.ram) else {
            return vec![];
        };
        if board.memory_type == ram.memory_type {
            return vec![];
        }
        vec![Issue::error(
            self.id(),
            Violation::MemoryTypeMismatch {
                board_memory: board.memory_type.clone(),
                ram_memory: ram.memory_type.clone(),
            },
        )]
    }
}

pub struct CaseFormFactorRule;

impl Rule for CaseFormFactorRule {
    fn id(&self) -> &str {
        "case_form_factor"
    }

    fn name(&self) -> &str {
        "Case / motherboard form factor"
    }

    fn description(&self) -> &str {
        "Case must accept the motherboard form factor"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(case), Some(board)) = (&build.case, &build.motherboard) else {
            return vec![];
        };
        if case.supported_motherboards.contains(&board.form_factor) {
            return vec![];
        }
        vec![Issue::error(
            self.id(),
            Violation::FormFactorUnsupported {
                form_factor: board.form_factor.clone(),
            },
        )]
    }
}

pub struct GpuClearanceRule;

impl Rule for GpuClearanceRule {
    fn id(&self) -> &str {
        "gpu_clearance"
    }

    fn name(&self) -> &str {
        "GPU length clearance"
    }

    fn description(&self) -> &str {
        "GPU must fit within the case's maximum card length"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(case), Some(gpu)) = (&build.case, &build.gpu) else {
            return vec![];
        };
        if gpu.length_mm <= case.max_gpu_length_mm {
            return vec![];
        }
        vec![Issue::error(
            self.id(),
            Violation::GpuTooLong {
                gpu_length_mm: gpu.length_mm,
                case_max_mm: case.max_gpu_length_mm,
            },
        )]
    }
}

pub struct CoolerClearanceRule;

impl Rule for CoolerClearanceRule {
    fn id(&self) -> &str {
        "cooler_clearance"
    }

    fn name(&self) -> &str {
        "Cooler clearance"
    }

    fn description(&self) -> &str {
        "Air coolers must fit the case height limit; radiators must be supported"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let (Some(case), Some(cooler)) = (&build.case, &build.cooler) else {
            return vec![];
        };
        match cooler.kind {
            CoolerType::Air => {
                if cooler.height_mm > case.max_cpu_cooler_height_mm {
                    return vec![Issue::error(
                        self.id(),
                        Violation::CoolerTooTall {
                            cooler_height_mm: cooler.height_mm,
                            case_max_mm: case.max_cpu_cooler_height_mm,
                        },
                    )];
                }
            }
            CoolerType::Liquid => {
                // Radiator sizes compare as strings against the case's list.
                let radiator_size = cooler.radiator_size_mm.to_string();
                if !case.supported_radiators.contains(&radiator_size) {
                    return vec![Issue::error(
                        self.id(),
                        Violation::RadiatorUnsupported { radiator_size },
                    )];
                }
            }
        }
        vec![]
    }
}

pub struct StorageCapacityRule;

impl Rule for StorageCapacityRule {
    fn id(&self) -> &str {
        "storage_capacity"
    }

    fn name(&self) -> &str {
        "Storage slot capacity"
    }

    fn description(&self) -> &str {
        "NVMe drives must fit the M.2 slots and SATA drives the SATA ports"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let Some(board) = &build.motherboard else {
            return vec![];
        };
        if build.storage.is_empty() {
            return vec![];
        }

        let mut issues = Vec::new();
        let nvme_drives = build.storage.iter().filter(|s| s.is_nvme()).count();
        // Counted per drive, so a 2.5" SATA SSD uses one port.
        let sata_drives = build.storage.iter().filter(|s| s.uses_sata_port()).count();

        if nvme_drives > board.m2_slots_gen4 as usize {
            issues.push(Issue::error(
                self.id(),
                Violation::M2SlotsExceeded {
                    slots: board.m2_slots_gen4,
                    nvme_drives,
                },
            ));
        }

        let ports = if board.sata_ports == 0 {
            DEFAULT_SATA_PORTS
        } else {
            board.sata_ports
        };
        if sata_drives > ports as usize {
            issues.push(Issue::error(
                self.id(),
                Violation::SataPortsExceeded { ports, sata_drives },
            ));
        }
        issues
    }
}

pub struct PowerBudgetRule;

impl Rule for PowerBudgetRule {
    fn id(&self) -> &str {
        "power_budget"
    }

    fn name(&self) -> &str {
        "Power budget"
    }

    fn description(&self) -> &str {
        "PSU must cover the estimated draw; below 1.5x the estimate is flagged as low headroom"
    }

    fn check(&self, build: &BuildState) -> Vec<Issue> {
        let Some(psu) = &build.psu else {
            return vec![];
        };
        let estimated_w = estimate_wattage(build);
        let recommended_w = recommended_wattage(estimated_w);

        if psu.wattage < estimated_w {
            vec![Issue::error(
                self.id(),
                Violation::InsufficientPower {
                    estimated_w,
                    psu_w: psu.wattage,
                },
            )]
        } else if psu.wattage < recommended_w {
            vec![Issue::warning(
                self.id(),
                Violation::LowPowerHeadroom {
                    recommended_w,
                    psu_w: psu.wattage,
                },
            )]
        } else {
            vec![]
        }
    }
}
