//! Typed part model.
//!
//! Catalog records arrive as loosely-typed spec maps; everything past the
//! [`adapter`] boundary works with the closed [`Part`] union below.

pub mod adapter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use adapter::{PartAdapter, ProductRecord};

/// One of the eight component slots a build may fill.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cpu,
    Motherboard,
    Ram,
    Gpu,
    Case,
    Cooler,
    Storage,
    Psu,
}

impl Category {
    /// Builder steps in storefront order.
    pub const BUILD_ORDER: [Category; 8] = [
        Category::Cpu,
        Category::Motherboard,
        Category::Ram,
        Category::Gpu,
        Category::Storage,
        Category::Cooler,
        Category::Psu,
        Category::Case,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cpu => "cpu",
            Category::Motherboard => "motherboard",
            Category::Ram => "ram",
            Category::Gpu => "gpu",
            Category::Case => "case",
            Category::Cooler => "cooler",
            Category::Storage => "storage",
            Category::Psu => "psu",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Cpu => "Processor",
            Category::Motherboard => "Motherboard",
            Category::Ram => "Memory",
            Category::Gpu => "Graphics Card",
            Category::Case => "Case",
            Category::Cooler => "Cooling",
            Category::Storage => "Storage",
            Category::Psu => "Power Supply",
        }
    }

    /// Whether a build may hold more than one part of this category.
    pub fn is_multi(&self) -> bool {
        matches!(self, Category::Storage)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown part category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpu" | "cpus" => Ok(Category::Cpu),
            "motherboard" | "motherboards" => Ok(Category::Motherboard),
            "ram" => Ok(Category::Ram),
            "gpu" | "gpus" => Ok(Category::Gpu),
            "case" | "cabinets" => Ok(Category::Case),
            "cooler" => Ok(Category::Cooler),
            "storage" => Ok(Category::Storage),
            "psu" => Ok(Category::Psu),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Fields every catalog product carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartInfo {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub brand: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cpu {
    #[serde(flatten)]
    pub info: PartInfo,
    pub socket: String,
    pub tdp: u32,
    pub integrated_graphics: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Motherboard {
    #[serde(flatten)]
    pub info: PartInfo,
    pub cpu_socket: String,
    pub memory_type: String,
    pub form_factor: String,
    pub m2_slots_gen4: u32,
    pub sata_ports: u32,
    pub max_memory_gb: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ram {
    #[serde(flatten)]
    pub info: PartInfo,
    pub memory_type: String,
    pub speed_mhz: u32,
    pub modules: u32,
    pub capacity_gb: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Gpu {
    #[serde(flatten)]
    pub info: PartInfo,
    pub length_mm: f64,
    pub tdp: u32,
    pub slot_width: f64,
    /// Smallest PSU the vendor recommends for this card.
    pub recommended_psu_w: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Case {
    #[serde(flatten)]
    pub info: PartInfo,
    pub supported_motherboards: Vec<String>,
    pub max_gpu_length_mm: f64,
    pub max_cpu_cooler_height_mm: f64,
    /// Radiator sizes as authored, e.g. `"240"`, `"360"`.
    pub supported_radiators: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CoolerType {
    #[default]
    Air,
    Liquid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cooler {
    #[serde(flatten)]
    pub info: PartInfo,
    #[serde(rename = "type")]
    pub kind: CoolerType,
    pub height_mm: f64,
    /// Only meaningful for liquid coolers.
    pub radiator_size_mm: f64,
    /// Not checked against the case.
    pub length_mm: f64,
    pub tdp: u32,
    pub supported_sockets: Vec<String>,
}

/// Storage bus. Matching is exact on the authored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageInterface {
    NVMe,
    Sata,
    Other(String),
}

impl Default for StorageInterface {
    fn default() -> Self {
        StorageInterface::Other(String::new())
    }
}

impl From<String> for StorageInterface {
    fn from(s: String) -> Self {
        match s.as_str() {
            "NVMe" => StorageInterface::NVMe,
            "SATA" => StorageInterface::Sata,
            _ => StorageInterface::Other(s),
        }
    }
}

impl From<StorageInterface> for String {
    fn from(i: StorageInterface) -> Self {
        match i {
            StorageInterface::NVMe => "NVMe".to_string(),
            StorageInterface::Sata => "SATA".to_string(),
            StorageInterface::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageFormFactor {
    M2,
    TwoPointFive,
    Other(String),
}

impl Default for StorageFormFactor {
    fn default() -> Self {
        StorageFormFactor::Other(String::new())
    }
}

impl From<String> for StorageFormFactor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "M.2" => StorageFormFactor::M2,
            "2.5" => StorageFormFactor::TwoPointFive,
            _ => StorageFormFactor::Other(s),
        }
    }
}

impl From<StorageFormFactor> for String {
    fn from(f: StorageFormFactor) -> Self {
        match f {
            StorageFormFactor::M2 => "M.2".to_string(),
            StorageFormFactor::TwoPointFive => "2.5".to_string(),
            StorageFormFactor::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Storage {
    #[serde(flatten)]
    pub info: PartInfo,
    #[serde(rename = "type")]
    pub interface: StorageInterface,
    pub form_factor: StorageFormFactor,
    pub generation: String,
}

impl Storage {
    pub fn is_nvme(&self) -> bool {
        self.interface == StorageInterface::NVMe
    }

    /// Occupies a SATA port: SATA bus or a 2.5" drive.
    pub fn uses_sata_port(&self) -> bool {
        self.interface == StorageInterface::Sata
            || self.form_factor == StorageFormFactor::TwoPointFive
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Psu {
    #[serde(flatten)]
    pub info: PartInfo,
    pub wattage: u32,
    pub form_factor: String,
}

/// A catalog part, discriminated by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Part {
    Cpu(Cpu),
    Motherboard(Motherboard),
    Ram(Ram),
    Gpu(Gpu),
    Case(Case),
    Cooler(Cooler),
    Storage(Storage),
    Psu(Psu),
}

impl Part {
    pub fn category(&self) -> Category {
        match self {
            Part::Cpu(_) => Category::Cpu,
            Part::Motherboard(_) => Category::Motherboard,
            Part::Ram(_) => Category::Ram,
            Part::Gpu(_) => Category::Gpu,
            Part::Case(_) => Category::Case,
            Part::Cooler(_) => Category::Cooler,
            Part::Storage(_) => Category::Storage,
            Part::Psu(_) => Category::Psu,
        }
    }

    pub fn info(&self) -> &PartInfo {
        match self {
            Part::Cpu(p) => &p.info,
            Part::Motherboard(p) => &p.info,
            Part::Ram(p) => &p.info,
            Part::Gpu(p) => &p.info,
            Part::Case(p) => &p.info,
            Part::Cooler(p) => &p.info,
            Part::Storage(p) => &p.info,
            Part::Psu(p) => &p.info,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    /// One-line spec preview for list rendering.
    pub fn summary(&self) -> String {
        match self {
            Part::Cpu(p) => format!("Socket: {} | TDP: {}W", p.socket, p.tdp),
            Part::Motherboard(p) => format!("Socket: {} | {}", p.cpu_socket, p.form_factor),
            Part::Ram(p) => format!("{} | {}MHz", p.memory_type, p.speed_mhz),
            Part::Gpu(p) => format!("{}mm | TDP: {}W", p.length_mm, p.tdp),
            Part::Case(p) => format!(
                "{} | GPU max {}mm",
                p.supported_motherboards.join("/"),
                p.max_gpu_length_mm
            ),
            Part::Cooler(p) => match p.kind {
                CoolerType::Air => format!("Air | {}mm", p.height_mm),
                CoolerType::Liquid => format!("Liquid | {}mm radiator", p.radiator_size_mm),
            },
            Part::Storage(p) => format!(
                "{} | {}",
                String::from(p.interface.clone()),
                String::from(p.form_factor.clone())
            ),
            Part::Psu(p) => format!("{}W | {}", p.wattage, p.form_factor),
        }
    }
}
