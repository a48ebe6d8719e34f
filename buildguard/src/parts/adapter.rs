//! Part Adapter
//!
//! Turns catalog product records (free-form `specs` maps) into strict
//! [`Part`] values. This is the only place that understands the catalog's
//! raw key names. It never fails: missing or malformed fields fall back to
//! fixed defaults so an incomplete listing still renders as a part.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{
    Case, Category, Cooler, CoolerType, Cpu, Gpu, Motherboard, Part, PartInfo, Psu, Ram, Storage,
};

const DEFAULT_GPU_LENGTH_MM: f64 = 300.0;
const DEFAULT_COOLER_LENGTH_MM: f64 = 300.0;
const DEFAULT_CASE_GPU_MAX_MM: f64 = 400.0;
const DEFAULT_CASE_COOLER_MAX_MM: f64 = 180.0;
const DEFAULT_CASE_FORM_FACTOR: &str = "ATX";
const DEFAULT_RECOMMENDED_PSU_W: u32 = 650;

/// A product as served by the catalog API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    #[serde(default, alias = "_id", deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_option_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_specs")]
    pub specs: Map<String, Value>,
}

impl ProductRecord {
    pub fn new(id: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    /// Builder-style helper for setting a raw spec value.
    pub fn with_spec(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.specs.insert(key.to_string(), value.into());
        self
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_to_string(&v))
}

fn lenient_option_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    let s = value_to_string(&v);
    Ok(if s.is_empty() { None } else { Some(s) })
}

fn lenient_price<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(to_number(&v).filter(|n| n.is_finite() && *n >= 0.0).unwrap_or(0.0))
}

fn lenient_specs<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
    match Value::deserialize(d)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

/// String rendering of a raw value; arrays join with commas.
fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => f.to_string(),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(value_to_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => String::new(),
    }
}

fn to_number(v: &Value) -> Option<f64> {
    match v {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Some(0.0)
            } else {
                s.parse::<f64>().ok()
            }
        }
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] if !single.is_array() => to_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

/// Strip all whitespace and uppercase: `"LGA 1700"` becomes `"LGA1700"`.
pub fn normalize_socket(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Expand a case's form factor spec into the motherboard sizes it accepts.
pub fn supported_motherboards(raw: &str) -> Vec<String> {
    let raw = if raw.is_empty() { DEFAULT_CASE_FORM_FACTOR } else { raw };
    if raw.contains('|') {
        return raw.split('|').map(|s| s.trim().to_string()).collect();
    }
    let upper = raw.to_uppercase();
    let list: &[&str] = match upper.as_str() {
        "E-ATX" => &["E-ATX", "ATX", "mATX", "ITX"],
        "ATX" => &["ATX", "mATX", "ITX"],
        "MATX" | "MICRO-ATX" => &["mATX", "ITX"],
        "ITX" | "MINI-ITX" => &["ITX"],
        _ => return vec![upper],
    };
    list.iter().map(|s| s.to_string()).collect()
}

/// Typed view over one record's spec map.
struct SpecReader<'a> {
    id: &'a str,
    specs: &'a Map<String, Value>,
}

impl<'a> SpecReader<'a> {
    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.specs.get(key)
    }

    fn is_truthy(&self, key: &str) -> bool {
        match self.raw(key) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Some(_) => true,
        }
    }

    /// Positive finite number, or `default`.
    fn number(&self, key: &str, default: f64) -> f64 {
        let Some(value) = self.raw(key) else {
            return default;
        };
        match to_number(value) {
            Some(n) if n.is_finite() && n > 0.0 => n,
            Some(n) if n == 0.0 => default,
            _ => {
                tracing::debug!(
                    "Product {}: spec '{}' is not a usable number ({}), using default {}",
                    self.id,
                    key,
                    value,
                    default
                );
                default
            }
        }
    }

    fn count(&self, key: &str, default: u32) -> u32 {
        self.number(key, default as f64).round() as u32
    }

    fn count_with_fallback(&self, key: &str, fallback: &str) -> u32 {
        if self.is_truthy(key) {
            self.count(key, 0)
        } else {
            self.count(fallback, 0)
        }
    }

    fn text(&self, key: &str) -> String {
        self.raw(key).map(value_to_string).unwrap_or_default()
    }

    /// Text of a truthy value, empty otherwise.
    fn truthy_text(&self, key: &str) -> String {
        if self.is_truthy(key) {
            self.text(key)
        } else {
            String::new()
        }
    }

    fn text_with_fallback(&self, key: &str, fallback: &str) -> String {
        if self.is_truthy(key) {
            self.text(key)
        } else {
            self.text(fallback)
        }
    }

    /// Comma-separated list; absent or empty yields no entries.
    fn list(&self, key: &str) -> Vec<String> {
        if !self.is_truthy(key) {
            return Vec::new();
        }
        self.text(key).split(',').map(|s| s.trim().to_string()).collect()
    }

    fn flag(&self, key: &str) -> bool {
        match self.raw(key) {
            Some(Value::String(s)) => {
                matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
            }
            _ => self.is_truthy(key),
        }
    }
}

/// Adapter from catalog records to typed parts.
pub struct PartAdapter;

impl PartAdapter {
    /// Adapt one record. Returns `None` only when the category is not one of
    /// the eight build slots.
    pub fn adapt(record: &ProductRecord) -> Option<Part> {
        let category = match record.category.parse::<Category>() {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!("Product {}: {}", record.id, e);
                return None;
            }
        };
        Some(Self::adapt_as(record, category))
    }

    /// Adapt a record into the given category, ignoring its own category field.
    pub fn adapt_as(record: &ProductRecord, category: Category) -> Part {
        let specs = SpecReader {
            id: &record.id,
            specs: &record.specs,
        };
        let info = PartInfo {
            id: record.id.clone(),
            name: record.name.clone(),
            price: record.price,
            image: record.image.clone(),
            brand: record.brand.clone(),
        };

        match category {
            Category::Cpu => Part::Cpu(Cpu {
                info,
                socket: normalize_socket(&specs.text("socket")),
                tdp: specs.count("tdp", 0),
                integrated_graphics: specs.flag("integrated_graphics"),
            }),
            Category::Motherboard => Part::Motherboard(Motherboard {
                info,
                cpu_socket: normalize_socket(&specs.text_with_fallback("socket", "cpu_socket")),
                memory_type: specs.text("memory_type"),
                form_factor: specs.text("form_factor"),
                m2_slots_gen4: specs.count_with_fallback("m2_slots", "m2_slots_gen4"),
                sata_ports: specs.count("sata_ports", 0),
                max_memory_gb: specs.count("max_memory_gb", 0),
            }),
            Category::Ram => Part::Ram(Ram {
                info,
                memory_type: specs.text("memory_type"),
                speed_mhz: specs.count("speed_mhz", 0),
                modules: specs.count("modules", 0),
                capacity_gb: specs.count("capacity_gb", 0),
            }),
            Category::Gpu => Part::Gpu(Gpu {
                info,
                length_mm: specs.number("length", DEFAULT_GPU_LENGTH_MM),
                tdp: specs.count("tdp", 0),
                slot_width: specs.number("slot_width", 0.0),
                recommended_psu_w: match specs.count("recommended_psu", 0) {
                    0 => specs.count("recommended_psu_wattage", DEFAULT_RECOMMENDED_PSU_W),
                    watts => watts,
                },
            }),
            Category::Case => Part::Case(Case {
                info,
                supported_motherboards: supported_motherboards(&specs.truthy_text("form_factor")),
                max_gpu_length_mm: specs.number("gpu_max_length", DEFAULT_CASE_GPU_MAX_MM),
                max_cpu_cooler_height_mm: specs
                    .number("cpu_cooler_max_height", DEFAULT_CASE_COOLER_MAX_MM),
                supported_radiators: specs.list("radiator_support"),
            }),
            Category::Cooler => Part::Cooler(Cooler {
                info,
                kind: if specs.text("cooler_type").contains("Liquid") {
                    CoolerType::Liquid
                } else {
                    CoolerType::Air
                },
                height_mm: specs.number("height", 0.0),
                radiator_size_mm: specs.number("radiator_size", 0.0),
                length_mm: specs.number("length", DEFAULT_COOLER_LENGTH_MM),
                tdp: specs.count("tdp", 0),
                supported_sockets: specs
                    .list("socket_support")
                    .iter()
                    .map(|s| normalize_socket(s))
                    .collect(),
            }),
            Category::Storage => Part::Storage(Storage {
                info,
                interface: specs.text("type").into(),
                form_factor: specs.text("form_factor").into(),
                generation: specs.text("generation"),
            }),
            Category::Psu => Part::Psu(Psu {
                info,
                wattage: specs.count("wattage", 0),
                form_factor: specs.text("form_factor"),
            }),
        }
    }

    /// Adapt a whole catalog, skipping records outside the build slots.
    pub fn adapt_all(records: &[ProductRecord]) -> Vec<Part> {
        records
            .iter()
            .filter_map(|record| {
                let part = Self::adapt(record);
                if part.is_none() {
                    tracing::warn!(
                        "Skipping product {} with unsupported category '{}'",
                        record.id,
                        record.category
                    );
                }
                part
            })
            .collect()
    }
}
