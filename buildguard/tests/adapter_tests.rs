//! Part adapter tests: raw catalog records in, typed parts out.

use buildguard::parts::{CoolerType, StorageFormFactor, StorageInterface};
use buildguard::prelude::*;
use serde_json::json;

fn adapt(record: ProductRecord) -> Part {
    PartAdapter::adapt(&record).expect("category should be supported")
}

#[test]
fn test_cpu_socket_normalized() {
    let part = adapt(
        ProductRecord::new("cpu-1", "cpu")
            .with_spec("socket", "lga 1700")
            .with_spec("tdp", "125"),
    );
    let Part::Cpu(cpu) = part else { panic!("expected cpu") };
    assert_eq!(cpu.socket, "LGA1700");
    assert_eq!(cpu.tdp, 125);
    assert!(!cpu.integrated_graphics);
}

#[test]
fn test_motherboard_key_mapping() {
    let part = adapt(
        ProductRecord::new("mb-1", "motherboard")
            .with_spec("socket", "AM 5")
            .with_spec("memory_type", "DDR5")
            .with_spec("form_factor", "ATX")
            .with_spec("m2_slots", "3")
            .with_spec("sata_ports", 6),
    );
    let Part::Motherboard(mb) = part else { panic!("expected motherboard") };
    assert_eq!(mb.cpu_socket, "AM5");
    assert_eq!(mb.memory_type, "DDR5");
    assert_eq!(mb.form_factor, "ATX");
    assert_eq!(mb.m2_slots_gen4, 3);
    assert_eq!(mb.sata_ports, 6);
}

#[test]
fn test_motherboard_fallback_keys() {
    let part = adapt(
        ProductRecord::new("mb-2", "motherboards")
            .with_spec("cpu_socket", "LGA1700")
            .with_spec("m2_slots_gen4", 4),
    );
    let Part::Motherboard(mb) = part else { panic!("expected motherboard") };
    assert_eq!(mb.cpu_socket, "LGA1700");
    assert_eq!(mb.m2_slots_gen4, 4);
}

#[test]
fn test_motherboard_defaults() {
    let Part::Motherboard(mb) = adapt(ProductRecord::new("mb-3", "motherboard")) else {
        panic!("expected motherboard")
    };
    assert_eq!(mb.cpu_socket, "");
    assert_eq!(mb.m2_slots_gen4, 0);
    assert_eq!(mb.sata_ports, 0);
}

#[test]
fn test_cooler_mapping() {
    let part = adapt(
        ProductRecord::new("c-1", "cooler")
            .with_spec("socket_support", "LGA 1700, am5,AM4")
            .with_spec("cooler_type", "Liquid AIO")
            .with_spec("radiator_size", "360")
            .with_spec("tdp", 5),
    );
    let Part::Cooler(cooler) = part else { panic!("expected cooler") };
    assert_eq!(cooler.supported_sockets, vec!["LGA1700", "AM5", "AM4"]);
    assert_eq!(cooler.kind, CoolerType::Liquid);
    assert_eq!(cooler.radiator_size_mm, 360.0);
    assert_eq!(cooler.height_mm, 0.0);
    assert_eq!(cooler.length_mm, 300.0);
    assert_eq!(cooler.tdp, 5);
}

#[test]
fn test_cooler_type_match_is_case_sensitive() {
    let part = adapt(ProductRecord::new("c-2", "cooler").with_spec("cooler_type", "liquid"));
    let Part::Cooler(cooler) = part else { panic!("expected cooler") };
    assert_eq!(cooler.kind, CoolerType::Air);
    assert!(cooler.supported_sockets.is_empty());
}

#[test]
fn test_cooler_socket_list_from_array() {
    let part = adapt(
        ProductRecord::new("c-3", "cooler").with_spec("socket_support", json!(["LGA 1200", "AM4"])),
    );
    let Part::Cooler(cooler) = part else { panic!("expected cooler") };
    assert_eq!(cooler.supported_sockets, vec!["LGA1200", "AM4"]);
}

#[test]
fn test_case_defaults() {
    let Part::Case(case) = adapt(ProductRecord::new("case-1", "case")) else {
        panic!("expected case")
    };
    assert_eq!(case.max_gpu_length_mm, 400.0);
    assert_eq!(case.max_cpu_cooler_height_mm, 180.0);
    assert_eq!(case.supported_motherboards, vec!["ATX", "mATX", "ITX"]);
    assert!(case.supported_radiators.is_empty());
}

#[test]
fn test_case_mapping() {
    let part = adapt(
        ProductRecord::new("case-2", "case")
            .with_spec("form_factor", "micro-atx")
            .with_spec("gpu_max_length", 330)
            .with_spec("cpu_cooler_max_height", "160")
            .with_spec("radiator_support", "240, 280 ,360"),
    );
    let Part::Case(case) = part else { panic!("expected case") };
    assert_eq!(case.supported_motherboards, vec!["mATX", "ITX"]);
    assert_eq!(case.max_gpu_length_mm, 330.0);
    assert_eq!(case.max_cpu_cooler_height_mm, 160.0);
    assert_eq!(case.supported_radiators, vec!["240", "280", "360"]);
}

#[test]
fn test_gpu_recommended_psu_keys() {
    let recommended = |record: ProductRecord| match adapt(record) {
        Part::Gpu(gpu) => gpu.recommended_psu_w,
        other => panic!("expected gpu, got {:?}", other),
    };

    let both = ProductRecord::new("g", "gpu")
        .with_spec("recommended_psu", 850)
        .with_spec("recommended_psu_wattage", 750);
    assert_eq!(recommended(both), 850);

    let fallback = ProductRecord::new("g", "gpu")
        .with_spec("recommended_psu", "")
        .with_spec("recommended_psu_wattage", "750");
    assert_eq!(recommended(fallback), 750);
}

#[test]
fn test_gpu_and_psu_defaults() {
    let Part::Gpu(gpu) = adapt(ProductRecord::new("g", "gpu").with_spec("length", "n/a")) else {
        panic!("expected gpu")
    };
    assert_eq!(gpu.length_mm, 300.0);
    assert_eq!(gpu.tdp, 0);
    assert_eq!(gpu.recommended_psu_w, 650);

    let Part::Psu(psu) = adapt(ProductRecord::new("p", "psu")) else {
        panic!("expected psu")
    };
    assert_eq!(psu.wattage, 0);
}

#[test]
fn test_storage_mapping() {
    let Part::Storage(ssd) = adapt(
        ProductRecord::new("s", "storage")
            .with_spec("type", "SATA")
            .with_spec("form_factor", 2.5),
    ) else {
        panic!("expected storage")
    };
    assert_eq!(ssd.interface, StorageInterface::Sata);
    assert_eq!(ssd.form_factor, StorageFormFactor::TwoPointFive);
    assert!(ssd.uses_sata_port());
    assert!(!ssd.is_nvme());
}

#[test]
fn test_unknown_category_is_skipped() {
    assert!(PartAdapter::adapt(&ProductRecord::new("m", "monitor")).is_none());

    let parts = PartAdapter::adapt_all(&[
        ProductRecord::new("m", "monitor"),
        ProductRecord::new("r", "ram").with_spec("memory_type", "DDR5"),
    ]);
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].category(), Category::Ram);
}

#[test]
fn test_garbage_specs_never_panic() {
    let garbage = json!({
        "socket": {"nested": true},
        "tdp": [1, 2, 3],
        "length": "NaN",
        "height": "inf",
        "radiator_size": -240,
        "wattage": null,
        "socket_support": 42,
        "form_factor": false,
        "type": ["NVMe"]
    });
    for category in ["cpu", "motherboard", "ram", "gpu", "case", "cooler", "storage", "psu"] {
        let mut record = ProductRecord::new("junk", category);
        record.specs = garbage.as_object().cloned().unwrap();
        let part = PartAdapter::adapt(&record);
        assert!(part.is_some(), "{} should adapt", category);
    }
}

#[test]
fn test_adapted_parts_feed_evaluator() {
    let cpu = adapt(
        ProductRecord::new("cpu", "cpu")
            .with_spec("socket", "LGA 1700")
            .with_spec("tdp", 125),
    );
    let board = adapt(
        ProductRecord::new("mb", "motherboard")
            .with_spec("socket", "LGA1700")
            .with_spec("form_factor", "mATX"),
    );
    let case = adapt(ProductRecord::new("case", "case").with_spec("form_factor", "MATX"));
    let build = BuildState::new().with(cpu).with(board).with(case);
    let result = evaluate(&build);
    assert!(result.valid, "{:?}", result.errors);
}
