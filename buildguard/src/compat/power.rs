//! Power draw estimate for a build.

use crate::build::BuildState;

/// Motherboard, fans and everything else not modelled per part.
pub const SYSTEM_OVERHEAD_W: u32 = 50;
/// Per drive.
pub const STORAGE_DRAW_W: u32 = 5;
pub const RAM_DRAW_W: u32 = 10;

/// CPU and GPU TDP plus fixed overheads, in whole watts.
pub fn estimate_wattage(build: &BuildState) -> u32 {
    let cpu = build.cpu.as_ref().map_or(0, |c| c.tdp);
    let gpu = build.gpu.as_ref().map_or(0, |g| g.tdp);
    let storage = STORAGE_DRAW_W.saturating_mul(build.storage.len() as u32);
    let ram = if build.ram.is_some() { RAM_DRAW_W } else { 0 };

    cpu.saturating_add(gpu)
        .saturating_add(SYSTEM_OVERHEAD_W)
        .saturating_add(storage)
        .saturating_add(ram)
}

/// PSU size that leaves 50% headroom over `estimated`, rounded up.
pub fn recommended_wattage(estimated: u32) -> u32 {
    let scaled = u64::from(estimated) * 3;
    scaled.div_ceil(2).min(u64::from(u32::MAX)) as u32
}
