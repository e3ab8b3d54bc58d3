// Parallel survey: one feature, many seeds, the same starting terrain.
//
// Each seed runs on its own clone of the world and its own recording entity
// factory, while every worker shares a single `&EnclosureFeature`. Results
// are folded in seed order, so the report does not depend on how rayon
// schedules the work.

use crate::entity::RecordingEntities;
use crate::feature::EnclosureFeature;
use crate::hole::GrowthStats;
use crate::types::VoxelCoord;
use crate::world::VoxelWorld;
use enclosure_prng::PitRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub placements: usize,
    pub successes: usize,
    /// Mean hole size over successful placements; 0 when none succeeded.
    pub mean_hole_size: f64,
    pub mean_outline_size: f64,
    pub fenced_cells: usize,
    pub stats: GrowthStats,
}

/// Survey sample of one seed.
struct Sample {
    hole: usize,
    outline: usize,
    fenced: usize,
    stats: GrowthStats,
}

pub fn survey(
    feature: &EnclosureFeature,
    world: &VoxelWorld,
    center: VoxelCoord,
    seeds: &[u64],
) -> SurveyReport {
    let samples: Vec<Option<Sample>> = seeds
        .par_iter()
        .map(|&seed| {
            let mut world = world.clone();
            let mut entities = RecordingEntities::new();
            feature
                .generate_report(center, &mut PitRng::new(seed), &mut world, &mut entities)
                .map(|report| Sample {
                    hole: report.hole.len(),
                    outline: report.outline.len(),
                    fenced: report.fences.pairs.len() * 2,
                    stats: report.stats,
                })
        })
        .collect();

    let mut report = SurveyReport {
        placements: seeds.len(),
        ..SurveyReport::default()
    };
    let mut hole_total = 0usize;
    let mut outline_total = 0usize;
    for sample in samples.into_iter().flatten() {
        report.successes += 1;
        hole_total += sample.hole;
        outline_total += sample.outline;
        report.fenced_cells += sample.fenced;
        report.stats.merge(&sample.stats);
    }
    if report.successes > 0 {
        report.mean_hole_size = hole_total as f64 / report.successes as f64;
        report.mean_outline_size = outline_total as f64 / report.successes as f64;
    }
    report
}
