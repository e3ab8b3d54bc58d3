// Enclosure preview: CLI entry point.
//
// Builds flat terrain, places one enclosure, and prints a top-down map of
// the result followed by a one-line summary.
//
// Usage:
//   cargo run -p enclosure_gen --bin enclosure_preview -- [--seed N] [--size N]
//     [--decorations] [--companion] [--config PATH] [--dump-config]
//
// `--dump-config` prints the effective config as JSON and exits, which is a
// convenient starting point for a custom `--config` file.
//
// Legend: `#` hole, `e` edge lip, `o` outline, `F` fence, `+` decoration,
// `c` creeper/creepie, `g` griefer, `.` untouched ground.
//
// Log verbosity follows `RUST_LOG` (default `info`).

use enclosure_gen::config::EnclosureConfig;
use enclosure_gen::entity::RecordingEntities;
use enclosure_gen::feature::{EnclosureFeature, EnclosureReport};
use enclosure_gen::prng::PitRng;
use enclosure_gen::types::{CreatureKind, VoxelCoord};
use enclosure_gen::world::VoxelWorld;
use std::collections::BTreeMap;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SURFACE: i32 = 64;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = parse_flag(&args, "--seed").unwrap_or(1);
    let size: i32 = parse_flag(&args, "--size").unwrap_or(16);
    let config_path: Option<String> = parse_flag(&args, "--config");

    let mut config = match config_path {
        Some(path) => match EnclosureConfig::load(&path) {
            Ok(c) => c,
            Err(e) => {
                error!(%path, "failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => EnclosureConfig::default(),
    };
    if has_flag(&args, "--decorations") {
        config.decorations.enabled = true;
    }
    if has_flag(&args, "--companion") {
        config.decorations.companion_content = true;
    }

    if has_flag(&args, "--dump-config") {
        match config.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize config: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let feature = match EnclosureFeature::new(config) {
        Ok(f) => f,
        Err(e) => {
            error!("invalid config: {e}");
            std::process::exit(1);
        }
    };
    let mut world = VoxelWorld::flat_terrain(0, 0, size, SURFACE);
    let mut entities = RecordingEntities::new();
    let center = VoxelCoord::new(0, SURFACE, 0);
    info!(seed, size, "placing enclosure");

    let Some(report) =
        feature.generate_report(center, &mut PitRng::new(seed), &mut world, &mut entities)
    else {
        println!("No suitable site near {center} (seed {seed}).");
        return;
    };

    let creatures: BTreeMap<(i32, i32), CreatureKind> = entities
        .spawned
        .iter()
        .map(|r| {
            let v = r.handle.voxel();
            ((v.x, v.z), r.handle.kind)
        })
        .collect();

    for z in -size..=size {
        let row: String = (-size..=size)
            .map(|x| cell_glyph(&report, &creatures, x, z))
            .collect();
        println!("{row}");
    }

    println!(
        "seed {seed}: site {} depth {} rounds {} | hole {} edge {} outline {} | fences {} pairs | creatures {} | writes {}",
        report.center,
        SURFACE - report.min_y,
        report.rounds,
        report.hole.len(),
        report.edge.len(),
        report.outline.len(),
        report.fences.pairs.len(),
        entities.spawned.len(),
        world.write_count(),
    );
}

fn cell_glyph(
    report: &EnclosureReport,
    creatures: &BTreeMap<(i32, i32), CreatureKind>,
    x: i32,
    z: i32,
) -> char {
    let pos = VoxelCoord::new(x, report.center.y, z);
    match creatures.get(&(x, z)) {
        Some(CreatureKind::Griefer) => return 'g',
        Some(_) => return 'c',
        None => {}
    }
    if report.fences.fenced_cells().any(|c| c == pos) {
        'F'
    } else if report.hole.contains(pos) {
        '#'
    } else if report.edge.contains(pos) {
        'e'
    } else if report.outline.contains(pos) {
        'o'
    } else if report
        .decorations
        .as_ref()
        .is_some_and(|d| d.cells.iter().any(|c| c.x == x && c.z == z))
    {
        '+'
    } else {
        '.'
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}
