//! 无界面渲染：生成一张地图并把渲染缓存写成 PPM
//!
//! 用法: `render_map [seed] [width] [height] [mode]`

use std::process::ExitCode;
use std::{env, fs};

use chizu::config::{parse_size, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use chizu::raster::RenderMode;
use chizu::{FantasyMap, MapConfig};

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let arg = |i: usize| args.get(i).map(String::as_str);

    let seed = match arg(0).map(str::parse::<u64>) {
        None => rand::random(),
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            eprintln!("invalid seed: {err}");
            return ExitCode::FAILURE;
        }
    };

    let default_width = DEFAULT_WIDTH.to_string();
    let default_height = DEFAULT_HEIGHT.to_string();
    let size = parse_size(
        arg(1).unwrap_or(&default_width),
        arg(2).unwrap_or(&default_height),
    )
    .and_then(|(width, height)| MapConfig::with_size(width, height));
    let config = match size {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let mode = match arg(3) {
        None => RenderMode::default(),
        Some(text) => match RenderMode::parse(text) {
            Some(mode) => mode,
            None => {
                eprintln!("unknown render mode {text:?}, expected pixel, voronoi or smooth");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut map = FantasyMap::generate(config, seed);
    map.set_render_mode(mode);

    for settlement in map.settlements().iter() {
        println!(
            "{:>7} {:<16} ({:.1}, {:.1})",
            settlement.tier.label(),
            settlement.name,
            settlement.position.x,
            settlement.position.y
        );
    }

    let filename = format!("map_{seed}_{mode}.ppm");
    if let Err(err) = fs::write(&filename, map.cache().image.to_ppm()) {
        eprintln!("failed to write {filename}: {err}");
        return ExitCode::FAILURE;
    }
    println!("-> {filename}");
    ExitCode::SUCCESS
}
