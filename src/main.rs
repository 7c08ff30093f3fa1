use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use engine::{prelude::*, Dice, Scenario};
use util::{dijkstra_map, within_range, Logos, StrExt};

mod demo;

#[derive(Parser, Debug)]
#[command(about = "Run tracking and hunting on a room graph")]
struct Args {
    /// Scenario file in IDM format.
    #[arg(long)]
    world: Option<PathBuf>,

    /// Built-in scenario to use when no world file is given.
    #[arg(long, default_value = "village")]
    demo: String,

    /// Dice seed.
    #[arg(long, value_parser = parse_seed)]
    seed: Option<Logos>,

    /// Make every die roll come out as this value.
    #[arg(long)]
    loaded_dice: Option<i32>,

    /// Most ticks to run.
    #[arg(long, default_value_t = 300)]
    ticks: usize,

    /// Print the scenario as IDM and exit.
    #[arg(long)]
    dump: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Follow the trail of the nearest agent with the given name.
    Track { tracker: String, target: String },
    /// Chase the nearest agent with the given name wherever it goes.
    Hunt {
        tracker: String,
        target: String,
        /// Start following the target once caught.
        #[arg(long)]
        follow: bool,
    },
    /// Follow the trail to a room.
    Trail { tracker: String, vnum: u32 },
    /// List the rooms around an agent by walking distance.
    Survey {
        agent: String,
        #[arg(long, default_value_t = 5)]
        radius: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let scenario = match &args.world {
        Some(path) => load(path)?,
        None => demo::scenario(&args.demo)?,
    };

    if args.dump {
        print!("{}", idm::to_string(&scenario)?);
        return Ok(());
    }

    let mut r = Runtime::new(&scenario)?;
    r.set_dice(match args.loaded_dice {
        Some(n) => Dice::Loaded(n),
        None => {
            let seed = args
                .seed
                .clone()
                .unwrap_or_else(|| Logos::sample(&mut rand::thread_rng(), 10));
            log::info!("seed: {seed}");
            Dice::Rng(util::srng(&seed))
        }
    });

    let agent = |r: &Runtime, handle: &str| {
        r.agent(handle)
            .with_context(|| format!("No agent {handle:?} in scenario"))
    };

    match &args.command {
        Some(Command::Track { tracker, target }) => {
            let e = agent(&r, tracker)?;
            let outcome = r.start_track(e, target);
            log::info!("track: {outcome:?}");
        }
        Some(Command::Hunt {
            tracker,
            target,
            follow,
        }) => {
            let e = agent(&r, tracker)?;
            let outcome = r.start_hunt(e, target, *follow);
            log::info!("hunt: {outcome:?}");
        }
        Some(Command::Trail { tracker, vnum }) => {
            let e = agent(&r, tracker)?;
            let outcome = r.start_track_room(e, Vnum(*vnum));
            log::info!("trail: {outcome:?}");
        }
        Some(Command::Survey { agent: handle, radius }) => {
            let e = agent(&r, handle)?;
            survey(&r, e, *radius);
            return Ok(());
        }
        None => {}
    }

    let mut lines = Vec::new();
    flush(&mut r, &mut lines);
    for _ in 0..args.ticks {
        r.tick();
        flush(&mut r, &mut lines);
        if !r.is_busy() && !anyone_hunting(&r) {
            break;
        }
    }

    for line in lines {
        println!("{line}");
    }

    for (handle, e) in r.agents() {
        let room = e
            .room(&r)
            .and_then(|i| r.world().room(i))
            .map_or("nowhere".to_string(), |room| {
                format!("{} {}", room.vnum, room.name)
            });
        let ending = r
            .ending(e)
            .map(|end| format!(", pursuit {end:?}"))
            .unwrap_or_default();
        println!("{handle}: {room}{ending}");
    }
    log::info!("stopped at {}", r.now());

    Ok(())
}

fn parse_seed(e: &str) -> Result<Logos, &'static str> {
    Ok(Logos::new(e))
}

fn load(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    idm::from_str(&text)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Move new messages into the output log, packing repeats.
fn flush(r: &mut Runtime, lines: &mut Vec<String>) {
    for msg in r.take_messages() {
        let line = format!("{} {}", r.now(), r.describe(&msg));
        if let Some(prev) = lines.last_mut() {
            if let Some(packed) = prev.deduplicate_message(&line) {
                *prev = packed;
                continue;
            }
        }
        lines.push(line);
    }
}

fn anyone_hunting(r: &Runtime) -> bool {
    r.live_entities()
        .any(|e| e.prey(r).is_some() && !e.is_fighting(r))
}

fn survey(r: &Runtime, e: Entity, radius: usize) {
    let Some(start) = e.room(r) else {
        println!("{} is nowhere.", e.short(r).capitalize());
        return;
    };
    let world = r.world();
    let neighbors = |&room: &RoomIdx| {
        Dir::all()
            .filter_map(|d| world.destination(room, d))
            .collect::<Vec<_>>()
    };

    for (room, dist) in
        dijkstra_map(neighbors, [start]).take_while(within_range(radius + 1))
    {
        let Some(info) = world.room(room) else {
            continue;
        };
        let here: Vec<String> = r
            .live_entities()
            .filter(|a| a.room(r) == Some(room))
            .map(|a| a.short(r))
            .collect();
        println!(
            "{dist:>3} {} {}{}",
            info.vnum,
            info.name,
            if here.is_empty() {
                String::new()
            } else {
                format!(" [{}]", here.join(", "))
            }
        );
    }
}
