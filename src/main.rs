//! Tile Hop headless runner
//!
//! Drives the controller with a fixed timestep over a procedurally generated
//! tile track, steering with seeded noisy input until the ball misses a tile.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::error::Error;
    use std::path::PathBuf;
    use std::rc::Rc;

    use clap::Parser;
    use glam::Vec3;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use tile_hop::audio::LogSound;
    use tile_hop::consts::SIM_DT;
    use tile_hop::persistence::{JsonCounterStore, MemoryCounterStore};
    use tile_hop::sim::{CollectibleId, ContactEvent, GamePhase, PlatformId, TickInput};
    use tile_hop::ui::LogUi;
    use tile_hop::{Controller, Scheduler, Tuning};

    const TILE_EXTENT_Y: f32 = 0.5;
    const TILE_HALF_WIDTH: f32 = 1.0;
    const TILE_HALF_LENGTH: f32 = 0.6;
    /// Tiles guaranteed at the start of the track
    const SAFE_TILES: usize = 5;
    const MISSING_TILE_CHANCE: f64 = 0.04;
    const GEM_CHANCE: f64 = 0.3;

    #[derive(Parser)]
    #[command(name = "tile-hop", about = "Headless Tile Hop runner")]
    struct Args {
        /// Seed for the track layout and steering noise
        #[arg(long, default_value_t = 12345)]
        seed: u64,

        /// Maximum ticks to simulate (60 per second)
        #[arg(long, default_value_t = 18_000)]
        ticks: u64,

        /// Tuning JSON file (defaults are used when omitted)
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Persist lifetime counters to this JSON file
        #[arg(long)]
        counters: Option<PathBuf>,
    }

    #[derive(Debug, Clone)]
    struct Tile {
        x: f32,
        present: bool,
        gem: Option<f32>,
    }

    /// Endless track, generated on demand from the run seed
    struct Track {
        rng: Pcg32,
        tiles: Vec<Tile>,
        x_limit: f32,
    }

    impl Track {
        fn new(rng: Pcg32, x_limit: f32) -> Self {
            Self {
                rng,
                tiles: Vec::new(),
                x_limit,
            }
        }

        fn tile(&mut self, index: usize) -> &Tile {
            while self.tiles.len() <= index {
                let i = self.tiles.len();
                let spread = (self.x_limit - TILE_HALF_WIDTH).max(0.0);
                let x = if i == 0 { 0.0 } else { self.rng.random_range(-spread..=spread) };
                let present = i < SAFE_TILES || !self.rng.random_bool(MISSING_TILE_CHANCE);
                let gem = self
                    .rng
                    .random_bool(GEM_CHANCE)
                    .then(|| self.rng.random_range(-spread..=spread));
                self.tiles.push(Tile { x, present, gem });
            }
            &self.tiles[index]
        }
    }

    /// Despawn timer owned by the host loop
    #[derive(Clone, Default)]
    struct DespawnTimer(Rc<Cell<Option<f32>>>);

    impl Scheduler for DespawnTimer {
        fn schedule_despawn(&mut self, delay: f32) {
            self.0.set(Some(delay));
        }
    }

    impl DespawnTimer {
        /// Count down; true when the timer fires
        fn advance(&self, dt: f32) -> bool {
            match self.0.get() {
                Some(remaining) if remaining - dt <= 0.0 => {
                    self.0.set(None);
                    true
                }
                Some(remaining) => {
                    self.0.set(Some(remaining - dt));
                    false
                }
                None => false,
            }
        }
    }

    /// Tile the steering aims for: the one below while falling, the next
    /// one once relaunched
    fn steer_target(z: f32, vel_y: f32, jump_distance: f32) -> usize {
        if vel_y <= 0.0 {
            (z / jump_distance).round().max(0.0) as usize
        } else {
            ((z + jump_distance * 0.25) / jump_distance).floor().max(0.0) as usize + 1
        }
    }

    /// Play one run until the ball is despawned or `max_ticks` pass.
    /// Returns the number of ticks simulated.
    fn run_session(ctl: &mut Controller, timer: &DespawnTimer, seed: u64, max_ticks: u64) -> u64 {
        let tuning = ctl.tuning().clone();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut track = Track::new(Pcg32::seed_from_u64(seed ^ 0x9e37_79b9), tuning.x_pos_limit);
        let mut collected = HashSet::new();
        let rest_y = tuning.agent_extent_y / 2.0 + TILE_EXTENT_Y / 2.0;

        ctl.start();

        let mut ticks = 0;
        while ticks < max_ticks {
            ticks += 1;
            let agent = ctl.agent().clone();
            let target = steer_target(agent.pos.z, agent.vel.y, tuning.jump_distance);
            let target_x = track.tile(target).x;
            let axis = ((target_x - agent.pos.x) * 2.0 + rng.random_range(-0.4f32..0.4)).clamp(-1.0, 1.0);

            ctl.tick(SIM_DT, &TickInput { drag_delta_x: None, axis });

            if timer.advance(SIM_DT) {
                ctl.despawn();
                break;
            }
            if ctl.phase() != GamePhase::Running {
                continue;
            }

            // Synthesized contacts stand in for the physics backend
            let agent = ctl.agent().clone();
            let index = (agent.pos.z / tuning.jump_distance).round().max(0.0) as usize;
            let tile_z = index as f32 * tuning.jump_distance;
            let tile = track.tile(index).clone();

            if let Some(gem_x) = tile.gem {
                let gem_z = tile_z + tuning.jump_distance / 2.0;
                if !collected.contains(&index)
                    && (agent.pos.z - gem_z).abs() < 0.3
                    && (agent.pos.x - gem_x).abs() < 0.6
                {
                    collected.insert(index);
                    ctl.queue_contact(ContactEvent::Collectible {
                        id: CollectibleId(index as u32),
                    });
                }
            }

            if agent.vel.y < 0.0
                && agent.pos.y <= rest_y
                && tile.present
                && (agent.pos.z - tile_z).abs() <= TILE_HALF_LENGTH
                && (agent.pos.x - tile.x).abs() <= TILE_HALF_WIDTH
            {
                ctl.queue_contact(ContactEvent::Platform {
                    id: PlatformId(index as u32),
                    position: Vec3::new(tile.x, 0.0, tile_z),
                    extent_y: TILE_EXTENT_Y,
                });
            }
        }
        ticks
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = Args::parse();
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let timer = DespawnTimer::default();
        let builder = Controller::builder()
            .tuning(tuning)
            .sound(LogSound::new())
            .ui(LogUi::default())
            .scheduler(timer.clone());
        let mut ctl = match &args.counters {
            Some(path) => builder.counters(JsonCounterStore::open(path)?).build()?,
            None => builder.counters(MemoryCounterStore::new()).build()?,
        };

        log::info!("Tile Hop (native) starting with seed {}", args.seed);
        let ticks = run_session(&mut ctl, &timer, args.seed, args.ticks);

        log::info!(
            "Run finished after {} ticks: phase {:?}, score {}, gravity {}, lifetime gems {}",
            ticks,
            ctl.phase(),
            ctl.score(),
            ctl.gravity(),
            ctl.gems()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;
        use tile_hop::audio::NullSound;

        fn controller(timer: &DespawnTimer) -> Controller {
            Controller::builder()
                .sound(NullSound)
                .ui(LogUi::default())
                .counters(MemoryCounterStore::new())
                .scheduler(timer.clone())
                .build()
                .unwrap()
        }

        #[test]
        fn test_args_defaults() {
            Args::command().debug_assert();
            let args = Args::try_parse_from(["tile-hop"]).unwrap();
            assert_eq!(args.seed, 12345);
            assert_eq!(args.ticks, 18_000);
            assert!(args.tuning.is_none());

            let args = Args::try_parse_from(["tile-hop", "--seed", "7", "--ticks", "10"]).unwrap();
            assert_eq!((args.seed, args.ticks), (7, 10));
        }

        #[test]
        fn test_steer_target_tile_below_then_next() {
            assert_eq!(steer_target(0.0, 0.0, 4.0), 0);
            assert_eq!(steer_target(0.0, -3.0, 4.0), 0);
            assert_eq!(steer_target(0.0, 11.0, 4.0), 1);
            assert_eq!(steer_target(1.9, 0.5, 4.0), 1);
            assert_eq!(steer_target(3.0, -8.0, 4.0), 1);
            assert_eq!(steer_target(3.99, 11.0, 4.0), 2);
        }

        #[test]
        fn test_demo_session_lands_hops() {
            for seed in [1, 2, 3, 99, 12345] {
                let timer = DespawnTimer::default();
                let mut ctl = controller(&timer);
                run_session(&mut ctl, &timer, seed, 600);
                assert!(ctl.score() >= 1, "seed {seed} scored {}", ctl.score());
            }
        }

        #[test]
        fn test_despawn_timer_fires_once() {
            let mut timer = DespawnTimer::default();
            assert!(!timer.advance(0.5));
            timer.schedule_despawn(1.0);
            assert!(!timer.advance(0.6));
            assert!(timer.advance(0.6));
            assert!(!timer.advance(0.6));
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts embed the library directly
}
