//! Road Dash entry point
//!
//! The game runs in the browser through `platform::web`. The native binary
//! plays a headless session with a simple autopilot, handy for checking level
//! generation and tuning changes.
//!
//! Usage: `road-dash [config.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use road_dash::sim::{GameEvent, World};
    use road_dash::{DriveInput, GameConfig, heading_for_direction, normalize_angle, planar, sim_to_world};

    /// Simulated frame rate
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// How far down the road the autopilot aims
    const LOOK_AHEAD: f32 = 25.0;
    /// Autopilot speed target
    const CRUISE_SPEED: f32 = 30.0;

    /// Steer toward a point a little further down the road
    fn autopilot(world: &World) -> DriveInput {
        let road = world.road();
        let car = world.vehicle();

        let nearest = road
            .samples()
            .iter()
            .min_by(|a, b| {
                let da = planar(sim_to_world(a.position) - car.position).length_squared();
                let db = planar(sim_to_world(b.position) - car.position).length_squared();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|s| s.distance)
            .unwrap_or(0.0);

        let target = sim_to_world(road.point_at_distance(nearest + LOOK_AHEAD));
        let to_target = planar(target - car.position);
        let error = match to_target.try_normalize() {
            Some(dir) => normalize_angle(heading_for_direction(dir) - car.orientation),
            None => 0.0,
        };

        DriveInput {
            accelerate: car.velocity < CRUISE_SPEED,
            brake: false,
            steer_left: error > 0.02,
            steer_right: error < -0.02,
            analog_magnitude: Some((error.abs() / 0.3).min(1.0)),
        }
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Road Dash (native) starting...");

        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(&path)?,
            None => GameConfig::default(),
        };
        let mut world = World::new(config)?;

        let mut frames = 0u64;
        loop {
            let input = autopilot(&world);
            let report = world.frame(FRAME_DT, &input);
            frames += 1;

            for event in &report.events {
                match event {
                    GameEvent::Collision { paint, position } => {
                        log::info!("[{}] crashed into {:?} car at {:.1?}", report.display.timer_label, paint, position)
                    }
                    GameEvent::BonusCollected { total, .. } => {
                        log::info!("[{}] bonus #{}", report.display.timer_label, total)
                    }
                    GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
                }
            }

            if report.halted {
                break;
            }
        }

        println!(
            "seed {}: {} frames, {} bonuses, {} crashes, score {}",
            world.seed(),
            frames,
            world.bonus_count(),
            world.collisions(),
            world.display().score
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
