//! Game world and per-frame loop
//!
//! The world owns everything a run needs (road, placed objects, the player's
//! car, the clock) and is passed around explicitly. Level generation happens
//! once in [`World::new`] / [`World::restart`]; [`World::frame`] only reads
//! the road and consumes objects the car hits.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use super::clock::{ClockDisplay, GameClockState, tick_clock};
use super::collision::find_collision;
use super::curve::RoadCurve;
use super::rig::CarRig;
use super::road::build_road;
use super::spawn::{PlacedObject, spawn_along_curve};
use super::vehicle::{VehicleState, advance_vehicle};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::input::DriveInput;
use crate::{heading_for_direction, planar, sim_to_world};

/// Body colors for traffic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarPaint {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl CarPaint {
    pub const ALL: [CarPaint; 6] = [
        CarPaint::Red,
        CarPaint::Green,
        CarPaint::Blue,
        CarPaint::Yellow,
        CarPaint::Magenta,
        CarPaint::Cyan,
    ];

    /// 0xRRGGBB
    pub fn rgb(self) -> u32 {
        match self {
            CarPaint::Red => 0xff0000,
            CarPaint::Green => 0x00ff00,
            CarPaint::Blue => 0x0000ff,
            CarPaint::Yellow => 0xffff00,
            CarPaint::Magenta => 0xff00ff,
            CarPaint::Cyan => 0x00ffff,
        }
    }
}

/// Pickup templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusKind {
    /// Textured brand crate
    LogoCrate,
}

/// Street furniture templates (names match the asset pack)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreetItem {
    Dustbin,
    StreetLight,
    TrafficCone,
    MailBox,
    FireHydrant,
    Crate,
    Barrier1,
    Barrier2,
    TrafficLight,
    Trees,
    Banner,
    Bench,
}

impl StreetItem {
    /// Object name in the street asset pack
    pub fn asset_name(self) -> &'static str {
        match self {
            StreetItem::Dustbin => "Dustbin",
            StreetItem::StreetLight => "Street_Light",
            StreetItem::TrafficCone => "Traffic_Cone",
            StreetItem::MailBox => "Mail_Box",
            StreetItem::FireHydrant => "Fire_Hydrant",
            StreetItem::Crate => "Box",
            StreetItem::Barrier1 => "Barrier_1",
            StreetItem::Barrier2 => "Barrier_2",
            StreetItem::TrafficLight => "Traffic_Light",
            StreetItem::Trees => "Trees_",
            StreetItem::Banner => "Banner",
            StreetItem::Bench => "Bench",
        }
    }

    /// Uniform scale applied to the asset
    pub fn scale(self) -> f32 {
        match self {
            StreetItem::Bench => 2.0,
            StreetItem::Trees => 8.0,
            _ => 3.0,
        }
    }
}

const BARRIER_POOL: [StreetItem; 2] = [StreetItem::TrafficCone, StreetItem::Barrier2];
const DECORATION_POOL: [StreetItem; 3] = [StreetItem::Trees, StreetItem::Bench, StreetItem::Dustbin];
const BONUS_POOL: [BonusKind; 1] = [BonusKind::LogoCrate];

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Drove into traffic; the car is removed from the road
    Collision { paint: CarPaint, position: Vec3 },
    /// Picked up a bonus
    BonusCollected { position: Vec3, total: u32 },
    /// Clock ran out
    GameOver { score: u32 },
}

/// Result of one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub display: ClockDisplay,
    /// Stop calling `frame`; the run is over
    pub halted: bool,
}

/// Everything the scene needs to place objects
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot<'a> {
    pub other_cars: &'a [PlacedObject<CarPaint>],
    pub bonuses: &'a [PlacedObject<BonusKind>],
    pub street_items: &'a [PlacedObject<StreetItem>],
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct World {
    config: GameConfig,
    seed: u64,
    road: RoadCurve,
    vehicle: VehicleState,
    rig: CarRig,
    other_cars: Vec<PlacedObject<CarPaint>>,
    bonuses: Vec<PlacedObject<BonusKind>>,
    street_items: Vec<PlacedObject<StreetItem>>,
    clock: GameClockState,
    display: ClockDisplay,
    elapsed: f32,
    bonus_count: u32,
    collisions: u32,
}

impl World {
    /// Build a level. Uses `config.seed` when set, a random seed otherwise.
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        Self::with_seed(config, seed)
    }

    /// Build a level from an explicit seed
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let road = build_road(&config.road, &mut rng)?;
        let width = config.road.width;

        let mut other_cars = spawn_along_curve(&road, &CarPaint::ALL, &config.other_cars, width, &mut rng)?;
        // Left-lane traffic is oncoming
        for car in &mut other_cars {
            car.turn_by_side(PI, 0.0);
        }

        let bonuses = spawn_along_curve(&road, &BONUS_POOL, &config.bonuses, width, &mut rng)?;

        let mut street_items = spawn_along_curve(&road, &BARRIER_POOL, &config.barriers, width, &mut rng)?;
        street_items.extend(spawn_along_curve(
            &road,
            &DECORATION_POOL,
            &config.decorations,
            width,
            &mut rng,
        )?);
        // Face the road from either side
        for item in &mut street_items {
            item.turn_by_side(FRAC_PI_2, -FRAC_PI_2);
        }

        let vehicle = start_state(&road);
        let mut clock = GameClockState::default();
        let (display, _) = tick_clock(&mut clock, &config.clock, 0.0, 0);

        log::info!(
            "World ready (seed {}): road {:.0} units, {} cars, {} bonuses, {} street items",
            seed,
            road.length(),
            other_cars.len(),
            bonuses.len(),
            street_items.len()
        );

        Ok(Self {
            config,
            seed,
            road,
            vehicle,
            rig: CarRig::complete(),
            other_cars,
            bonuses,
            street_items,
            clock,
            display,
            elapsed: 0.0,
            bonus_count: 0,
            collisions: 0,
        })
    }

    /// Rebuild the level with the same config. `None` picks a fresh seed.
    pub fn restart(&mut self, seed: Option<u64>) -> Result<(), SetupError> {
        let seed = seed.unwrap_or_else(rand::random::<u64>);
        let rig = self.rig.clone();
        *self = Self::with_seed(self.config.clone(), seed)?;
        self.rig = rig;
        Ok(())
    }

    /// Swap in the rig resolved from the loaded car model
    pub fn set_rig(&mut self, rig: CarRig) {
        self.rig = rig;
    }

    /// Advance one rendered frame
    pub fn frame(&mut self, dt: f32, input: &DriveInput) -> FrameReport {
        if self.clock.is_game_over {
            return FrameReport {
                events: Vec::new(),
                display: self.display.clone(),
                halted: true,
            };
        }

        let dt = self.frame_dt(dt);
        let mut events = Vec::new();

        advance_vehicle(&mut self.vehicle, &self.config.vehicle, input, dt);
        self.rig.update(&self.vehicle, dt);

        let radius = self.config.collision_radius;
        let position = self.vehicle.position;

        if !self.vehicle.collided() {
            if let Some(i) = find_collision(position, &self.other_cars, radius) {
                let car = self.other_cars.remove(i);
                self.vehicle.notify_collision(&self.config.vehicle);
                self.collisions += 1;
                log::debug!("Hit {:?} car at {:?}", car.template, car.position);
                events.push(GameEvent::Collision {
                    paint: car.template,
                    position: car.position,
                });
            }
        }

        if let Some(i) = find_collision(position, &self.bonuses, radius) {
            let bonus = self.bonuses.remove(i);
            self.bonus_count += 1;
            log::debug!("Bonus {} collected", self.bonus_count);
            events.push(GameEvent::BonusCollected {
                position: bonus.position,
                total: self.bonus_count,
            });
        }

        self.elapsed += dt;
        let (display, halt) = tick_clock(&mut self.clock, &self.config.clock, self.elapsed, self.bonus_count);
        if halt {
            events.push(GameEvent::GameOver { score: display.score });
        }
        self.display = display.clone();

        FrameReport {
            events,
            display,
            halted: halt,
        }
    }

    /// Sanitize the wall-clock delta; clamp only when configured
    fn frame_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Ignoring invalid frame dt {}", dt);
            return 0.0;
        }
        match self.config.max_frame_dt {
            Some(max) if dt > max => {
                log::warn!("Frame dt {:.3}s clamped to {:.3}s", dt, max);
                max
            }
            _ => dt,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn road(&self) -> &RoadCurve {
        &self.road
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut VehicleState {
        &mut self.vehicle
    }

    pub fn rig(&self) -> &CarRig {
        &self.rig
    }

    pub fn other_cars(&self) -> &[PlacedObject<CarPaint>] {
        &self.other_cars
    }

    pub fn bonuses(&self) -> &[PlacedObject<BonusKind>] {
        &self.bonuses
    }

    pub fn street_items(&self) -> &[PlacedObject<StreetItem>] {
        &self.street_items
    }

    pub fn clock(&self) -> &GameClockState {
        &self.clock
    }

    pub fn display(&self) -> &ClockDisplay {
        &self.display
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn bonus_count(&self) -> u32 {
        self.bonus_count
    }

    pub fn collisions(&self) -> u32 {
        self.collisions
    }

    pub fn is_game_over(&self) -> bool {
        self.clock.is_game_over
    }

    pub fn scene(&self) -> SceneSnapshot<'_> {
        SceneSnapshot {
            other_cars: &self.other_cars,
            bonuses: &self.bonuses,
            street_items: &self.street_items,
        }
    }
}

/// Car at the start of the road, at ground level, facing down the road
fn start_state(road: &RoadCurve) -> VehicleState {
    let mut start = sim_to_world(road.point_at(0.0));
    start.y = 0.0;
    let dir = planar(sim_to_world(road.tangent_at(0.0)));
    let heading = dir.try_normalize().map(heading_for_direction).unwrap_or(0.0);
    VehicleState::new(start, heading)
}
