//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (level generation)
//! - Stable iteration order (placement follows the road)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod curve;
pub mod rig;
pub mod road;
pub mod spawn;
pub mod vehicle;
pub mod world;

pub use clock::{ClockConfig, ClockDisplay, GameClockState, format_time, tick_clock};
pub use collision::{Positioned, find_collision};
pub use curve::{CurveSample, RoadCurve};
pub use rig::{BodyPose, CarRig, SubPart, Wheel, WheelPose};
pub use road::{RoadConfig, build_road, generate_control_points};
pub use spawn::{PlacedObject, PlacementConfig, Side, spawn_along_curve};
pub use vehicle::{MotionPhase, VehicleState, VehicleTuning, advance_vehicle};
pub use world::{BonusKind, CarPaint, FrameReport, GameEvent, SceneSnapshot, StreetItem, World};
