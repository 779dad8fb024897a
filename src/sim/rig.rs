//! Player car sub-part rig
//!
//! The car model's named meshes are resolved once when the model is loaded.
//! `body` is required; each wheel is optional and simply not animated when
//! the model doesn't have it.

use glam::Vec3;
use serde::Serialize;
use std::collections::HashSet;
use std::f32::consts::TAU;

use super::vehicle::VehicleState;
use crate::consts::WHEEL_CIRCUMFERENCE;
use crate::error::SetupError;

/// Mesh name of the required body part
pub const BODY_PART: &str = "body";

/// Optional part, resolved at load time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SubPart<T> {
    Present(T),
    Absent,
}

impl<T> SubPart<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, SubPart::Present(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            SubPart::Present(part) => Some(part),
            SubPart::Absent => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            SubPart::Present(part) => Some(part),
            SubPart::Absent => None,
        }
    }
}

/// Wheel slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Wheel {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Wheel {
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    /// Mesh name in the car model
    pub fn part_name(self) -> &'static str {
        match self {
            Wheel::FrontLeft => "wheel_fl",
            Wheel::FrontRight => "wheel_fr",
            Wheel::RearLeft => "wheel_rl",
            Wheel::RearRight => "wheel_rr",
        }
    }

    pub fn steers(self) -> bool {
        matches!(self, Wheel::FrontLeft | Wheel::FrontRight)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Wheel rotation: spin about the axle, then steer about the vertical
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WheelPose {
    /// Radians, wrapped to [0, 2π)
    pub spin: f32,
    pub steer: f32,
}

/// Body transform for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPose {
    pub position: Vec3,
    pub yaw: f32,
    pub roll: f32,
}

/// Typed capability record for the player's car model
#[derive(Debug, Clone, Serialize)]
pub struct CarRig {
    wheels: [SubPart<WheelPose>; 4],
}

impl CarRig {
    /// Resolve sub-parts from the mesh names found in the loaded model
    pub fn assemble<'a>(part_names: impl IntoIterator<Item = &'a str>) -> Result<Self, SetupError> {
        let names: HashSet<&str> = part_names.into_iter().collect();
        if !names.contains(BODY_PART) {
            return Err(SetupError::MissingRequiredPart(BODY_PART));
        }

        let wheels = Wheel::ALL.map(|wheel| {
            if names.contains(wheel.part_name()) {
                SubPart::Present(WheelPose::default())
            } else {
                log::debug!("Car model has no '{}', wheel left static", wheel.part_name());
                SubPart::Absent
            }
        });
        Ok(Self { wheels })
    }

    /// Rig with every wheel present
    pub fn complete() -> Self {
        Self {
            wheels: [SubPart::Present(WheelPose::default()); 4],
        }
    }

    pub fn wheel(&self, wheel: Wheel) -> &SubPart<WheelPose> {
        &self.wheels[wheel.index()]
    }

    /// Spin and steer the wheels that exist for this frame
    pub fn update(&mut self, state: &VehicleState, dt: f32) {
        let spin_delta = state.velocity * dt * (TAU / WHEEL_CIRCUMFERENCE);
        for wheel in Wheel::ALL {
            if let Some(pose) = self.wheels[wheel.index()].get_mut() {
                pose.spin = (pose.spin - spin_delta).rem_euclid(TAU);
                pose.steer = if wheel.steers() {
                    state.steering_angle
                } else {
                    0.0
                };
            }
        }
    }

    pub fn body_pose(state: &VehicleState) -> BodyPose {
        BodyPose {
            position: state.position,
            yaw: state.orientation,
            roll: state.tilt,
        }
    }
}
