//! Browser bindings
//!
//! The page owns the three.js-style scene, the render loop and the DOM; it
//! forwards key/touch events and the frame delta here and reads back poses,
//! HUD values and object lists.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::input::{DriveInput, JoystickInput};
use crate::sim::{CarRig, GameEvent, Wheel, World};

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Road Dash starting...");
}

/// Game instance handed to the page
#[wasm_bindgen]
pub struct WebGame {
    world: World,
    keys: DriveInput,
    joystick: JoystickInput,
    pending_events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a run from an optional JSON config
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        let config = match config_json {
            Some(json) => GameConfig::from_json(&json).map_err(to_js)?,
            None => GameConfig::default(),
        };
        let world = World::new(config).map_err(to_js)?;
        log::info!("Game initialized with seed: {}", world.seed());
        Ok(Self {
            world,
            keys: DriveInput::default(),
            joystick: JoystickInput::default(),
            pending_events: Vec::new(),
        })
    }

    /// Mesh names found in the loaded car model
    pub fn set_car_parts(&mut self, names: Vec<String>) -> Result<(), JsValue> {
        let rig = CarRig::assemble(names.iter().map(String::as_str)).map_err(to_js)?;
        self.world.set_rig(rig);
        Ok(())
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.apply_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.apply_key(key, false)
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.joystick.touch_start(Vec2::new(x, y));
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.joystick.touch_move(Vec2::new(x, y));
    }

    pub fn touch_end(&mut self) {
        self.joystick.touch_end();
    }

    /// Knob offset for drawing the joystick (x, y in px)
    pub fn joystick_knob(&self) -> Vec<f32> {
        let knob = self.joystick.knob_offset();
        vec![knob.x, knob.y]
    }

    /// Advance one frame. Returns true when the page should stop its loop.
    pub fn frame(&mut self, dt: f32) -> bool {
        let input = if self.joystick.is_active() {
            self.joystick.to_input()
        } else {
            self.keys
        };
        let report = self.world.frame(dt, &input);
        self.pending_events.extend(report.events);
        report.halted
    }

    /// Car transform: [x, y, z, yaw, roll]
    pub fn car_pose(&self) -> Vec<f32> {
        let pose = CarRig::body_pose(self.world.vehicle());
        vec![pose.position.x, pose.position.y, pose.position.z, pose.yaw, pose.roll]
    }

    /// Wheel rotation for a part name: [spin, steer], empty when absent
    pub fn wheel_pose(&self, part_name: &str) -> Vec<f32> {
        Wheel::ALL
            .into_iter()
            .find(|w| w.part_name() == part_name)
            .and_then(|w| self.world.rig().wheel(w).get().copied())
            .map(|pose| vec![pose.spin, pose.steer])
            .unwrap_or_default()
    }

    pub fn speed(&self) -> f32 {
        self.world.vehicle().velocity
    }

    pub fn timer_label(&self) -> String {
        self.world.display().timer_label.clone()
    }

    pub fn score(&self) -> u32 {
        self.world.display().score
    }

    pub fn is_game_over(&self) -> bool {
        self.world.is_game_over()
    }

    /// Placed cars, bonuses and street items as JSON
    pub fn scene_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.world.scene()).map_err(to_js)
    }

    /// Road centerline in world space, flattened [x, y, z, ...]
    pub fn road_points(&self, divisions: usize) -> Vec<f32> {
        self.world
            .road()
            .sample_points(divisions)
            .into_iter()
            .flat_map(|(p, _)| {
                let w = crate::sim_to_world(p);
                [w.x, w.y, w.z]
            })
            .collect()
    }

    /// Events since the last call, as JSON (collisions remove scene objects)
    pub fn take_events_json(&mut self) -> Result<String, JsValue> {
        let json = serde_json::to_string(&self.pending_events).map_err(to_js)?;
        self.pending_events.clear();
        Ok(json)
    }

    /// Start a new run with a fresh seed
    pub fn restart(&mut self) -> Result<(), JsValue> {
        self.world.restart(None).map_err(to_js)?;
        self.keys = DriveInput::default();
        self.joystick = JoystickInput::default();
        self.pending_events.clear();
        log::info!("Restarted with seed: {}", self.world.seed());
        Ok(())
    }
}
