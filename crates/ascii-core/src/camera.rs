//! Camera types shared with the web frontend.
//!
//! These avoid platform APIs so the orbit maths can be tested on the host.

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_NEAR, ORBIT_DAMPING, ORBIT_ROTATE_SPEED};
use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn looking_at_origin(distance: f32, aspect: f32, zfar: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Orbit around `camera.target` with damped rotation, driven by pointer drags.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub camera: Camera,
    radius: f32,
    azimuth: f32,
    polar: f32,
    vel_azimuth: f32,
    vel_polar: f32,
    pub damping: f32,
}

// Keep the polar angle away from the poles so `up` stays valid.
const POLAR_EPS: f32 = 1e-3;

impl OrbitCamera {
    pub fn new(camera: Camera) -> Self {
        let offset = camera.eye - camera.target;
        let radius = offset.length().max(1e-4);
        let polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);
        Self {
            camera,
            radius,
            azimuth,
            polar,
            vel_azimuth: 0.0,
            vel_polar: 0.0,
            damping: ORBIT_DAMPING,
        }
    }

    /// Feed a drag delta in canvas pixels; `height_px` normalises the speed.
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, height_px: f32) {
        let h = height_px.max(1.0);
        self.vel_azimuth -= TAU * dx_px / h * ORBIT_ROTATE_SPEED;
        self.vel_polar -= TAU * dy_px / h * ORBIT_ROTATE_SPEED;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    /// Apply pending rotation and decay it; `dt_sec` scales damping to 60 Hz steps.
    pub fn update(&mut self, dt_sec: f32) {
        let frames = (dt_sec * 60.0).clamp(0.0, 4.0);
        let keep = (1.0 - self.damping).powf(frames);
        let applied = 1.0 - keep;
        self.azimuth += self.vel_azimuth * applied;
        self.polar = (self.polar + self.vel_polar * applied).clamp(POLAR_EPS, PI - POLAR_EPS);
        self.vel_azimuth *= keep;
        self.vel_polar *= keep;
        let sin_p = self.polar.sin();
        let offset = Vec3::new(
            self.radius * sin_p * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_p * self.azimuth.cos(),
        );
        self.camera.eye = self.camera.target + offset;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_settled(&self) -> bool {
        self.vel_azimuth.abs() < 1e-5 && self.vel_polar.abs() < 1e-5
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }
}
