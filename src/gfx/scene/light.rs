//! Light sources for Phong shading
//!
//! Three kinds of light are supported: a directional light at infinity, a
//! point light and a spot light. Point and spot lights carry a one-vertex
//! marker so they can be drawn as a dot at their position.

use cgmath::{InnerSpace, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::gfx::rendering::gpu::GpuContext;

use super::vertex::VertexP;

/// Distance moved per unit of speed
pub const MOVE_STEP: f32 = 0.1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LightError {
    #[error("Invalid light argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Unit step along the screen axes
    pub fn step(self) -> Vector3<f32> {
        match self {
            MoveDirection::Left => Vector3::new(-MOVE_STEP, 0.0, 0.0),
            MoveDirection::Right => Vector3::new(MOVE_STEP, 0.0, 0.0),
            MoveDirection::Up => Vector3::new(0.0, MOVE_STEP, 0.0),
            MoveDirection::Down => Vector3::new(0.0, -MOVE_STEP, 0.0),
        }
    }
}

/// Normalizes `direction`, scaling by the largest component first so that
/// tiny and huge vectors stay representable.
fn unit_direction(direction: Vector3<f32>) -> Result<Vector3<f32>, LightError> {
    let invalid = || {
        LightError::InvalidArgument(format!("direction {:?} cannot be normalized", direction))
    };

    let largest = direction.x.abs().max(direction.y.abs()).max(direction.z.abs());
    if !largest.is_finite() || largest == 0.0 {
        return Err(invalid());
    }

    let unit = (direction / largest).normalize();
    if !(unit.x.is_finite() && unit.y.is_finite() && unit.z.is_finite()) {
        return Err(invalid());
    }
    Ok(unit)
}

/// Single point primitive at the origin, drawn translated to the light position
#[derive(Default)]
pub struct LightMarker {
    vertex: VertexP,
    buffer: Option<wgpu::Buffer>,
}

impl LightMarker {
    pub fn vertex(&self) -> &VertexP {
        &self.vertex
    }

    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    pub fn create_buffer(&mut self, gpu: &GpuContext) {
        let buffer = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Light Marker Vertex Buffer"),
                contents: bytemuck::bytes_of(&self.vertex),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.buffer = Some(buffer);
    }

    pub fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.destroy();
        }
    }
}

impl Drop for LightMarker {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for LightMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightMarker")
            .field("vertex", &self.vertex)
            .field("uploaded", &self.buffer.is_some())
            .finish()
    }
}

/// Light at infinity; the direction is always unit length
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    direction: Vector3<f32>,
    radiance: Vector3<f32>,
}

impl DirectionalLight {
    pub fn new(direction: Vector3<f32>, radiance: Vector3<f32>) -> Result<Self, LightError> {
        Ok(Self {
            direction: unit_direction(direction)?,
            radiance,
        })
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn radiance(&self) -> Vector3<f32> {
        self.radiance
    }

    /// Stores the normalized direction; the zero vector is rejected.
    pub fn set_direction(&mut self, direction: Vector3<f32>) -> Result<(), LightError> {
        self.direction = unit_direction(direction)?;
        Ok(())
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vector3::new(1.0, 1.0, 1.0).normalize(),
            radiance: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

#[derive(Debug)]
pub struct PointLight {
    position: Vector3<f32>,
    intensity: Vector3<f32>,
    marker: LightMarker,
}

impl PointLight {
    pub fn new(position: Vector3<f32>, intensity: Vector3<f32>) -> Self {
        Self {
            position,
            intensity,
            marker: LightMarker::default(),
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn intensity(&self) -> Vector3<f32> {
        self.intensity
    }

    pub fn marker(&self) -> &LightMarker {
        &self.marker
    }

    pub fn marker_mut(&mut self) -> &mut LightMarker {
        &mut self.marker
    }

    pub fn move_by(&mut self, direction: MoveDirection, speed: f32) {
        self.position += direction.step() * speed;
    }

    pub fn move_left(&mut self, speed: f32) {
        self.move_by(MoveDirection::Left, speed);
    }

    pub fn move_right(&mut self, speed: f32) {
        self.move_by(MoveDirection::Right, speed);
    }

    pub fn move_up(&mut self, speed: f32) {
        self.move_by(MoveDirection::Up, speed);
    }

    pub fn move_down(&mut self, speed: f32) {
        self.move_by(MoveDirection::Down, speed);
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vector3::new(1.5, 1.5, 1.5), Vector3::new(1.0, 1.0, 1.0))
    }
}

/// Point light restricted to a cone
///
/// Full intensity inside the falloff-start angle, fading to zero at the total
/// width. Angles are kept in degrees; the cosines are computed on each query.
#[derive(Debug)]
pub struct SpotLight {
    point: PointLight,
    direction: Vector3<f32>,
    falloff_start_deg: f32,
    total_width_deg: f32,
}

impl SpotLight {
    pub fn new(
        position: Vector3<f32>,
        intensity: Vector3<f32>,
        direction: Vector3<f32>,
        falloff_start_deg: f32,
        total_width_deg: f32,
    ) -> Result<Self, LightError> {
        let mut light = Self {
            point: PointLight::new(position, intensity),
            direction: unit_direction(direction)?,
            falloff_start_deg: 0.0,
            total_width_deg: 0.0,
        };
        light.set_cutoff_angles(falloff_start_deg, total_width_deg)?;
        Ok(light)
    }

    pub fn position(&self) -> Vector3<f32> {
        self.point.position()
    }

    pub fn intensity(&self) -> Vector3<f32> {
        self.point.intensity()
    }

    pub fn direction(&self) -> Vector3<f32> {
        self.direction
    }

    pub fn marker(&self) -> &LightMarker {
        self.point.marker()
    }

    pub fn marker_mut(&mut self) -> &mut LightMarker {
        self.point.marker_mut()
    }

    pub fn set_direction(&mut self, direction: Vector3<f32>) -> Result<(), LightError> {
        self.direction = unit_direction(direction)?;
        Ok(())
    }

    /// Aims the cone at `target`; fails when the target is the light position.
    pub fn point_at(&mut self, target: Vector3<f32>) -> Result<(), LightError> {
        self.set_direction(target - self.position())
    }

    pub fn falloff_start_deg(&self) -> f32 {
        self.falloff_start_deg
    }

    pub fn total_width_deg(&self) -> f32 {
        self.total_width_deg
    }

    /// Requires `0 <= falloff_start <= total_width <= 180`.
    pub fn set_cutoff_angles(
        &mut self,
        falloff_start_deg: f32,
        total_width_deg: f32,
    ) -> Result<(), LightError> {
        let in_range = |deg: f32| (0.0..=180.0).contains(&deg);
        if !in_range(falloff_start_deg) || !in_range(total_width_deg) {
            return Err(LightError::InvalidArgument(format!(
                "cutoff angles ({}, {}) must lie in [0, 180] degrees",
                falloff_start_deg, total_width_deg
            )));
        }
        if falloff_start_deg > total_width_deg {
            return Err(LightError::InvalidArgument(format!(
                "falloff start {} exceeds total width {}",
                falloff_start_deg, total_width_deg
            )));
        }

        self.falloff_start_deg = falloff_start_deg;
        self.total_width_deg = total_width_deg;
        Ok(())
    }

    pub fn cos_total_width(&self) -> f32 {
        self.total_width_deg.to_radians().cos()
    }

    pub fn cos_falloff_start(&self) -> f32 {
        self.falloff_start_deg.to_radians().cos()
    }

    pub fn move_by(&mut self, direction: MoveDirection, speed: f32) {
        self.point.move_by(direction, speed);
    }

    pub fn move_left(&mut self, speed: f32) {
        self.point.move_left(speed);
    }

    pub fn move_right(&mut self, speed: f32) {
        self.point.move_right(speed);
    }

    pub fn move_up(&mut self, speed: f32) {
        self.point.move_up(speed);
    }

    pub fn move_down(&mut self, speed: f32) {
        self.point.move_down(speed);
    }
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            point: PointLight::new(Vector3::new(0.0, 2.0, 0.0), Vector3::new(1.0, 1.0, 1.0)),
            direction: Vector3::new(0.0, -1.0, 0.0),
            falloff_start_deg: 30.0,
            total_width_deg: 45.0,
        }
    }
}

#[derive(Debug)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl From<DirectionalLight> for Light {
    fn from(value: DirectionalLight) -> Self {
        Light::Directional(value)
    }
}

impl From<PointLight> for Light {
    fn from(value: PointLight) -> Self {
        Light::Point(value)
    }
}

impl From<SpotLight> for Light {
    fn from(value: SpotLight) -> Self {
        Light::Spot(value)
    }
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Directional(_) => LightKind::Directional,
            Light::Point(_) => LightKind::Point,
            Light::Spot(_) => LightKind::Spot,
        }
    }

    /// `None` for directional lights
    pub fn position(&self) -> Option<Vector3<f32>> {
        match self {
            Light::Directional(_) => None,
            Light::Point(light) => Some(light.position()),
            Light::Spot(light) => Some(light.position()),
        }
    }

    /// Radiance for directional lights, intensity otherwise
    pub fn intensity(&self) -> Vector3<f32> {
        match self {
            Light::Directional(light) => light.radiance(),
            Light::Point(light) => light.intensity(),
            Light::Spot(light) => light.intensity(),
        }
    }

    /// Normalized intensity, black for a zero intensity
    pub fn visualization_color(&self) -> Vector3<f32> {
        let intensity = self.intensity();
        if intensity.is_zero() {
            return Vector3::zero();
        }
        intensity.normalize()
    }

    pub fn marker(&self) -> Option<&LightMarker> {
        match self {
            Light::Directional(_) => None,
            Light::Point(light) => Some(light.marker()),
            Light::Spot(light) => Some(light.marker()),
        }
    }

    pub fn marker_mut(&mut self) -> Option<&mut LightMarker> {
        match self {
            Light::Directional(_) => None,
            Light::Point(light) => Some(light.marker_mut()),
            Light::Spot(light) => Some(light.marker_mut()),
        }
    }

    /// Moves point and spot lights; directional lights have no position.
    pub fn move_by(&mut self, direction: MoveDirection, speed: f32) {
        match self {
            Light::Directional(_) => {
                log::debug!("Directional lights cannot be moved");
            }
            Light::Point(light) => light.move_by(direction, speed),
            Light::Spot(light) => light.move_by(direction, speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_directional_direction_is_unit() -> Result<(), LightError> {
        let mut light =
            DirectionalLight::new(Vector3::new(1.0, 0.0, -1.0), Vector3::new(0.6, 0.6, 0.6))?;
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);

        light.set_direction(Vector3::new(0.0, -3.0, 0.0))?;
        assert_relative_eq!(light.direction().y, -1.0, epsilon = 1e-6);

        let default_direction = DirectionalLight::default().direction();
        assert_relative_eq!(default_direction.magnitude(), 1.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_extreme_magnitudes_normalize() -> Result<(), LightError> {
        let mut light = DirectionalLight::default();

        // squares underflow to zero
        light.set_direction(Vector3::new(1e-30, 0.0, 0.0))?;
        assert_eq!(light.direction(), Vector3::new(1.0, 0.0, 0.0));
        light.set_direction(Vector3::new(0.0, -1e-40, 1e-40))?;
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(light.direction().y, -std::f32::consts::FRAC_1_SQRT_2, epsilon = 1e-6);

        // squares overflow to infinity
        light.set_direction(Vector3::new(1e20, 0.0, 0.0))?;
        assert_eq!(light.direction(), Vector3::new(1.0, 0.0, 0.0));
        light.set_direction(Vector3::new(f32::MAX, f32::MAX, 0.0))?;
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);

        let mut spot = SpotLight::default();
        spot.set_direction(Vector3::new(0.0, 0.0, -1e-35))?;
        assert_eq!(spot.direction(), Vector3::new(0.0, 0.0, -1.0));
        Ok(())
    }

    #[test]
    fn test_non_finite_direction_rejected() {
        let mut light = DirectionalLight::default();
        let before = light.direction();
        assert!(light.set_direction(Vector3::new(f32::INFINITY, 0.0, 0.0)).is_err());
        assert!(light.set_direction(Vector3::new(f32::NAN, 1.0, 0.0)).is_err());
        assert_eq!(light.direction(), before);
    }

    #[test]
    fn test_zero_direction_rejected() {
        let mut light = DirectionalLight::default();
        let before = light.direction();
        assert!(matches!(
            light.set_direction(Vector3::zero()),
            Err(LightError::InvalidArgument(_))
        ));
        assert_eq!(light.direction(), before);

        assert!(DirectionalLight::new(Vector3::zero(), Vector3::zero()).is_err());
    }

    #[test]
    fn test_point_light_movement() {
        let mut light = PointLight::new(Vector3::new(0.8, 0.0, 0.8), Vector3::new(0.5, 0.1, 0.1));
        light.move_left(0.2);
        assert_relative_eq!(light.position().x, 0.78, epsilon = 1e-6);
        light.move_up(0.2);
        light.move_up(0.2);
        assert_relative_eq!(light.position().y, 0.04, epsilon = 1e-6);
        light.move_right(0.2);
        light.move_down(0.2);
        assert_relative_eq!(light.position().x, 0.8, epsilon = 1e-6);
        assert_relative_eq!(light.position().y, 0.02, epsilon = 1e-6);
        assert_eq!(light.position().z, 0.8);
    }

    #[test]
    fn test_spot_cosines_follow_angles() -> Result<(), LightError> {
        let mut spot = SpotLight::new(
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.25, 0.25, 0.1),
            Vector3::new(0.0, -1.0, 0.0),
            30.0,
            45.0,
        )?;
        assert_relative_eq!(spot.cos_falloff_start(), 30f32.to_radians().cos(), epsilon = 1e-6);
        assert_relative_eq!(spot.cos_total_width(), 45f32.to_radians().cos(), epsilon = 1e-6);

        spot.set_cutoff_angles(10.0, 60.0)?;
        assert_relative_eq!(spot.cos_falloff_start(), 10f32.to_radians().cos(), epsilon = 1e-6);
        assert_relative_eq!(spot.cos_total_width(), 0.5, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn test_spot_angle_validation() {
        let mut spot = SpotLight::default();
        assert!(spot.set_cutoff_angles(50.0, 40.0).is_err());
        assert!(spot.set_cutoff_angles(-1.0, 40.0).is_err());
        assert!(spot.set_cutoff_angles(10.0, 181.0).is_err());
        assert_eq!(spot.falloff_start_deg(), 30.0);
        assert_eq!(spot.total_width_deg(), 45.0);
    }

    #[test]
    fn test_spot_point_at() -> Result<(), LightError> {
        let mut spot = SpotLight::default();
        spot.point_at(Vector3::new(2.0, 2.0, 0.0))?;
        assert_relative_eq!(spot.direction().x, 1.0, epsilon = 1e-6);
        assert!(spot.point_at(spot.position()).is_err());
        Ok(())
    }

    #[test]
    fn test_light_dispatch() {
        let mut light = Light::from(PointLight::new(Vector3::zero(), Vector3::new(3.0, 0.0, 4.0)));
        assert_eq!(light.kind(), LightKind::Point);
        let color = light.visualization_color();
        assert_relative_eq!(color.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(color.z, 0.8, epsilon = 1e-6);

        light.move_by(MoveDirection::Right, 1.0);
        assert_relative_eq!(light.position().unwrap().x, 0.1, epsilon = 1e-6);

        let dark = Light::from(PointLight::new(Vector3::zero(), Vector3::zero()));
        assert_eq!(dark.visualization_color(), Vector3::zero());

        let sun = Light::from(DirectionalLight::default());
        assert!(sun.position().is_none());
        assert!(sun.marker().is_none());
    }
}
