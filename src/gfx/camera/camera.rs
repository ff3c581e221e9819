use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Look-at camera with a perspective projection
///
/// The view and projection matrices are rebuilt whenever one of their inputs
/// changes, so reading them is free.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vector3<f32>,
    target: Vector3<f32>,
    up: Vector3<f32>,
    fovy: Deg<f32>,
    aspect: f32,
    znear: f32,
    zfar: f32,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl Camera {
    /// Camera at (0, 1, 5) looking at the origin.
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vector3::new(0.0, 1.0, 5.0),
            target: Vector3::zero(),
            up: Vector3::unit_y(),
            fovy: Deg(30.0),
            aspect,
            znear: 0.1,
            zfar: 1000.0,
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
        };
        camera.rebuild_view();
        camera.rebuild_projection();
        camera
    }

    pub fn update_view(&mut self, position: Vector3<f32>, target: Vector3<f32>, up: Vector3<f32>) {
        self.position = position;
        self.target = target;
        self.up = up;
        self.rebuild_view();
    }

    pub fn update_projection(&mut self, fovy_deg: f32, aspect: f32, znear: f32, zfar: f32) {
        self.fovy = Deg(fovy_deg);
        self.aspect = aspect;
        self.znear = znear;
        self.zfar = zfar;
        self.rebuild_projection();
    }

    /// Keeps the field of view and clip planes, changes the aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.rebuild_projection();
    }

    fn rebuild_view(&mut self) {
        self.view = Matrix4::look_at_rh(
            Point3::from_vec(self.position),
            Point3::from_vec(self.target),
            self.up,
        );
    }

    fn rebuild_projection(&mut self) {
        self.projection =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn target(&self) -> Vector3<f32> {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn fovy(&self) -> Deg<f32> {
        self.fovy
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }

    pub fn view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection * self.view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_moves_target_to_negative_z() {
        let camera = Camera::new(1.0);
        let target = camera.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
        assert!(target.z < 0.0);

        let eye = camera.view_matrix() * camera.position().extend(1.0);
        assert_relative_eq!(eye.truncate().magnitude(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_projection_depth_range() {
        let camera = Camera::new(1.0);
        let near = camera.projection_matrix() * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let far = camera.projection_matrix() * Vector4::new(0.0, 0.0, -1000.0, 1.0);
        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::new(1.0);
        let square = camera.projection_matrix();
        camera.set_aspect(2.0);
        assert_relative_eq!(camera.projection_matrix().x.x, square.x.x / 2.0, epsilon = 1e-6);
        assert_eq!(camera.view_matrix(), Camera::new(1.0).view_matrix());
    }
}
