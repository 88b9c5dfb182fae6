//! Software orthographic camera
//!
//! [`SoftwareCamera`] is a CPU stand-in for an engine camera: it splats
//! world-space [`Sprite`]s as alpha-blended squares into an RGBA buffer sized
//! by the current render target.

use glam::{Mat4, Vec3, Vec4};
use image::{Rgba, RgbaImage};

use crate::camera::{BakeCamera, CameraView, ClearMode, RenderState, TRANSPARENT};
use crate::error::{BakeError, Result};

/// Color drawn for [`ClearMode::Skybox`]
pub const SKY_COLOR: Vec4 = Vec4::new(0.53, 0.70, 0.89, 1.0);

/// A particle as seen by the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// World-space center
    pub position: Vec3,
    /// Color (RGBA, 0.0-1.0)
    pub color: Vec4,
    /// Edge length in world units
    pub size: f32,
}

/// Orthographic camera rendering sprites on the CPU
#[derive(Debug, Clone)]
pub struct SoftwareCamera {
    view: CameraView,
    /// Half of the visible height in world units
    half_height: f32,
    near: f32,
    far: f32,
    state: RenderState,
    sprites: Vec<Sprite>,
}

impl SoftwareCamera {
    /// Camera with the default render state and no sprites
    pub fn new(view: CameraView, half_height: f32) -> Self {
        Self {
            view,
            half_height,
            near: 0.01,
            far: 1000.0,
            state: RenderState::default(),
            sprites: Vec::new(),
        }
    }

    /// Set the near and far clip distances
    #[must_use]
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Set the sprites to draw
    #[must_use]
    pub fn with_sprites(mut self, sprites: Vec<Sprite>) -> Self {
        self.sprites = sprites;
        self
    }

    /// Replace the sprites to draw
    pub fn set_sprites(&mut self, sprites: Vec<Sprite>) {
        self.sprites = sprites;
    }

    /// Sprites currently in the scene
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Move the camera
    pub fn set_view(&mut self, view: CameraView) {
        self.view = view;
    }

    fn clear_color(&self) -> Vec4 {
        match self.state.clear {
            ClearMode::SolidColor => self.state.background,
            ClearMode::Skybox => SKY_COLOR,
            ClearMode::DepthOnly | ClearMode::Nothing => TRANSPARENT,
        }
    }
}

impl BakeCamera for SoftwareCamera {
    fn view(&self) -> CameraView {
        self.view
    }

    fn render_state(&self) -> RenderState {
        self.state
    }

    fn set_render_state(&mut self, state: RenderState) {
        self.state = state;
    }

    fn render(&mut self) -> Result<RgbaImage> {
        let target = self.state.target.ok_or(BakeError::NoRenderTarget)?;
        if target.width == 0 || target.height == 0 {
            return Err(BakeError::InvalidResolution(target.width.min(target.height)));
        }

        let (width, height) = (target.width, target.height);
        let mut pixels = vec![self.clear_color(); width as usize * height as usize];

        let half_height = self.half_height;
        let half_width = half_height * width as f32 / height as f32;
        let view = Mat4::look_at_rh(self.view.eye, self.view.target, self.view.up);
        let projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            self.near,
            self.far,
        );
        let pixels_per_unit = height as f32 / (2.0 * half_height);

        // Painter's algorithm: farthest first (most negative view-space z)
        let mut visible: Vec<(f32, Vec3, &Sprite)> = self
            .sprites
            .iter()
            .filter_map(|sprite| {
                let view_pos = view.transform_point3(sprite.position);
                let ndc = projection.transform_point3(view_pos);
                (0.0..=1.0)
                    .contains(&ndc.z)
                    .then_some((view_pos.z, ndc, sprite))
            })
            .collect();
        visible.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, ndc, sprite) in visible {
            let center_x = (ndc.x * 0.5 + 0.5) * width as f32;
            let center_y = (0.5 - ndc.y * 0.5) * height as f32;
            let half = (sprite.size * 0.5 * pixels_per_unit).max(0.5);

            let x0 = (center_x - half).floor().max(0.0) as u32;
            let x1 = ((center_x + half).ceil().max(0.0) as u32).min(width);
            let y0 = (center_y - half).floor().max(0.0) as u32;
            let y1 = ((center_y + half).ceil().max(0.0) as u32).min(height);

            for y in y0..y1 {
                let row = y as usize * width as usize;
                for x in x0..x1 {
                    let dst = &mut pixels[row + x as usize];
                    *dst = blend_over(sprite.color, *dst);
                }
            }
        }

        log::debug!(
            "Rendered {} sprites into {width}x{height} target",
            self.sprites.len()
        );

        Ok(RgbaImage::from_fn(width, height, |x, y| {
            let c = pixels[y as usize * width as usize + x as usize];
            let c = (c.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
            Rgba([c.x as u8, c.y as u8, c.z as u8, c.w as u8])
        }))
    }
}

/// Straight-alpha "over" compositing
fn blend_over(src: Vec4, dst: Vec4) -> Vec4 {
    let alpha = src.w + dst.w * (1.0 - src.w);
    if alpha <= f32::EPSILON {
        return TRANSPARENT;
    }
    let rgb = (src.truncate() * src.w + dst.truncate() * dst.w * (1.0 - src.w)) / alpha;
    rgb.extend(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::RenderTarget;
    use pretty_assertions::assert_eq;

    fn camera_with(sprites: Vec<Sprite>) -> SoftwareCamera {
        let mut camera = SoftwareCamera::new(CameraView::default(), 1.0).with_sprites(sprites);
        camera.set_render_state(RenderState::for_bake(16));
        camera
    }

    fn sprite(position: Vec3, color: Vec4, size: f32) -> Sprite {
        Sprite {
            position,
            color,
            size,
        }
    }

    #[test]
    fn test_render_requires_target() {
        let mut camera = SoftwareCamera::new(CameraView::default(), 1.0);
        assert!(matches!(camera.render(), Err(BakeError::NoRenderTarget)));
    }

    #[test]
    fn test_empty_scene_is_transparent() {
        let image = camera_with(Vec::new()).render().unwrap();
        assert_eq!(image.dimensions(), (16, 16));
        assert!(image.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_skybox_clear() {
        let mut camera = camera_with(Vec::new());
        camera.set_render_state(RenderState {
            clear: ClearMode::Skybox,
            ..RenderState::for_bake(4)
        });
        let image = camera.render().unwrap();
        assert_eq!(image.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn test_sprite_at_center() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let image = camera_with(vec![sprite(Vec3::ZERO, red, 0.5)])
            .render()
            .unwrap();

        assert_eq!(image.get_pixel(8, 8).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(image.get_pixel(15, 15).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_screen_orientation() {
        // Default view: screen right is +X, screen up is +Z
        let white = Vec4::ONE;
        let image = camera_with(vec![sprite(Vec3::new(0.75, 0.0, 0.75), white, 0.1)])
            .render()
            .unwrap();

        assert_eq!(image.get_pixel(14, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(1, 14).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_nearer_sprite_wins() {
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let blue = Vec4::new(0.0, 0.0, 1.0, 1.0);
        // Camera sits at y = -10 looking along +Y, so smaller y is nearer
        let sprites = vec![
            sprite(Vec3::new(0.0, -1.0, 0.0), red, 0.5),
            sprite(Vec3::new(0.0, 1.0, 0.0), blue, 0.5),
        ];
        let image = camera_with(sprites).render().unwrap();
        assert_eq!(image.get_pixel(8, 8).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_sprite_behind_camera_is_clipped() {
        let image = camera_with(vec![sprite(Vec3::new(0.0, -20.0, 0.0), Vec4::ONE, 1.0)])
            .render()
            .unwrap();
        assert!(image.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_translucent_sprites_blend() {
        let half_white = Vec4::new(1.0, 1.0, 1.0, 0.5);
        let image = camera_with(vec![sprite(Vec3::ZERO, half_white, 0.5)])
            .render()
            .unwrap();
        assert_eq!(image.get_pixel(8, 8).0, [255, 255, 255, 128]);
    }

    #[test]
    fn test_non_square_target() {
        let mut camera = camera_with(Vec::new());
        camera.set_render_state(RenderState {
            target: Some(RenderTarget {
                width: 32,
                height: 8,
                depth_bits: 24,
            }),
            ..RenderState::for_bake(1)
        });
        assert_eq!(camera.render().unwrap().dimensions(), (32, 8));
    }

    #[test]
    fn test_blend_over() {
        let out = blend_over(Vec4::new(1.0, 0.0, 0.0, 0.5), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert!((out - Vec4::new(0.5, 0.0, 0.5, 1.0)).length() < 1e-6);
        assert_eq!(blend_over(TRANSPARENT, TRANSPARENT), TRANSPARENT);
    }
}
