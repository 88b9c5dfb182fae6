//! Camera collaborator and scoped render-state handling
//!
//! Exporting an image temporarily reconfigures the camera (transparent
//! background, solid-color clear, offscreen target). [`RenderStateGuard`]
//! snapshots the camera's [`RenderState`] when acquired and puts it back when
//! dropped, so the camera is restored however the export ends.

use std::ops::{Deref, DerefMut};

use glam::{Vec3, Vec4};
use image::RgbaImage;

use crate::error::Result;

/// Fully transparent black
pub const TRANSPARENT: Vec4 = Vec4::ZERO;

/// What a camera does with its target before drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Fill with the sky color
    #[default]
    Skybox,
    /// Fill with the background color
    SolidColor,
    /// Clear depth only
    DepthOnly,
    /// Leave the target untouched
    Nothing,
}

/// Offscreen target a camera renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTarget {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Depth buffer precision in bits
    pub depth_bits: u8,
}

impl RenderTarget {
    /// Square target with a 24-bit depth buffer
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            depth_bits: 24,
        }
    }
}

/// The parts of a camera that an image export overrides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Background color (RGBA, 0.0-1.0)
    pub background: Vec4,
    /// Clear behaviour
    pub clear: ClearMode,
    /// Offscreen target, `None` for "no target"
    pub target: Option<RenderTarget>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            background: Vec4::new(0.192, 0.302, 0.475, 1.0),
            clear: ClearMode::Skybox,
            target: None,
        }
    }
}

impl RenderState {
    /// State used while baking an image at `resolution x resolution`
    pub fn for_bake(resolution: u32) -> Self {
        Self {
            background: TRANSPARENT,
            clear: ClearMode::SolidColor,
            target: Some(RenderTarget::square(resolution)),
        }
    }
}

/// Where a camera is and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Camera position
    pub eye: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// World up direction
    pub up: Vec3,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -10.0, 0.0),
            target: Vec3::ZERO,
            up: Vec3::Z,
        }
    }
}

impl CameraView {
    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or(Vec3::NEG_Y)
    }

    /// Screen-right direction
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or(Vec3::X)
    }

    /// Screen-up direction, orthogonal to forward and right
    pub fn screen_up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

/// A camera that can render the scene into an offscreen target
pub trait BakeCamera {
    /// Current view
    fn view(&self) -> CameraView;

    /// Current render state
    fn render_state(&self) -> RenderState;

    /// Replace the render state
    fn set_render_state(&mut self, state: RenderState);

    /// Render into the current target and read the pixels back
    ///
    /// Fails with [`BakeError::NoRenderTarget`](crate::BakeError::NoRenderTarget)
    /// when no target is set.
    fn render(&mut self) -> Result<RgbaImage>;
}

/// Restores a camera's render state on drop
pub struct RenderStateGuard<'c, C: BakeCamera + ?Sized> {
    camera: &'c mut C,
    saved: RenderState,
}

impl<'c, C: BakeCamera + ?Sized> RenderStateGuard<'c, C> {
    /// Snapshot the camera's render state
    pub fn acquire(camera: &'c mut C) -> Self {
        let saved = camera.render_state();
        Self { camera, saved }
    }

    /// The state that will be restored
    pub fn saved(&self) -> &RenderState {
        &self.saved
    }
}

impl<C: BakeCamera + ?Sized> Deref for RenderStateGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.camera
    }
}

impl<C: BakeCamera + ?Sized> DerefMut for RenderStateGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.camera
    }
}

impl<C: BakeCamera + ?Sized> Drop for RenderStateGuard<'_, C> {
    fn drop(&mut self) {
        log::trace!("Restoring camera render state");
        self.camera.set_render_state(self.saved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BakeError;

    #[derive(Default)]
    struct StubCamera {
        state: RenderState,
        fail: bool,
    }

    impl BakeCamera for StubCamera {
        fn view(&self) -> CameraView {
            CameraView::default()
        }

        fn render_state(&self) -> RenderState {
            self.state
        }

        fn set_render_state(&mut self, state: RenderState) {
            self.state = state;
        }

        fn render(&mut self) -> Result<RgbaImage> {
            if self.fail {
                return Err(BakeError::NoRenderTarget);
            }
            let target = self.state.target.ok_or(BakeError::NoRenderTarget)?;
            Ok(RgbaImage::new(target.width, target.height))
        }
    }

    fn render_with_bake_state(camera: &mut dyn BakeCamera) -> Result<RgbaImage> {
        let mut guard = RenderStateGuard::acquire(camera);
        guard.set_render_state(RenderState::for_bake(8));
        guard.render()
    }

    #[test]
    fn test_state_restored_after_success() {
        let mut camera = StubCamera::default();
        let original = camera.state;

        let image = render_with_bake_state(&mut camera).unwrap();
        assert_eq!(image.dimensions(), (8, 8));
        assert_eq!(camera.state, original);
    }

    #[test]
    fn test_state_restored_after_failure() {
        let mut camera = StubCamera {
            fail: true,
            ..Default::default()
        };
        let original = camera.state;

        assert!(render_with_bake_state(&mut camera).is_err());
        assert_eq!(camera.state, original);
    }

    #[test]
    fn test_state_restored_after_panic() {
        let mut camera = StubCamera::default();
        let original = camera.state;

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = RenderStateGuard::acquire(&mut camera);
            guard.set_render_state(RenderState::for_bake(4));
            panic!("render blew up");
        }));

        assert!(result.is_err());
        assert_eq!(camera.state, original);
    }

    #[test]
    fn test_view_axes_are_orthonormal() {
        let view = CameraView {
            eye: Vec3::new(3.0, -4.0, 2.0),
            target: Vec3::new(0.0, 0.0, 1.0),
            up: Vec3::Z,
        };
        let (f, r, u) = (view.forward(), view.right(), view.screen_up());

        assert!(f.dot(r).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(r.dot(u).abs() < 1e-5);
        assert!((r.cross(u) + f).length() < 1e-5);
    }
}
