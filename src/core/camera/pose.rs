//=========================================================================
// Camera Pose
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Mat3, Mat4, Quat, Vec3};

//=== CameraPose ==========================================================

/// Position and orientation of the camera. Looks down its local -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `eye` oriented towards `target` with world +Y as up.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            position: eye,
            rotation: look_rotation(target - eye),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// World → camera space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }
}

//=== Helpers =============================================================

/// Rotation whose -Z axis points along `direction`.
///
/// A zero direction yields identity. Straight up/down falls back to +Z
/// as the up hint.
fn look_rotation(direction: Vec3) -> Quat {
    let forward = direction.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }

    let up_hint = if forward.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let right = forward.cross(up_hint).normalize();
    let up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

//=========================================================================
// Unit Tests
//=========================================================================
