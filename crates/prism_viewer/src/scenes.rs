//! Demo scenes and their per-frame animation.

use crate::settings::{RenderSettings, SceneKind};
use anyhow::{Context, Result};
use prism_math::Vec3;
use prism_renderer::{
    Camera, Color, CullMode, Material, MaterialId, MeshId, Scene, Triangle, TriangleMesh,
};
use std::f32::consts::TAU;

/// A scene plus the meshes its animation drives.
pub struct DemoScene {
    pub scene: Scene,
    spinning: Vec<MeshId>,
}

impl DemoScene {
    pub fn build(settings: &RenderSettings) -> Result<Self> {
        match settings.scene {
            SceneKind::Reference => reference(),
            SceneKind::Bunny => bunny(settings),
        }
    }

    /// Advance the animation to time `t` (seconds) and refresh mesh caches.
    pub fn animate(&mut self, t: f32) {
        let yaw = spin_angle(t);
        for &id in &self.spinning {
            if let Some(mesh) = self.scene.mesh_mut(id) {
                mesh.rotate_y(yaw);
            }
        }
        self.scene.update_mesh_caches();
    }
}

/// Yaw of the spinning triangles: eases back and forth over a full turn.
pub fn spin_angle(t: f32) -> f32 {
    (t.cos() + 1.0) / 2.0 * TAU
}

/// Five Lambert walls, camera and the three point lights.
///
/// Returns the white Lambert material for the objects placed inside.
fn lit_box(scene: &mut Scene) -> Result<MaterialId> {
    *scene.camera_mut() = Camera::new(Vec3::new(0.0, 3.0, -9.0), 45.0);

    let wall = scene.add_material(Material::lambert(Color::new(0.49, 0.57, 0.57), 1.0))?;
    let white = scene.add_material(Material::lambert(Color::ONE, 1.0))?;

    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), wall); // back
    scene.add_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), wall); // bottom
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), wall); // top
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), wall); // right
    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), wall); // left

    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45)); // back light
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45)); // front left
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));

    Ok(white)
}

/// Cook-Torrance spheres, metal on the bottom row and plastic on top, plus
/// one triangle per cull mode.
fn reference() -> Result<DemoScene> {
    let mut scene = Scene::new();
    let white = lit_box(&mut scene)?;

    let metal = Color::new(0.972, 0.960, 0.915);
    let plastic = Color::splat(0.75);
    let roughness = [1.0, 0.6, 0.1];

    for (row, (albedo, metalness)) in [(metal, 1.0), (plastic, 0.0)].into_iter().enumerate() {
        for (column, &r) in roughness.iter().enumerate() {
            let material = scene.add_material(Material::cook_torrance(albedo, metalness, r))?;
            let center = Vec3::new(-1.75 + 1.75 * column as f32, 1.0 + 2.0 * row as f32, 0.0);
            scene.add_sphere(center, 0.75, material);
        }
    }

    let base = Triangle::new(
        Vec3::new(-0.75, 1.5, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(-0.75, 0.0, 0.0),
    );

    let mut spinning = Vec::new();
    let cull_modes = [
        CullMode::BackFaceCulling,
        CullMode::FrontFaceCulling,
        CullMode::NoCulling,
    ];
    for (cull_mode, x) in cull_modes.into_iter().zip([-1.75, 0.0, 1.75]) {
        let mut mesh = TriangleMesh::empty(cull_mode, white);
        mesh.append_triangle(&base, true);
        mesh.translate(Vec3::new(x, 4.5, 0.0));
        mesh.update_transforms();
        spinning.push(scene.add_mesh(mesh));
    }

    log::info!(
        "Built reference scene: {} primitives, {} lights",
        scene.primitive_count(),
        scene.lights().len()
    );

    Ok(DemoScene { scene, spinning })
}

/// The box with an imported mesh, scaled up, standing on the floor.
fn bunny(settings: &RenderSettings) -> Result<DemoScene> {
    let mut scene = Scene::new();
    let white = lit_box(&mut scene)?;

    let data = prism_core::load_obj(&settings.obj_path)
        .with_context(|| format!("failed to load mesh {}", settings.obj_path.display()))?;

    let mut mesh = TriangleMesh::from_mesh_data(data, CullMode::NoCulling, white);
    mesh.scale(Vec3::splat(2.0));
    mesh.update_transforms();
    scene.add_mesh(mesh);

    log::info!("Built bunny scene: {} primitives", scene.primitive_count());

    Ok(DemoScene {
        scene,
        spinning: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_renderer::{Ray, RenderConfig, Renderer};
    use std::f32::consts::PI;

    #[test]
    fn test_spin_angle_range() {
        assert!((spin_angle(0.0) - TAU).abs() < 1e-5);
        assert!(spin_angle(PI).abs() < 1e-5);
        for i in 0..100 {
            let yaw = spin_angle(i as f32 * 0.1);
            assert!((-1e-5..=TAU + 1e-5).contains(&yaw));
        }
    }

    #[test]
    fn test_reference_scene_contents() {
        let demo = DemoScene::build(&RenderSettings::default()).unwrap();
        let scene = &demo.scene;

        assert_eq!(scene.spheres().len(), 6);
        assert_eq!(scene.planes().len(), 5);
        assert_eq!(scene.meshes().len(), 3);
        assert_eq!(scene.lights().len(), 3);
        // Default + wall + white + six Cook-Torrance
        assert_eq!(scene.materials().len(), 9);
        assert_eq!(scene.camera().fov_angle, 45.0);

        let cull_modes: Vec<_> = scene.meshes().iter().map(|m| m.cull_mode).collect();
        assert_eq!(
            cull_modes,
            vec![
                CullMode::BackFaceCulling,
                CullMode::FrontFaceCulling,
                CullMode::NoCulling
            ]
        );
    }

    #[test]
    fn test_animation_rotates_triangles() {
        let mut demo = DemoScene::build(&RenderSettings::default()).unwrap();

        // cos(t) = 0 gives half a turn
        demo.animate(PI / 2.0);
        let normal = demo.scene.meshes()[2].world_triangle(0).normal;
        // Base triangle faces -Z; half a turn about +Y faces +Z
        assert!((normal - Vec3::Z).length() < 1e-4);
        assert!(demo.scene.meshes().iter().all(|m| !m.is_stale()));
    }

    #[test]
    fn test_reference_scene_hits_box_everywhere() {
        let demo = DemoScene::build(&RenderSettings::default()).unwrap();
        let renderer = Renderer::new(8, 6);

        // The box is only open behind the camera: every primary ray hits something
        for py in 0..6 {
            for px in 0..8 {
                let ray: Ray = renderer.primary_ray(&demo.scene, px, py);
                assert!(demo.scene.closest_hit(&ray).did_hit, "pixel ({px}, {py})");
            }
        }

        let frame = renderer.render(&demo.scene, &RenderConfig::default());
        assert_eq!(frame.pixels.len(), 48);
    }

    #[test]
    fn test_bunny_scene_loads_obj() {
        let path = std::env::temp_dir().join(format!("prism_bunny_{}.obj", std::process::id()));
        std::fs::write(
            &path,
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\nf 1 3 2\nf 1 2 4\nf 1 4 3\nf 2 3 4\n",
        )
        .unwrap();

        let settings = RenderSettings {
            scene: SceneKind::Bunny,
            obj_path: path.clone(),
            ..Default::default()
        };
        let demo = DemoScene::build(&settings).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(demo.scene.meshes().len(), 1);
        let mesh = &demo.scene.meshes()[0];
        assert_eq!(mesh.triangle_count(), 4);
        // Scaled x2 about the origin
        assert!((mesh.world_bounds().y.max - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_bunny_scene_missing_obj() {
        let settings = RenderSettings {
            scene: SceneKind::Bunny,
            obj_path: "/nonexistent/bunny.obj".into(),
            ..Default::default()
        };
        let err = DemoScene::build(&settings).err().unwrap();
        assert!(err.to_string().contains("failed to load mesh"));
    }
}
