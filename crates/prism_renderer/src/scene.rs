//! Scene: geometry, materials, lights and the camera.
//!
//! Everything is owned in flat lists and addressed by small typed handles.
//! Geometry kinds live in separate lists because each has its own hit test.

use crate::{
    hittable::{any_hit_in, closest_hit_in, HitRecord},
    Camera, Color, CullMode, Light, Material, MaterialId, Plane, Ray, Sphere, TriangleMesh,
};
use prism_math::Vec3;
use thiserror::Error;

/// Largest number of materials a scene can hold (indices are `u8`).
pub const MAX_MATERIALS: usize = u8::MAX as usize + 1;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SceneError {
    #[error("scene already holds the maximum of {MAX_MATERIALS} materials")]
    MaterialLimit,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Handle to a sphere in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SphereId(pub usize);

/// Handle to a plane in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneId(pub usize);

/// Handle to a triangle mesh in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Handle to a light in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub usize);

/// A renderable scene.
///
/// Material 0 always exists and is solid red; geometry that refers to a
/// material the scene does not hold is shaded with it.
#[derive(Debug, Clone)]
pub struct Scene {
    camera: Camera,
    spheres: Vec<Sphere>,
    planes: Vec<Plane>,
    meshes: Vec<TriangleMesh>,
    materials: Vec<Material>,
    lights: Vec<Light>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene holding only the default material.
    pub fn new() -> Self {
        Self {
            camera: Camera::default(),
            spheres: Vec::with_capacity(32),
            planes: Vec::with_capacity(32),
            meshes: Vec::with_capacity(32),
            materials: vec![Material::default()],
            lights: Vec::with_capacity(32),
        }
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    // Construction

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: MaterialId) -> SphereId {
        self.spheres.push(Sphere::new(center, radius, material));
        SphereId(self.spheres.len() - 1)
    }

    pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material: MaterialId) -> PlaneId {
        self.planes.push(Plane::new(origin, normal, material));
        PlaneId(self.planes.len() - 1)
    }

    /// Add an empty mesh, to be filled through [`Scene::mesh_mut`].
    pub fn add_triangle_mesh(&mut self, cull_mode: CullMode, material: MaterialId) -> MeshId {
        self.add_mesh(TriangleMesh::empty(cull_mode, material))
    }

    /// Add a mesh that is already built.
    pub fn add_mesh(&mut self, mesh: TriangleMesh) -> MeshId {
        log::debug!(
            "Adding mesh #{} with {} triangles",
            self.meshes.len(),
            mesh.triangle_count()
        );
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f32, color: Color) -> LightId {
        self.add_light(Light::point(origin, intensity, color))
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f32, color: Color) -> LightId {
        self.add_light(Light::directional(direction, intensity, color))
    }

    fn add_light(&mut self, light: Light) -> LightId {
        self.lights.push(light);
        LightId(self.lights.len() - 1)
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> SceneResult<MaterialId> {
        if self.materials.len() >= MAX_MATERIALS {
            log::warn!("Material limit reached, rejecting {:?}", material);
            return Err(SceneError::MaterialLimit);
        }

        let id = MaterialId(self.materials.len() as u8);
        self.materials.push(material);
        Ok(id)
    }

    // Access

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn mesh(&self, id: MeshId) -> Option<&TriangleMesh> {
        self.meshes.get(id.0)
    }

    /// Mutable access for animation. Call [`Scene::update_mesh_caches`]
    /// afterwards, before rendering.
    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut TriangleMesh> {
        self.meshes.get_mut(id.0)
    }

    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0)
    }

    /// Material for `id`, or the default material if there is none.
    #[inline]
    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials
            .get(id.index())
            .unwrap_or(&self.materials[MaterialId::DEFAULT.index()])
    }

    /// Rebuild the world-space cache of every mesh whose transform changed.
    ///
    /// Returns how many meshes were rebuilt.
    pub fn update_mesh_caches(&mut self) -> usize {
        let mut updated = 0;
        for mesh in self.meshes.iter_mut().filter(|mesh| mesh.is_stale()) {
            mesh.update_transforms();
            updated += 1;
        }
        if updated > 0 {
            log::trace!("Rebuilt {} mesh caches", updated);
        }
        updated
    }

    // Queries

    /// Closest surface along `ray` within its range.
    ///
    /// Spheres, then planes, then meshes are tested; each accepted hit narrows
    /// the range for everything after it. `did_hit` is false on a miss.
    pub fn closest_hit(&self, ray: &Ray) -> HitRecord {
        let mut ray = *ray;
        let mut rec = HitRecord::miss(&ray);

        closest_hit_in(&self.spheres, &mut ray, &mut rec);
        closest_hit_in(&self.planes, &mut ray, &mut rec);
        closest_hit_in(&self.meshes, &mut ray, &mut rec);

        rec
    }

    /// True if anything blocks `ray` within its range.
    pub fn does_hit(&self, ray: &Ray) -> bool {
        any_hit_in(&self.spheres, ray)
            || any_hit_in(&self.planes, ray)
            || any_hit_in(&self.meshes, ray)
    }

    /// Total number of primitives, counting each mesh triangle.
    pub fn primitive_count(&self) -> usize {
        self.spheres.len()
            + self.planes.len()
            + self.meshes.iter().map(TriangleMesh::triangle_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Triangle;

    #[test]
    fn test_new_scene_has_default_material() {
        let scene = Scene::new();
        assert_eq!(scene.materials().len(), 1);
        assert_eq!(scene.material(MaterialId::DEFAULT), &Material::default());
    }

    #[test]
    fn test_unknown_material_falls_back_to_default() {
        let mut scene = Scene::new();
        scene.add_material(Material::solid_color(Color::ONE)).unwrap();

        assert_eq!(scene.material(MaterialId(1)), &Material::solid_color(Color::ONE));
        assert_eq!(scene.material(MaterialId(200)), &Material::default());
    }

    #[test]
    fn test_material_limit() {
        let mut scene = Scene::new();
        for i in 1..MAX_MATERIALS {
            let id = scene.add_material(Material::default()).unwrap();
            assert_eq!(id.index(), i);
        }

        assert_eq!(
            scene.add_material(Material::default()),
            Err(SceneError::MaterialLimit)
        );
        assert_eq!(scene.materials().len(), MAX_MATERIALS);
    }

    #[test]
    fn test_handles_count_up_per_kind() {
        let mut scene = Scene::new();
        assert_eq!(scene.add_sphere(Vec3::ZERO, 1.0, MaterialId::DEFAULT), SphereId(0));
        assert_eq!(scene.add_sphere(Vec3::X, 1.0, MaterialId::DEFAULT), SphereId(1));
        assert_eq!(scene.add_plane(Vec3::ZERO, Vec3::Y, MaterialId::DEFAULT), PlaneId(0));
        assert_eq!(
            scene.add_triangle_mesh(CullMode::NoCulling, MaterialId::DEFAULT),
            MeshId(0)
        );
        assert_eq!(scene.add_point_light(Vec3::Y, 1.0, Color::ONE), LightId(0));
        assert_eq!(scene.add_directional_light(-Vec3::Y, 1.0, Color::ONE), LightId(1));
    }

    #[test]
    fn test_closest_hit_sphere_scenario() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, MaterialId::DEFAULT);

        let hit = scene.closest_hit(&Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z));
        assert!(hit.did_hit);
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!((hit.p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_closest_hit_plane_scenario() {
        let mut scene = Scene::new();
        scene.add_plane(Vec3::ZERO, Vec3::Y, MaterialId::DEFAULT);

        let hit = scene.closest_hit(&Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y));
        assert!(hit.did_hit);
        assert!((hit.t - 5.0).abs() < 1e-5);
        assert!(hit.p.length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_closest_hit_across_kinds() {
        let mut scene = Scene::new();
        let red = scene.add_material(Material::solid_color(Color::X)).unwrap();
        let green = scene.add_material(Material::solid_color(Color::Y)).unwrap();
        let blue = scene.add_material(Material::solid_color(Color::Z)).unwrap();

        // Back wall plane at z=10, sphere in front of it, triangle nearest
        scene.add_plane(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z, red);
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, green);
        let mesh = scene.add_triangle_mesh(CullMode::NoCulling, blue);
        scene.mesh_mut(mesh).unwrap().append_triangle(
            &Triangle::new(
                Vec3::new(-1.0, -1.0, 2.0),
                Vec3::new(0.0, 1.0, 2.0),
                Vec3::new(1.0, -1.0, 2.0),
            ),
            false,
        );

        let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(hit.did_hit);
        assert_eq!(hit.material, blue);
        assert!((hit.t - 2.0).abs() < 1e-5);

        // Off to the side only the wall is hit
        let hit = scene.closest_hit(&Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::Z));
        assert_eq!(hit.material, red);
        assert!((hit.t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_closest_hit_miss() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, MaterialId::DEFAULT);

        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        let hit = scene.closest_hit(&ray);
        assert!(!hit.did_hit);
        assert!(!scene.does_hit(&ray));
    }

    #[test]
    fn test_does_hit_respects_light_distance() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.5, MaterialId::DEFAULT);

        let blocked = Ray::with_bounds(Vec3::ZERO, Vec3::Y, 1e-4, 5.0);
        assert!(scene.does_hit(&blocked));

        // Light sits in front of the blocker
        let clear = Ray::with_bounds(Vec3::ZERO, Vec3::Y, 1e-4, 2.0);
        assert!(!scene.does_hit(&clear));
    }

    #[test]
    fn test_update_mesh_caches_only_touches_stale_meshes() {
        let mut scene = Scene::new();
        let a = scene.add_mesh(TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            CullMode::NoCulling,
            MaterialId::DEFAULT,
        ));
        scene.add_mesh(TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
            CullMode::NoCulling,
            MaterialId::DEFAULT,
        ));
        assert_eq!(scene.update_mesh_caches(), 0);

        scene.mesh_mut(a).unwrap().translate(Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(scene.update_mesh_caches(), 1);
        assert!(!scene.mesh(a).unwrap().is_stale());

        // The unmoved mesh at z=0 is behind this ray; the moved one is at z=3
        let hit = scene.closest_hit(&Ray::new(Vec3::new(0.2, 0.2, 1.0), Vec3::Z));
        assert!(hit.did_hit);
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_update_mesh_caches_after_batched_appends() {
        let mut scene = Scene::new();
        let id = scene.add_triangle_mesh(CullMode::NoCulling, MaterialId::DEFAULT);
        scene.mesh_mut(id).unwrap().append_triangle(
            &Triangle::new(
                Vec3::new(-1.0, -1.0, 2.0),
                Vec3::new(0.0, 1.0, 2.0),
                Vec3::new(1.0, -1.0, 2.0),
            ),
            true,
        );

        assert_eq!(scene.update_mesh_caches(), 1);
        assert!(!scene.mesh(id).unwrap().world_bounds().is_empty());

        let hit = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!(hit.did_hit);
        assert!((hit.t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_light_and_camera_mut() {
        let mut scene = Scene::new();
        let light = scene.add_point_light(Vec3::ZERO, 1.0, Color::ONE);
        scene.light_mut(light).unwrap().set_intensity(4.0);
        assert_eq!(scene.lights()[0], Light::point(Vec3::ZERO, 4.0, Color::ONE));

        scene.camera_mut().origin = Vec3::new(0.0, 3.0, -9.0);
        assert_eq!(scene.camera().origin, Vec3::new(0.0, 3.0, -9.0));
        assert!(scene.light_mut(LightId(7)).is_none());
    }

    #[test]
    fn test_primitive_count() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 1.0, MaterialId::DEFAULT);
        scene.add_plane(Vec3::ZERO, Vec3::Y, MaterialId::DEFAULT);
        scene.add_mesh(TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
            vec![0, 1, 2, 0, 2, 3],
            CullMode::NoCulling,
            MaterialId::DEFAULT,
        ));
        assert_eq!(scene.primitive_count(), 4);
    }
}
