use tearcloth::{ClothConfig, ClothSystem, SimulationMode, FIXED_TIMESTEP};
use tearcloth::vec::{Vec as _, Vec3};

#[test]
fn static_sphere_keeps_cloth_outside() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(15, 15)).unwrap();
    let center = Vec3::new(0.0, 2.0, 0.5);
    let radius = 0.8;
    cloth.add_sphere(center, radius);

    for frame in 0..180 {
        cloth.update(FIXED_TIMESTEP);
        assert!(cloth.stats().last_substeps >= 1);
        for (i, p) in cloth.particles().iter().enumerate() {
            if !p.active || p.pinned {
                continue;
            }
            let d = p.pos.distance(center);
            assert!(d >= radius - 1e-4, "frame {}: particle {} at depth {}", frame, i, radius - d);
        }
    }
    // Added spheres are static.
    assert_eq!(cloth.spheres()[0].center, center);
}

#[test]
fn collision_obstacle_patrols_within_bounds() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(10, 10)).unwrap();
    cloth.set_mode(SimulationMode::Collision);
    assert_eq!(cloth.spheres().len(), 1);
    assert_eq!(cloth.spheres()[0].center, Vec3::new(0.0, 1.0, 6.0));
    assert_eq!(cloth.spheres()[0].radius, 0.8);

    let mut min_z = f32::MAX;
    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    for _ in 0..1500 {
        cloth.update(FIXED_TIMESTEP);
        let c = cloth.spheres()[0].center;
        assert!(c.x >= -4.0 - 1e-4 && c.x <= 4.0 + 1e-4, "x = {}", c.x);
        assert!(c.z >= -2.0 && c.z <= 6.0 + 1e-4, "z = {}", c.z);
        assert_eq!(c.y, 1.0);
        min_z = min_z.min(c.z);
        min_x = min_x.min(c.x);
        max_x = max_x.max(c.x);
    }
    assert!(min_z < -1.9, "sphere never reached the far end");
    assert!(max_x > 3.9 && min_x >= -1e-4, "semicircle swings to +x: [{}, {}]", min_x, max_x);
}

#[test]
fn collision_mode_cloth_hangs_from_top_row() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new()).unwrap();
    cloth.set_mode(SimulationMode::Collision);
    let top: Vec<usize> = (0..25).map(|x| 24 * 25 + x).collect();
    let initial: Vec<Vec3<f32>> = top.iter().map(|&i| cloth.particles()[i].pos).collect();

    for _ in 0..600 {
        cloth.update(FIXED_TIMESTEP);
    }

    for (&i, pos) in top.iter().zip(&initial) {
        let p = &cloth.particles()[i];
        assert!(p.pinned, "top particle {} released", i);
        assert_eq!(p.pos, *pos);
    }
    assert_eq!(cloth.stats().torn_springs, 0);
}

#[test]
fn patrolling_sphere_keeps_cloth_outside() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(15, 15)).unwrap();
    cloth.set_mode(SimulationMode::Collision);
    let mut touched = false;

    for frame in 0..600 {
        cloth.update(FIXED_TIMESTEP);
        let sphere = cloth.spheres()[0];
        for (i, p) in cloth.particles().iter().enumerate() {
            if !p.active || p.pinned {
                continue;
            }
            let d = p.pos.distance(sphere.center);
            assert!(d >= sphere.radius - 1e-4, "frame {}: particle {} at depth {}", frame, i, sphere.radius - d);
            if d < sphere.radius + 1e-3 {
                touched = true;
            }
        }
    }
    assert!(touched, "sphere never reached the cloth");
}

#[test]
fn long_frame_keeps_obstacle_in_range() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(10, 10)).unwrap();
    cloth.set_mode(SimulationMode::Collision);
    cloth.update(10.0);
    assert_eq!(cloth.stats().last_substeps, 1);
    let c = cloth.spheres()[0].center;
    assert!(c.z >= -2.0 && c.z <= 6.0, "z = {}", c.z);

    // Without the frame clamp the patrol still stops at the far end.
    let config = ClothConfig::new().with_grid(10, 10).with_max_frame_delta(None);
    let mut unclamped: ClothSystem<f32> = ClothSystem::new(config).unwrap();
    unclamped.set_mode(SimulationMode::Collision);
    unclamped.update(10.0);
    assert_eq!(unclamped.spheres()[0].center, Vec3::new(0.0, 1.0, -2.0));
}

#[test]
fn unpinned_cloth_falls_to_ground() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(2, 2)).unwrap();
    cloth.set_pinned(2, false);
    cloth.set_pinned(3, false);
    let top_start = cloth.particles()[2].pos.y;

    for _ in 0..600 {
        cloth.update(FIXED_TIMESTEP);
        for p in cloth.particles() {
            assert!(p.pos.y >= -5.0, "particle below ground at {}", p.pos.y);
        }
    }

    for i in 0..2 {
        let y = cloth.particles()[i].pos.y;
        assert!((y + 5.0).abs() < 1e-2, "bottom particle {} rests at y = {}", i, y);
    }
    assert!(cloth.particles()[2].pos.y < top_start - 1.0);
}

#[test]
fn clearing_obstacles_empties_scene() {
    let mut cloth: ClothSystem<f32> = ClothSystem::new(ClothConfig::new().with_grid(4, 4)).unwrap();
    cloth.set_mode(SimulationMode::Collision);
    cloth.add_sphere(Vec3::new(1.0, 1.0, 1.0), 0.3);
    assert_eq!(cloth.spheres().len(), 2);
    cloth.clear_collision_objects();
    assert!(cloth.spheres().is_empty());
    cloth.update(FIXED_TIMESTEP);
    assert!(cloth.spheres().is_empty());
}
