//! Soft shadows example.
//!
//! Renders two spheres and a triangle over a mirror floor, lit by a spot,
//! a point and a directional light, and saves a PNG.

use anyhow::Context;
use glam::DVec3;
use glint_renderer::{
    render, AmbientLight, Camera, Color, Dir3, DirectionalLight, Material, Plane, PointLight,
    RenderSettings, Scene, Sphere, SpotLight, Threads, Triangle,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = std::time::Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::builder()
        .location(DVec3::new(0.0, 40.0, 115.0))
        .look_at(DVec3::new(0.0, 25.0, 0.0), Dir3::new(DVec3::Y))
        .vp_size(150.0, 150.0)
        .vp_distance(130.0)
        .resolution(600, 600)
        .build()?;

    let settings = RenderSettings {
        samples_per_axis: 4,
        adaptive: true,
        threads: Threads::Auto,
        ..RenderSettings::default()
    };

    println!("Rendering {}x{}...", camera.nx(), camera.ny());
    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &settings);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "soft_shadows.png";
    image.save_png(filename).context("failed to save image")?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new("soft shadows")
        .with_background(Color::new(25.0, 25.0, 40.0))
        .with_ambient(AmbientLight::new(Color::new(255.0, 255.0, 255.0), 0.1));

    let glossy = Material::new()
        .with_kd(0.4)
        .with_ks(0.6)
        .with_shininess(100);

    scene.add_geometry(Box::new(
        Sphere::new(DVec3::new(-17.0, 20.0, 0.0), 20.0)?
            .with_emission(Color::new(0.0, 40.0, 90.0))
            .with_material(glossy.with_kt(0.3)),
    ));
    scene.add_geometry(Box::new(
        Sphere::new(DVec3::new(17.0, 8.0, 30.0), 8.0)?
            .with_emission(Color::new(90.0, 20.0, 20.0))
            .with_material(glossy),
    ));
    scene.add_geometry(Box::new(
        Triangle::new(
            DVec3::new(40.0, 0.0, -20.0),
            DVec3::new(70.0, 0.0, 10.0),
            DVec3::new(50.0, 45.0, -5.0),
        )?
        .with_emission(Color::new(20.0, 60.0, 20.0))
        .with_material(Material::new().with_kd(0.6).with_ks(0.2).with_shininess(30)),
    ));
    // Mirror floor
    scene.add_geometry(Box::new(
        Plane::new(DVec3::ZERO, DVec3::Y)?.with_material(
            Material::new()
                .with_kd(0.2)
                .with_ks(0.2)
                .with_shininess(20)
                .with_kr(0.5),
        ),
    ));

    scene.add_light(Box::new(
        SpotLight::new(
            Color::new(500.0, 450.0, 450.0),
            DVec3::new(-40.0, 70.0, 40.0),
            Dir3::new(DVec3::new(1.0, -1.5, -1.0)),
        )
        .with_kl(0.0005)
        .with_kq(0.00005)
        .with_size(4.0),
    ));
    scene.add_light(Box::new(
        PointLight::new(Color::new(250.0, 250.0, 300.0), DVec3::new(60.0, 60.0, 60.0))
            .with_kl(0.001)
            .with_kq(0.0001)
            .with_size(3.0),
    ));
    scene.add_light(Box::new(DirectionalLight::new(
        Color::new(40.0, 40.0, 40.0),
        Dir3::new(DVec3::new(0.0, -1.0, -0.5)),
    )));

    println!(
        "Created {} shapes, {} lights",
        scene.geometries.len(),
        scene.lights.len()
    );
    Ok(scene)
}
