//! Merging collisions with debris
//!
//! Fires a ring of rocks at a central body with debris enabled and prints the
//! collision events as the engine reports them.
//!
//! Run with: cargo run --package orbital --example collision_demo

use nalgebra::{Point2, Vector2};
use orbital::{Body, ChangeKind, DebrisConfig, Engine, EngineConfig, EngineEvent};

fn main() {
    println!("Orbital Sandbox: Impacts and Debris\n");
    println!("{}", "=".repeat(60));

    let config = EngineConfig {
        seed: 2024,
        debris: DebrisConfig {
            enabled: true,
            fragment_mass: 1_000.0,
            fragment_radius: 2.0,
            ..DebrisConfig::default()
        },
        ..EngineConfig::default()
    };
    let mut engine = Engine::with_config(config).expect("valid configuration");

    engine.subscribe(|event: &EngineEvent| match event {
        EngineEvent::Collision { bodies } => {
            let ids: Vec<u32> = bodies.iter().map(|b| b.id.0).collect();
            println!("  collision between {:?}", ids);
        }
        EngineEvent::BodyRemoved(body) => println!("    absorbed body {}", body.id.0),
        EngineEvent::BodyAdded(body) if body.is_immune() && body.mass <= 1_000.0 => {}
        EngineEvent::BodyAdded(body) => println!(
            "    new body {}: mass={:.3e} kg, radius={:.1} m",
            body.id.0, body.mass, body.radius
        ),
    });

    let target = Body::new(1.0e12, 200.0, Point2::origin(), Vector2::zeros())
        .expect("target body")
        .stationary();
    engine.add_body(target).expect("add target");

    let rocks = 8;
    for i in 0..rocks {
        let angle = i as f64 * std::f64::consts::TAU / rocks as f64;
        let direction = Vector2::new(angle.cos(), angle.sin());
        let speed = 10.0 + 5.0 * i as f64;
        let rock = Body::new(
            5.0e8,
            20.0,
            Point2::from(direction * 2_000.0),
            -direction * speed,
        )
        .expect("rock body");
        engine.add_body(rock).expect("add rock");
    }

    println!("\nInitial body count: {}", engine.body_count());
    println!("Initial total mass: {:.4e} kg\n", engine.store().total_mass());

    let mut tick = 0;
    while engine.body_count() > 1 && tick < 2_000 {
        if engine.update(1.0).expect("tick") == ChangeKind::BodiesAdded {
            println!("t={:4}: {} bodies", tick, engine.body_count());
        }
        tick += 1;
    }

    let fragments = engine.bodies().iter().filter(|b| b.mass <= 1_000.0).count();

    println!("\n{}", "=".repeat(60));
    println!("Final statistics after {} ticks:", tick);
    println!("  Bodies: {} ({} fragments)", engine.body_count(), fragments);
    println!("  Total mass: {:.4e} kg", engine.store().total_mass());
    println!("\nDemo complete!");
}
