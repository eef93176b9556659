//! Earth-Moon orbit with a path preview
//!
//! Puts the Moon on a circular orbit around a stationary Earth, previews the
//! path of a probe thrown from low orbit, then steps the live system and
//! reports how well the orbit holds.
//!
//! Run with: cargo run --package orbital --example earth_moon

use nalgebra::{Point2, Vector2};
use orbital::forces::{G, circular_orbit_velocity};
use orbital::{ChangeKind, Engine, Preset};

fn main() {
    println!("Orbital Sandbox: Earth and Moon\n");
    println!("{}", "=".repeat(60));

    let mut engine = Engine::new();

    let earth = Preset::Earth
        .body(Point2::origin(), Vector2::zeros())
        .expect("earth preset")
        .stationary();
    engine.add_body(earth).expect("add earth");

    let moon_distance = 3.844e8; // m
    let mut moon = Preset::Moon
        .body(Point2::new(moon_distance, 0.0), Vector2::zeros())
        .expect("moon preset");
    moon.velocity = circular_orbit_velocity(&moon, &earth, G);
    let moon_id = engine.add_body(moon).expect("add moon");

    println!("\nInitial conditions:");
    println!("  Earth: M = {:.4e} kg, R = {:.0} m", earth.mass, earth.radius);
    println!("  Moon:  M = {:.4e} kg, d = {:.4e} m", moon.mass, moon_distance);
    println!("  Circular velocity: {:.1} m/s", moon.velocity.magnitude());

    // Preview a probe thrown prograde from 400 km
    let mut probe = Preset::Iss
        .body(Point2::new(0.0, earth.radius + 400_000.0), Vector2::zeros())
        .expect("probe preset");
    probe.velocity = circular_orbit_velocity(&probe, &earth, G) * 1.2;

    let path = engine.predict_path(&probe, 20, 5.0e8);
    println!("\nPredicted probe path ({} samples):", path.len());
    for (i, point) in path.iter().enumerate().step_by(4) {
        let altitude = point.coords.magnitude() - earth.radius;
        println!(
            "  sample {:2}: ({:+.3e}, {:+.3e}) m, altitude {:.1} km",
            i,
            point.x,
            point.y,
            altitude / 1_000.0
        );
    }

    let initial_energy = engine.store().kinetic_energy() + engine.potential_energy();

    // One lunar day in ticks of ten minutes
    let ticks = 27 * 24 * 6;
    let mut updates = 0;
    for _ in 0..ticks {
        if engine.update(600.0).expect("tick") == ChangeKind::BodiesUpdated {
            updates += 1;
        }
    }

    let moon = engine.body(moon_id).expect("moon survives");
    let final_energy = engine.store().kinetic_energy() + engine.potential_energy();
    let drift = (moon.position.coords.magnitude() - moon_distance) / moon_distance;

    println!("\n{}", "=".repeat(60));
    println!("After {} ticks ({} with motion):", ticks, updates);
    println!(
        "  Moon position: ({:+.4e}, {:+.4e}) m",
        moon.position.x, moon.position.y
    );
    println!("  Radial drift: {:.4}%", drift * 100.0);
    println!(
        "  Energy change: {:.3e}",
        (final_energy - initial_energy) / initial_energy.abs()
    );
    println!("\nDemo complete!");
}
