use nalgebra::{Point2, Vector2};

use crate::error::PresetError;
use crate::presets::Preset;

#[test]
fn test_every_preset_builds() {
    for preset in Preset::ALL {
        let body = preset
            .body(Point2::new(1.0, 2.0), Vector2::new(3.0, 4.0))
            .unwrap_or_else(|err| panic!("{preset} failed to build: {err}"));

        assert_eq!(body.mass, preset.constants().mass);
        assert_eq!(body.radius, preset.constants().radius);
        assert_eq!(body.atmosphere, preset.constants().atmosphere);
        assert_eq!(body.position, Point2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vector2::new(3.0, 4.0));
    }
}

#[test]
fn test_names_parse_back() {
    for preset in Preset::ALL {
        assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
    }
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!("ISS".parse::<Preset>().unwrap(), Preset::Iss);
    assert_eq!(" Venus ".parse::<Preset>().unwrap(), Preset::Venus);
}

#[test]
fn test_unknown_preset() {
    let err = "Pluto".parse::<Preset>().unwrap_err();
    assert_eq!(err, PresetError::Unknown("Pluto".to_string()));
    assert_eq!(err.to_string(), "unknown preset `Pluto`");
}

#[test]
fn test_atmospheres() {
    let with_air: Vec<Preset> = Preset::ALL
        .into_iter()
        .filter(|p| p.constants().atmosphere.is_some())
        .collect();
    assert_eq!(with_air, vec![Preset::Earth, Preset::Mars, Preset::Venus]);

    let earth = Preset::Earth.constants();
    let atmosphere = earth.atmosphere.unwrap();
    assert_eq!(atmosphere.sea_level_density, 1.225);
    assert_eq!(atmosphere.top_altitude - earth.radius, 100_000.0);
}

#[test]
fn test_invalid_state_is_rejected() {
    assert!(Preset::Moon.body(Point2::new(f64::NAN, 0.0), Vector2::zeros()).is_err());
}
