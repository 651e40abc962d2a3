use kepler_space::md::{OrbitType, RegistryError, SatelliteRegistry};
use kepler_space::{CentralBody, OrbitDescriptor};
use rstest::*;

#[fixture]
fn registry() -> SatelliteRegistry {
    let mut registry = SatelliteRegistry::new(CentralBody::earth());
    registry
        .add("ISS", OrbitDescriptor::circular(400.0).with_inc_deg(51.6))
        .unwrap();
    registry
        .add(
            "Molniya 1-93",
            OrbitDescriptor::builder()
                .sma_km(26600.0)
                .ecc(0.74)
                .inc_deg(63.4)
                .aop_deg(270.0)
                .build(),
        )
        .unwrap();
    registry
        .add("Intelsat 901", OrbitDescriptor::circular(35786.0))
        .unwrap();
    registry
}

#[rstest]
fn registry_lifecycle(mut registry: SatelliteRegistry) {
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.names(), vec!["ISS", "Intelsat 901", "Molniya 1-93"]);
    assert_eq!(
        registry.get("Molniya 1-93").unwrap().orbit_type,
        OrbitType::Molniya
    );
    assert_eq!(
        registry.get("Intelsat 901").unwrap().orbit_type,
        OrbitType::Geostationary
    );

    // Moving the ISS to a polar orbit reclassifies it
    let sat = registry
        .update("ISS", OrbitDescriptor::circular(400.0).with_inc_deg(90.0))
        .unwrap();
    assert_eq!(sat.orbit_type, OrbitType::Polar);
    assert_eq!(
        registry.update("Hubble", OrbitDescriptor::circular(540.0)),
        Err(RegistryError::UnknownSatellite {
            name: "Hubble".to_string()
        })
    );

    registry.remove("Intelsat 901").unwrap();
    assert!(!registry.exists("Intelsat 901"));
    assert_eq!(registry.iter().count(), 2);
}

#[rstest]
fn refresh_all_in_parallel(mut registry: SatelliteRegistry) {
    registry.refresh_all().unwrap();
    assert!(registry.iter().all(|sat| sat.is_computed()));

    let geo = registry.get("Intelsat 901").unwrap();
    // A geostationary satellite revolves once per sidereal day
    assert!((geo.period_s.unwrap() - 86_164.0).abs() < 30.0);

    let molniya = registry.get("Molniya 1-93").unwrap();
    let molniya_v_peri = molniya.velocity_m_s.unwrap();
    let iss_v = registry.get("ISS").unwrap().velocity_m_s.unwrap();
    assert!(molniya_v_peri > iss_v);

    // An underdetermined orbit is reported, but all others are computed
    registry.add("Unknown", OrbitDescriptor::default()).unwrap();
    registry
        .update("ISS", OrbitDescriptor::circular(410.0))
        .unwrap();
    let err = registry.refresh_all().unwrap_err();
    assert!(matches!(err, RegistryError::SatelliteOrbit { ref name, .. } if name == "Unknown"));
    assert!(registry.get("ISS").unwrap().is_computed());
    assert!(!registry.get("Unknown").unwrap().is_computed());
    assert!(registry.refresh("Unknown").is_err());
    assert!(registry.refresh("Hubble").is_err());
    assert!(registry.refresh("ISS").unwrap().is_computed());
}
