use crate::core::body::BodyDef;

/// Scene units per astronomical unit.
pub const DISTANCE_SCALE: f64 = 8.0;
/// Earth's radius in scene units; other radii are multiples of it.
pub const EARTH_RADIUS_UNITS: f64 = 0.85;
pub const SUN_RADIUS: f64 = 6.0;
pub const SUN_NAME: &str = "Sun";

struct PlanetRow {
    name: &'static str,
    color: u32,
    /// In Earth radii.
    radius: f64,
    distance_au: f64,
    orbital_period_days: f64,
    rotation_hours: f64,
    tilt_degrees: f64,
}

const PLANETS: [PlanetRow; 8] = [
    PlanetRow { name: "Mercury", color: 0xb1b1b1, radius: 0.38, distance_au: 0.39, orbital_period_days: 88.0, rotation_hours: 1407.6, tilt_degrees: 0.01 },
    PlanetRow { name: "Venus", color: 0xd4c29c, radius: 0.95, distance_au: 0.72, orbital_period_days: 225.0, rotation_hours: -5832.5, tilt_degrees: 177.3 },
    PlanetRow { name: "Earth", color: 0x2b6cff, radius: 1.00, distance_au: 1.00, orbital_period_days: 365.0, rotation_hours: 24.0, tilt_degrees: 23.5 },
    PlanetRow { name: "Mars", color: 0xcb4b3a, radius: 0.53, distance_au: 1.52, orbital_period_days: 687.0, rotation_hours: 24.6, tilt_degrees: 25.2 },
    PlanetRow { name: "Jupiter", color: 0xd2b48c, radius: 11.21, distance_au: 5.20, orbital_period_days: 4333.0, rotation_hours: 9.9, tilt_degrees: 3.1 },
    PlanetRow { name: "Saturn", color: 0xe8d8a8, radius: 9.45, distance_au: 9.58, orbital_period_days: 10759.0, rotation_hours: 10.7, tilt_degrees: 26.7 },
    PlanetRow { name: "Uranus", color: 0xa6d1e6, radius: 4.01, distance_au: 19.2, orbital_period_days: 30687.0, rotation_hours: -17.2, tilt_degrees: 97.8 },
    PlanetRow { name: "Neptune", color: 0x5b88ff, radius: 3.88, distance_au: 30.05, orbital_period_days: 60190.0, rotation_hours: 16.1, tilt_degrees: 28.3 },
];

/// The Sun, the eight planets, the Moon and Saturn's ring, in pre-order.
pub fn solar_system() -> Vec<BodyDef> {
    let mut roster = Vec::with_capacity(PLANETS.len() + 2);
    roster.push(BodyDef::star(SUN_NAME, SUN_RADIUS).with_color(0xffdd66));

    for row in &PLANETS {
        let mut planet = BodyDef::planet(row.name, SUN_NAME, row.radius * EARTH_RADIUS_UNITS)
            .with_orbit(row.distance_au * DISTANCE_SCALE, row.orbital_period_days)
            .with_rotation(row.rotation_hours)
            .with_tilt(row.tilt_degrees)
            .with_color(row.color);
        if row.name == "Saturn" {
            planet = planet.with_ring(1.2, 2.2, 0xe6dec9);
        }
        roster.push(planet);

        if row.name == "Earth" {
            roster.push(
                BodyDef::moon("Moon", "Earth", 0.27 * EARTH_RADIUS_UNITS)
                    .with_orbit(2.5, 27.3)
                    .with_rotation(655.7)
                    .with_tilt(6.7)
                    .with_color(0xcfd6e6),
            );
        }
    }
    roster
}
