//! Height-dependent surface pressures

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Pressure magnitude as a function of the global Z coordinate
pub trait PressureProvider {
    /// Pressure at height `z`; zero means no load
    fn pressure(&self, z: f64) -> f64;

    /// Direction the pressure acts in, global axes
    fn direction(&self) -> Vector3<f64>;

    /// Load vector at height `z`, `None` where the pressure is exactly zero
    fn load_at(&self, z: f64) -> Option<Vector3<f64>> {
        let value = self.pressure(z);
        (value != 0.0).then(|| self.direction() * value)
    }
}

/// Water table acting on an [`EarthPressure`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WaterTable {
    pub z: f64,
    /// Water unit weight
    pub gamma: f64,
}

/// Lateral earth pressure with an optional water table
///
/// Above the ground level the pressure is zero. Between ground and water
/// table it grows with the soil weight; below the water table the soil
/// acts with its submerged weight and the full water pressure is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarthPressure {
    /// Earth pressure coefficient (K0, Ka or Kp)
    pub k: f64,
    /// Ground level
    pub z_ground: f64,
    /// Soil unit weight
    pub gamma_soil: f64,
    #[serde(default)]
    pub water_table: Option<WaterTable>,
    pub direction: Vector3<f64>,
}

impl EarthPressure {
    /// Create a dry soil pressure
    pub fn dry(k: f64, z_ground: f64, gamma_soil: f64, direction: Vector3<f64>) -> Self {
        Self {
            k,
            z_ground,
            gamma_soil,
            water_table: None,
            direction,
        }
    }

    /// Set the water table
    pub fn with_water_table(mut self, z: f64, gamma: f64) -> Self {
        self.water_table = Some(WaterTable { z, gamma });
        self
    }
}

impl PressureProvider for EarthPressure {
    fn pressure(&self, z: f64) -> f64 {
        if z >= self.z_ground {
            return 0.0;
        }
        let water = match self.water_table {
            Some(water) if z < water.z => water,
            _ => return self.k * self.gamma_soil * (self.z_ground - z),
        };
        // Water table may lie above the ground (submerged fill)
        let z_top = water.z.min(self.z_ground);
        let dry = self.gamma_soil * (self.z_ground - z_top);
        let submerged = (self.gamma_soil - water.gamma) * (z_top - z);
        self.k * (dry + submerged) + water.gamma * (water.z - z)
    }

    fn direction(&self) -> Vector3<f64> {
        self.direction
    }
}

/// Fluid pressure below a free surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrostaticPressure {
    pub z_free_surface: f64,
    /// Fluid unit weight
    pub gamma: f64,
    pub direction: Vector3<f64>,
}

impl HydrostaticPressure {
    pub fn new(z_free_surface: f64, gamma: f64, direction: Vector3<f64>) -> Self {
        Self {
            z_free_surface,
            gamma,
            direction,
        }
    }
}

impl PressureProvider for HydrostaticPressure {
    fn pressure(&self, z: f64) -> f64 {
        if z >= self.z_free_surface {
            0.0
        } else {
            self.gamma * (self.z_free_surface - z)
        }
    }

    fn direction(&self) -> Vector3<f64> {
        self.direction
    }
}

/// Constant pressure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformPressure {
    pub value: f64,
    pub direction: Vector3<f64>,
}

impl UniformPressure {
    pub fn new(value: f64, direction: Vector3<f64>) -> Self {
        Self { value, direction }
    }
}

impl PressureProvider for UniformPressure {
    fn pressure(&self, _z: f64) -> f64 {
        self.value
    }

    fn direction(&self) -> Vector3<f64> {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_pressure_dry() {
        let p = EarthPressure::dry(0.5, 3.0, 20.0, Vector3::x());
        assert_eq!(p.pressure(3.0), 0.0);
        assert_eq!(p.pressure(4.0), 0.0);
        assert_relative_eq!(p.pressure(1.0), 0.5 * 20.0 * 2.0);
    }

    #[test]
    fn test_earth_pressure_below_water_table() {
        let p = EarthPressure::dry(0.5, 3.0, 20.0, Vector3::x()).with_water_table(1.0, 10.0);
        // At the water table only soil acts
        assert_relative_eq!(p.pressure(1.0), 20.0);
        // One metre below: submerged soil plus water
        let expected = 0.5 * (20.0 * 2.0 + 10.0 * 1.0) + 10.0 * 1.0;
        assert_relative_eq!(p.pressure(0.0), expected);
    }

    #[test]
    fn test_hydrostatic() {
        let p = HydrostaticPressure::new(2.0, 9.81, -Vector3::y());
        assert_eq!(p.pressure(2.5), 0.0);
        assert_relative_eq!(p.pressure(0.0), 19.62);
        assert_relative_eq!(p.load_at(0.0).unwrap(), Vector3::new(0.0, -19.62, 0.0));
        assert!(p.load_at(2.0).is_none());
    }

    #[test]
    fn test_uniform() {
        let p = UniformPressure::new(5.0, Vector3::z());
        assert_relative_eq!(p.load_at(-100.0).unwrap(), Vector3::new(0.0, 0.0, 5.0));
        assert!(UniformPressure::new(0.0, Vector3::z()).load_at(0.0).is_none());
    }
}
