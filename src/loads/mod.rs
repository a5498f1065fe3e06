//! Pressure distributions applied to elements by height

mod pressure;

pub use pressure::{
    EarthPressure, HydrostaticPressure, PressureProvider, UniformPressure,
    WaterTable,
};
