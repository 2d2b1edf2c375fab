use serde::{Deserialize, Serialize};
use uom::{
    si::{
        ISQ, Quantity, SI,
        acceleration::meter_per_second_squared,
        area::square_meter,
        electric_current::ampere,
        f64::{Acceleration, Area, ElectricCurrent, Force, Length, Mass, Time},
        force::newton,
        length::meter,
        mass::kilogram,
        time::second,
    },
    typenum::{N1, N2, P1, P3, Z0},
};

use crate::ConfigError;

/// Magnetic force constant (N·m²/A²).
pub type ForceConstant = Quantity<ISQ<P3, P1, N2, N2, Z0, Z0, Z0>, SI<f64>, f64>;

/// Proportional gain: current per unit gap error (A/m).
pub type ProportionalGain = Quantity<ISQ<N1, Z0, Z0, P1, Z0, Z0, Z0>, SI<f64>, f64>;

/// Derivative gain: current per unit velocity (A·s/m).
pub type DerivativeGain = Quantity<ISQ<N1, Z0, P1, P1, Z0, Z0, Z0>, SI<f64>, f64>;

/// Physical and control constants of a levitation rig, in SI units.
///
/// A parameter set is fixed for the lifetime of a simulation. Construct one
/// from [`Default`] and adjust it with the typed setters:
///
/// ```
/// use levitas_maglev::Parameters;
///
/// let parameters = Parameters::default().mass_si(0.08).proportional_gain_si(150.0);
/// assert!((parameters.mass - 0.08).abs() < 1e-12);
/// ```
///
/// Nothing here is validated on construction. Mass and force constant should
/// be strictly positive; [`Parameters::validate`] checks that for callers
/// loading parameters from outside the program.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    /// Gravitational acceleration `g` (m/s²).
    pub gravity: f64,
    /// Mass of the levitated object `m` (kg).
    pub mass: f64,
    /// Magnetic force constant `k` (N·m²/A²).
    pub force_constant: f64,
    /// Target gap `x_ref` (m).
    pub reference_height: f64,
    /// Coil current with zero correction `i0` (A).
    pub nominal_current: f64,
    /// `Kp` (A/m).
    pub proportional_gain: f64,
    /// `Kd` (A·s/m).
    pub derivative_gain: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            mass: 0.05,
            force_constant: 1e-5,
            reference_height: 0.02,
            nominal_current: 1.5,
            proportional_gain: 120.0,
            derivative_gain: 8.0,
        }
    }
}

impl Parameters {
    /// Sets gravitational acceleration from a `uom::Acceleration`.
    #[must_use]
    pub fn gravity(mut self, gravity: Acceleration) -> Self {
        self.gravity = gravity.get::<meter_per_second_squared>();
        self
    }

    /// Sets gravitational acceleration in SI units (m/s²).
    #[must_use]
    pub fn gravity_si(self, gravity: f64) -> Self {
        self.gravity(Acceleration::new::<meter_per_second_squared>(gravity))
    }

    /// Sets mass from a `uom::Mass`.
    #[must_use]
    pub fn mass(mut self, mass: Mass) -> Self {
        self.mass = mass.get::<kilogram>();
        self
    }

    /// Sets mass in SI units (kg).
    #[must_use]
    pub fn mass_si(self, mass: f64) -> Self {
        self.mass(Mass::new::<kilogram>(mass))
    }

    /// Sets the magnetic force constant from a [`ForceConstant`] quantity.
    #[must_use]
    pub fn force_constant(mut self, force_constant: ForceConstant) -> Self {
        self.force_constant = force_constant.value;
        self
    }

    /// Sets the magnetic force constant in SI units (N·m²/A²).
    #[must_use]
    pub fn force_constant_si(self, force_constant: f64) -> Self {
        let amp = ElectricCurrent::new::<ampere>(1.0);
        self.force_constant(
            Force::new::<newton>(force_constant) * Area::new::<square_meter>(1.0) / (amp * amp),
        )
    }

    /// Sets the reference gap from a `uom::Length`.
    #[must_use]
    pub fn reference_height(mut self, reference_height: Length) -> Self {
        self.reference_height = reference_height.get::<meter>();
        self
    }

    /// Sets the reference gap in SI units (m).
    #[must_use]
    pub fn reference_height_si(self, reference_height: f64) -> Self {
        self.reference_height(Length::new::<meter>(reference_height))
    }

    /// Sets the nominal coil current from a `uom::ElectricCurrent`.
    #[must_use]
    pub fn nominal_current(mut self, nominal_current: ElectricCurrent) -> Self {
        self.nominal_current = nominal_current.get::<ampere>();
        self
    }

    /// Sets the nominal coil current in SI units (A).
    #[must_use]
    pub fn nominal_current_si(self, nominal_current: f64) -> Self {
        self.nominal_current(ElectricCurrent::new::<ampere>(nominal_current))
    }

    /// Sets the proportional gain from a [`ProportionalGain`] quantity.
    #[must_use]
    pub fn proportional_gain(mut self, gain: ProportionalGain) -> Self {
        self.proportional_gain = gain.value;
        self
    }

    /// Sets the proportional gain in SI units (A/m).
    #[must_use]
    pub fn proportional_gain_si(self, gain: f64) -> Self {
        self.proportional_gain(ElectricCurrent::new::<ampere>(gain) / Length::new::<meter>(1.0))
    }

    /// Sets the derivative gain from a [`DerivativeGain`] quantity.
    #[must_use]
    pub fn derivative_gain(mut self, gain: DerivativeGain) -> Self {
        self.derivative_gain = gain.value;
        self
    }

    /// Sets the derivative gain in SI units (A·s/m).
    #[must_use]
    pub fn derivative_gain_si(self, gain: f64) -> Self {
        self.derivative_gain(
            ElectricCurrent::new::<ampere>(gain) * Time::new::<second>(1.0)
                / Length::new::<meter>(1.0),
        )
    }

    /// Checks that every constant is finite and that mass and force constant
    /// are strictly positive.
    ///
    /// The physics functions never call this. It exists for parameter sets
    /// that arrive from configuration files.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("gravity", self.gravity),
            ("mass", self.mass),
            ("force_constant", self.force_constant),
            ("reference_height", self.reference_height),
            ("nominal_current", self.nominal_current),
            ("proportional_gain", self.proportional_gain),
            ("derivative_gain", self.derivative_gain),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositive { field: "mass" });
        }
        if self.force_constant <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "force_constant",
            });
        }
        Ok(())
    }
}
