use serde::Serialize;

/// How a unit interacts with the electricity grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElectricRole {
    /// Co-generates electricity, up to the given capacity (MW, positive).
    Producer(f64),
    /// Draws electricity, up to the given magnitude (MW, positive), e.g. a heat pump.
    Consumer(f64),
    /// No electrical interaction.
    None,
}

/// A dispatchable heat source.
///
/// Optional factors stay `None` when the source leaves them blank. An unknown
/// CO₂ factor is only read as zero inside dispatch arithmetic; it is stored and
/// reloaded as unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionUnit {
    /// Identifier, expected unique within a catalog.
    pub name: String,
    /// Maximum heat output per timestep (MW).
    pub max_heat: f64,
    /// Cost per MWh of heat produced.
    pub production_cost: f64,
    /// Emission factor per MWh of heat (kg CO₂).
    pub co2_emission: Option<f64>,
    /// Gas consumption per MWh of heat (informational).
    pub gas_consumption: Option<f64>,
    /// Oil consumption per MWh of heat (informational).
    pub oil_consumption: Option<f64>,
    /// Signed electrical capacity (MW): positive produces, negative consumes.
    pub max_electricity: Option<f64>,
}

impl ProductionUnit {
    /// Creates a heat-only unit with every optional factor unknown.
    pub fn new(name: impl Into<String>, max_heat: f64, production_cost: f64) -> Self {
        Self {
            name: name.into(),
            max_heat,
            production_cost,
            co2_emission: None,
            gas_consumption: None,
            oil_consumption: None,
            max_electricity: None,
        }
    }

    pub fn with_co2(mut self, co2_emission: f64) -> Self {
        self.co2_emission = Some(co2_emission);
        self
    }

    pub fn with_gas(mut self, gas_consumption: f64) -> Self {
        self.gas_consumption = Some(gas_consumption);
        self
    }

    pub fn with_oil(mut self, oil_consumption: f64) -> Self {
        self.oil_consumption = Some(oil_consumption);
        self
    }

    pub fn with_electricity(mut self, max_electricity: f64) -> Self {
        self.max_electricity = Some(max_electricity);
        self
    }

    /// Emission factor with unknown read as zero, for arithmetic only.
    pub fn co2_or_zero(&self) -> f64 {
        self.co2_emission.unwrap_or(0.0)
    }

    pub fn electric_role(&self) -> ElectricRole {
        match self.max_electricity {
            Some(e) if e > 0.0 => ElectricRole::Producer(e),
            Some(e) if e < 0.0 => ElectricRole::Consumer(e.abs()),
            _ => ElectricRole::None,
        }
    }

    /// True when the unit co-generates electricity.
    pub fn produces_electricity(&self) -> bool {
        matches!(self.electric_role(), ElectricRole::Producer(_))
    }
}
