//! Configured totals of a fleet and side-by-side scenario comparison.

use std::fmt;

use serde::Serialize;

use super::unit::ProductionUnit;

/// Totals over a unit list, as configured (not as dispatched).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogSummary {
    /// Total heat capacity (MW).
    pub total_max_heat: f64,
    /// Sum of per-MWh production costs.
    pub total_cost: f64,
    /// Sum of per-MWh CO₂ factors, unknown read as zero.
    pub total_co2: f64,
    pub total_gas: f64,
    pub total_oil: f64,
    /// Sum of positive electrical capacities (MW).
    pub total_electricity_capacity: f64,
}

impl CatalogSummary {
    pub fn from_units(units: &[ProductionUnit]) -> Self {
        units.iter().fold(Self::default(), |mut acc, u| {
            acc.total_max_heat += u.max_heat;
            acc.total_cost += u.production_cost;
            acc.total_co2 += u.co2_or_zero();
            acc.total_gas += u.gas_consumption.unwrap_or(0.0);
            acc.total_oil += u.oil_consumption.unwrap_or(0.0);
            acc.total_electricity_capacity += u.max_electricity.unwrap_or(0.0).max(0.0);
            acc
        })
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heat capacity:         {:.2} MW", self.total_max_heat)?;
        writeln!(f, "Production cost:       {:.0} DKK/MWh", self.total_cost)?;
        writeln!(f, "CO2 emission:          {:.0} kg/MWh", self.total_co2)?;
        writeln!(f, "Gas consumption:       {:.2} MWh", self.total_gas)?;
        writeln!(f, "Oil consumption:       {:.2} MWh", self.total_oil)?;
        write!(f, "Electricity capacity:  {:.2} MW", self.total_electricity_capacity)
    }
}

/// Outcome of comparing two fleets on cost and CO₂.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The first fleet is strictly lower in both cost and CO₂.
    FirstBetter,
    /// The second fleet is strictly lower in both cost and CO₂.
    SecondBetter,
    Mixed,
}

/// Two named summaries and the verdict between them.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub first: (String, CatalogSummary),
    pub second: (String, CatalogSummary),
    pub verdict: Verdict,
}

pub fn compare(
    first_name: &str,
    first: &CatalogSummary,
    second_name: &str,
    second: &CatalogSummary,
) -> Comparison {
    let verdict = if second.total_cost < first.total_cost && second.total_co2 < first.total_co2 {
        Verdict::SecondBetter
    } else if first.total_cost < second.total_cost && first.total_co2 < second.total_co2 {
        Verdict::FirstBetter
    } else {
        Verdict::Mixed
    };

    Comparison {
        first: (first_name.to_string(), first.clone()),
        second: (second_name.to_string(), second.clone()),
        verdict,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, s) in [&self.first, &self.second] {
            writeln!(f, "{name}: Cost = {:.1} DKK, CO2 = {:.1} kg", s.total_cost, s.total_co2)?;
        }
        match self.verdict {
            Verdict::FirstBetter => write!(f, "-> {} is more efficient overall", self.first.0),
            Verdict::SecondBetter => write!(f, "-> {} is more efficient overall", self.second.0),
            Verdict::Mixed => write!(f, "-> comparison mixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_treat_unknown_as_zero() {
        let units = vec![
            ProductionUnit::new("GB1", 4.0, 520.0).with_co2(175.0).with_gas(0.9),
            ProductionUnit::new("HP1", 6.0, 60.0).with_electricity(-6.0),
            ProductionUnit::new("GM1", 3.5, 990.0)
                .with_co2(650.0)
                .with_oil(1.8)
                .with_electricity(2.6),
        ];
        let s = CatalogSummary::from_units(&units);
        assert_eq!(s.total_max_heat, 13.5);
        assert_eq!(s.total_cost, 1570.0);
        assert_eq!(s.total_co2, 825.0);
        assert_eq!(s.total_gas, 0.9);
        assert_eq!(s.total_oil, 1.8);
        assert_eq!(s.total_electricity_capacity, 2.6);
    }

    #[test]
    fn empty_fleet_sums_to_zero() {
        assert_eq!(CatalogSummary::from_units(&[]), CatalogSummary::default());
    }

    #[test]
    fn verdict_requires_both_metrics() {
        let cheap_clean = CatalogSummary {
            total_cost: 100.0,
            total_co2: 10.0,
            ..CatalogSummary::default()
        };
        let cheap_dirty = CatalogSummary {
            total_cost: 100.0,
            total_co2: 500.0,
            ..CatalogSummary::default()
        };
        let costly_dirty = CatalogSummary {
            total_cost: 900.0,
            total_co2: 500.0,
            ..CatalogSummary::default()
        };

        assert_eq!(compare("a", &costly_dirty, "b", &cheap_clean).verdict, Verdict::SecondBetter);
        assert_eq!(compare("a", &cheap_clean, "b", &costly_dirty).verdict, Verdict::FirstBetter);
        assert_eq!(compare("a", &cheap_dirty, "b", &costly_dirty).verdict, Verdict::Mixed);
    }

    #[test]
    fn comparison_display_names_winner() {
        let a = CatalogSummary {
            total_cost: 900.0,
            total_co2: 500.0,
            ..CatalogSummary::default()
        };
        let b = CatalogSummary {
            total_cost: 100.0,
            total_co2: 10.0,
            ..CatalogSummary::default()
        };
        let text = compare("Scenario1", &a, "Scenario2", &b).to_string();
        assert!(text.contains("Scenario2 is more efficient overall"));
    }
}
