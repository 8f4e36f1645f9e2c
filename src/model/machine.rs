use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of catalog categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineCategory {
    Premium,
    Industrial,
    Compact,
    Specialized,
}

impl MachineCategory {
    pub const ALL: [MachineCategory; 4] = [
        MachineCategory::Premium,
        MachineCategory::Industrial,
        MachineCategory::Compact,
        MachineCategory::Specialized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MachineCategory::Premium => "premium",
            MachineCategory::Industrial => "industrial",
            MachineCategory::Compact => "compact",
            MachineCategory::Specialized => "specialized",
        }
    }

    /// Label shown on the catalog filter bar
    pub fn label(&self) -> &'static str {
        match self {
            MachineCategory::Premium => "Premium",
            MachineCategory::Industrial => "Industrial",
            MachineCategory::Compact => "Compacta",
            MachineCategory::Specialized => "Especializada",
        }
    }
}

impl fmt::Display for MachineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MachineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" => Ok(MachineCategory::Premium),
            "industrial" => Ok(MachineCategory::Industrial),
            "compact" => Ok(MachineCategory::Compact),
            "specialized" => Ok(MachineCategory::Specialized),
            other => Err(format!("Unknown machine category: {}", other)),
        }
    }
}

/// Catalog filter: either every machine or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(MachineCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: MachineCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        MachineCategory::from_str(s).map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpec {
    pub property: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingSpec {
    pub property: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Full catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub capacity: f64,
    pub capacity_unit: String,
    /// Installed power in kW
    pub power_consumption: f64,
    pub footprint: String,
    pub category: MachineCategory,
    pub highlights: Vec<String>,
    pub applications: Vec<String>,
    pub technical_specs: Vec<TechnicalSpec>,
    pub packaging_specs: Vec<PackagingSpec>,
}

impl Machine {
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot::from(self)
    }

    pub fn daily_production(&self, hours_per_day: u32) -> f64 {
        self.capacity * f64::from(hours_per_day)
    }

    pub fn monthly_production(&self, hours_per_day: u32, days_per_month: u32) -> f64 {
        self.daily_production(hours_per_day) * f64::from(days_per_month)
    }
}

/// The subset of a catalog entry attached to a quote request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSnapshot {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub capacity: f64,
    pub capacity_unit: String,
    pub power_consumption: f64,
    pub footprint: String,
    pub category: MachineCategory,
}

impl From<&Machine> for MachineSnapshot {
    fn from(machine: &Machine) -> Self {
        MachineSnapshot {
            id: machine.id.clone(),
            title: machine.title.clone(),
            subtitle: machine.subtitle.clone(),
            capacity: machine.capacity,
            capacity_unit: machine.capacity_unit.clone(),
            power_consumption: machine.power_consumption,
            footprint: machine.footprint.clone(),
            category: machine.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Machine {
        Machine {
            id: "speed-line".to_string(),
            title: "Linha Speed".to_string(),
            subtitle: "Stand-Up Pouch Industrial Premium".to_string(),
            description: String::new(),
            capacity: 5400.0,
            capacity_unit: "un/h".to_string(),
            power_consumption: 8.97,
            footprint: "5.3 x 3.3m".to_string(),
            category: MachineCategory::Premium,
            highlights: vec![],
            applications: vec![],
            technical_specs: vec![],
            packaging_specs: vec![],
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("compact".parse::<MachineCategory>(), Ok(MachineCategory::Compact));
        assert_eq!(" Premium ".parse::<MachineCategory>(), Ok(MachineCategory::Premium));
        assert!("deluxe".parse::<MachineCategory>().is_err());
    }

    #[test]
    fn test_category_filter() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        let filter: CategoryFilter = "industrial".parse().unwrap();
        assert!(filter.matches(MachineCategory::Industrial));
        assert!(!filter.matches(MachineCategory::Compact));
        assert!(CategoryFilter::All.matches(MachineCategory::Specialized));
    }

    #[test]
    fn test_category_serde_is_lowercase() {
        let json = serde_json::to_string(&MachineCategory::Specialized).unwrap();
        assert_eq!(json, "\"specialized\"");
    }

    #[test]
    fn test_monthly_production() {
        let machine = sample();
        assert_eq!(machine.daily_production(8), 43_200.0);
        assert_eq!(machine.monthly_production(8, 22), 950_400.0);
    }

    #[test]
    fn test_snapshot_copies_fields() {
        let machine = sample();
        let snapshot = machine.snapshot();
        assert_eq!(snapshot.id, machine.id);
        assert_eq!(snapshot.title, machine.title);
        assert_eq!(snapshot.capacity, machine.capacity);
        assert_eq!(snapshot.category, MachineCategory::Premium);
    }
}
