use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::model::machine::Machine;
use crate::util::locale::format_number_pt_br;

fn default_hours_per_day() -> u32 {
    8
}

fn default_days_per_month() -> u32 {
    22
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityQuery {
    #[serde(default = "default_hours_per_day")]
    #[validate(range(min = 1, max = 24, message = "Horas por dia devem estar entre 1 e 24"))]
    pub hours_per_day: u32,

    #[serde(default = "default_days_per_month")]
    #[validate(range(min = 1, max = 31, message = "Dias por mês devem estar entre 1 e 31"))]
    pub days_per_month: u32,
}

impl Default for ProductivityQuery {
    fn default() -> Self {
        ProductivityQuery {
            hours_per_day: default_hours_per_day(),
            days_per_month: default_days_per_month(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityResponse {
    pub machine_id: String,
    pub machine_title: String,
    pub capacity: f64,
    pub capacity_unit: String,
    pub hours_per_day: u32,
    pub days_per_month: u32,
    pub daily_production: f64,
    pub monthly_production: f64,
    pub monthly_production_label: String,
}

impl ProductivityResponse {
    pub fn estimate(machine: &Machine, hours_per_day: u32, days_per_month: u32) -> Self {
        let monthly = machine.monthly_production(hours_per_day, days_per_month);
        ProductivityResponse {
            machine_id: machine.id.clone(),
            machine_title: machine.title.clone(),
            capacity: machine.capacity,
            capacity_unit: machine.capacity_unit.clone(),
            hours_per_day,
            days_per_month,
            daily_production: machine.daily_production(hours_per_day),
            monthly_production: monthly,
            monthly_production_label: format_number_pt_br(monthly),
        }
    }
}

/// Entry of the catalog filter bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: String,
    pub label: String,
}
