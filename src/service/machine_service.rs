use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::machine_dto::{CategoryOption, ProductivityQuery, ProductivityResponse};
use crate::model::machine::{CategoryFilter, Machine, MachineCategory};
use crate::repository::machine_repo::MachineCatalog;
use crate::util::error::ServiceError;
use crate::util::validation::collect_violations;

const PRODUCTIVITY_FIELD_ORDER: [&str; 2] = ["hoursPerDay", "daysPerMonth"];

#[async_trait]
pub trait MachineService: Send + Sync {
	async fn list_machines(&self, filter: CategoryFilter) -> Result<Vec<Machine>, ServiceError>;
	async fn get_machine(&self, id: &str) -> Result<Machine, ServiceError>;
	/// Filter bar options, `all` first
	fn categories(&self) -> Vec<CategoryOption>;
	async fn estimate_productivity(
		&self,
		id: &str,
		query: ProductivityQuery,
	) -> Result<ProductivityResponse, ServiceError>;
}

pub struct MachineServiceImpl {
	pub catalog: Arc<dyn MachineCatalog>,
}

impl MachineServiceImpl {
	pub fn new(catalog: Arc<dyn MachineCatalog>) -> Self {
		MachineServiceImpl { catalog }
	}
}

#[async_trait]
impl MachineService for MachineServiceImpl {
	async fn list_machines(&self, filter: CategoryFilter) -> Result<Vec<Machine>, ServiceError> {
		let machines = self.catalog.filter(filter);
		debug!("Catalog filter {:?} matched {} machines", filter, machines.len());
		Ok(machines)
	}

	async fn get_machine(&self, id: &str) -> Result<Machine, ServiceError> {
		self.catalog
			.find_by_id(id)
			.ok_or_else(|| ServiceError::NotFound(format!("Machine not found: {}", id)))
	}

	fn categories(&self) -> Vec<CategoryOption> {
		let mut options = vec![CategoryOption {
			id: "all".to_string(),
			label: "Todas".to_string(),
		}];
		options.extend(MachineCategory::ALL.iter().map(|c| CategoryOption {
			id: c.as_str().to_string(),
			label: c.label().to_string(),
		}));
		options
	}

	#[instrument(skip(self, query), fields(hours = query.hours_per_day, days = query.days_per_month))]
	async fn estimate_productivity(
		&self,
		id: &str,
		query: ProductivityQuery,
	) -> Result<ProductivityResponse, ServiceError> {
		if let Err(errors) = query.validate() {
			return Err(ServiceError::Validation(collect_violations(&errors, &PRODUCTIVITY_FIELD_ORDER)));
		}
		let machine = self.get_machine(id).await?;
		let estimate = ProductivityResponse::estimate(&machine, query.hours_per_day, query.days_per_month);
		info!("Productivity estimate for {}: {} per month", machine.id, estimate.monthly_production_label);
		Ok(estimate)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::repository::machine_repo::StaticMachineCatalog;

	fn service() -> MachineServiceImpl {
		MachineServiceImpl::new(Arc::new(StaticMachineCatalog::embedded().unwrap()))
	}

	#[tokio::test]
	async fn test_filter_by_category() {
		let service = service();
		let compact = service
			.list_machines(CategoryFilter::Only(MachineCategory::Compact))
			.await
			.unwrap();
		assert_eq!(compact.len(), 1);
		assert_eq!(compact[0].id, "mini-pouch");
		assert_eq!(service.list_machines(CategoryFilter::All).await.unwrap().len(), 5);
	}

	#[tokio::test]
	async fn test_get_unknown_machine() {
		let result = service().get_machine("nope").await;
		assert!(matches!(result, Err(ServiceError::NotFound(_))));
	}

	#[test]
	fn test_categories() {
		let ids: Vec<String> = service().categories().into_iter().map(|c| c.id).collect();
		assert_eq!(ids, vec!["all", "premium", "industrial", "compact", "specialized"]);
	}

	#[tokio::test]
	async fn test_productivity_defaults() {
		let estimate = service()
			.estimate_productivity("speed-line", ProductivityQuery::default())
			.await
			.unwrap();
		assert_eq!(estimate.daily_production, 43_200.0);
		assert_eq!(estimate.monthly_production, 950_400.0);
		assert_eq!(estimate.monthly_production_label, "950.400");
	}

	#[tokio::test]
	async fn test_productivity_bounds() {
		let query = ProductivityQuery {
			hours_per_day: 25,
			days_per_month: 0,
		};
		match service().estimate_productivity("speed-line", query).await {
			Err(ServiceError::Validation(violations)) => {
				let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
				assert_eq!(fields, vec!["hoursPerDay", "daysPerMonth"]);
			}
			other => panic!("expected validation error, got {:?}", other),
		}
	}
}
