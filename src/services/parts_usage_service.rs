//! Consumo de repuestos
//!
//! Suma las cantidades consumidas por repuesto en los servicios del rango
//! y las reparte por mes calendario según la fecha del servicio.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::models::reports::{MonthlyQuantity, PartUsageSummary};
use crate::models::{PartUsageRecord, ServiceRecord, VehiclePart};
use crate::services::aggregation::sort_descending_by;
use crate::utils::date_range::{DateRange, MonthBucket};

struct PartAccumulator {
    part: VehiclePart,
    total_quantity: i64,
    // BTreeMap: los meses salen en orden cronológico
    by_month: BTreeMap<MonthBucket, i64>,
}

impl PartAccumulator {
    fn new(part: &VehiclePart) -> Self {
        Self {
            part: part.clone(),
            total_quantity: 0,
            by_month: BTreeMap::new(),
        }
    }

    fn add(&mut self, service_date: NaiveDate, quantity: i64) {
        self.total_quantity += quantity;
        *self
            .by_month
            .entry(MonthBucket::containing(service_date))
            .or_insert(0) += quantity;
    }

    fn into_summary(self) -> PartUsageSummary {
        PartUsageSummary {
            part_id: self.part.id,
            part_number: self.part.part_number,
            description: self.part.description,
            total_quantity: self.total_quantity,
            current_stock: self.part.current_stock,
            minimum_stock: self.part.minimum_stock,
            usage_by_month: self
                .by_month
                .into_iter()
                .map(|(month, quantity)| MonthlyQuantity {
                    month: month.label(),
                    quantity,
                })
                .collect(),
        }
    }
}

/// Reporte de consumo por repuesto, de mayor a menor cantidad total.
///
/// Los consumos cuyo servicio no está en `services` o cae fuera de `range`
/// se descartan. Stock actual y mínimo salen del repuesto, no del histórico.
pub fn parts_usage_report(
    services: &[ServiceRecord],
    usages: &[PartUsageRecord],
    range: &DateRange,
) -> Vec<PartUsageSummary> {
    let service_dates: HashMap<i64, NaiveDate> = services
        .iter()
        .filter(|s| range.contains(s.service_date))
        .map(|s| (s.id, s.service_date))
        .collect();

    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut accumulators: Vec<PartAccumulator> = Vec::new();

    for usage in usages {
        let Some(&service_date) = service_dates.get(&usage.service_id) else {
            continue;
        };

        let position = *index.entry(usage.part.id).or_insert_with(|| {
            accumulators.push(PartAccumulator::new(&usage.part));
            accumulators.len() - 1
        });
        accumulators[position].add(service_date, i64::from(usage.quantity));
    }

    let mut report: Vec<PartUsageSummary> = accumulators
        .into_iter()
        .map(PartAccumulator::into_summary)
        .collect();
    sort_descending_by(&mut report, |row| row.total_quantity);

    debug!(
        "🔧 Consumo de repuestos: {} repuestos en {} consumos",
        report.len(),
        usages.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{date, part, service, usage};

    fn year_2024() -> DateRange {
        DateRange::new(date("2024-01-01"), date("2024-12-31"))
    }

    #[test]
    fn test_usage_aggregated_per_part_and_month() {
        let filter = part(1, "OF-100");
        let pads = part(2, "BP-200");
        let services = vec![
            service(10, 1, "2024-03-05", "Service", None),
            service(11, 2, "2024-01-20", "Service", None),
            service(12, 1, "2024-03-28", "Brakes", None),
        ];
        let usages = vec![
            usage(10, &filter, 1),
            usage(11, &filter, 2),
            usage(12, &pads, 4),
            usage(12, &filter, 1),
        ];
        let report = parts_usage_report(&services, &usages, &year_2024());

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].part_number, "OF-100");
        assert_eq!(report[0].total_quantity, 4);
        assert_eq!(
            report[0].usage_by_month,
            vec![
                MonthlyQuantity { month: "Jan 2024".to_string(), quantity: 2 },
                MonthlyQuantity { month: "Mar 2024".to_string(), quantity: 2 },
            ]
        );
        assert_eq!(report[1].part_number, "BP-200");
        assert_eq!(report[1].total_quantity, 4);
    }

    #[test]
    fn test_totals_match_monthly_buckets() {
        let filter = part(1, "OF-100");
        let services = vec![
            service(1, 1, "2024-12-30", "Service", None),
            service(2, 1, "2024-02-01", "Service", None),
            service(3, 1, "2024-11-11", "Service", None),
        ];
        let usages = vec![usage(1, &filter, 3), usage(2, &filter, 5), usage(3, &filter, 7)];
        let report = parts_usage_report(&services, &usages, &year_2024());

        let row = &report[0];
        let monthly: i64 = row.usage_by_month.iter().map(|m| m.quantity).sum();
        assert_eq!(row.total_quantity, monthly);

        let months: Vec<&str> = row.usage_by_month.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["Feb 2024", "Nov 2024", "Dec 2024"]);
    }

    #[test]
    fn test_months_sort_across_years() {
        let filter = part(1, "OF-100");
        let range = DateRange::new(date("2023-10-01"), date("2024-03-31"));
        let services = vec![
            service(1, 1, "2024-01-10", "Service", None),
            service(2, 1, "2023-12-10", "Service", None),
        ];
        let usages = vec![usage(1, &filter, 1), usage(2, &filter, 1)];
        let report = parts_usage_report(&services, &usages, &range);

        assert_eq!(report[0].usage_by_month[0].month, "Dec 2023");
        assert_eq!(report[0].usage_by_month[1].month, "Jan 2024");
    }

    #[test]
    fn test_usage_outside_range_is_dropped() {
        let filter = part(1, "OF-100");
        let services = vec![
            service(1, 1, "2023-12-31", "Service", None),
            service(2, 1, "2024-06-01", "Service", None),
        ];
        let usages = vec![usage(1, &filter, 9), usage(2, &filter, 1), usage(99, &filter, 50)];
        let report = parts_usage_report(&services, &usages, &year_2024());

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].total_quantity, 1);
    }

    #[test]
    fn test_sorted_by_total_quantity_descending() {
        let parts: Vec<VehiclePart> = (1..=4).map(|id| part(id, &format!("P-{}", id))).collect();
        let services = vec![service(1, 1, "2024-05-05", "Service", None)];
        let usages = vec![
            usage(1, &parts[0], 2),
            usage(1, &parts[1], 8),
            usage(1, &parts[2], 5),
            usage(1, &parts[3], 8),
        ];
        let report = parts_usage_report(&services, &usages, &year_2024());

        let numbers: Vec<&str> = report.iter().map(|r| r.part_number.as_str()).collect();
        assert_eq!(numbers, vec!["P-2", "P-4", "P-3", "P-1"]);
        assert!(report.windows(2).all(|w| w[0].total_quantity >= w[1].total_quantity));
    }

    #[test]
    fn test_stock_snapshot_comes_from_part() {
        let mut filter = part(1, "OF-100");
        filter.current_stock = 2;
        filter.minimum_stock = 6;
        let services = vec![service(1, 1, "2024-05-05", "Service", None)];
        let report = parts_usage_report(&services, &[usage(1, &filter, 1)], &year_2024());

        assert_eq!(report[0].current_stock, 2);
        assert_eq!(report[0].minimum_stock, 6);
    }
}
