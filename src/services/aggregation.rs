//! Primitivas de agregación compartidas por los reportes
//!
//! Suma de costos, conteos agrupados con orden de primera aparición
//! y ordenamiento descendente estable.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::ServiceRecord;

/// Total y número de servicios de un grupo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostTally {
    pub total: Decimal,
    pub count: u32,
}

impl CostTally {
    pub fn add(&mut self, record: &ServiceRecord) {
        self.total += record.cost_or_zero();
        self.count += 1;
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ServiceRecord>) -> Self {
        let mut tally = Self::default();
        for record in records {
            tally.add(record);
        }
        tally
    }

    pub fn total_f64(&self) -> f64 {
        decimal_to_f64(self.total)
    }

    /// Costo medio por servicio; cero si el grupo está vacío
    pub fn average_f64(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        decimal_to_f64(self.total / Decimal::from(self.count))
    }
}

/// Agrupar servicios por clave conservando el orden de primera aparición
pub fn tally_by<'a, K, F>(
    records: impl IntoIterator<Item = &'a ServiceRecord>,
    key_fn: F,
) -> Vec<(K, CostTally)>
where
    K: Eq + Hash + Clone,
    F: Fn(&ServiceRecord) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, CostTally)> = Vec::new();

    for record in records {
        let key = key_fn(record);
        let position = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, CostTally::default()));
            groups.len() - 1
        });
        groups[position].1.add(record);
    }

    groups
}

pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Redondeo a dos decimales
pub fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ordenar de mayor a menor por `key`; los empates conservan su orden relativo
pub fn sort_descending_by<T, K, F>(items: &mut [T], key: F)
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
}
