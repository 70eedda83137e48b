use core_types::Dataset;
use rust_decimal::Decimal;
use serde::Serialize;

/// The scalar headline metrics of a (filtered) dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub record_count: usize,
    pub total_units_sold: u64,
    pub total_revenue: Decimal,
    pub average_price: Option<Decimal>, // Option<> because an empty dataset has no average
}

impl Kpis {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut kpis = Self {
            record_count: dataset.len(),
            ..Self::default()
        };

        let mut price_sum = Decimal::ZERO;
        for record in dataset {
            kpis.total_units_sold = kpis.total_units_sold.saturating_add(record.units_sold);
            kpis.total_revenue = kpis.total_revenue.saturating_add(record.revenue);
            price_sum = price_sum.saturating_add(record.price);
        }

        if kpis.record_count > 0 {
            kpis.average_price = Some(price_sum / Decimal::from(kpis.record_count));
        }

        kpis
    }
}
