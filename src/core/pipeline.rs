use crate::core::filter::RiskFilter;
use crate::core::{ConfigProvider, Coordinate, InspectionRecord, Pipeline, Result, Transport};

pub const DEFAULT_MAX_RECORDS: usize = 100;

/// Fetches the inspection dataset and reduces it to marker coordinates.
pub struct InspectionPipeline<T: Transport, C: ConfigProvider> {
    transport: T,
    config: C,
    filter: RiskFilter,
}

impl<T: Transport, C: ConfigProvider> InspectionPipeline<T, C> {
    pub fn new(transport: T, config: C) -> Self {
        let filter = RiskFilter::new(config.excluded_risks().iter().cloned());
        Self {
            transport,
            config,
            filter,
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport, C: ConfigProvider> Pipeline for InspectionPipeline<T, C> {
    async fn extract(&self) -> Result<Vec<InspectionRecord>> {
        tracing::info!("Fetching inspections from: {}", self.config.endpoint());
        let body = self.transport.get(self.config.endpoint()).await?;

        let records = parse_records(&body, self.config.max_records())?;
        tracing::info!("Parsed {} records", records.len());
        Ok(records)
    }

    fn transform(&self, records: &[InspectionRecord]) -> Vec<Coordinate> {
        let coordinates = project_coordinates(records, &self.filter);
        tracing::info!(
            "Kept {} of {} records after risk filtering",
            coordinates.len(),
            records.len()
        );
        coordinates
    }
}

/// Decodes a JSON array body, keeping the first `limit` elements.
///
/// Elements past the limit are never decoded into records, so a malformed
/// entry there cannot fail the call. The body itself must still be a valid
/// JSON array.
pub fn parse_records(body: &[u8], limit: usize) -> Result<Vec<InspectionRecord>> {
    let items: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    tracing::debug!("Response holds {} elements, keeping {}", items.len(), limit);

    let records = items
        .into_iter()
        .take(limit)
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<InspectionRecord>, _>>()?;

    Ok(records)
}

/// Applies the risk filter, then parses coordinates. Records whose
/// coordinates do not parse are dropped one by one.
pub fn project_coordinates(records: &[InspectionRecord], filter: &RiskFilter) -> Vec<Coordinate> {
    records
        .iter()
        .filter(|record| filter.retains(record))
        .filter_map(|record| match record.coordinate() {
            Ok(coordinate) => Some(coordinate),
            Err(e) => {
                tracing::debug!("Dropping record with risk '{}': {}", record.risk, e);
                None
            }
        })
        .collect()
}
