use crate::core::analyzer::Analyzer;
use crate::core::exporter;
use crate::core::importer::Importer;
use crate::core::rows::parse_rows;
use crate::domain::model::{
    EntityKind, EntityRecord, ImportReport, ServiceSummary, StatisticsReport,
};
use crate::domain::ports::EntityStore;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::validate_file_extension;

const ALLOWED_EXTENSIONS: [&str; 1] = ["csv"];

/// Facade over the importer, exporter and analyzer, keyed by the dataset
/// selector strings the transport layer passes through. File-format
/// problems (bad selector, bad extension, non-UTF-8 bytes) are rejected
/// before any row is parsed.
pub struct RegistryEngine<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> RegistryEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn import_dataset(
        &self,
        selector: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<ImportReport> {
        let kind = resolve_kind(selector)?;
        validate_file_extension(filename, &ALLOWED_EXTENSIONS)?;
        let text = std::str::from_utf8(bytes).map_err(|_| RegistryError::InvalidEncoding)?;

        let rows = parse_rows(text)?;
        tracing::info!("Importing {} rows into {}", rows.len(), kind.selector());

        let stats = Importer::new(&self.store).import(kind, &rows).await?;
        tracing::info!(
            "Import into {} finished: {} successful, {} failed, {} skipped",
            kind.selector(),
            stats.successful,
            stats.failed,
            stats.skipped
        );

        Ok(ImportReport {
            message: "Import completed".to_string(),
            stats,
        })
    }

    pub async fn export_dataset(&self, selector: &str) -> Result<String> {
        let kind = resolve_kind(selector)?;
        let records = self.store.fetch_all(kind).await?;
        tracing::info!("Exporting {} {} records", records.len(), kind.selector());
        exporter::export(kind, &records)
    }

    pub fn template_dataset(&self, selector: &str) -> Result<String> {
        let kind = resolve_kind(selector)?;
        exporter::template(kind)
    }

    pub async fn statistics(&self) -> Result<StatisticsReport> {
        let analyzer = Analyzer::new(&self.store);
        Ok(StatisticsReport {
            statistics: analyzer.import_statistics().await?,
            location_distribution: analyzer.location_distribution().await?,
        })
    }

    pub async fn clear_dataset(&self, selector: &str) -> Result<u64> {
        let kind = resolve_kind(selector)?;
        let removed = self.store.clear(kind).await?;
        tracing::info!("Cleared {} {} records", removed, kind.selector());
        Ok(removed)
    }

    /// Combined listing of the physical emergency services (hospitals,
    /// police stations, fire stations, blood banks) with a type tag, for
    /// map/dashboard consumers.
    pub async fn emergency_services(&self) -> Result<Vec<ServiceSummary>> {
        let mut services = Vec::new();

        for record in self.store.fetch_all(EntityKind::Hospital).await? {
            if let EntityRecord::Hospital(r) = record {
                services.push(ServiceSummary {
                    service: "hospital".to_string(),
                    id: r.meta.id,
                    name: r.name,
                    address: r.address,
                    phone: r.phone,
                    location: r.location,
                    is_24x7: r.is_24x7,
                    treatment_types: Some(r.treatment_types),
                    station_code: None,
                    contact_person: None,
                });
            }
        }

        for record in self.store.fetch_all(EntityKind::PoliceStation).await? {
            if let EntityRecord::PoliceStation(r) = record {
                services.push(ServiceSummary {
                    service: "police".to_string(),
                    id: r.meta.id,
                    name: r.name,
                    address: r.address,
                    phone: r.phone,
                    location: r.location,
                    is_24x7: r.is_24x7,
                    treatment_types: None,
                    station_code: Some(r.station_code),
                    contact_person: None,
                });
            }
        }

        for record in self.store.fetch_all(EntityKind::FireStation).await? {
            if let EntityRecord::FireStation(r) = record {
                services.push(ServiceSummary {
                    service: "fire".to_string(),
                    id: r.meta.id,
                    name: r.name,
                    address: r.address,
                    phone: r.phone,
                    location: r.location,
                    is_24x7: r.is_24x7,
                    treatment_types: None,
                    station_code: Some(r.station_code),
                    contact_person: None,
                });
            }
        }

        for record in self.store.fetch_all(EntityKind::BloodBank).await? {
            if let EntityRecord::BloodBank(r) = record {
                services.push(ServiceSummary {
                    service: "blood_bank".to_string(),
                    id: r.meta.id,
                    name: r.name,
                    address: r.address,
                    phone: r.phone,
                    location: r.location,
                    is_24x7: r.is_24x7,
                    treatment_types: None,
                    station_code: None,
                    contact_person: Some(r.contact_person),
                });
            }
        }

        Ok(services)
    }
}

fn resolve_kind(selector: &str) -> Result<EntityKind> {
    EntityKind::from_selector(selector).ok_or_else(|| RegistryError::UnsupportedDataset {
        name: selector.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn engine() -> RegistryEngine<MemoryStore> {
        RegistryEngine::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_unknown_selector_is_client_error() {
        let err = engine()
            .import_dataset("animals", "animals.csv", b"name\nA\n")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedDataset { .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_wrong_extension_is_rejected_before_parsing() {
        let err = engine()
            .import_dataset("hospitals", "hospitals.xlsx", b"name\nA\n")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedFileType { .. }));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_undecodable_bytes_are_rejected() {
        let err = engine()
            .import_dataset("hospitals", "hospitals.csv", &[0xff, 0xfe, 0x00])
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidEncoding));
    }

    #[tokio::test]
    async fn test_import_report_shape() {
        let report = engine()
            .import_dataset("ngos", "ngos.csv", b"name,email\nA,a@a.com\n")
            .await
            .unwrap();
        assert_eq!(report.message, "Import completed");
        assert_eq!(report.stats.successful, 1);

        let json = serde_json::to_value(&report).unwrap();
        // stats fields flatten into the response object
        assert_eq!(json["successful"], 1);
        assert_eq!(json["message"], "Import completed");
    }

    #[tokio::test]
    async fn test_emergency_services_listing() {
        let engine = engine();
        engine
            .import_dataset(
                "hospitals",
                "h.csv",
                b"name,location,is_24x7\nCity Hospital,Mumbai,true\n",
            )
            .await
            .unwrap();
        engine
            .import_dataset(
                "police-stations",
                "p.csv",
                b"name,station_code\nCentral PS,PS-01\n",
            )
            .await
            .unwrap();

        let services = engine.emergency_services().await.unwrap();
        assert_eq!(services.len(), 2);
        assert_eq!(services[0].service, "hospital");
        assert_eq!(services[0].treatment_types.as_deref(), Some(""));
        assert_eq!(services[1].service, "police");
        assert_eq!(services[1].station_code.as_deref(), Some("PS-01"));

        let json = serde_json::to_value(&services).unwrap();
        assert_eq!(json[1]["type"], "police");
        assert!(json[1].get("treatment_types").is_none());
    }

    #[tokio::test]
    async fn test_clear_dataset() {
        let engine = engine();
        engine
            .import_dataset("hospitals", "h.csv", b"name\nA\nB\n")
            .await
            .unwrap();
        assert_eq!(engine.clear_dataset("hospitals").await.unwrap(), 2);
        assert_eq!(engine.store().count(EntityKind::Hospital).await.unwrap(), 0);
    }
}
