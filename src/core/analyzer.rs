use crate::domain::model::{
    ApprovalStats, ContactStats, CoverageStats, EntityKind, LocationDistribution,
    RegistryStatistics,
};
use crate::domain::ports::{EntityStore, FlagField, GroupField};
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// Read-only aggregates over the Entity Store. Safe to run concurrently
/// with imports; results reflect whatever commit state the store exposes
/// at query time.
pub struct Analyzer<'a, S: EntityStore> {
    store: &'a S,
}

impl<'a, S: EntityStore> Analyzer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn import_statistics(&self) -> Result<RegistryStatistics> {
        Ok(RegistryStatistics {
            ngos: self.approval_stats(EntityKind::Ngo).await?,
            volunteers: self.approval_stats(EntityKind::Volunteer).await?,
            hospitals: self.coverage_stats(EntityKind::Hospital).await?,
            police_stations: self.coverage_stats(EntityKind::PoliceStation).await?,
            blood_banks: self.coverage_stats(EntityKind::BloodBank).await?,
            fire_stations: self.coverage_stats(EntityKind::FireStation).await?,
            emergency_contacts: self.contact_stats().await?,
        })
    }

    pub async fn location_distribution(&self) -> Result<LocationDistribution> {
        Ok(LocationDistribution {
            ngos: self.locations(EntityKind::Ngo).await?,
            volunteers: self.locations(EntityKind::Volunteer).await?,
            hospitals: self.locations(EntityKind::Hospital).await?,
            police_stations: self.locations(EntityKind::PoliceStation).await?,
            blood_banks: self.locations(EntityKind::BloodBank).await?,
            fire_stations: self.locations(EntityKind::FireStation).await?,
            emergency_contacts: self.locations(EntityKind::EmergencyContact).await?,
        })
    }

    async fn approval_stats(&self, kind: EntityKind) -> Result<ApprovalStats> {
        let total = self.store.count(kind).await?;
        let approved = self.store.count_flagged(kind, FlagField::Approved).await?;
        Ok(ApprovalStats {
            total,
            approved,
            pending: total.saturating_sub(approved),
        })
    }

    async fn coverage_stats(&self, kind: EntityKind) -> Result<CoverageStats> {
        Ok(CoverageStats {
            total: self.store.count(kind).await?,
            open_24x7: self.store.count_flagged(kind, FlagField::Open24x7).await?,
        })
    }

    async fn contact_stats(&self) -> Result<ContactStats> {
        let kind = EntityKind::EmergencyContact;
        let by_service_type = self
            .store
            .group_count(kind, GroupField::ServiceType)
            .await?
            .into_iter()
            .filter(|(service_type, _)| !service_type.is_empty())
            .collect();
        Ok(ContactStats {
            total: self.store.count(kind).await?,
            by_service_type,
        })
    }

    /// Location keys are exact strings, case-sensitive; records without a
    /// location are dropped from the distribution.
    async fn locations(&self, kind: EntityKind) -> Result<BTreeMap<String, u64>> {
        Ok(self
            .store
            .group_count(kind, GroupField::Location)
            .await?
            .into_iter()
            .filter(|(location, _)| !location.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::model::{EmergencyContact, EntityRecord, Hospital, Ngo};

    fn ngo(name: &str, email: &str, location: &str, approved: bool) -> EntityRecord {
        EntityRecord::Ngo(Ngo {
            name: name.to_string(),
            email: email.to_string(),
            location: location.to_string(),
            approved,
            ..Ngo::default()
        })
    }

    fn hospital(name: &str, location: &str, open: bool) -> EntityRecord {
        EntityRecord::Hospital(Hospital {
            name: name.to_string(),
            location: location.to_string(),
            is_24x7: open,
            ..Hospital::default()
        })
    }

    fn contact(name: &str, service_type: &str) -> EntityRecord {
        EntityRecord::EmergencyContact(EmergencyContact {
            name: name.to_string(),
            service_type: service_type.to_string(),
            priority_level: 1,
            ..EmergencyContact::default()
        })
    }

    #[tokio::test]
    async fn test_approval_split() {
        let store = MemoryStore::new();
        store
            .commit(vec![
                ngo("A", "a@a.com", "Mumbai", true),
                ngo("B", "b@b.com", "Pune", false),
                ngo("C", "c@c.com", "Pune", false),
            ])
            .await
            .unwrap();

        let stats = Analyzer::new(&store).import_statistics().await.unwrap();
        assert_eq!(stats.ngos.total, 3);
        assert_eq!(stats.ngos.approved, 1);
        assert_eq!(stats.ngos.pending, 2);
        assert_eq!(stats.volunteers.total, 0);
    }

    #[tokio::test]
    async fn test_coverage_counts() {
        let store = MemoryStore::new();
        store
            .commit(vec![
                hospital("H1", "Mumbai", true),
                hospital("H2", "Mumbai", false),
            ])
            .await
            .unwrap();

        let stats = Analyzer::new(&store).import_statistics().await.unwrap();
        assert_eq!(stats.hospitals.total, 2);
        assert_eq!(stats.hospitals.open_24x7, 1);
    }

    #[tokio::test]
    async fn test_contacts_grouped_by_service_type() {
        let store = MemoryStore::new();
        store
            .commit(vec![
                contact("Police Control", "Police"),
                contact("Fire Control", "Fire"),
                contact("City Police", "Police"),
            ])
            .await
            .unwrap();

        let stats = Analyzer::new(&store).import_statistics().await.unwrap();
        assert_eq!(stats.emergency_contacts.total, 3);
        assert_eq!(
            stats.emergency_contacts.by_service_type.get("Police"),
            Some(&2)
        );
        assert_eq!(
            stats.emergency_contacts.by_service_type.get("Fire"),
            Some(&1)
        );
    }

    #[tokio::test]
    async fn test_location_distribution_excludes_empty() {
        let store = MemoryStore::new();
        store
            .commit(vec![
                hospital("H1", "Mumbai", false),
                hospital("H2", "", false),
                hospital("H3", "Mumbai", false),
                hospital("H4", "mumbai", false),
            ])
            .await
            .unwrap();

        let locations = Analyzer::new(&store).location_distribution().await.unwrap();
        assert_eq!(locations.hospitals.get("Mumbai"), Some(&2));
        // case-sensitive, no normalization
        assert_eq!(locations.hospitals.get("mumbai"), Some(&1));
        assert_eq!(locations.hospitals.len(), 2);
    }
}
