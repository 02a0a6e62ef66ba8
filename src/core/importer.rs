use crate::core::rows::Row;
use crate::domain::model::{
    BloodBank, EmergencyContact, EntityKind, EntityRecord, FireStation, Hospital, ImportStats, Ngo,
    PoliceStation, Volunteer,
};
use crate::domain::ports::EntityStore;
use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{is_valid_email, normalize_email};
use std::collections::HashSet;

/// Runs the shared import algorithm for one entity kind. Row-level
/// problems accumulate in the returned stats and never abort the batch;
/// only a fatal commit error surfaces as `Err`, after the store has rolled
/// the whole batch back.
pub struct Importer<'a, S: EntityStore> {
    store: &'a S,
}

impl<'a, S: EntityStore> Importer<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn import(&self, kind: EntityKind, rows: &[Row]) -> Result<ImportStats> {
        let mut stats = ImportStats::default();
        let mut staged: Vec<EntityRecord> = Vec::new();
        // Emails staged earlier in this same file count as duplicates too,
        // mirroring what the dedup query sees once the batch is flushed.
        let mut staged_emails: HashSet<String> = HashSet::new();

        for row in rows {
            let name = row.field("name");
            let email = normalize_email(row.field("email"));

            if name.is_empty() || (kind.requires_email() && email.is_empty()) {
                stats.skipped += 1;
                stats
                    .errors
                    .push(format!("Row {}: Missing required field(s)", row.number));
                continue;
            }

            if kind.requires_email() {
                if !is_valid_email(&email) {
                    stats.skipped += 1;
                    stats
                        .errors
                        .push(format!("Row {}: Invalid email format", row.number));
                    continue;
                }

                let already_staged = staged_emails.contains(&email);
                if already_staged || self.store.find_by_email(kind, &email).await?.is_some() {
                    stats.skipped += 1;
                    stats
                        .errors
                        .push(format!("Row {}: {} already exists", row.number, email));
                    continue;
                }
            }

            match build_record(kind, row) {
                Ok(record) => {
                    if kind.requires_email() {
                        staged_emails.insert(email);
                    }
                    staged.push(record);
                    stats.successful += 1;
                }
                Err(reason) => {
                    stats.failed += 1;
                    stats.errors.push(format!("Row {}: {}", row.number, reason));
                }
            }
        }

        tracing::debug!(
            "Committing {} staged {} records ({} skipped, {} failed)",
            staged.len(),
            kind.selector(),
            stats.skipped,
            stats.failed
        );

        if let Err(err) = self.store.commit(staged).await {
            // Counts stay as accumulated: they describe rows that passed
            // row-level validation, not what the store ended up holding.
            let reason = err.to_string();
            stats.errors.push(format!("Commit failed: {reason}"));
            return Err(RegistryError::CommitFailed { reason, stats });
        }

        Ok(stats)
    }
}

/// Populate the kind's typed record from a row. The only coercion that can
/// fail is the numeric priority level; everything else is a trimmed string
/// or a boolean flag.
fn build_record(kind: EntityKind, row: &Row) -> std::result::Result<EntityRecord, String> {
    let record = match kind {
        EntityKind::Ngo => EntityRecord::Ngo(Ngo {
            name: row.field("name").to_string(),
            email: normalize_email(row.field("email")),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            operating_zones: row.field("operating_zones").to_string(),
            approved: row.flag("approved"),
            ..Ngo::default()
        }),
        EntityKind::Volunteer => EntityRecord::Volunteer(Volunteer {
            name: row.field("name").to_string(),
            email: normalize_email(row.field("email")),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            expertise: row.field("expertise").to_string(),
            availability: row.field("availability").to_string(),
            approved: row.flag("approved"),
            ..Volunteer::default()
        }),
        EntityKind::Hospital => EntityRecord::Hospital(Hospital {
            name: row.field("name").to_string(),
            address: row.field("address").to_string(),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            is_24x7: row.flag("is_24x7"),
            treatment_types: row.field("treatment_types").to_string(),
            ..Hospital::default()
        }),
        EntityKind::PoliceStation => EntityRecord::PoliceStation(PoliceStation {
            name: row.field("name").to_string(),
            address: row.field("address").to_string(),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            station_code: row.field("station_code").to_string(),
            is_24x7: row.flag("is_24x7"),
            jurisdiction: row.field("jurisdiction").to_string(),
            officer_in_charge: row.field("officer_in_charge").to_string(),
            ..PoliceStation::default()
        }),
        EntityKind::BloodBank => EntityRecord::BloodBank(BloodBank {
            name: row.field("name").to_string(),
            address: row.field("address").to_string(),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            is_24x7: row.flag("is_24x7"),
            blood_types_available: row.field("blood_types_available").to_string(),
            contact_person: row.field("contact_person").to_string(),
            license_number: row.field("license_number").to_string(),
            ..BloodBank::default()
        }),
        EntityKind::FireStation => EntityRecord::FireStation(FireStation {
            name: row.field("name").to_string(),
            address: row.field("address").to_string(),
            phone: row.field("phone").to_string(),
            location: row.field("location").to_string(),
            station_code: row.field("station_code").to_string(),
            is_24x7: row.flag("is_24x7"),
            equipment_available: row.field("equipment_available").to_string(),
            chief_officer: row.field("chief_officer").to_string(),
            ..FireStation::default()
        }),
        EntityKind::EmergencyContact => EntityRecord::EmergencyContact(EmergencyContact {
            name: row.field("name").to_string(),
            phone: row.field("phone").to_string(),
            email: normalize_email(row.field("email")),
            service_type: row.field("service_type").to_string(),
            location: row.field("location").to_string(),
            is_24x7: row.flag("is_24x7"),
            description: row.field("description").to_string(),
            priority_level: parse_priority(row.field("priority_level"))?,
            ..EmergencyContact::default()
        }),
    };

    Ok(record)
}

fn parse_priority(raw: &str) -> std::result::Result<i32, String> {
    if raw.is_empty() {
        return Ok(1);
    }
    raw.parse::<i32>()
        .map_err(|_| format!("invalid priority_level '{raw}'"))
}
