use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven registry types the engine knows how to import, export and
/// aggregate. Each kind carries its fixed CSV column set and whether an
/// email address is required (and deduplicated) on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Ngo,
    Volunteer,
    Hospital,
    PoliceStation,
    BloodBank,
    FireStation,
    EmergencyContact,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Ngo,
        EntityKind::Volunteer,
        EntityKind::Hospital,
        EntityKind::PoliceStation,
        EntityKind::BloodBank,
        EntityKind::FireStation,
        EntityKind::EmergencyContact,
    ];

    /// The dataset selector used by upload/export/clear calls.
    pub fn selector(&self) -> &'static str {
        match self {
            EntityKind::Ngo => "ngos",
            EntityKind::Volunteer => "volunteers",
            EntityKind::Hospital => "hospitals",
            EntityKind::PoliceStation => "police-stations",
            EntityKind::BloodBank => "blood-banks",
            EntityKind::FireStation => "fire-stations",
            EntityKind::EmergencyContact => "emergency-contacts",
        }
    }

    pub fn from_selector(selector: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.selector() == selector)
    }

    /// Fixed CSV column set, in header order. Export appends
    /// `id`, `created_at` and `updated_at` to this.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Ngo => &[
                "name",
                "email",
                "phone",
                "location",
                "operating_zones",
                "approved",
            ],
            EntityKind::Volunteer => &[
                "name",
                "email",
                "phone",
                "location",
                "expertise",
                "availability",
                "approved",
            ],
            EntityKind::Hospital => &[
                "name",
                "address",
                "phone",
                "location",
                "is_24x7",
                "treatment_types",
            ],
            EntityKind::PoliceStation => &[
                "name",
                "address",
                "phone",
                "location",
                "station_code",
                "is_24x7",
                "jurisdiction",
                "officer_in_charge",
            ],
            EntityKind::BloodBank => &[
                "name",
                "address",
                "phone",
                "location",
                "is_24x7",
                "blood_types_available",
                "contact_person",
                "license_number",
            ],
            EntityKind::FireStation => &[
                "name",
                "address",
                "phone",
                "location",
                "station_code",
                "is_24x7",
                "equipment_available",
                "chief_officer",
            ],
            EntityKind::EmergencyContact => &[
                "name",
                "phone",
                "email",
                "service_type",
                "location",
                "is_24x7",
                "description",
                "priority_level",
            ],
        }
    }

    /// NGO and Volunteer records are keyed by normalized email; the other
    /// kinds accept duplicates.
    pub fn requires_email(&self) -> bool {
        matches!(self, EntityKind::Ngo | EntityKind::Volunteer)
    }
}

/// Identity and timestamps are assigned by the store at commit time and are
/// absent on a freshly staged record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ngo {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub operating_zones: String,
    pub approved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volunteer {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub expertise: String,
    pub availability: String,
    pub approved: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: String,
    pub is_24x7: bool,
    pub treatment_types: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoliceStation {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: String,
    pub station_code: String,
    pub is_24x7: bool,
    pub jurisdiction: String,
    pub officer_in_charge: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BloodBank {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: String,
    pub is_24x7: bool,
    pub blood_types_available: String,
    pub contact_person: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FireStation {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: String,
    pub station_code: String,
    pub is_24x7: bool,
    pub equipment_available: String,
    pub chief_officer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service_type: String,
    pub location: String,
    pub is_24x7: bool,
    pub description: String,
    pub priority_level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRecord {
    Ngo(Ngo),
    Volunteer(Volunteer),
    Hospital(Hospital),
    PoliceStation(PoliceStation),
    BloodBank(BloodBank),
    FireStation(FireStation),
    EmergencyContact(EmergencyContact),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Ngo(_) => EntityKind::Ngo,
            EntityRecord::Volunteer(_) => EntityKind::Volunteer,
            EntityRecord::Hospital(_) => EntityKind::Hospital,
            EntityRecord::PoliceStation(_) => EntityKind::PoliceStation,
            EntityRecord::BloodBank(_) => EntityKind::BloodBank,
            EntityRecord::FireStation(_) => EntityKind::FireStation,
            EntityRecord::EmergencyContact(_) => EntityKind::EmergencyContact,
        }
    }

    pub fn meta(&self) -> &RecordMeta {
        match self {
            EntityRecord::Ngo(r) => &r.meta,
            EntityRecord::Volunteer(r) => &r.meta,
            EntityRecord::Hospital(r) => &r.meta,
            EntityRecord::PoliceStation(r) => &r.meta,
            EntityRecord::BloodBank(r) => &r.meta,
            EntityRecord::FireStation(r) => &r.meta,
            EntityRecord::EmergencyContact(r) => &r.meta,
        }
    }

    pub fn meta_mut(&mut self) -> &mut RecordMeta {
        match self {
            EntityRecord::Ngo(r) => &mut r.meta,
            EntityRecord::Volunteer(r) => &mut r.meta,
            EntityRecord::Hospital(r) => &mut r.meta,
            EntityRecord::PoliceStation(r) => &mut r.meta,
            EntityRecord::BloodBank(r) => &mut r.meta,
            EntityRecord::FireStation(r) => &mut r.meta,
            EntityRecord::EmergencyContact(r) => &mut r.meta,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EntityRecord::Ngo(r) => &r.name,
            EntityRecord::Volunteer(r) => &r.name,
            EntityRecord::Hospital(r) => &r.name,
            EntityRecord::PoliceStation(r) => &r.name,
            EntityRecord::BloodBank(r) => &r.name,
            EntityRecord::FireStation(r) => &r.name,
            EntityRecord::EmergencyContact(r) => &r.name,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            EntityRecord::Ngo(r) => &r.location,
            EntityRecord::Volunteer(r) => &r.location,
            EntityRecord::Hospital(r) => &r.location,
            EntityRecord::PoliceStation(r) => &r.location,
            EntityRecord::BloodBank(r) => &r.location,
            EntityRecord::FireStation(r) => &r.location,
            EntityRecord::EmergencyContact(r) => &r.location,
        }
    }

    /// The dedup key, present only for kinds keyed by email.
    pub fn email(&self) -> Option<&str> {
        match self {
            EntityRecord::Ngo(r) => Some(&r.email),
            EntityRecord::Volunteer(r) => Some(&r.email),
            EntityRecord::EmergencyContact(r) => Some(&r.email),
            _ => None,
        }
    }

    pub fn approved(&self) -> Option<bool> {
        match self {
            EntityRecord::Ngo(r) => Some(r.approved),
            EntityRecord::Volunteer(r) => Some(r.approved),
            _ => None,
        }
    }

    pub fn open_24x7(&self) -> Option<bool> {
        match self {
            EntityRecord::Hospital(r) => Some(r.is_24x7),
            EntityRecord::PoliceStation(r) => Some(r.is_24x7),
            EntityRecord::BloodBank(r) => Some(r.is_24x7),
            EntityRecord::FireStation(r) => Some(r.is_24x7),
            EntityRecord::EmergencyContact(r) => Some(r.is_24x7),
            _ => None,
        }
    }

    pub fn service_type(&self) -> Option<&str> {
        match self {
            EntityRecord::EmergencyContact(r) => Some(&r.service_type),
            _ => None,
        }
    }
}

/// Per-call outcome summary of one import. Invariants:
/// `successful + failed + skipped` equals the number of data rows
/// attempted, and every failed or skipped row has exactly one entry in
/// `errors` (a fatal commit appends one extra entry on top).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportStats {
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportStats {
    pub fn rows_attempted(&self) -> usize {
        self.successful + self.failed + self.skipped
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApprovalStats {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total: u64,
    #[serde(rename = "24x7")]
    pub open_24x7: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactStats {
    pub total: u64,
    pub by_service_type: BTreeMap<String, u64>,
}

/// One fixed aggregate shape per entity kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistryStatistics {
    pub ngos: ApprovalStats,
    pub volunteers: ApprovalStats,
    pub hospitals: CoverageStats,
    pub police_stations: CoverageStats,
    pub blood_banks: CoverageStats,
    pub fire_stations: CoverageStats,
    pub emergency_contacts: ContactStats,
}

/// Per-kind location -> count maps. Locations compare case-sensitively and
/// records with an empty location are excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDistribution {
    pub ngos: BTreeMap<String, u64>,
    pub volunteers: BTreeMap<String, u64>,
    pub hospitals: BTreeMap<String, u64>,
    pub police_stations: BTreeMap<String, u64>,
    pub blood_banks: BTreeMap<String, u64>,
    pub fire_stations: BTreeMap<String, u64>,
    pub emergency_contacts: BTreeMap<String, u64>,
}

/// Response body for one import call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub message: String,
    #[serde(flatten)]
    pub stats: ImportStats,
}

/// Response body for the statistics call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub statistics: RegistryStatistics,
    pub location_distribution: LocationDistribution,
}

/// Flattened entry of the combined emergency-services listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(rename = "type")]
    pub service: String,
    pub id: Option<i64>,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub location: String,
    pub is_24x7: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_types: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
}
