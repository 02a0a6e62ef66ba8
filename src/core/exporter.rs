use crate::domain::model::{EntityKind, EntityRecord, RecordMeta};
use crate::utils::error::{RegistryError, Result};

/// Serialize all records of one kind back to delimited text: the kind's
/// fixed columns plus `id`, `created_at`, `updated_at`, one row per record
/// in the order the store returned them. Timestamps render as RFC 3339 and
/// absent metadata renders as the empty string.
pub fn export(kind: EntityKind, records: &[EntityRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header(kind))?;

    for record in records {
        debug_assert_eq!(record.kind(), kind);
        writer.write_record(record_fields(record))?;
    }

    into_text(writer)
}

/// Header-only file for one kind, served as an operator template.
pub fn template(kind: EntityKind) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(kind.columns())?;
    into_text(writer)
}

fn header(kind: EntityKind) -> Vec<&'static str> {
    let mut columns = kind.columns().to_vec();
    columns.extend(["id", "created_at", "updated_at"]);
    columns
}

fn into_text(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().map_err(|e| {
        RegistryError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
    })?;
    String::from_utf8(bytes).map_err(|_| RegistryError::InvalidEncoding)
}

fn meta_fields(meta: &RecordMeta) -> [String; 3] {
    [
        meta.id.map(|id| id.to_string()).unwrap_or_default(),
        meta.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        meta.updated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
    ]
}

fn record_fields(record: &EntityRecord) -> Vec<String> {
    let mut fields: Vec<String> = match record {
        EntityRecord::Ngo(r) => vec![
            r.name.clone(),
            r.email.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.operating_zones.clone(),
            r.approved.to_string(),
        ],
        EntityRecord::Volunteer(r) => vec![
            r.name.clone(),
            r.email.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.expertise.clone(),
            r.availability.clone(),
            r.approved.to_string(),
        ],
        EntityRecord::Hospital(r) => vec![
            r.name.clone(),
            r.address.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.is_24x7.to_string(),
            r.treatment_types.clone(),
        ],
        EntityRecord::PoliceStation(r) => vec![
            r.name.clone(),
            r.address.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.station_code.clone(),
            r.is_24x7.to_string(),
            r.jurisdiction.clone(),
            r.officer_in_charge.clone(),
        ],
        EntityRecord::BloodBank(r) => vec![
            r.name.clone(),
            r.address.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.is_24x7.to_string(),
            r.blood_types_available.clone(),
            r.contact_person.clone(),
            r.license_number.clone(),
        ],
        EntityRecord::FireStation(r) => vec![
            r.name.clone(),
            r.address.clone(),
            r.phone.clone(),
            r.location.clone(),
            r.station_code.clone(),
            r.is_24x7.to_string(),
            r.equipment_available.clone(),
            r.chief_officer.clone(),
        ],
        EntityRecord::EmergencyContact(r) => vec![
            r.name.clone(),
            r.phone.clone(),
            r.email.clone(),
            r.service_type.clone(),
            r.location.clone(),
            r.is_24x7.to_string(),
            r.description.clone(),
            r.priority_level.to_string(),
        ],
    };

    fields.extend(meta_fields(record.meta()));
    fields
}
