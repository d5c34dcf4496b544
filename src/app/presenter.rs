use crate::domain::model::{country_name, Package};
use crate::utils::error::Result;

pub const EMPTY_LISTING: &str = "No packages found.";

const TABLE_HEADERS: [&str; 6] = [
    "ID",
    "Shipping Mode",
    "Shipping Type",
    "Reception Mode",
    "Weight (KG)",
    "Route",
];

const CSV_HEADERS: [&str; 29] = [
    "id",
    "shippingParty",
    "shippingMode",
    "shippingType",
    "receptionMode",
    "weightInKg",
    "senderFullName",
    "senderContactNumber",
    "senderEmailAddress",
    "senderStreetAddress",
    "senderCity",
    "senderStateOrProvince",
    "senderCountryCode",
    "senderPostalCode",
    "receiverFullName",
    "receiverContactNumber",
    "receiverEmailAddress",
    "receiverStreetAddress",
    "receiverBarangay",
    "receiverCity",
    "receiverStateOrProvince",
    "receiverCountryCode",
    "receiverPostalCode",
    "createdAt",
    "createdById",
    "updatedAt",
    "updatedById",
    "createdInHubId",
    "isArchived",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ListFormat {
    #[default]
    Table,
    Csv,
    Json,
}

pub fn render_listing(packages: &[Package], format: ListFormat) -> Result<String> {
    match format {
        ListFormat::Table => Ok(render_table(packages)),
        ListFormat::Csv => render_csv(packages),
        ListFormat::Json => render_json(packages),
    }
}

fn format_weight(weight: Option<f64>) -> String {
    weight.map(|w| format!("{:.2}", w)).unwrap_or_default()
}

fn route(package: &Package) -> String {
    let label = |code: &str| country_name(code).unwrap_or(code).to_string();
    format!(
        "{} -> {}",
        label(&package.sender.country_code),
        label(&package.receiver.country_code)
    )
}

pub fn render_table(packages: &[Package]) -> String {
    if packages.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    let rows: Vec<[String; 6]> = packages
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.shipping_mode.to_string(),
                p.shipping_type.to_string(),
                p.reception_mode.to_string(),
                format_weight(p.weight_in_kg),
                route(p),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(TABLE_HEADERS.to_vec()));
    out.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

pub fn render_csv(packages: &[Package]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for package in packages {
        let json = package.to_json();
        let record: Vec<String> = CSV_HEADERS
            .iter()
            .map(|field| match &json[*field] {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn render_json(packages: &[Package]) -> Result<String> {
    let values: Vec<serde_json::Value> = packages.iter().map(Package::to_json).collect();
    Ok(serde_json::to_string_pretty(&values)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ReceiverAddress, ReceptionMode, SenderAddress, ShippingMode, ShippingParty, ShippingType,
    };
    use chrono::{TimeZone, Utc};

    fn package(id: i64) -> Package {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        Package {
            id,
            shipping_party: ShippingParty::FirstParty,
            shipping_mode: ShippingMode::Sea,
            shipping_type: ShippingType::Standard,
            reception_mode: ReceptionMode::DropOff,
            weight_in_kg: Some(12.5),
            sender: SenderAddress {
                full_name: "Juan dela Cruz".into(),
                contact_number: "09171234567".into(),
                email_address: "juan@example.com".into(),
                street_address: "123 Rizal Ave".into(),
                city: "Manila".into(),
                state_or_province: "Metro Manila".into(),
                country_code: "PHL".into(),
                postal_code: 1000,
            },
            receiver: ReceiverAddress {
                full_name: "Jane, Doe".into(),
                contact_number: "5551234567".into(),
                email_address: "jane@example.com".into(),
                street_address: "1 Market St".into(),
                barangay: "N/A".into(),
                city: "San Francisco".into(),
                state_or_province: "California".into(),
                country_code: "USA".into(),
                postal_code: 94105,
            },
            created_at: at,
            created_by_id: "user1234".into(),
            updated_at: at,
            updated_by_id: "user1234".into(),
            created_in_hub_id: 1,
            is_archived: false,
        }
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(render_table(&[]), EMPTY_LISTING);
    }

    #[test]
    fn test_table_columns() {
        let table = render_table(&[package(1), package(12)]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID | Shipping Mode"));
        assert!(lines[2].contains("SEA"));
        assert!(lines[2].contains("12.50"));
        assert!(lines[2].contains("Philippines -> United States of America"));
        assert!(lines[3].starts_with("12"));
    }

    #[test]
    fn test_csv_quotes_and_headers() {
        let csv = render_csv(&[package(3)]).unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), CSV_HEADERS.len());

        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "3");
        assert_eq!(&record[2], "SEA");
        assert_eq!(&record[14], "Jane, Doe");
        assert_eq!(&record[28], "false");
    }

    #[test]
    fn test_json_listing() {
        let json = render_json(&[package(5)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["id"], 5);
        assert_eq!(parsed[0]["receptionMode"], "DROP_OFF");
        assert_eq!(parsed[0]["receiverBarangay"], "N/A");
    }
}
