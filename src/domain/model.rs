use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{validate_finite, validate_length, PayloadReader, Validate};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

pub const MAX_FULL_NAME: usize = 100;
pub const MAX_CONTACT_NUMBER: usize = 15;
pub const MAX_EMAIL_ADDRESS: usize = 100;
pub const MAX_STREET_ADDRESS: usize = 255;
pub const MAX_CITY: usize = 100;
pub const MAX_STATE_OR_PROVINCE: usize = 100;
pub const MAX_BARANGAY: usize = 100;
pub const COUNTRY_CODE_LENGTH: usize = 3;
pub const MAX_USER_ID: usize = 28;

/// Declares a closed classification enum with its wire names.
macro_rules! closed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const SUPPORTED: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = IntakeError;

            fn from_str(value: &str) -> Result<Self> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(IntakeError::validation(
                        stringify!($name),
                        format!("Unsupported value '{}'", other),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_enum!(
    /// Who carries the package. Fixed to the store default on every write.
    ShippingParty {
        FirstParty => "FIRST_PARTY",
        ThirdParty => "THIRD_PARTY",
    }
);

closed_enum!(ShippingMode {
    Air => "AIR",
    Sea => "SEA",
    Land => "LAND",
});

closed_enum!(ShippingType {
    Standard => "STANDARD",
    Express => "EXPRESS",
    Economy => "ECONOMY",
});

closed_enum!(ReceptionMode {
    PickUp => "PICK_UP",
    DropOff => "DROP_OFF",
});

impl Default for ShippingParty {
    fn default() -> Self {
        Self::FirstParty
    }
}

/// Supported ISO 3166-1 alpha-3 codes and their display names.
pub const SUPPORTED_COUNTRIES: &[(&str, &str)] = &[
    ("AUS", "Australia"),
    ("BRN", "Brunei Darussalam"),
    ("CAN", "Canada"),
    ("CHN", "China"),
    ("DEU", "Germany"),
    ("FRA", "France"),
    ("GBR", "United Kingdom"),
    ("HKG", "Hong Kong"),
    ("IDN", "Indonesia"),
    ("IND", "India"),
    ("JPN", "Japan"),
    ("KHM", "Cambodia"),
    ("KOR", "Korea, Republic of"),
    ("LAO", "Lao People's Democratic Republic"),
    ("MMR", "Myanmar"),
    ("MYS", "Malaysia"),
    ("NZL", "New Zealand"),
    ("PHL", "Philippines"),
    ("SAU", "Saudi Arabia"),
    ("SGP", "Singapore"),
    ("THA", "Thailand"),
    ("TWN", "Taiwan"),
    ("ARE", "United Arab Emirates"),
    ("USA", "United States of America"),
    ("VNM", "Viet Nam"),
];

pub fn country_name(code: &str) -> Option<&'static str> {
    SUPPORTED_COUNTRIES
        .iter()
        .find(|(supported, _)| *supported == code)
        .map(|(_, name)| *name)
}

pub fn validate_country_code(field_name: &str, code: &str) -> Result<()> {
    validate_length(field_name, code, COUNTRY_CODE_LENGTH)?;
    if code.len() != COUNTRY_CODE_LENGTH || !code.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(IntakeError::validation(
            field_name,
            "Country code must be three uppercase letters (ISO 3166-1 alpha-3)",
        ));
    }
    if country_name(code).is_none() {
        return Err(IntakeError::validation(
            field_name,
            format!("Unsupported country code '{}'", code),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SenderAddress {
    pub full_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub street_address: String,
    pub city: String,
    pub state_or_province: String,
    pub country_code: String,
    pub postal_code: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverAddress {
    pub full_name: String,
    pub contact_number: String,
    pub email_address: String,
    pub street_address: String,
    pub barangay: String,
    pub city: String,
    pub state_or_province: String,
    pub country_code: String,
    pub postal_code: i64,
}

impl Validate for SenderAddress {
    fn validate(&self) -> Result<()> {
        validate_length("senderFullName", &self.full_name, MAX_FULL_NAME)?;
        validate_length("senderContactNumber", &self.contact_number, MAX_CONTACT_NUMBER)?;
        validate_length("senderEmailAddress", &self.email_address, MAX_EMAIL_ADDRESS)?;
        validate_length("senderStreetAddress", &self.street_address, MAX_STREET_ADDRESS)?;
        validate_length("senderCity", &self.city, MAX_CITY)?;
        validate_length(
            "senderStateOrProvince",
            &self.state_or_province,
            MAX_STATE_OR_PROVINCE,
        )?;
        validate_country_code("senderCountryCode", &self.country_code)
    }
}

impl Validate for ReceiverAddress {
    fn validate(&self) -> Result<()> {
        validate_length("receiverFullName", &self.full_name, MAX_FULL_NAME)?;
        validate_length("receiverContactNumber", &self.contact_number, MAX_CONTACT_NUMBER)?;
        validate_length("receiverEmailAddress", &self.email_address, MAX_EMAIL_ADDRESS)?;
        validate_length(
            "receiverStreetAddress",
            &self.street_address,
            MAX_STREET_ADDRESS,
        )?;
        validate_length("receiverBarangay", &self.barangay, MAX_BARANGAY)?;
        validate_length("receiverCity", &self.city, MAX_CITY)?;
        validate_length(
            "receiverStateOrProvince",
            &self.state_or_province,
            MAX_STATE_OR_PROVINCE,
        )?;
        validate_country_code("receiverCountryCode", &self.country_code)
    }
}

/// Write payload shared by create and update.
///
/// Excludes the id, audit fields, `shippingParty` and `isArchived`; those
/// are owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDraft {
    pub shipping_mode: ShippingMode,
    pub shipping_type: ShippingType,
    pub reception_mode: ReceptionMode,
    pub weight_in_kg: f64,
    pub sender: SenderAddress,
    pub receiver: ReceiverAddress,
}

impl PackageDraft {
    /// Parses and validates an untyped wire payload.
    pub fn from_json(payload: &Value) -> Result<Self> {
        let reader = PayloadReader::new(payload)?;

        let draft = Self {
            shipping_mode: reader.member("shippingMode", ShippingMode::SUPPORTED)?,
            shipping_type: reader.member("shippingType", ShippingType::SUPPORTED)?,
            reception_mode: reader.member("receptionMode", ReceptionMode::SUPPORTED)?,
            weight_in_kg: reader.number("weightInKg")?,
            sender: SenderAddress {
                full_name: reader.string("senderFullName", MAX_FULL_NAME)?,
                contact_number: reader.string("senderContactNumber", MAX_CONTACT_NUMBER)?,
                email_address: reader.string("senderEmailAddress", MAX_EMAIL_ADDRESS)?,
                street_address: reader.string("senderStreetAddress", MAX_STREET_ADDRESS)?,
                city: reader.string("senderCity", MAX_CITY)?,
                state_or_province: reader
                    .string("senderStateOrProvince", MAX_STATE_OR_PROVINCE)?,
                country_code: reader.string("senderCountryCode", COUNTRY_CODE_LENGTH)?,
                postal_code: reader.integer("senderPostalCode")?,
            },
            receiver: ReceiverAddress {
                full_name: reader.string("receiverFullName", MAX_FULL_NAME)?,
                contact_number: reader.string("receiverContactNumber", MAX_CONTACT_NUMBER)?,
                email_address: reader.string("receiverEmailAddress", MAX_EMAIL_ADDRESS)?,
                street_address: reader.string("receiverStreetAddress", MAX_STREET_ADDRESS)?,
                barangay: reader.string("receiverBarangay", MAX_BARANGAY)?,
                city: reader.string("receiverCity", MAX_CITY)?,
                state_or_province: reader
                    .string("receiverStateOrProvince", MAX_STATE_OR_PROVINCE)?,
                country_code: reader.string("receiverCountryCode", COUNTRY_CODE_LENGTH)?,
                postal_code: reader.integer("receiverPostalCode")?,
            },
        };

        draft.validate()?;
        Ok(draft)
    }

    /// Weight as persisted: two decimal places.
    ///
    /// Weights too large to scale are kept as given; they carry no fraction.
    pub fn stored_weight(&self) -> f64 {
        let scaled = self.weight_in_kg * 100.0;
        if scaled.is_finite() {
            scaled.round() / 100.0
        } else {
            self.weight_in_kg
        }
    }
}

impl Validate for PackageDraft {
    fn validate(&self) -> Result<()> {
        validate_finite("weightInKg", self.weight_in_kg)?;
        self.sender.validate()?;
        self.receiver.validate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub id: i64,
    pub shipping_party: ShippingParty,
    pub shipping_mode: ShippingMode,
    pub shipping_type: ShippingType,
    pub reception_mode: ReceptionMode,
    pub weight_in_kg: Option<f64>,
    pub sender: SenderAddress,
    pub receiver: ReceiverAddress,
    pub created_at: DateTime<Utc>,
    pub created_by_id: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by_id: String,
    pub created_in_hub_id: i64,
    pub is_archived: bool,
}

impl Package {
    /// Flat camelCase view, matching the payload field names.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "shippingParty": self.shipping_party,
            "shippingMode": self.shipping_mode,
            "shippingType": self.shipping_type,
            "receptionMode": self.reception_mode,
            "weightInKg": self.weight_in_kg,
            "senderFullName": self.sender.full_name,
            "senderContactNumber": self.sender.contact_number,
            "senderEmailAddress": self.sender.email_address,
            "senderStreetAddress": self.sender.street_address,
            "senderCity": self.sender.city,
            "senderStateOrProvince": self.sender.state_or_province,
            "senderCountryCode": self.sender.country_code,
            "senderPostalCode": self.sender.postal_code,
            "receiverFullName": self.receiver.full_name,
            "receiverContactNumber": self.receiver.contact_number,
            "receiverEmailAddress": self.receiver.email_address,
            "receiverStreetAddress": self.receiver.street_address,
            "receiverBarangay": self.receiver.barangay,
            "receiverCity": self.receiver.city,
            "receiverStateOrProvince": self.receiver.state_or_province,
            "receiverCountryCode": self.receiver.country_code,
            "receiverPostalCode": self.receiver.postal_code,
            "createdAt": self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "createdById": self.created_by_id,
            "updatedAt": self.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            "updatedById": self.updated_by_id,
            "createdInHubId": self.created_in_hub_id,
            "isArchived": self.is_archived,
        })
    }

    /// True when every writable field equals the draft (weight compared as stored).
    pub fn matches_draft(&self, draft: &PackageDraft) -> bool {
        self.shipping_mode == draft.shipping_mode
            && self.shipping_type == draft.shipping_type
            && self.reception_mode == draft.reception_mode
            && self.weight_in_kg == Some(draft.stored_weight())
            && self.sender == draft.sender
            && self.receiver == draft.receiver
    }
}

/// Audit values written alongside a create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditStamp {
    pub at: DateTime<Utc>,
    pub user_id: String,
    pub hub_id: i64,
}

/// Write acknowledgment returned by every mutating operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WriteAck {
    pub rows_affected: usize,
    pub inserted_id: Option<i64>,
}
