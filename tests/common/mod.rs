#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use package_intake::core::Clock;
use package_intake::{
    PackageDraft, ReceiverAddress, ReceptionMode, SenderAddress, ShippingMode, ShippingType,
};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Clock that advances one second on every reading.
pub struct StepClock {
    next: Mutex<DateTime<Utc>>,
}

impl StepClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            next: Mutex::new(start),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let now = *next;
        *next = now + Duration::seconds(1);
        now
    }
}

pub fn sample_payload() -> Value {
    json!({
        "shippingMode": "AIR",
        "shippingType": "EXPRESS",
        "receptionMode": "PICK_UP",
        "weightInKg": 12.5,
        "senderFullName": "Juan dela Cruz",
        "senderContactNumber": "09171234567",
        "senderEmailAddress": "juan@example.com",
        "senderStreetAddress": "123 Rizal Ave",
        "senderCity": "Manila",
        "senderStateOrProvince": "Metro Manila",
        "senderCountryCode": "PHL",
        "senderPostalCode": 1000,
        "receiverFullName": "Jane Doe",
        "receiverContactNumber": "5551234567",
        "receiverEmailAddress": "jane@example.com",
        "receiverStreetAddress": "1 Market St",
        "receiverBarangay": "N/A",
        "receiverCity": "San Francisco",
        "receiverStateOrProvince": "California",
        "receiverCountryCode": "USA",
        "receiverPostalCode": 94105
    })
}

pub fn sample_draft() -> PackageDraft {
    PackageDraft {
        shipping_mode: ShippingMode::Air,
        shipping_type: ShippingType::Express,
        reception_mode: ReceptionMode::PickUp,
        weight_in_kg: 12.5,
        sender: SenderAddress {
            full_name: "Juan dela Cruz".to_string(),
            contact_number: "09171234567".to_string(),
            email_address: "juan@example.com".to_string(),
            street_address: "123 Rizal Ave".to_string(),
            city: "Manila".to_string(),
            state_or_province: "Metro Manila".to_string(),
            country_code: "PHL".to_string(),
            postal_code: 1000,
        },
        receiver: ReceiverAddress {
            full_name: "Jane Doe".to_string(),
            contact_number: "5551234567".to_string(),
            email_address: "jane@example.com".to_string(),
            street_address: "1 Market St".to_string(),
            barangay: "N/A".to_string(),
            city: "San Francisco".to_string(),
            state_or_province: "California".to_string(),
            country_code: "USA".to_string(),
            postal_code: 94105,
        },
    }
}

pub fn other_draft() -> PackageDraft {
    PackageDraft {
        shipping_mode: ShippingMode::Sea,
        shipping_type: ShippingType::Economy,
        reception_mode: ReceptionMode::DropOff,
        weight_in_kg: 40.25,
        sender: SenderAddress {
            full_name: "Maria Santos".to_string(),
            contact_number: "09181112222".to_string(),
            email_address: "maria@example.com".to_string(),
            street_address: "45 Colon St".to_string(),
            city: "Cebu City".to_string(),
            state_or_province: "Cebu".to_string(),
            country_code: "PHL".to_string(),
            postal_code: 6000,
        },
        receiver: ReceiverAddress {
            full_name: "Ana Reyes".to_string(),
            contact_number: "09193334444".to_string(),
            email_address: "ana@example.com".to_string(),
            street_address: "7 Mabini St".to_string(),
            barangay: "Poblacion".to_string(),
            city: "Davao City".to_string(),
            state_or_province: "Davao del Sur".to_string(),
            country_code: "PHL".to_string(),
            postal_code: 8000,
        },
    }
}
