use std::fmt;

use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encoder::{
    CustomerType, Delayed, FeatureVector, TravelClass, TravelType, Vocabulary, FEATURE_COUNT,
    FEATURE_NAMES,
};

pub const RATING_MAX: u8 = 5;
pub const AGE_MAX: u8 = 130;
pub const RATING_COUNT: usize = 14;

/// サービス評価（0〜5）
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, Deref,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, CustomerError> {
        match value <= RATING_MAX {
            true => Ok(Self(value)),
            false => Err(CustomerError::RatingOutOfRange(value)),
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = CustomerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// 年齢（0〜130）
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, Deref,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    pub fn new(value: u8) -> Result<Self, CustomerError> {
        match value <= AGE_MAX {
            true => Ok(Self(value)),
            false => Err(CustomerError::AgeOutOfRange(value)),
        }
    }
}

impl TryFrom<u8> for Age {
    type Error = CustomerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Age> for u8 {
    fn from(value: Age) -> Self {
        value.0
    }
}

/// 入力フォームの評価項目（フィールド名, 表示名, ヘルプ）
pub const RATING_FIELDS: [(&str, &str, &str); RATING_COUNT] = [
    ("seat_comfort", "Seat comfort", "Rate the seat comfort"),
    (
        "departure_arrival_convenience",
        "Departure/Arrival time convenient",
        "Rate the convenience of departure/arrival time",
    ),
    ("food_drink", "Food and drink", "Rate the food and drink service"),
    ("gate_location", "Gate location", "Rate the gate location convenience"),
    ("inflight_wifi", "Inflight wifi service", "Rate the inflight wifi service"),
    (
        "inflight_entertainment",
        "Inflight entertainment",
        "Rate the inflight entertainment",
    ),
    ("online_support", "Online support", "Rate the online support"),
    (
        "ease_online_booking",
        "Ease of Online booking",
        "Rate the ease of online booking",
    ),
    ("onboard_service", "On-board service", "Rate the on-board service"),
    ("leg_room_service", "Leg room service", "Rate the leg room service"),
    ("baggage_handling", "Baggage handling", "Rate the baggage handling service"),
    ("checkin_service", "Check-in service", "Rate the checkin service"),
    ("cleanliness", "Cleanliness", "Rate the cleanliness"),
    ("online_boarding", "Online boarding", "Rate the online boarding process"),
];

/// 顧客レコード
///
/// 1回の予測のためだけに生成され、永続化されない。
/// フォームの入力値はデシリアライズ時に検証される。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_type: CustomerType,
    pub age: Age,
    pub type_of_travel: TravelType,
    pub travel_class: TravelClass,
    pub flight_distance: u32,
    pub seat_comfort: Rating,
    pub departure_arrival_convenience: Rating,
    pub food_drink: Rating,
    pub gate_location: Rating,
    pub inflight_wifi: Rating,
    pub inflight_entertainment: Rating,
    pub online_support: Rating,
    pub ease_online_booking: Rating,
    pub onboard_service: Rating,
    pub leg_room_service: Rating,
    pub baggage_handling: Rating,
    pub checkin_service: Rating,
    pub cleanliness: Rating,
    pub online_boarding: Rating,
    pub departure_delay: u32,
    pub arrival_delay: u32,
    pub delayed: Delayed,
}

impl CustomerRecord {
    /// 評価項目を `RATING_FIELDS` の順で返す
    pub fn ratings(&self) -> [Rating; RATING_COUNT] {
        [
            self.seat_comfort,
            self.departure_arrival_convenience,
            self.food_drink,
            self.gate_location,
            self.inflight_wifi,
            self.inflight_entertainment,
            self.online_support,
            self.ease_online_booking,
            self.onboard_service,
            self.leg_room_service,
            self.baggage_handling,
            self.checkin_service,
            self.cleanliness,
            self.online_boarding,
        ]
    }

    pub fn encode(&self) -> FeatureVector {
        let mut features = [0.0; FEATURE_COUNT];
        features[0] = f64::from(self.customer_type.encode());
        features[1] = f64::from(*self.age);
        features[2] = f64::from(self.type_of_travel.encode());
        features[3] = f64::from(self.travel_class.encode());
        features[4] = f64::from(self.flight_distance);
        for (slot, rating) in features[5..5 + RATING_COUNT]
            .iter_mut()
            .zip(self.ratings())
        {
            *slot = f64::from(*rating);
        }
        features[19] = f64::from(self.departure_delay);
        features[20] = f64::from(self.arrival_delay);
        features[21] = f64::from(self.delayed.encode());
        FeatureVector::from(features)
    }

    /// 確認表示用の（表示名, 値）一覧。値は入力のまま表示する
    pub fn display_fields(&self) -> Vec<(&'static str, String)> {
        let mut values = vec![
            self.customer_type.to_string(),
            self.age.to_string(),
            self.type_of_travel.to_string(),
            self.travel_class.to_string(),
            self.flight_distance.to_string(),
        ];
        values.extend(self.ratings().iter().map(Rating::to_string));
        values.extend([
            self.departure_delay.to_string(),
            self.arrival_delay.to_string(),
            self.delayed.to_string(),
        ]);
        FEATURE_NAMES.iter().copied().zip(values).collect()
    }
}

impl fmt::Display for CustomerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} / {}",
            self.customer_type, self.age, self.type_of_travel, self.travel_class
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustomerError {
    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("Age must be between 0 and 130, got {0}")]
    AgeOutOfRange(u8),
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_record() -> CustomerRecord {
        let four = Rating::new(4).unwrap();
        CustomerRecord {
            customer_type: CustomerType::Loyal,
            age: Age::new(30).unwrap(),
            type_of_travel: TravelType::Business,
            travel_class: TravelClass::Business,
            flight_distance: 1000,
            seat_comfort: four,
            departure_arrival_convenience: four,
            food_drink: four,
            gate_location: four,
            inflight_wifi: four,
            inflight_entertainment: four,
            online_support: four,
            ease_online_booking: four,
            onboard_service: four,
            leg_room_service: four,
            baggage_handling: four,
            checkin_service: four,
            cleanliness: four,
            online_boarding: four,
            departure_delay: 0,
            arrival_delay: 0,
            delayed: Delayed::No,
        }
    }

    #[test]
    fn test_rating_range() {
        for value in 0..=RATING_MAX {
            let rating = Rating::new(value).unwrap();
            assert!(*rating <= RATING_MAX);
        }
        assert_eq!(Rating::new(6), Err(CustomerError::RatingOutOfRange(6)));
        assert_eq!(Rating::new(255), Err(CustomerError::RatingOutOfRange(255)));
    }

    #[test]
    fn test_age_range() {
        assert_eq!(*Age::new(0).unwrap(), 0);
        assert_eq!(*Age::new(130).unwrap(), 130);
        assert_eq!(Age::new(131), Err(CustomerError::AgeOutOfRange(131)));
    }

    #[test]
    fn test_encode() {
        let features = sample_record().encode();
        assert_eq!(
            features.as_slice(),
            &[
                1.0, 30.0, 1.0, 1.0, 1000.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0,
                4.0, 4.0, 4.0, 4.0, 0.0, 0.0, 0.0,
            ]
        );
    }

    #[test]
    fn test_encode_delayed_changes_last_element_only() {
        let on_time = sample_record();
        let delayed = CustomerRecord {
            delayed: Delayed::Yes,
            ..on_time.clone()
        };
        let (a, b) = (on_time.encode(), delayed.encode());
        assert_eq!(a.as_slice()[..FEATURE_COUNT - 1], b.as_slice()[..FEATURE_COUNT - 1]);
        assert_eq!(a.get(FEATURE_COUNT - 1), Some(0.0));
        assert_eq!(b.get(FEATURE_COUNT - 1), Some(1.0));
    }

    #[test]
    fn test_encode_rating_order() {
        let record = CustomerRecord {
            seat_comfort: Rating::new(0).unwrap(),
            online_boarding: Rating::new(5).unwrap(),
            ..sample_record()
        };
        let features = record.encode();
        assert_eq!(features.get(5), Some(0.0));
        assert_eq!(features.get(18), Some(5.0));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let mut json = serde_json::to_value(sample_record()).unwrap();
        json["cleanliness"] = serde_json::json!(6);
        assert!(serde_json::from_value::<CustomerRecord>(json.clone()).is_err());
        json["cleanliness"] = serde_json::json!(-1);
        assert!(serde_json::from_value::<CustomerRecord>(json.clone()).is_err());
        json["cleanliness"] = serde_json::json!(5);
        json["customer_type"] = serde_json::json!("Loyal");
        assert!(serde_json::from_value::<CustomerRecord>(json).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["customer_type"], "Loyal Customer");
        assert_eq!(json["travel_class"], "Business");
        assert_eq!(json["seat_comfort"], 4);
        assert_eq!(
            serde_json::from_value::<CustomerRecord>(json).unwrap(),
            sample_record()
        );
    }

    #[test]
    fn test_display_fields() {
        let record = CustomerRecord {
            flight_distance: 12345,
            ..sample_record()
        };
        let fields = record.display_fields();
        assert_eq!(fields.len(), FEATURE_COUNT);
        assert_eq!(fields[0], ("Customer Type", "Loyal Customer".to_owned()));
        assert_eq!(fields[4], ("Flight Distance", "12345".to_owned()));
        assert_eq!(fields[16], ("Check-in service", "4".to_owned()));
        assert_eq!(fields[21], ("Delayed", "No".to_owned()));
    }

    #[test]
    fn test_feature_names_match_rating_fields() {
        let names = &FEATURE_NAMES[5..5 + RATING_COUNT];
        for (name, (_, label, _)) in names.iter().zip(RATING_FIELDS) {
            assert_eq!(name, &label);
        }
    }
}
