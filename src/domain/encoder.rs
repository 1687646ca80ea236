use std::{fmt, str::FromStr};

use derive_more::{Deref, From};
use serde::Serialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

/// 語彙とその整数コードの対応
///
/// `CLASSES` の並びはモデルの学習時に使われたラベルエンコーディングと一致していなければならない。
pub trait Vocabulary: Copy + Eq + fmt::Debug + 'static {
    const NAME: &'static str;
    const CLASSES: &'static [Self];

    fn encode(self) -> u8;
    fn label(self) -> &'static str;

    fn decode(code: u8) -> Result<Self, EncodeError> {
        Self::CLASSES
            .iter()
            .copied()
            .find(|class| class.encode() == code)
            .ok_or(EncodeError::UnknownCode {
                vocabulary: Self::NAME,
                code,
            })
    }

    fn parse(label: &str) -> Result<Self, EncodeError> {
        Self::CLASSES
            .iter()
            .copied()
            .find(|class| class.label() == label)
            .ok_or_else(|| EncodeError::UnknownLabel {
                vocabulary: Self::NAME,
                label: label.to_owned(),
            })
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident as $vocabulary:literal {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
        #[repr(u8)]
        pub enum $name {
            $($variant = $code),+
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $vocabulary;
            const CLASSES: &'static [Self] = &[$(Self::$variant),+];

            fn encode(self) -> u8 {
                self as u8
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = EncodeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

vocabulary! {
    /// 顧客区分
    CustomerType as "customer type" {
        Disloyal = 0 => "Disloyal Customer",
        Loyal = 1 => "Loyal Customer",
    }
}

vocabulary! {
    /// 旅行目的
    TravelType as "type of travel" {
        Personal = 0 => "Personal Travel",
        Business = 1 => "Business travel",
    }
}

vocabulary! {
    /// 座席クラス
    TravelClass as "class" {
        Economy = 0 => "Economy",
        Business = 1 => "Business",
        EconomyPlus = 2 => "Economy Plus",
    }
}

vocabulary! {
    /// 遅延の有無
    Delayed as "delayed" {
        No = 0 => "No",
        Yes = 1 => "Yes",
    }
}

pub const FEATURE_COUNT: usize = 22;

/// 特徴量ベクトルの各要素名（モデルへの入力順）
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Customer Type",
    "Age",
    "Type of Travel",
    "Class",
    "Flight Distance",
    "Seat comfort",
    "Departure/Arrival time convenient",
    "Food and drink",
    "Gate location",
    "Inflight wifi service",
    "Inflight entertainment",
    "Online support",
    "Ease of Online booking",
    "On-board service",
    "Leg room service",
    "Baggage handling",
    "Check-in service",
    "Cleanliness",
    "Online boarding",
    "Departure Delay in Minutes",
    "Arrival Delay in Minutes",
    "Delayed",
];

/// 分類器に渡す特徴量ベクトル
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deref, From)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// 特徴量名と値の組
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("'{label}' is not a valid {vocabulary}")]
    UnknownLabel {
        vocabulary: &'static str,
        label: String,
    },
    #[error("{code} is not a valid {vocabulary} code")]
    UnknownCode { vocabulary: &'static str, code: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bijection<V: Vocabulary>() {
        for (position, class) in V::CLASSES.iter().copied().enumerate() {
            assert_eq!(class.encode() as usize, position);
            assert_eq!(V::decode(class.encode()), Ok(class));
            assert_eq!(V::parse(class.label()), Ok(class));
        }
    }

    #[test]
    fn test_vocabularies_are_bijections() {
        assert_bijection::<CustomerType>();
        assert_bijection::<TravelType>();
        assert_bijection::<TravelClass>();
        assert_bijection::<Delayed>();
    }

    #[test]
    fn test_encoded_codes() {
        assert_eq!(CustomerType::Disloyal.encode(), 0);
        assert_eq!(CustomerType::Loyal.encode(), 1);
        assert_eq!(TravelType::Personal.encode(), 0);
        assert_eq!(TravelType::Business.encode(), 1);
        assert_eq!(TravelClass::Economy.encode(), 0);
        assert_eq!(TravelClass::Business.encode(), 1);
        assert_eq!(TravelClass::EconomyPlus.encode(), 2);
        assert_eq!(Delayed::No.encode(), 0);
        assert_eq!(Delayed::Yes.encode(), 1);
    }

    #[test]
    fn test_parse_label() {
        assert_eq!(
            "Loyal Customer".parse::<CustomerType>(),
            Ok(CustomerType::Loyal)
        );
        assert_eq!(
            "Economy Plus".parse::<TravelClass>(),
            Ok(TravelClass::EconomyPlus)
        );
        // 語彙は大文字小文字を区別する
        assert_eq!(
            "Business Travel".parse::<TravelType>(),
            Err(EncodeError::UnknownLabel {
                vocabulary: "type of travel",
                label: "Business Travel".to_owned(),
            })
        );
    }

    #[test]
    fn test_decode_unknown_code() {
        assert_eq!(
            Delayed::decode(2),
            Err(EncodeError::UnknownCode {
                vocabulary: "delayed",
                code: 2,
            })
        );
        assert!(TravelClass::decode(3).is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&CustomerType::Loyal).unwrap(),
            "\"Loyal Customer\""
        );
        assert_eq!(
            serde_json::from_str::<Delayed>("\"Yes\"").unwrap(),
            Delayed::Yes
        );
        assert!(serde_json::from_str::<Delayed>("\"yes\"").is_err());
    }

    #[test]
    fn test_named_features() {
        let mut values = [0.0; FEATURE_COUNT];
        values[4] = 1000.0;
        let features = FeatureVector::from(values);
        let named: Vec<_> = features.named().collect();
        assert_eq!(named.len(), FEATURE_COUNT);
        assert_eq!(named[0], ("Customer Type", 0.0));
        assert_eq!(named[4], ("Flight Distance", 1000.0));
        assert_eq!(named[16].0, "Check-in service");
    }
}
