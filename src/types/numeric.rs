use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Taken from https://github.com/near/near-sdk-rs/blob/master/near-sdk/src/json_types/integers.rs
// with one twist: the indexing services disagree on encoding (NearBlocks sends
// string timestamps, Pikespeak sends plain numbers), so decoding accepts both.
macro_rules! impl_str_type {
    ($iden: ident, $ty: tt) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            derive_more::From,
            derive_more::Into,
        )]
        pub struct $iden(pub $ty);

        impl fmt::Display for $iden {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl Serialize for $iden {
            fn serialize<S>(
                &self,
                serializer: S,
            ) -> Result<<S as Serializer>::Ok, <S as Serializer>::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.0.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $iden {
            fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
            where
                D: Deserializer<'de>,
            {
                match serde_json::Value::deserialize(deserializer)? {
                    serde_json::Value::String(s) => Ok(Self(str::parse::<$ty>(&s).map_err(
                        |err| serde::de::Error::custom(err.to_string()),
                    )?)),
                    serde_json::Value::Number(n) => Ok(Self(n.as_u64().ok_or_else(|| {
                        serde::de::Error::custom(format!("Cannot represent {} as an integer", n))
                    })? as $ty)),
                    other => Err(serde::de::Error::custom(format!(
                        "Expected a string or a number, got {}",
                        other
                    ))),
                }
            }
        }
    };
}

impl_str_type!(U128, u128);
impl_str_type!(U64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_strings_and_numbers() {
        assert_eq!(
            serde_json::from_str::<U64>("\"1655571176644255779\"").unwrap(),
            U64(1655571176644255779)
        );
        assert_eq!(
            serde_json::from_str::<U64>("1655571176644255779").unwrap(),
            U64(1655571176644255779)
        );
        assert_eq!(
            serde_json::from_str::<U128>("\"340282366920938463463374607431768211455\"").unwrap(),
            U128(u128::MAX)
        );
        assert!(serde_json::from_str::<U64>("true").is_err());
        assert!(serde_json::from_str::<U64>("-5").is_err());
    }

    #[test]
    fn test_encodes_as_string() {
        assert_eq!(
            serde_json::to_string(&U128(17201878399999996928)).unwrap(),
            "\"17201878399999996928\""
        );
    }
}
