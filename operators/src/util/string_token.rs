/// Creates a unit struct that (de)serializes as the fixed string `$value`.
///
/// This is useful for untagged enums where one variant is just a keyword, e.g.
/// `"bounds": "data"` vs. `"bounds": { "min": 0, "max": 1 }`.
#[macro_export]
macro_rules! string_token {
    ($name:ident, $value:literal) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str($value)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct TokenVisitor;

                impl serde::de::Visitor<'_> for TokenVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        write!(formatter, "the string \"{}\"", $value)
                    }

                    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        if v == $value {
                            Ok($name)
                        } else {
                            Err(E::invalid_value(serde::de::Unexpected::Str(v), &self))
                        }
                    }
                }

                deserializer.deserialize_str(TokenVisitor)
            }
        }
    };
}
