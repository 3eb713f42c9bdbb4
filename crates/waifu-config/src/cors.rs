use std::time::Duration;

use serde::Deserialize;

/// CORS configuration for browser clients of the voice endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrArray,
    /// Allowed request headers (wildcard "*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrArray,
    /// Response headers readable by the browser, e.g. `content-disposition`
    #[serde(default)]
    pub expose_headers: Vec<String>,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

/// Either a wildcard "*" or an explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnyOrArray {
    #[default]
    Any,
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for AnyOrArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de;

        struct AnyOrArrayVisitor;

        impl<'de> de::Visitor<'de> for AnyOrArrayVisitor {
            type Value = AnyOrArray;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("\"*\" or array of strings")
            }

            fn visit_str<E>(self, v: &str) -> Result<AnyOrArray, E>
            where
                E: de::Error,
            {
                if v == "*" {
                    Ok(AnyOrArray::Any)
                } else {
                    Ok(AnyOrArray::List(vec![v.to_owned()]))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<AnyOrArray, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    if value == "*" {
                        return Ok(AnyOrArray::Any);
                    }
                    values.push(value);
                }
                Ok(AnyOrArray::List(values))
            }
        }

        deserializer.deserialize_any(AnyOrArrayVisitor)
    }
}

impl CorsConfig {
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_and_lists() {
        let config: CorsConfig = toml::from_str(
            r#"
            origins = ["https://waifu.example", "http://localhost:3000"]
            methods = "*"
            headers = ["content-type", "*"]
            expose_headers = ["content-disposition"]
            max_age = 600
        "#,
        )
        .unwrap();

        assert_eq!(
            config.origins,
            AnyOrArray::List(vec!["https://waifu.example".to_owned(), "http://localhost:3000".to_owned()])
        );
        assert_eq!(config.methods, AnyOrArray::Any);
        assert_eq!(config.headers, AnyOrArray::Any);
        assert_eq!(config.max_age_duration(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn single_origin_string() {
        let config: CorsConfig = toml::from_str(r#"origins = "https://waifu.example""#).unwrap();

        assert_eq!(config.origins, AnyOrArray::List(vec!["https://waifu.example".to_owned()]));
        assert_eq!(config.methods, AnyOrArray::Any);
        assert!(config.max_age_duration().is_none());
    }
}
