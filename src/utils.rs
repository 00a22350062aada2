// Utility functions
use serde::{Deserialize, Deserializer};

/// Decodes an explicit JSON `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Formats a coordinate the way the marketplace query expects it (six decimals).
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
    }

    #[test]
    fn null_and_missing_become_default() {
        let probe: Probe = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(probe.name, "");
        let probe: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.name, "");
        let probe: Probe = serde_json::from_str(r#"{"name": "Large"}"#).unwrap();
        assert_eq!(probe.name, "Large");
    }

    #[test]
    fn coordinates_use_six_decimals() {
        assert_eq!(format_coordinate(25.0330), "25.033000");
        assert_eq!(format_coordinate(-121.5654321), "-121.565432");
    }
}
