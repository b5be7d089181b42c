use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use strum::{AsRefStr, EnumIter};
use thiserror::Error;

/// The kind of material a resource points at
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "database", derive(sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ResourceKind {
    /// An uploaded document, usually a shared file link
    #[cfg_attr(feature = "database", sea_orm(string_value = "pdf"))]
    Pdf,
    /// A segment of a YouTube video, bounded by `from`/`to`
    #[cfg_attr(feature = "database", sea_orm(string_value = "youtube"))]
    Youtube,
    /// Any other web page
    #[cfg_attr(feature = "database", sea_orm(string_value = "url"))]
    Url,
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

/// Errors raised while building or patching a resource
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Resource link is required.")]
    MissingLink,

    #[error("YouTube resources require 'from' and 'to' fields.")]
    MissingPlayback,

    #[error("Invalid resource fields: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The user-editable fields of a resource, in their wire shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResourceFields {
    #[serde(rename = "type")]
    pub kind: ResourceKind,

    #[serde(default)]
    pub link: String,

    #[serde(rename = "linkName", default, skip_serializing_if = "Option::is_none")]
    pub link_name: Option<String>,

    /// Playback start in seconds
    #[serde(
        default,
        deserialize_with = "deserialize_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub from: Option<i32>,

    /// Playback end in seconds
    #[serde(
        default,
        deserialize_with = "deserialize_seconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub to: Option<i32>,
}

/// Reads a playback bound sent as a number or as numeric text
///
/// `null` and blank text mean the bound is unset. Bounds must be whole seconds,
/// which is what YouTube's `start`/`end` player parameters take.
fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Seconds {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Seconds>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Seconds::Number(n)) => n,
        Some(Seconds::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("'{text}' is not a number of seconds")))?
        }
    };

    if !value.is_finite()
        || value.fract() != 0.0
        || value < f64::from(i32::MIN)
        || value > f64::from(i32::MAX)
    {
        return Err(de::Error::custom(format!(
            "{value} is not a whole number of seconds"
        )));
    }

    Ok(Some(value as i32))
}

impl ResourceFields {
    /// Checks the field combination is storable
    ///
    /// # Returns
    /// `Ok(())` when the link is present and, for YouTube resources, both playback bounds are set
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.link.trim().is_empty() {
            return Err(ResourceError::MissingLink);
        }

        if self.kind == ResourceKind::Youtube && (self.from.is_none() || self.to.is_none()) {
            return Err(ResourceError::MissingPlayback);
        }

        Ok(())
    }

    /// Shallow-merges `updates` over these fields and validates the outcome
    ///
    /// Keys that are not resource fields are accepted and dropped. An explicit `null`
    /// clears an optional field.
    ///
    /// # Arguments
    /// * `updates` - A JSON object keyed by wire field names (`type`, `link`, `linkName`, `from`, `to`)
    ///
    /// # Returns
    /// The merged fields, or the reason the merge produced an invalid resource
    pub fn merge(&self, updates: &Map<String, Value>) -> Result<Self, ResourceError> {
        let mut current = serde_json::to_value(self)?;

        if let Value::Object(fields) = &mut current {
            for (key, value) in updates {
                fields.insert(key.clone(), value.clone());
            }
        }

        let merged: ResourceFields = serde_json::from_value(current)?;
        merged.validate()?;

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn pdf() -> ResourceFields {
        ResourceFields {
            kind: ResourceKind::Pdf,
            link: "http://x/doc.pdf".to_string(),
            link_name: Some("Notes".to_string()),
            from: None,
            to: None,
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(ResourceKind::Pdf.as_str(), "pdf");
        assert_eq!(ResourceKind::Youtube.as_str(), "youtube");
        assert_eq!(ResourceKind::iter().count(), 3);

        let kind: ResourceKind = serde_json::from_value(json!("url")).unwrap();
        assert_eq!(kind, ResourceKind::Url);
        assert!(serde_json::from_value::<ResourceKind>(json!("video")).is_err());
    }

    #[test]
    fn test_fields_use_wire_names() {
        let fields: ResourceFields = serde_json::from_value(json!({
            "type": "youtube",
            "link": "https://youtu.be/abc",
            "linkName": "Lecture 1",
            "from": 30,
            "to": 95
        }))
        .unwrap();

        assert_eq!(fields.kind, ResourceKind::Youtube);
        assert_eq!(fields.link_name.as_deref(), Some("Lecture 1"));
        assert_eq!((fields.from, fields.to), (Some(30), Some(95)));
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_link() {
        let mut fields = pdf();
        fields.link = "   ".to_string();
        assert!(matches!(fields.validate(), Err(ResourceError::MissingLink)));
    }

    #[test]
    fn test_validate_youtube_needs_both_bounds() {
        let mut fields = pdf();
        fields.kind = ResourceKind::Youtube;
        fields.from = Some(10);
        assert!(matches!(
            fields.validate(),
            Err(ResourceError::MissingPlayback)
        ));

        fields.to = Some(5);
        // Ordering of the bounds is not checked
        assert!(fields.validate().is_ok());
    }

    #[test]
    fn test_merge_overrides_and_keeps_rest() {
        let merged = pdf()
            .merge(&object(json!({ "link": "http://x/v2.pdf" })))
            .unwrap();

        assert_eq!(merged.link, "http://x/v2.pdf");
        assert_eq!(merged.link_name.as_deref(), Some("Notes"));
        assert_eq!(merged.kind, ResourceKind::Pdf);
    }

    #[test]
    fn test_merge_to_youtube_without_bounds_is_rejected() {
        let result = pdf().merge(&object(json!({ "type": "youtube" })));
        assert!(matches!(result, Err(ResourceError::MissingPlayback)));

        let merged = pdf()
            .merge(&object(json!({ "type": "youtube", "from": 0, "to": 60 })))
            .unwrap();
        assert_eq!(merged.kind, ResourceKind::Youtube);
        assert_eq!(merged.from, Some(0));
    }

    #[test]
    fn test_merge_ignores_unknown_keys_and_clears_with_null() {
        let merged = pdf()
            .merge(&object(json!({ "linkName": null, "rating": 5 })))
            .unwrap();

        assert_eq!(merged.link_name, None);
        assert_eq!(merged.link, "http://x/doc.pdf");
    }

    #[test]
    fn test_bounds_accept_numeric_text() {
        let fields: ResourceFields = serde_json::from_value(json!({
            "type": "youtube",
            "link": "https://youtu.be/abc",
            "from": "30",
            "to": " 95 "
        }))
        .unwrap();
        assert_eq!((fields.from, fields.to), (Some(30), Some(95)));

        let fields: ResourceFields = serde_json::from_value(json!({
            "type": "youtube",
            "link": "https://youtu.be/abc",
            "from": 0.0,
            "to": null
        }))
        .unwrap();
        assert_eq!((fields.from, fields.to), (Some(0), None));
    }

    #[test]
    fn test_bounds_reject_fractions_and_words() {
        for bound in [json!(12.5), json!("12.5"), json!("soon"), json!(true)] {
            let result = serde_json::from_value::<ResourceFields>(json!({
                "type": "youtube",
                "link": "https://youtu.be/abc",
                "from": bound,
                "to": 60
            }));
            assert!(result.is_err(), "accepted {bound}");
        }
    }

    #[test]
    fn test_merge_blank_bounds_clear_them() {
        let merged = pdf()
            .merge(&object(json!({
                "type": "pdf",
                "link": "http://x/v2.pdf",
                "from": "",
                "to": ""
            })))
            .unwrap();
        assert_eq!((merged.from, merged.to), (None, None));

        let video = pdf()
            .merge(&object(json!({ "type": "youtube", "from": "5", "to": "65" })))
            .unwrap();
        let result = video.merge(&object(json!({ "from": "", "to": "" })));
        assert!(matches!(result, Err(ResourceError::MissingPlayback)));
    }

    #[test]
    fn test_merge_rejects_bad_kind() {
        let result = pdf().merge(&object(json!({ "type": "podcast" })));
        assert!(matches!(result, Err(ResourceError::Malformed(_))));
    }
}
