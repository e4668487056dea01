use serde::{Deserialize, Deserializer};

/// Tri-state field for partial updates: distinguishes a field that was absent
/// from the request body (leave unchanged) from an explicit `null` (set NULL).
///
/// Use with `#[serde(default)]` so an absent field deserializes to `Missing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Applies the patch over the current stored value.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Missing => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|opt| match opt {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Body {
        #[serde(default)]
        note: Patch<String>,
    }

    #[test]
    fn absent_field_is_missing() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.note, Patch::Missing);
    }

    #[test]
    fn explicit_null_is_null() {
        let body: Body = serde_json::from_str(r#"{"note": null}"#).unwrap();
        assert_eq!(body.note, Patch::Null);
    }

    #[test]
    fn value_is_value() {
        let body: Body = serde_json::from_str(r#"{"note": "hello"}"#).unwrap();
        assert_eq!(body.note, Patch::Value("hello".to_string()));
    }

    #[test]
    fn resolve_applies_over_current() {
        let current = Some("old".to_string());
        assert_eq!(Patch::Missing.resolve(current.clone()), current);
        assert_eq!(Patch::<String>::Null.resolve(current.clone()), None);
        assert_eq!(
            Patch::Value("new".to_string()).resolve(current),
            Some("new".to_string())
        );
    }
}
