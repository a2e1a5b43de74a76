// Migration task model and field-level validation

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One migration mapping: a source path plus the target it lands on.
///
/// Field names are serialized exactly as the downstream migration tool
/// expects them (PascalCase); do not rename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "SourcePath", default)]
    pub source_path: String,
    #[serde(rename = "TargetPath", default)]
    pub target_path: String,
    #[serde(rename = "TargetList", default)]
    pub target_list: String,
    #[serde(rename = "TargetListRelativePath", default)]
    pub target_list_relative_path: String,
}

impl Task {
    /// A task is exportable iff every field is non-empty after trimming.
    ///
    /// Values are stored verbatim; trimming happens only here, at
    /// validation time.
    pub fn is_valid(&self) -> bool {
        !self.source_path.trim().is_empty()
            && !self.target_path.trim().is_empty()
            && !self.target_list.trim().is_empty()
            && !self.target_list_relative_path.trim().is_empty()
    }

    /// Read a field by name.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::SourcePath => &self.source_path,
            Field::TargetPath => &self.target_path,
            Field::TargetList => &self.target_list,
            Field::TargetListRelativePath => &self.target_list_relative_path,
        }
    }

    /// Set a field by name. The value is taken verbatim, untrimmed.
    pub fn set_field(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::SourcePath => &mut self.source_path,
            Field::TargetPath => &mut self.target_path,
            Field::TargetList => &mut self.target_list,
            Field::TargetListRelativePath => &mut self.target_list_relative_path,
        };
        *slot = value.to_string();
    }
}

/// The four editable field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SourcePath,
    TargetPath,
    TargetList,
    TargetListRelativePath,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::SourcePath,
        Field::TargetPath,
        Field::TargetList,
        Field::TargetListRelativePath,
    ];

    /// The exact JSON key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::SourcePath => "SourcePath",
            Field::TargetPath => "TargetPath",
            Field::TargetList => "TargetList",
            Field::TargetListRelativePath => "TargetListRelativePath",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    /// Case-insensitive, so CLI users can type `sourcepath`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A field name that is not one of the four known fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected SourcePath, TargetPath, TargetList or TargetListRelativePath)")]
pub struct UnknownField(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> Task {
        Task {
            source_path: "a".to_string(),
            target_path: "b".to_string(),
            target_list: "c".to_string(),
            target_list_relative_path: "d".to_string(),
        }
    }

    #[test]
    fn test_blank_task_is_invalid() {
        assert!(!Task::default().is_valid());
    }

    #[test]
    fn test_filled_task_is_valid() {
        assert!(filled().is_valid());
    }

    #[test]
    fn test_padded_value_counts_as_filled() {
        let mut task = filled();
        task.source_path = " a ".to_string();
        assert!(task.is_valid());
    }

    #[test]
    fn test_whitespace_only_field_is_invalid() {
        for field in Field::ALL {
            let mut task = filled();
            task.set_field(field, "   ");
            assert!(!task.is_valid(), "{field} should fail validation");
        }
    }

    #[test]
    fn test_set_field_keeps_value_verbatim() {
        let mut task = Task::default();
        task.set_field(Field::TargetList, "  spaced  ");
        assert_eq!(task.target_list, "  spaced  ");
    }

    #[test]
    fn test_serialization_uses_contract_keys() {
        let json = serde_json::to_value(filled()).unwrap();
        assert_eq!(json["SourcePath"], "a");
        assert_eq!(json["TargetPath"], "b");
        assert_eq!(json["TargetList"], "c");
        assert_eq!(json["TargetListRelativePath"], "d");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("SourcePath".parse::<Field>().unwrap(), Field::SourcePath);
        assert_eq!(
            "targetlistrelativepath".parse::<Field>().unwrap(),
            Field::TargetListRelativePath
        );
        assert!("Settings".parse::<Field>().is_err());
    }

    #[test]
    fn test_field_display_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse::<Field>().unwrap(), field);
        }
    }
}
