use std::fmt;

use serde::{Serialize, Serializer};

/// Number of diagnosis classes the classifier distinguishes.
pub const CLASS_COUNT: usize = 6;

/// Generates the class enum with its index order, display name and the
/// 8-character code older label encoders were fitted on.
macro_rules! class_enum {
    ($name:ident { $($variant:ident => ($display:literal, $code:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every class, in classifier index order.
            pub const ALL: [$name; CLASS_COUNT] = [$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $display),+
                }
            }

            /// Truncated class code found in legacy label encoders.
            pub fn legacy_code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }
    };
}

class_enum!(ClassLabel {
    Diabetes => ("Diabetes", "Diabetes"),
    HeartDisease => ("Heart Disease", "Heart Di"),
    Healthy => ("Healthy", "Healthy"),
    Thalassemia => ("Thalassemia", "Thalasse"),
    Anemia => ("Anemia", "Anemia"),
    Thrombocytopenia => ("Thrombocytopenia", "Thromboc"),
});

impl ClassLabel {
    /// Position of this class in the classifier's probability vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Resolve a decoder class name. Accepts the display name or the legacy
    /// code, surrounding whitespace ignored. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == name || label.legacy_code() == name)
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClassLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
