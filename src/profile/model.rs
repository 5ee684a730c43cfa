use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::ParseError;

/// The profile of a Minecraft user account.
///
/// `name_history` and `properties` are loaded lazily: `None` means "not loaded
/// yet", while `Some(vec![])` means the profile is known to have no past names.
/// Fields change only through the `load_*` methods, which replace them wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: String,
    name: String,
    name_history: Option<Vec<PastName>>,
    properties: Option<Properties>,
}

impl Profile {
    /// Creates a profile with nothing lazily loaded yet.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            name_history: None,
            properties: None,
        }
    }

    /// Attaches an already known name history.
    #[must_use]
    pub fn with_name_history(mut self, history: Vec<PastName>) -> Self {
        self.name_history = Some(history);
        self
    }

    /// Attaches already known properties.
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Universally unique profile ID, 32 hex digits without dashes.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Currently associated username.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Past usernames, earliest superseded first. `None` unless loaded.
    pub fn name_history(&self) -> Option<&[PastName]> {
        self.name_history.as_deref()
    }

    /// Skin, cape and model of the profile. `None` unless loaded.
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    pub(crate) fn set_identity(&mut self, id: String, name: String) {
        self.id = id;
        self.name = name;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_name_history(&mut self, history: Option<Vec<PastName>>) {
        self.name_history = history;
    }

    pub(crate) fn set_properties(&mut self, properties: Option<Properties>) {
        self.properties = properties;
    }

    pub(crate) fn into_parts(self) -> (String, String, Option<Vec<PastName>>, Option<Properties>) {
        (self.id, self.name, self.name_history, self.properties)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One of a profile's past usernames.
///
/// Equality compares the name and the instant `until` denotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastName {
    /// A username used by the profile in the past.
    pub name: String,
    /// When the profile stopped using `name`. `None` if unknown.
    pub until: Option<DateTime<Utc>>,
}

impl PastName {
    pub fn new(name: impl Into<String>, until: Option<DateTime<Utc>>) -> Self {
        Self {
            name: name.into(),
            until,
        }
    }
}

impl fmt::Display for PastName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Cosmetic information associated with a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    /// URL of the custom skin texture. `None` means the default skin of `model`.
    pub skin_url: Option<String>,
    /// URL of the cape texture. `None` means the profile has no cape.
    pub cape_url: Option<String>,
    /// The player model. Derived from the profile ID when not set explicitly.
    pub model: Model,
}

/// The player model type used by a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    /// Classic player model.
    #[default]
    Steve,
    /// Slim-armed player model.
    Alex,
}

impl Model {
    /// The model the game picks for `id` when a profile has no custom skin.
    ///
    /// `id` must be 32 lowercase hex digits. The result equals the parity of
    /// Java's `UUID.hashCode()`, which is what the game uses: the low bits of
    /// the digits at positions 7, 15, 23 and 31 are XORed together, and an odd
    /// result selects `Alex`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidIdDigit`] if `id` contains anything but
    /// `0-9a-f`, and [`ParseError::UnknownFormat`] if it is not 32 digits long.
    pub fn for_id(id: &str) -> Result<Self, ParseError> {
        let mut bits = [0u8; 32];
        let mut len = 0;
        for c in id.chars() {
            let v = match c {
                '0'..='9' => c as u8 - b'0',
                'a'..='f' => c as u8 - b'a' + 10,
                _ => {
                    return Err(ParseError::InvalidIdDigit {
                        id: id.to_string(),
                        digit: c,
                    });
                }
            };
            if len < bits.len() {
                bits[len] = v & 1;
            }
            len += 1;
        }
        if len != bits.len() {
            return Err(ParseError::UnknownFormat(format!(
                "profile ID {id:?} is not 32 hex digits"
            )));
        }

        let a = bits[7] ^ bits[7 + 16];
        let b = bits[15] ^ bits[15 + 16];
        Ok(if a ^ b == 1 { Self::Alex } else { Self::Steve })
    }

    /// File name of the default skin texture for this model.
    pub fn default_skin_file(self) -> &'static str {
        match self {
            Self::Steve => "steve.png",
            Self::Alex => "alex.png",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Steve => "Steve",
            Self::Alex => "Alex",
        })
    }
}
