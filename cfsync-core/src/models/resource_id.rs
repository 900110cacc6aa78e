//! Persisted external identifiers.
//!
//! Content type: `{space}/{env}/{id}`.
//! Editor interface: `{space}/{env}/{id}/editor_interface`.

use std::fmt;
use std::str::FromStr;

use crate::constants::{EDITOR_INTERFACE_SUFFIX, ID_SEPARATOR};
use crate::errors::CfsyncError;

/// Identity of a content type. `env_id` may be empty, meaning the
/// configured default environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentTypeId {
    pub space_id: String,
    pub env_id: String,
    pub content_type_id: String,
}

/// Identity of the editor interface attached to a content type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditorInterfaceId {
    pub space_id: String,
    pub env_id: String,
    pub content_type_id: String,
}

impl ContentTypeId {
    pub fn new(
        space_id: impl Into<String>,
        env_id: impl Into<String>,
        content_type_id: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            env_id: env_id.into(),
            content_type_id: content_type_id.into(),
        }
    }

    /// The editor interface that belongs to this content type.
    pub fn editor_interface(&self) -> EditorInterfaceId {
        EditorInterfaceId {
            space_id: self.space_id.clone(),
            env_id: self.env_id.clone(),
            content_type_id: self.content_type_id.clone(),
        }
    }
}

impl EditorInterfaceId {
    pub fn new(
        space_id: impl Into<String>,
        env_id: impl Into<String>,
        content_type_id: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            env_id: env_id.into(),
            content_type_id: content_type_id.into(),
        }
    }
}

fn invalid(id: &str) -> CfsyncError {
    CfsyncError::InvalidId { id: id.to_string() }
}

impl FromStr for ContentTypeId {
    type Err = CfsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(ID_SEPARATOR).collect();
        match parts.as_slice() {
            [space, env, id] => Ok(Self::new(*space, *env, *id)),
            _ => Err(invalid(s)),
        }
    }
}

impl FromStr for EditorInterfaceId {
    type Err = CfsyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(ID_SEPARATOR).collect();
        match parts.as_slice() {
            [space, env, id, suffix] if *suffix == EDITOR_INTERFACE_SUFFIX => {
                Ok(Self::new(*space, *env, *id))
            }
            _ => Err(invalid(s)),
        }
    }
}

impl fmt::Display for ContentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.space_id,
            self.env_id,
            self.content_type_id,
            sep = ID_SEPARATOR
        )
    }
}

impl fmt::Display for EditorInterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.space_id,
            self.env_id,
            self.content_type_id,
            EDITOR_INTERFACE_SUFFIX,
            sep = ID_SEPARATOR
        )
    }
}
