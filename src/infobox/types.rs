// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Instant answer payloads

use serde::{Deserialize, Serialize, Serializer};

/// Structured instant answer shown alongside search results.
///
/// Serialized with an `infotype` tag of `calc`, `definition` or `wikipedia`.
/// Absent optional fields serialize as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "infotype", rename_all = "lowercase")]
pub enum Infobox {
    /// Evaluated arithmetic expression
    Calc {
        /// Expression after operator normalization (`x` -> `*`, `^` -> `**`)
        equ: String,
        /// Evaluated value as text
        result: String,
    },

    /// Dictionary definition
    Definition {
        word: String,
        /// Part of speech
        #[serde(rename = "type")]
        part_of_speech: Option<String>,
        definition: Option<String>,
        /// Link to the dictionary entry
        url: String,
    },

    /// Encyclopedia summary
    Wikipedia {
        title: Option<String>,
        /// Summary extract
        info: Option<String>,
        /// Desktop page link
        url: Option<String>,
    },
}

impl Infobox {
    /// Value of the `infotype` tag
    pub fn infotype(&self) -> &'static str {
        match self {
            Infobox::Calc { .. } => "calc",
            Infobox::Definition { .. } => "definition",
            Infobox::Wikipedia { .. } => "wikipedia",
        }
    }
}

/// Serialize a missing infobox as the string `"null"` rather than JSON null.
///
/// Existing front ends test for that literal string.
pub fn serialize_infobox_or_null<S>(infobox: &Option<Infobox>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match infobox {
        Some(infobox) => infobox.serialize(serializer),
        None => serializer.serialize_str("null"),
    }
}
