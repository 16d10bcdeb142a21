// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the nilch search backend

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-instant-answers-2025-11-02";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-11-02";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "web-search",
    "video-search",
    "image-search",
    "fifo-result-cache",
    "api-key-rotation",
    "infobox-calc",
    "infobox-definition",
    "infobox-wikipedia",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("nilch search backend {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
    })
}
