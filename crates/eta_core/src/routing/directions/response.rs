use serde::Deserialize;

#[derive(Deserialize)]
pub(super) struct DirectionsResponse {
    pub(super) status: String,
    #[serde(default)]
    pub(super) error_message: Option<String>,
    #[serde(default)]
    pub(super) routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
pub(super) struct DirectionsRoute {
    #[serde(default)]
    pub(super) summary: String,
    #[serde(default)]
    pub(super) legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
pub(super) struct DirectionsLeg {
    pub(super) duration: Option<TextValue>,
    pub(super) distance: Option<TextValue>,
}

/// Display text plus the raw value (seconds or metres).
#[derive(Deserialize)]
pub(super) struct TextValue {
    pub(super) text: String,
    pub(super) value: f64,
}
