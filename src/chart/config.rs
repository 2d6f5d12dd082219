/// Fixed visual conventions shared by every weekly chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Y axis range in mmol/L
    pub y_min: f64,
    pub y_max: f64,

    /// Target range band
    pub target_low: f64,
    pub target_high: f64,
    pub band_color: String,

    pub y_label: String,
    pub title_prefix: String,

    /// Figure size in centimetres
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            y_min: 0.0,
            y_max: 25.0,
            target_low: 3.9,
            target_high: 10.0,
            band_color: "lightgray".into(),
            y_label: "Glukose [mmol/L]".into(),
            title_prefix: "Kalenderwoche".into(),
            width_cm: 18.0,
            height_cm: 5.0,
        }
    }
}
