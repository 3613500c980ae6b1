use serde_json::{json, Value};

const DEFAULT_FALLBACK_TITLES: [&str; 5] = [
    "HTML/CSS",
    "HTML 5 API",
    "Web-компоненты",
    "Введение в фреймворки",
    "Основы UX/UI",
];

/// Read-only knobs for one synthesis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub target_per_day: usize,
    pub max_attempts: usize,
    pub fallback_titles: Vec<String>,
    pub group_prefix: String,
    pub group_variants: usize,
    pub room_base: u32,
    pub room_span: usize,
    pub days_per_week: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            target_per_day: 3,
            max_attempts: 30,
            fallback_titles: DEFAULT_FALLBACK_TITLES.iter().map(|s| s.to_string()).collect(),
            group_prefix: "Группа 22-FT-".to_string(),
            group_variants: 3,
            room_base: 1200,
            room_span: 400,
            days_per_week: 6,
        }
    }
}

impl GridConfig {
    /// Persisted shape of the `setup.schedule` section.
    pub fn to_setup_json(&self) -> Value {
        json!({
            "targetPerDay": self.target_per_day,
            "maxAttempts": self.max_attempts,
            "fallbackTitles": self.fallback_titles,
            "daysPerWeek": self.days_per_week,
        })
    }

    /// Overlay a saved `setup.schedule` object. Out-of-range or malformed
    /// fields keep their defaults.
    pub fn from_setup_json(saved: Option<&Value>) -> Self {
        let mut cfg = Self::default();
        let Some(obj) = saved.and_then(|v| v.as_object()) else {
            return cfg;
        };
        if let Some(n) = obj
            .get("targetPerDay")
            .and_then(|v| v.as_u64())
            .filter(|n| *n <= 8)
        {
            cfg.target_per_day = n as usize;
        }
        if let Some(n) = obj
            .get("maxAttempts")
            .and_then(|v| v.as_u64())
            .filter(|n| (1..=500).contains(n))
        {
            cfg.max_attempts = n as usize;
        }
        if let Some(n) = obj
            .get("daysPerWeek")
            .and_then(|v| v.as_u64())
            .filter(|n| (1..=7).contains(n))
        {
            cfg.days_per_week = n as usize;
        }
        if let Some(arr) = obj.get("fallbackTitles").and_then(|v| v.as_array()) {
            let titles: Vec<String> = arr
                .iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !titles.is_empty() {
                cfg.fallback_titles = titles;
            }
        }
        cfg
    }
}
