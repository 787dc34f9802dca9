use serde_json::Value;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// 雷達圖上的一個情緒點
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionPoint {
    pub label: &'static str,
    pub emotion: String,
    pub intensity: f64,
}

/// 分析結果的呈現資料：情緒雷達、adorescore 指標、主題分數
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub radar: Vec<EmotionPoint>,
    pub adorescore: Option<String>,
    pub themes: Vec<(String, String)>,
    pub raw: Value,
}

impl DashboardView {
    pub fn from_result(result: &Value) -> Self {
        let mut radar = Vec::new();
        if let Some(emotions) = result.get("emotions") {
            for (key, label) in [("primary", "Primary"), ("secondary", "Secondary")] {
                if let Some(point) = emotions.get(key).and_then(|v| emotion_point(label, v)) {
                    radar.push(point);
                }
            }
        }

        let adorescore = result
            .get("adorescore")
            .and_then(|score| score.get("overall"))
            .map(|overall| format!("+{}", scalar_text(overall)));

        let themes = result
            .get("themes")
            .and_then(Value::as_object)
            .map(|themes| {
                themes
                    .iter()
                    .map(|(theme, score)| (theme.clone(), scalar_text(score)))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            radar,
            adorescore,
            themes,
            raw: result.clone(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if !self.radar.is_empty() {
            let _ = writeln!(out, "Emotions");
            for point in &self.radar {
                let filled = (point.intensity * BAR_WIDTH as f64).round() as usize;
                let _ = writeln!(
                    out,
                    "  {:<10} {:<14} {}{} {:.2}",
                    point.label,
                    point.emotion,
                    "█".repeat(filled),
                    "░".repeat(BAR_WIDTH - filled),
                    point.intensity
                );
            }
        }

        if let Some(score) = &self.adorescore {
            let _ = writeln!(out, "Adorescore  {}", score);
        }

        if !self.themes.is_empty() {
            let _ = writeln!(out, "Top Themes");
            for (theme, score) in &self.themes {
                let _ = writeln!(out, "  {}: {}", theme, score);
            }
        }

        out
    }
}

fn emotion_point(label: &'static str, value: &Value) -> Option<EmotionPoint> {
    // 空物件不畫點
    let obj = value.as_object().filter(|obj| !obj.is_empty())?;
    let emotion = obj
        .get("emotion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let intensity = obj
        .get("intensity")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    Some(EmotionPoint {
        label,
        emotion,
        intensity,
    })
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
