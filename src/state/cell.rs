use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    #[default]
    Text,
    Number,
    Status,
    Priority,
    Date,
    Url,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    #[serde(default)]
    pub kind: CellKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    InProgress,
    NotStarted,
    Complete,
    Blocked,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityTone {
    High,
    Medium,
    Low,
    Neutral,
}

const STATUS_LITERALS: &[&str] = &["in progress", "need to start", "pending", "complete", "blocked"];
const PRIORITY_LITERALS: &[&str] = &["high", "medium", "low"];

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Null and the empty string both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Interprets committed editor input: blank becomes `Empty`, numeric text becomes `Number`.
    pub fn from_input(input: &str) -> Self {
        if input.is_empty() {
            return CellValue::Empty;
        }
        match input.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(input.to_string()),
        }
    }
}

impl Cell {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(value: CellValue, kind: CellKind) -> Self {
        Self { value, kind }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(CellValue::text(value), CellKind::Text)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn display(&self) -> String {
        display_value(&self.value)
    }

    pub fn classify(&self) -> CellKind {
        classify(&self.value, self.kind)
    }
}

/// Formats a cell value for display in the grid.
pub fn display_value(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
        CellValue::Number(n) => n.to_string(),
    }
}

/// Resolves the presentation kind of a value. A declared rich kind wins; plain text is
/// sniffed for URLs, status and priority literals.
pub fn classify(value: &CellValue, declared: CellKind) -> CellKind {
    match value {
        CellValue::Empty => declared,
        CellValue::Number(_) => match declared {
            CellKind::Text => CellKind::Number,
            other => other,
        },
        CellValue::Text(text) => {
            if !matches!(declared, CellKind::Text | CellKind::Number) {
                return declared;
            }
            let lower = text.trim().to_lowercase();
            if is_url(text) {
                CellKind::Url
            } else if STATUS_LITERALS.contains(&lower.as_str()) {
                CellKind::Status
            } else if PRIORITY_LITERALS.contains(&lower.as_str()) {
                CellKind::Priority
            } else {
                CellKind::Text
            }
        }
    }
}

pub fn status_tone(value: &str) -> StatusTone {
    match value.trim().to_lowercase().as_str() {
        "in progress" => StatusTone::InProgress,
        "need to start" | "pending" => StatusTone::NotStarted,
        "complete" => StatusTone::Complete,
        "blocked" => StatusTone::Blocked,
        _ => StatusTone::Neutral,
    }
}

pub fn priority_tone(value: &str) -> PriorityTone {
    match value.trim().to_lowercase().as_str() {
        "high" => PriorityTone::High,
        "medium" => PriorityTone::Medium,
        "low" => PriorityTone::Low,
        _ => PriorityTone::Neutral,
    }
}

fn is_url(text: &str) -> bool {
    let text = text.trim();
    ["http://", "https://"].iter().any(|scheme| {
        match (text.get(..scheme.len()), text.get(scheme.len()..)) {
            (Some(prefix), Some(rest)) => {
                prefix.eq_ignore_ascii_case(scheme)
                    && !rest.is_empty()
                    && !rest.contains(char::is_whitespace)
            }
            _ => false,
        }
    })
}
