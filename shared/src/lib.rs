use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod currency;
pub mod filter;
pub mod form;
pub mod view;

pub use currency::{decode_display, encode_keystroke, format_value, MaskedAmount};
pub use filter::{filter_movements, FilterCriteria};
pub use form::{AmountField, FieldError, FormField, MovementForm};
pub use view::MovementView;

/// A month or year as it arrives on the wire.
///
/// The backend is not consistent about sending these as numbers, so both
/// shapes are accepted and compared numerically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodValue {
    Number(f64),
    Text(String),
}

impl PeriodValue {
    /// Loose numeric conversion: blank text is 0, text that is not a number is NaN.
    pub fn as_number(&self) -> f64 {
        match self {
            PeriodValue::Number(n) => *n,
            PeriodValue::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else if text.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
                    f64::NAN
                } else {
                    text.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
        }
    }

    /// Whether this value constrains anything. Zero, NaN and empty text do not.
    pub fn is_set(&self) -> bool {
        match self {
            PeriodValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PeriodValue::Text(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for PeriodValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodValue::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            PeriodValue::Number(n) => write!(f, "{}", n),
            PeriodValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i32> for PeriodValue {
    fn from(value: i32) -> Self {
        PeriodValue::Number(f64::from(value))
    }
}

impl From<u32> for PeriodValue {
    fn from(value: u32) -> Self {
        PeriodValue::Number(f64::from(value))
    }
}

impl From<&str> for PeriodValue {
    fn from(value: &str) -> Self {
        PeriodValue::Text(value.to_string())
    }
}

/// A manual ledger movement as returned by `GET /movimentos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    #[serde(rename = "mes")]
    pub month: PeriodValue,
    #[serde(rename = "ano")]
    pub year: PeriodValue,
    #[serde(rename = "codProduto", alias = "codigoProduto", default, deserialize_with = "null_as_default")]
    pub product_code: String,
    /// COSIF code for the product
    #[serde(rename = "codCosif", alias = "descricaoProduto", default, deserialize_with = "null_as_default")]
    pub classification_code: String,
    #[serde(rename = "valor", default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(rename = "descricao", default, deserialize_with = "null_as_default")]
    pub description: String,

    // Assigned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "numLancamento", alias = "nrLancamento", default, skip_serializing_if = "Option::is_none")]
    pub entry_number: Option<i64>,
    #[serde(rename = "codUsuario", default, skip_serializing_if = "Option::is_none")]
    pub user_code: Option<String>,
    #[serde(rename = "dataMovimento", alias = "datMovimento", default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

impl Movement {
    /// Amount rendered for display, e.g. `1.500,50`
    pub fn formatted_amount(&self) -> String {
        format_value(Some(self.amount))
    }

    /// Period as `MM/YYYY`
    pub fn period_label(&self) -> String {
        let month = self.month.as_number();
        if month.is_finite() && month.fract() == 0.0 {
            format!("{:02}/{}", month as i64, self.year)
        } else {
            format!("{}/{}", self.month, self.year)
        }
    }

    pub fn formatted_recorded_at(&self) -> String {
        self.recorded_at
            .as_deref()
            .map(format_recorded_at)
            .unwrap_or_default()
    }
}

/// Body of `POST /movimentos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMovement {
    #[serde(rename = "mes")]
    pub month: u32,
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "codProduto")]
    pub product_code: String,
    #[serde(rename = "codCosif")]
    pub classification_code: String,
    /// Always positive, rounded to cents
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "descricao")]
    pub description: String,
}

/// Product offered by `GET /produtos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "codProduto")]
    pub code: String,
    #[serde(rename = "desProduto", default)]
    pub description: String,
    #[serde(alias = "staStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// COSIF classification of a product, from `GET /produtos/{code}/cosifs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cosif {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "codProduto", default)]
    pub product_code: String,
    #[serde(rename = "codCosif")]
    pub code: String,
    #[serde(rename = "codClassificacao", default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(alias = "staStatus", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Format a server timestamp as `dd/mm/yyyy HH:MM`, or return it untouched
/// when it is not a timestamp we recognise.
pub fn format_recorded_at(raw: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y %H:%M";

    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(raw) {
        return datetime.format(DISPLAY).to_string();
    }
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.format(DISPLAY).to_string();
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) fn movement(month: impl Into<PeriodValue>, year: impl Into<PeriodValue>, description: &str) -> Movement {
    Movement {
        month: month.into(),
        year: year.into(),
        product_code: "0001".to_string(),
        classification_code: "7111".to_string(),
        amount: 10.0,
        description: description.to_string(),
        id: None,
        entry_number: None,
        user_code: None,
        recorded_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_value_coercion() {
        assert_eq!(PeriodValue::from(3).as_number(), 3.0);
        assert_eq!(PeriodValue::from("3").as_number(), 3.0);
        assert_eq!(PeriodValue::from(" 2024 ").as_number(), 2024.0);
        assert_eq!(PeriodValue::from("").as_number(), 0.0);
        assert!(PeriodValue::from("marco").as_number().is_nan());
        assert!(PeriodValue::from("inf").as_number().is_nan());
    }

    #[test]
    fn test_period_value_is_set() {
        assert!(PeriodValue::from(3).is_set());
        assert!(PeriodValue::from("0").is_set());
        assert!(!PeriodValue::from(0).is_set());
        assert!(!PeriodValue::Number(f64::NAN).is_set());
        assert!(!PeriodValue::from("").is_set());
    }

    #[test]
    fn test_decode_movement_from_api() {
        let json = r#"{
            "mes": 3,
            "ano": "2024",
            "codProduto": "0001",
            "codCosif": "7111",
            "valor": 1500.5,
            "descricao": "Ajuste manual",
            "id": 7,
            "numLancamento": 12,
            "codUsuario": "TESTE",
            "dataMovimento": "2024-03-15T10:30:00"
        }"#;

        let movement: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(movement.month, PeriodValue::Number(3.0));
        assert_eq!(movement.year, PeriodValue::Text("2024".to_string()));
        assert_eq!(movement.product_code, "0001");
        assert_eq!(movement.classification_code, "7111");
        assert_eq!(movement.entry_number, Some(12));
        assert_eq!(movement.user_code.as_deref(), Some("TESTE"));
        assert_eq!(movement.formatted_amount(), "1.500,50");
        assert_eq!(movement.period_label(), "03/2024");
        assert_eq!(movement.formatted_recorded_at(), "15/03/2024 10:30");
    }

    #[test]
    fn test_decode_movement_alternate_names_and_nulls() {
        let json = r#"{
            "mes": 1,
            "ano": 2023,
            "codigoProduto": "0002",
            "descricaoProduto": "8222",
            "valor": null,
            "descricao": null,
            "nrLancamento": 4,
            "datMovimento": null
        }"#;

        let movement: Movement = serde_json::from_str(json).unwrap();
        assert_eq!(movement.product_code, "0002");
        assert_eq!(movement.classification_code, "8222");
        assert_eq!(movement.amount, 0.0);
        assert_eq!(movement.description, "");
        assert_eq!(movement.entry_number, Some(4));
        assert_eq!(movement.recorded_at, None);
        assert_eq!(movement.formatted_recorded_at(), "");
    }

    #[test]
    fn test_new_movement_wire_names() {
        let payload = NewMovement {
            month: 3,
            year: 2024,
            product_code: "0001".to_string(),
            classification_code: "7111".to_string(),
            amount: 12.34,
            description: "Ajuste".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["mes"], 3);
        assert_eq!(value["ano"], 2024);
        assert_eq!(value["codProduto"], "0001");
        assert_eq!(value["codCosif"], "7111");
        assert_eq!(value["valor"], 12.34);
        assert_eq!(value["descricao"], "Ajuste");
    }

    #[test]
    fn test_decode_catalog() {
        let products: Vec<Product> = serde_json::from_str(
            r#"[{"codProduto":"0001","desProduto":"Renda Fixa","staStatus":"A"}]"#,
        )
        .unwrap();
        assert_eq!(products[0].code, "0001");
        assert_eq!(products[0].description, "Renda Fixa");
        assert_eq!(products[0].status.as_deref(), Some("A"));

        let cosifs: Vec<Cosif> = serde_json::from_str(
            r#"[{"id":1,"codProduto":"0001","codCosif":"7111","codClassificacao":"X1","status":"A"}]"#,
        )
        .unwrap();
        assert_eq!(cosifs[0].code, "7111");
        assert_eq!(cosifs[0].classification.as_deref(), Some("X1"));
    }

    #[test]
    fn test_format_recorded_at() {
        assert_eq!(format_recorded_at("2024-03-15T10:30:00Z"), "15/03/2024 10:30");
        assert_eq!(format_recorded_at("2024-03-15T10:30:00.123"), "15/03/2024 10:30");
        assert_eq!(format_recorded_at("2024-03-15"), "15/03/2024");
        assert_eq!(format_recorded_at("ontem"), "ontem");
    }

    #[test]
    fn test_period_label_with_text_month() {
        let movement = movement("x", 2024, "Ajuste");
        assert_eq!(movement.period_label(), "x/2024");
    }
}
