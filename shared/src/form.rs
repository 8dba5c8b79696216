use thiserror::Error;

use crate::currency::{decode_display, encode_keystroke, format_value, round_cents};
use crate::NewMovement;

pub const DESCRIPTION_MAX_CHARS: usize = 50;
pub const MIN_YEAR: i32 = 1900;
pub const MIN_AMOUNT: f64 = 0.01;

/// Form field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Month,
    Year,
    Product,
    Classification,
    Amount,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Mês é obrigatório")]
    MonthRequired,
    #[error("Mês deve estar entre 1 e 12 (recebido {0})")]
    MonthOutOfRange(i32),
    #[error("Ano é obrigatório")]
    YearRequired,
    #[error("Ano deve ser 1900 ou posterior (recebido {got})")]
    YearTooEarly { got: i32 },
    #[error("Produto é obrigatório")]
    ProductRequired,
    #[error("Cosif é obrigatório")]
    ClassificationRequired,
    #[error("Valor é obrigatório")]
    AmountRequired,
    #[error("Valor deve ser no mínimo 0,01")]
    AmountTooSmall,
    #[error("Descrição é obrigatória")]
    DescriptionRequired,
    #[error("Descrição deve ter no máximo {max} caracteres (recebido {len})")]
    DescriptionTooLong { len: usize, max: usize },
}

impl FieldError {
    pub fn field(&self) -> FormField {
        match self {
            FieldError::MonthRequired | FieldError::MonthOutOfRange(_) => FormField::Month,
            FieldError::YearRequired | FieldError::YearTooEarly { .. } => FormField::Year,
            FieldError::ProductRequired => FormField::Product,
            FieldError::ClassificationRequired => FormField::Classification,
            FieldError::AmountRequired | FieldError::AmountTooSmall => FormField::Amount,
            FieldError::DescriptionRequired | FieldError::DescriptionTooLong { .. } => FormField::Description,
        }
    }
}

/// Masked amount input: the text shown and the number it stands for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountField {
    pub display: String,
    pub value: Option<f64>,
}

impl AmountField {
    /// Canonical amount, re-read from the display text when there is one.
    pub fn reconciled(&self) -> Option<f64> {
        if self.display.is_empty() {
            self.value
        } else {
            Some(decode_display(&self.display))
        }
    }
}

/// State of the movement entry form.
///
/// Starts read-only. "Novo" enables it with the current period preset; the
/// COSIF field only becomes editable once the selected product's
/// classifications have loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovementForm {
    pub month: Option<i32>,
    pub year: Option<i32>,
    pub product_code: String,
    pub classification_code: String,
    pub amount: AmountField,
    pub description: String,
    enabled: bool,
    classification_enabled: bool,
    touched: bool,
}

impl MovementForm {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_classification_enabled(&self) -> bool {
        self.enabled && self.classification_enabled
    }

    /// Whether errors should be shown (set after a rejected submit).
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Start a new entry for the given period.
    pub fn enable_editing(&mut self, month: u32, year: i32) {
        self.reset();
        self.enabled = true;
        self.classification_enabled = false;
        self.month = i32::try_from(month).ok();
        self.year = Some(year);
    }

    pub fn disable_editing(&mut self) {
        self.enabled = false;
        self.classification_enabled = false;
    }

    /// Clear every value and the touched flag. Enablement is unchanged.
    pub fn reset(&mut self) {
        self.month = None;
        self.year = None;
        self.product_code.clear();
        self.classification_code.clear();
        self.amount = AmountField::default();
        self.description.clear();
        self.touched = false;
    }

    /// Reset and make read-only again.
    pub fn clear(&mut self) {
        self.reset();
        self.disable_editing();
    }

    pub fn set_month_input(&mut self, raw: &str) {
        if self.enabled {
            self.month = parse_number(raw);
        }
    }

    pub fn set_year_input(&mut self, raw: &str) {
        if self.enabled {
            self.year = parse_number(raw);
        }
    }

    /// Select a product. The classification is cleared and stays locked
    /// until [`classifications_loaded`](Self::classifications_loaded) is
    /// called for this product.
    pub fn select_product(&mut self, code: &str) {
        if !self.enabled {
            return;
        }
        self.product_code = code.to_string();
        self.classification_code.clear();
        self.classification_enabled = false;
    }

    /// Unlock the classification field if `product_code` is still the
    /// selected product. Returns false for a stale response.
    pub fn classifications_loaded(&mut self, product_code: &str) -> bool {
        if !self.enabled || product_code.is_empty() || self.product_code != product_code {
            return false;
        }
        self.classification_enabled = true;
        true
    }

    pub fn set_classification(&mut self, code: &str) {
        if self.is_classification_enabled() {
            self.classification_code = code.to_string();
        }
    }

    /// Feed the raw text of the amount input through the currency mask.
    pub fn set_amount_input(&mut self, raw: &str) {
        if !self.enabled {
            return;
        }
        let masked = encode_keystroke(raw);
        self.amount = AmountField {
            display: masked.display,
            value: Some(masked.value),
        };
    }

    /// Put a known amount (e.g. from the server) into the amount field.
    pub fn load_amount(&mut self, value: Option<f64>) {
        let value = round_cents(value.filter(|v| v.is_finite()).unwrap_or(0.0));
        self.amount = AmountField {
            display: format_value(Some(value)),
            value: Some(value),
        };
    }

    pub fn set_description(&mut self, text: &str) {
        if self.enabled {
            self.description = text.to_string();
        }
    }

    /// Check every field and build the request body.
    pub fn validate(&self) -> Result<NewMovement, Vec<FieldError>> {
        let mut errors = Vec::new();

        let month = match self.month {
            None => {
                errors.push(FieldError::MonthRequired);
                None
            }
            Some(m) if !(1..=12).contains(&m) => {
                errors.push(FieldError::MonthOutOfRange(m));
                None
            }
            Some(m) => u32::try_from(m).ok(),
        };

        let year = match self.year {
            None => {
                errors.push(FieldError::YearRequired);
                None
            }
            Some(y) if y < MIN_YEAR => {
                errors.push(FieldError::YearTooEarly { got: y });
                None
            }
            Some(y) => Some(y),
        };

        if self.product_code.is_empty() {
            errors.push(FieldError::ProductRequired);
        }
        if self.classification_code.is_empty() {
            errors.push(FieldError::ClassificationRequired);
        }

        let amount = match self.amount.reconciled() {
            None => {
                errors.push(FieldError::AmountRequired);
                None
            }
            Some(a) if round_cents(a) < MIN_AMOUNT => {
                errors.push(FieldError::AmountTooSmall);
                None
            }
            Some(a) => Some(round_cents(a)),
        };

        let description_len = self.description.chars().count();
        if self.description.is_empty() {
            errors.push(FieldError::DescriptionRequired);
        } else if description_len > DESCRIPTION_MAX_CHARS {
            errors.push(FieldError::DescriptionTooLong {
                len: description_len,
                max: DESCRIPTION_MAX_CHARS,
            });
        }

        match (month, year, amount) {
            (Some(month), Some(year), Some(amount)) if errors.is_empty() => Ok(NewMovement {
                month,
                year,
                product_code: self.product_code.clone(),
                classification_code: self.classification_code.clone(),
                amount,
                description: self.description.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// Validate for submission; a rejected form is marked touched.
    pub fn submit(&mut self) -> Result<NewMovement, Vec<FieldError>> {
        let result = self.validate();
        if result.is_err() {
            self.touched = true;
        }
        result
    }

    /// Errors to show next to `field`, empty until the form is touched.
    pub fn errors_for(&self, field: FormField) -> Vec<FieldError> {
        if !self.touched {
            return Vec::new();
        }
        match self.validate() {
            Ok(_) => Vec::new(),
            Err(errors) => errors.into_iter().filter(|e| e.field() == field).collect(),
        }
    }
}

fn parse_number(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}
