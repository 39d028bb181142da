//! Add-sample form: required-field validation and the reset flow.

/// One form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub required: bool,
    pub value: String,
}

impl Field {
    pub fn new(id: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required,
            value: String::new(),
        }
    }

    /// Native-constraint check: a required field must be non-blank.
    pub fn is_valid(&self) -> bool {
        !self.required || !self.value.trim().is_empty()
    }
}

/// A form with submit-time validation state.
///
/// `was_validated` mirrors the page's validation marker: set on every
/// submit attempt so invalid fields render their feedback, cleared on
/// reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormModel {
    pub fields: Vec<Field>,
    pub was_validated: bool,
}

impl FormModel {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            was_validated: false,
        }
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn field_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    pub fn check_validity(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    /// Attempt a submit. Marks the form validated either way; returns
    /// whether submission may proceed.
    pub fn submit(&mut self) -> bool {
        self.was_validated = true;
        let ok = self.check_validity();
        log::debug!("[form] submit validity={ok}");
        ok
    }

    /// Clear every field and the validation marker.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }
        self.was_validated = false;
    }
}
