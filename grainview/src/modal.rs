//! Modal state: delete confirmation populated from the triggering row,
//! the reset confirm prompt, and blocking notices.

use sandtable::Element;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModalError {
    #[error("delete trigger {id} is missing its {attr} attribute")]
    MissingAttr { id: String, attr: &'static str },
}

/// The delete-confirmation modal, filled in from the button that opened it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteModal {
    pub sample_name: String,
    /// Target action path, `/delete/{id}`.
    pub action: String,
}

impl DeleteModal {
    /// Populate from the trigger element's `sample-id` / `sample-name`
    /// attributes. Both must be present; a trigger without them is a bug in
    /// the view, not user error.
    pub fn from_trigger(trigger: &Element) -> Result<Self, ModalError> {
        let missing = |attr| ModalError::MissingAttr {
            id: trigger.id.clone(),
            attr,
        };

        let sample_id = trigger
            .get_data("sample-id")
            .ok_or_else(|| missing("sample-id"))?;
        let sample_name = trigger
            .get_data("sample-name")
            .ok_or_else(|| missing("sample-name"))?;

        Ok(Self {
            sample_name: sample_name.clone(),
            action: format!("/delete/{sample_id}"),
        })
    }
}

/// Whatever is currently blocking the page, if anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Blocking notice; dismissed, never accepted.
    Notice { message: String },
    /// Reset confirmation; decline cancels the reset.
    ConfirmReset,
    /// Delete confirmation for one sample.
    Delete(DeleteModal),
}

impl Modal {
    pub fn message(&self) -> String {
        match self {
            Modal::Notice { message } => message.clone(),
            Modal::ConfirmReset => "Are you sure you want to reset the form?".to_string(),
            Modal::Delete(delete) => {
                format!("Delete sample \"{}\"? This cannot be undone.", delete.sample_name)
            }
        }
    }

    /// Whether the modal offers accept/decline (as opposed to dismiss only).
    pub fn is_confirm(&self) -> bool {
        !matches!(self, Modal::Notice { .. })
    }
}
