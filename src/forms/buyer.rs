//! Buyer bid form. Submission is local only.

use crate::flow::{FlowError, Notice};
use crate::utils::text_input::TextInput;
use crate::utils::validation::is_amount_char;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuyerField {
    #[default]
    Name,
    Amount,
}

impl BuyerField {
    pub fn next(self) -> Self {
        match self {
            BuyerField::Name => BuyerField::Amount,
            BuyerField::Amount => BuyerField::Name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuyerForm {
    pub name: TextInput,
    pub amount: TextInput,
    pub focus: BuyerField,
}

impl Default for BuyerForm {
    fn default() -> Self {
        Self {
            name: TextInput::new(),
            amount: TextInput::new().with_filter(is_amount_char),
            focus: BuyerField::Name,
        }
    }
}

impl BuyerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            BuyerField::Name => &mut self.name,
            BuyerField::Amount => &mut self.amount,
        }
    }

    /// Validate and produce the confirmation. No request is made.
    pub fn submit(&self) -> Result<Notice, FlowError> {
        if self.name.is_empty() || self.amount.is_empty() {
            return Err(FlowError::invalid("Error", "Please fill name and bid"));
        }
        Ok(Notice::success(
            "Bid submitted",
            format!(
                "Thank you {}, you bid ₹{} (demo)",
                self.name.text(),
                self.amount.text()
            ),
        ))
    }
}
