//! Input validation helpers
//!
//! Centralized limits and checks used by the order/line handlers. Limits
//! follow reasonable UX bounds; the store does not enforce text lengths.

use crate::utils::AppError;

// ── Limits ──────────────────────────────────────────────────────────

/// Free-text annotations on a line item (kitchen notes)
pub const MAX_ANNOTATION_LEN: usize = 500;

/// Maximum quantity for a single line item
pub const MAX_QUANTITY: i64 = 9999;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate a line-item quantity: at least 1, within bounds.
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn annotation_length() {
        let ok = Some("extra rare".to_string());
        assert!(validate_optional_text(&ok, "annotation", MAX_ANNOTATION_LEN).is_ok());

        let long = Some("x".repeat(MAX_ANNOTATION_LEN + 1));
        assert!(validate_optional_text(&long, "annotation", MAX_ANNOTATION_LEN).is_err());

        assert!(validate_optional_text(&None, "annotation", MAX_ANNOTATION_LEN).is_ok());
    }
}
