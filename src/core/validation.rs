use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Validate an invoice against the constraints of its current state.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.state != InvoiceState::Draft {
        validate_shipping(&invoice.shipping, &mut errors);
    }
    validate_lines(&invoice.lines, &mut errors);

    errors
}

/// Validate an invoice that is about to leave the draft state.
pub fn validate_for_approval(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !invoice.state.is_pre_open() {
        errors.push(ValidationError::with_constraint(
            "state",
            format!(
                "only draft or pro-forma invoices can be validated (state is '{}')",
                invoice.state.code()
            ),
            "invoice_state",
        ));
    }
    validate_shipping(&invoice.shipping, &mut errors);
    validate_lines(&invoice.lines, &mut errors);

    errors
}

/// Warehouse and picking type are required once the invoice leaves draft.
fn validate_shipping(shipping: &ShippingAttributes, errors: &mut Vec<ValidationError>) {
    if shipping.warehouse_id.is_none() {
        errors.push(ValidationError::with_constraint(
            "shipping.warehouse_id",
            "a warehouse is required",
            "shipping_required",
        ));
    }
    if shipping.picking_type_id.is_none() {
        errors.push(ValidationError::with_constraint(
            "shipping.picking_type_id",
            "a receipt operation type (Deliver To) is required",
            "shipping_required",
        ));
    }
}

fn validate_lines(lines: &[InvoiceLine], errors: &mut Vec<ValidationError>) {
    for (i, line) in lines.iter().enumerate() {
        if line.name.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("lines[{i}].name"),
                "line description must not be empty",
            ));
        }
        if line.quantity < Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("lines[{i}].quantity"),
                format!("quantity {} must not be negative", line.quantity),
            ));
        }
        if line.uom_id.is_some() && line.product_id.is_none() {
            errors.push(ValidationError::new(
                format!("lines[{i}].uom_id"),
                "a unit of measure requires a product",
            ));
        }
    }
}
