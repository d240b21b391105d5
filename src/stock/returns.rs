//! Picking lifecycle operations: confirmation, validation, cancellation and
//! returns of done receipts.

use tracing::info;

use crate::config::StockConfig;
use crate::core::*;
use crate::store::Store;

/// Confirm a draft picking and its draft moves.
pub fn confirm_picking(store: &mut Store, picking: PickingId) -> Result<(), StockError> {
    let state = store.picking(picking)?.state;
    if state != PickingState::Draft {
        return Err(StockError::State(format!(
            "only draft transfers can be confirmed (state is '{}')",
            state.code()
        )));
    }
    for id in move_ids(store, picking) {
        let m = store.stock_move_mut(id)?;
        if m.state == MoveState::Draft {
            m.state = MoveState::Confirmed;
        }
    }
    store.picking_mut(picking)?.state = PickingState::Confirmed;
    Ok(())
}

/// Process an open picking: every live move is set to done.
pub fn validate_picking(store: &mut Store, picking: PickingId) -> Result<(), StockError> {
    let p = store.picking(picking)?;
    if !p.state.is_open() {
        return Err(StockError::State(format!(
            "transfer {} is already {}",
            p.name,
            p.state.code()
        )));
    }
    let live: Vec<MoveId> = store
        .picking_moves(picking)
        .into_iter()
        .filter(|m| m.state != MoveState::Cancel)
        .map(|m| m.id)
        .collect();
    if live.is_empty() {
        return Err(StockError::State(format!(
            "transfer {} has nothing to process",
            store.picking(picking)?.name
        )));
    }
    for id in live {
        store.stock_move_mut(id)?.state = MoveState::Done;
    }
    store.picking_mut(picking)?.state = PickingState::Done;
    Ok(())
}

/// Cancel a picking and its open moves. Cancelling a cancelled picking does
/// nothing; done pickings cannot be cancelled.
pub fn cancel_picking(store: &mut Store, picking: PickingId) -> Result<(), StockError> {
    let p = store.picking(picking)?;
    match p.state {
        PickingState::Cancel => return Ok(()),
        PickingState::Done => {
            return Err(StockError::State(format!(
                "you cannot cancel transfer {} which is done",
                p.name
            )));
        }
        _ => {}
    }
    let moves = store.picking_moves(picking);
    if let Some(done) = moves.iter().find(|m| m.state == MoveState::Done) {
        return Err(StockError::State(format!(
            "you cannot cancel stock move '{}' which is done",
            done.name
        )));
    }
    let ids: Vec<MoveId> = moves.iter().map(|m| m.id).collect();
    for id in ids {
        store.stock_move_mut(id)?.state = MoveState::Cancel;
    }
    store.picking_mut(picking)?.state = PickingState::Cancel;
    Ok(())
}

/// Create a return of a done picking reversing each of its non-cancelled
/// moves with the same product and quantity. Returns the new picking.
pub fn create_return(
    store: &mut Store,
    ctx: &Context,
    config: &StockConfig,
    picking: PickingId,
) -> Result<PickingId, StockError> {
    let original = store.picking(picking)?.clone();
    if original.state != PickingState::Done {
        return Err(StockError::State(format!(
            "only done transfers can be returned ({} is '{}')",
            original.name,
            original.state.code()
        )));
    }

    let moves: Vec<StockMove> = store
        .picking_moves(picking)
        .into_iter()
        .filter(|m| m.state != MoveState::Cancel)
        .cloned()
        .collect();
    if moves.is_empty() {
        return Err(StockError::State(format!(
            "transfer {} has no products to return",
            original.name
        )));
    }

    let return_type = store
        .picking_type(original.picking_type_id)?
        .return_picking_type_id
        .unwrap_or(original.picking_type_id);
    let name = store.next_picking_name(return_type, config.picking_name_padding)?;
    let origin = format!("Return of {}", original.name);

    let return_id = store.add_picking(Picking {
        id: PickingId::default(),
        name: name.clone(),
        state: PickingState::Confirmed,
        picking_type_id: return_type,
        partner_id: original.partner_id,
        date: ctx.today,
        origin: Some(origin.clone()),
        location_id: original.location_dest_id,
        location_dest_id: original.location_id,
        company_id: original.company_id,
        source_invoice: None,
        returned_picking_id: Some(original.id),
    });

    for m in moves {
        store.add_move(StockMove {
            id: MoveId::default(),
            name: m.name,
            sequence: m.sequence,
            product_id: m.product_id,
            product_uom: m.product_uom,
            product_uom_qty: m.product_uom_qty,
            date: ctx.today,
            date_expected: ctx.today,
            location_id: m.location_dest_id,
            location_dest_id: m.location_id,
            picking_id: Some(return_id),
            partner_id: m.partner_id,
            state: MoveState::Confirmed,
            invoice_line_id: None,
            company_id: m.company_id,
            price_unit: m.price_unit,
            picking_type_id: Some(return_type),
            origin: Some(origin.clone()),
            route_ids: m.route_ids,
            warehouse_id: m.warehouse_id,
            origin_returned_move_id: Some(m.id),
        });
    }

    info!(picking = %original.name, return_picking = %name, "return created");
    Ok(return_id)
}

fn move_ids(store: &Store, picking: PickingId) -> Vec<MoveId> {
    store.picking_moves(picking).into_iter().map(|m| m.id).collect()
}
