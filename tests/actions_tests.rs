mod common;

use common::*;
use rust_decimal_macros::dec;
use wareneingang::core::*;
use wareneingang::invoice::{
    DeliveryAction, action_view_delivery, default_picking_type, default_shipping,
    default_warehouse, onchange_partner_pricelist, onchange_warehouse,
};
use wareneingang::stock::{action_create_picking, cancel_picking};

#[test]
fn view_delivery_without_receipts_shows_all() {
    let mut fx = Fixture::new();
    let line = fx.screws_line(dec!(1));
    let bill = fx.create(fx.bill().add_line(line));

    assert_eq!(
        action_view_delivery(&fx.store, &[bill]).unwrap(),
        DeliveryAction::All
    );
}

#[test]
fn view_delivery_with_one_receipt_shows_form() {
    let mut fx = Fixture::new();
    let line = fx.screws_line(dec!(1));
    let bill = fx.create(fx.bill().add_line(line));
    let pickings = fx.approve(&[bill]).unwrap();

    assert_eq!(
        action_view_delivery(&fx.store, &[bill]).unwrap(),
        DeliveryAction::Form(pickings[0])
    );
}

#[test]
fn view_delivery_with_several_receipts_shows_list() {
    let mut fx = Fixture::new();
    let line = fx.screws_line(dec!(1));
    let bill = fx.create(fx.bill().add_line(line));
    let first = fx.approve(&[bill]).unwrap()[0];
    cancel_picking(&mut fx.store, first).unwrap();
    let second = action_create_picking(&mut fx.store, &fx.ctx, &fx.config, &[bill]).unwrap()[0];

    assert_eq!(
        action_view_delivery(&fx.store, &[bill]).unwrap(),
        DeliveryAction::List(vec![first, second])
    );
}

#[test]
fn view_delivery_spans_invoices() {
    let mut fx = Fixture::new();
    let a_line = fx.screws_line(dec!(1));
    let a = fx.create(fx.bill().add_line(a_line));
    let b_line = fx.screws_line(dec!(2));
    let b = fx.create(fx.bill().add_line(b_line));
    let pickings = fx.approve(&[a, b]).unwrap();

    match action_view_delivery(&fx.store, &[b, a, b]).unwrap() {
        DeliveryAction::List(ids) => assert_eq!(ids, pickings),
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn view_delivery_of_unknown_invoice_fails() {
    let fx = Fixture::new();
    assert!(matches!(
        action_view_delivery(&fx.store, &[InvoiceId(9999)]),
        Err(StockError::NotFound { model: "account.invoice", .. })
    ));
}

#[test]
fn delivery_count_and_picking_ids() {
    let mut fx = Fixture::new();
    let line = fx.screws_line(dec!(1));
    let bill = fx.create(fx.bill().add_line(line));
    assert_eq!(fx.store.delivery_count(bill), 0);

    let pickings = fx.approve(&[bill]).unwrap();
    assert_eq!(fx.store.delivery_count(bill), 1);
    assert_eq!(fx.pickings_of(bill)[0].id, pickings[0]);
}

#[test]
fn destination_usage_follows_receipt_type() {
    let mut fx = Fixture::new();
    let line = fx.screws_line(dec!(1));
    let bill = fx.create(fx.bill().add_line(line));
    let invoice = fx.store.invoice(bill).unwrap().clone();
    assert_eq!(
        fx.store.destination_usage(&invoice),
        Some(LocationUsage::Internal)
    );

    let customers = fx
        .store
        .add_location(Location::new("Partner Locations/Customers", LocationUsage::Customer));
    let dropship = fx.store.add_picking_type(
        PickingType::new("Dropship", PickingTypeCode::Incoming, "DS/")
            .default_source(fx.vendors)
            .default_destination(customers),
    );
    let mut invoice = invoice;
    invoice.shipping.picking_type_id = Some(dropship);
    assert_eq!(
        fx.store.destination_usage(&invoice),
        Some(LocationUsage::Customer)
    );

    invoice.shipping.picking_type_id = None;
    assert_eq!(fx.store.destination_usage(&invoice), None);
}

#[test]
fn defaults_pick_company_warehouse_and_first_receipt_type() {
    let fx = Fixture::new();
    assert_eq!(default_warehouse(&fx.store, &fx.ctx), Some(fx.wh));
    assert_eq!(default_picking_type(&fx.store), Some(fx.receipts));

    let shipping = default_shipping(&fx.store, &fx.ctx);
    assert_eq!(shipping.warehouse_id, Some(fx.wh));
    assert_eq!(shipping.picking_type_id, Some(fx.receipts));
    assert_eq!(shipping.picking_policy, PickingPolicy::Direct);
    assert!(!shipping.create_stock);
}

#[test]
fn default_warehouse_ignores_other_companies() {
    let mut fx = Fixture::new();
    let other = fx.store.add_company(Company::new("Other BV", fx.eur));
    let ctx = Context::new(other, UserId(1), date(2024, 6, 15));
    assert_eq!(default_warehouse(&fx.store, &ctx), None);
}

#[test]
fn warehouse_change_moves_invoice_to_its_company() {
    let mut fx = Fixture::new();
    let other = fx.store.add_company(Company::new("Other BV", fx.eur));
    let wh2 = fx
        .store
        .add_warehouse(Warehouse::new("Rotterdam", "RTM", other));

    let mut invoice = fx.bill().build().unwrap();
    invoice.shipping.warehouse_id = Some(wh2);
    onchange_warehouse(&fx.store, &mut invoice).unwrap();
    assert_eq!(invoice.company_id, other);

    invoice.shipping.warehouse_id = None;
    onchange_warehouse(&fx.store, &mut invoice).unwrap();
    assert_eq!(invoice.company_id, other);
}

#[test]
fn partner_change_sets_pricelist() {
    let fx = Fixture::new();
    let mut invoice = fx.bill().build().unwrap();
    assert_eq!(invoice.shipping.pricelist_id, None);

    onchange_partner_pricelist(&fx.store, &mut invoice).unwrap();
    assert_eq!(invoice.shipping.pricelist_id, Some(fx.pricelist));

    invoice.partner_id = fx.vendor_without_location;
    onchange_partner_pricelist(&fx.store, &mut invoice).unwrap();
    assert_eq!(invoice.shipping.pricelist_id, None);
}
