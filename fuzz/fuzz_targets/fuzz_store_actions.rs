#![no_main]

use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;
use wareneingang::config::{ReceiptTypeMap, StockConfig};
use wareneingang::core::*;
use wareneingang::invoice::{RefundMode, RefundRequest, action_invoice_open, compute_refund};
use wareneingang::stock::action_create_picking;
use wareneingang::store::Store;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Arbitrary records through every action must not panic.
    let Ok(mut store) = serde_json::from_str::<Store>(s) else {
        return;
    };
    let Some(today) = NaiveDate::from_ymd_opt(2024, 6, 15) else {
        return;
    };
    let ctx = Context::new(CompanyId(1), UserId(1), today);
    let config = StockConfig::default();
    let ids: Vec<InvoiceId> = store.invoices().map(|i| i.id).collect();

    let _ = action_invoice_open(&mut store, &ctx, &config, &ids);
    let _ = action_create_picking(&mut store, &ctx, &config, &ids);
    if let Ok(map) = ReceiptTypeMap::resolve(&store, &config) {
        let request = RefundRequest::new(RefundMode::Cancel, today);
        let _ = compute_refund(&mut store, &ctx, &config, &map, &ids, &request);
    }
});
