//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, XlsxError};
use salvo::{affix_state::inject, prelude::*, test::TestClient};

use inventory_app::{
    context::AppContext,
    domain::products::{
        MockProductsService,
        import::ImportPolicy,
        records::{ProductRecord, ProductUuid},
    },
};

use crate::{
    csrf::{CSRF_HEADER, KEY_LEN},
    state::State,
};

pub(crate) const TEST_CSRF_KEY: [u8; KEY_LEN] = *b"inventory-test-csrf-key-32-bytes";

const BOUNDARY: &str = "inventory-test-boundary";

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    State::new(
        AppContext {
            products: Arc::new(products),
        },
        ImportPolicy::default(),
    )
    .shared()
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .push(route),
    )
}

/// What a client must send back on a mutating request.
#[derive(Debug)]
pub(crate) struct CsrfCredentials {
    pub(crate) cookie: String,
    pub(crate) token: String,
}

/// Makes a fresh client's first request and keeps the token and cookie it was issued.
pub(crate) async fn csrf_credentials(
    service: &Service,
    url: &str,
) -> Result<CsrfCredentials, &'static str> {
    let res = TestClient::get(url).send(service).await;

    let token = res
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .ok_or("response carried no csrf token")?;

    let cookie = res
        .cookies()
        .iter()
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value()))
        .collect::<Vec<_>>()
        .join("; ");

    if cookie.is_empty() {
        return Err("response set no csrf cookie");
    }

    Ok(CsrfCredentials { cookie, token })
}

/// Pen, 1.5, 100 in stock, active.
pub(crate) fn make_product(name: &str) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        price: Decimal::new(15, 1),
        stock: 100,
        status: "active".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

/// A single-sheet workbook; cells that parse as numbers are written as numbers.
pub(crate) fn workbook(rows: &[&[&str]]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (row, cells) in (0u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(cells.iter()) {
            if cell.is_empty() {
                continue;
            }

            match cell.parse::<f64>() {
                Ok(number) => worksheet.write_number(row, col, number)?,
                Err(_) => worksheet.write_string(row, col, *cell)?,
            };
        }
    }

    workbook.save_to_buffer()
}

/// `multipart/form-data` body with one file field, plus its content type.
pub(crate) fn multipart_upload(field: &str, filename: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();

    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
