//! QFPay command-line client
//!
//! Drives the payment and query endpoints from the shell.
//!
//! ```text
//! qfpay query <out_trade_no>...
//! qfpay pay <pay_type> <out_trade_no> <goods_name> <cents>
//! ```
//!
//! `pay_type` is a numeric code (`802001`) or a name (`fps_qr`). Codes this
//! crate does not list are sent unchanged.
//!
//! ## Environment
//!
//! - `QFPAY_APPCODE` / `QFPAY_KEY`: merchant credentials (required)
//! - `QFPAY_PREFIX`: gateway base URL (default: HK test gateway)
//! - `QFPAY_DEBUG`: dump raw requests and responses
//! - `QFPAY_TIMEOUT_SECS`: request timeout

use std::collections::HashMap;
use std::env;
use std::process;

use qfpay::{Extraction, PayType, QfPayClient, QfPayError, Result};

const USAGE: &str = "Usage:
    qfpay query <out_trade_no>...
    qfpay pay <pay_type> <out_trade_no> <goods_name> <cents>";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args).await {
        eprintln!("Error: {}", e);
        if matches!(e, QfPayError::InvalidRequest { .. }) {
            eprintln!("{}", USAGE);
        }
        process::exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    match args.split_first() {
        Some((command, rest)) if command == "query" => query(rest).await,
        Some((command, rest)) if command == "pay" => pay(rest).await,
        _ => Err(QfPayError::invalid_request("missing or unknown command")),
    }
}

async fn query(out_trade_nos: &[String]) -> Result<()> {
    if out_trade_nos.is_empty() {
        return Err(QfPayError::invalid_request("query needs at least one out_trade_no"));
    }

    let client = QfPayClient::from_env()?;
    let records = client.query(out_trade_nos).await?;

    if records.is_empty() {
        println!("No transactions found");
    }
    for record in &records {
        println!(
            "{}  syssn={}  amount={} {}  pay_type={}  paid={}",
            record.out_trade_no,
            record.syssn,
            record.txamt,
            record.txcurrcd,
            record.pay_type,
            record.paid()
        );
    }
    Ok(())
}

async fn pay(args: &[String]) -> Result<()> {
    let [pay_type, out_trade_no, goods_name, cents] = args else {
        return Err(QfPayError::invalid_request("pay takes exactly four arguments"));
    };

    // Names must be known; numeric codes are passed through as-is
    let pay_type = match pay_type.parse::<PayType>() {
        Ok(known) => known.code().to_string(),
        Err(_) if !pay_type.is_empty() && pay_type.bytes().all(|b| b.is_ascii_digit()) => {
            pay_type.clone()
        }
        Err(e) => return Err(e),
    };
    let cents: u64 = cents
        .parse()
        .map_err(|_| QfPayError::invalid_request(format!("invalid amount: {}", cents)))?;

    let client = QfPayClient::from_env()?;

    let mut qrcode = String::new();
    let mut syssn = String::new();
    client
        .make_payment(&pay_type, out_trade_no, goods_name, cents, &HashMap::new())?
        .send_into(
            Extraction::new()
                .scalar(&mut qrcode, "qrcode")
                .scalar(&mut syssn, "syssn"),
        )
        .await?;

    println!("syssn:  {}", syssn);
    println!("qrcode: {}", qrcode);
    Ok(())
}
